// crates/feed-parser/examples/parse_feed.rs
//! Example of parsing RSS 2.0 and RSS 1.0 feeds
//!
//! Run with: cargo run --example parse_feed [path/to/feed.xml]

use syndic_feed_parser::{parse_from_bytes, parse_from_file, release, Feed};

fn main() {
    env_logger::init();

    if let Some(path) = std::env::args().nth(1) {
        match parse_from_file(&path) {
            Ok(feed) => {
                print_feed(&feed);
                release(feed);
            }
            Err(e) => eprintln!("Skipping {}: {}", path, e),
        }
        return;
    }

    println!("=== Feed Parser Demo ===\n");

    println!("Example 1: RSS 2.0 Feed");
    println!("{}", "=".repeat(60));
    parse_example(RSS2);

    println!("\n");

    println!("Example 2: RSS 1.0 (RDF) Feed");
    println!("{}", "=".repeat(60));
    parse_example(RDF);

    println!("\n");

    println!("Example 3: Sorting by date");
    println!("{}", "=".repeat(60));
    sort_example();
}

const RSS2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Classic Audiobooks</title>
    <description>Public domain audiobooks read by volunteers</description>
    <link>https://example.com/audiobooks</link>
    <language>en</language>
    <ttl>120</ttl>

    <item>
      <title>Pride and Prejudice - Chapter 1</title>
      <description>By Jane Austen. Read by volunteer narrator.</description>
      <link>https://example.com/pride-ch1</link>
      <guid>pride-ch1</guid>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
    </item>

    <item>
      <title>Moby Dick - Chapter 1: Loomings</title>
      <description>By Herman Melville. Call me Ishmael...</description>
      <category>Adventure</category>
      <pubDate>Wed, 03 Jan 2024 12:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

const RDF: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/">
  <channel rdf:about="https://example.com/news">
    <title>Example News</title>
    <link>https://example.com/news</link>
    <description>Headlines in RSS 1.0</description>
  </channel>
  <item rdf:about="https://example.com/news/1">
    <title>First headline</title>
    <link>https://example.com/news/1</link>
  </item>
  <item rdf:about="https://example.com/news/2">
    <title>Second headline</title>
    <link>https://example.com/news/2</link>
  </item>
</rdf:RDF>"#;

fn parse_example(xml: &str) {
    match parse_from_bytes(xml.as_bytes()) {
        Ok(feed) => {
            print_feed(&feed);
            release(feed);
        }
        Err(e) => eprintln!("Error parsing feed: {}", e),
    }
}

fn print_feed(feed: &Feed) {
    println!("Format: {}", feed.version());
    println!("Feed: {}", feed.title().unwrap_or("(untitled)"));

    if let Some(desc) = feed.description() {
        println!("Description: {}", desc);
    }
    if let Some(link) = feed.link() {
        println!("Link: {}", link);
    }
    if let Some(ttl) = feed.ttl_minutes() {
        println!("Refresh every {} minutes", ttl);
    }

    println!("\nItems ({}):", feed.item_count());
    for (i, item) in feed.items().iter().enumerate() {
        println!("  {}. {}", i + 1, item.title().unwrap_or("(untitled)"));
        if let Some(link) = item.link() {
            println!("     Link: {}", link);
        }
        if let Some(category) = item.category() {
            println!("     Category: {}", category);
        }
        if let Some(date) = item.published() {
            println!("     Published: {}", date.format("%Y-%m-%d %H:%M"));
        }
    }
}

fn sort_example() {
    let mut feed = match parse_from_bytes(RSS2.as_bytes()) {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error parsing feed: {}", e);
            return;
        }
    };

    feed.sort_by_date();
    println!("Newest first:");
    for item in feed.items() {
        println!(
            "  {} ({})",
            item.title().unwrap_or("(untitled)"),
            item.pubdate().unwrap_or("no date")
        );
    }
}
