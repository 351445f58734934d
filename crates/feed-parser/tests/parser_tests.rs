// crates/feed-parser/tests/parser_tests.rs
//! Field extraction and grammar placement tests

use syndic_feed_parser::{FeedError, FeedParser, FeedVersion};

#[test]
fn test_parse_complete_rss2_channel() {
    let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>The Great Audiobook Podcast</title>
    <link>http://example.com/podcast</link>
    <description>Classic literature read aloud</description>
    <language>en-us</language>
    <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
    <lastBuildDate>Tue, 02 Jan 2024 08:30:00 GMT</lastBuildDate>
    <generator>hand-written</generator>
    <docs>https://www.rssboard.org/rss-specification</docs>
    <managingEditor>editor@example.com</managingEditor>
    <webMaster>webmaster@example.com</webMaster>
    <copyright>Public domain</copyright>
    <ttl>60</ttl>
    <image><url>http://example.com/cover.png</url></image>
    <item>
      <title>Pride and Prejudice - Chapter 1</title>
      <link>http://example.com/pride1</link>
      <description>It is a truth universally acknowledged...</description>
      <category>Classics</category>
      <pubDate>Mon, 01 Jan 2024 12:00:00 GMT</pubDate>
      <guid>http://example.com/pride1</guid>
      <author>Jane Austen</author>
    </item>
  </channel>
</rss>"#;

    let feed = FeedParser::parse(rss).expect("Should parse complex RSS");

    assert_eq!(feed.version(), FeedVersion::Rss20);
    assert_eq!(feed.title(), Some("The Great Audiobook Podcast"));
    assert_eq!(feed.link(), Some("http://example.com/podcast"));
    assert_eq!(feed.description(), Some("Classic literature read aloud"));
    assert_eq!(feed.language(), Some("en-us"));
    assert_eq!(feed.pubdate(), Some("Mon, 01 Jan 2024 12:00:00 GMT"));
    assert_eq!(feed.lastbuilddate(), Some("Tue, 02 Jan 2024 08:30:00 GMT"));
    assert_eq!(feed.generator(), Some("hand-written"));
    assert_eq!(feed.docs(), Some("https://www.rssboard.org/rss-specification"));
    assert_eq!(feed.managingeditor(), Some("editor@example.com"));
    assert_eq!(feed.webmaster(), Some("webmaster@example.com"));
    assert_eq!(feed.copyright(), Some("Public domain"));
    assert_eq!(feed.ttl(), Some("60"));
    assert!(feed.published().is_some());
    assert!(feed.last_built() > feed.published());

    assert_eq!(feed.item_count(), 1);
    let item = &feed.items()[0];
    assert_eq!(item.title(), Some("Pride and Prejudice - Chapter 1"));
    assert_eq!(item.link(), Some("http://example.com/pride1"));
    assert!(item.description().is_some());
    assert_eq!(item.category(), Some("Classics"));
    assert_eq!(item.guid(), Some("http://example.com/pride1"));
    assert!(item.published().is_some());
}

#[test]
fn test_item_count_ignores_tag_case() {
    for n in [0usize, 1, 2, 7] {
        let items: String = (0..n)
            .map(|i| {
                let tag = ["item", "Item", "ITEM", "iTeM"][i % 4];
                format!("<{tag}><title>{i}</title></{tag}>")
            })
            .collect();
        let rss = format!("<rss><channel><title>T</title>{items}</channel></rss>");

        let feed = FeedParser::parse(&rss).expect("Should parse");
        assert_eq!(feed.item_count(), n);
        for (i, item) in feed.items().iter().enumerate() {
            assert_eq!(item.title(), Some(i.to_string().as_str()));
        }
    }
}

#[test]
fn test_field_tags_ignore_case() {
    let rss = "<rss><channel><TITLE>Loud</TITLE><PubDate>today</PubDate>\
               <item><GUID>g</GUID><Link>l</Link></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), Some("Loud"));
    assert_eq!(feed.pubdate(), Some("today"));
    assert_eq!(feed.items()[0].guid(), Some("g"));
    assert_eq!(feed.items()[0].link(), Some("l"));
}

#[test]
fn test_empty_element_leaves_field_unset() {
    let rss = "<rss><channel><title></title><link/><description><![CDATA[]]></description>\
               <item><title/><guid></guid></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), None);
    assert_eq!(feed.link(), None);
    // An empty CDATA section is content, and is kept as an empty string
    assert_eq!(feed.description(), Some(""));

    let item = &feed.items()[0];
    assert_eq!(item.title(), None);
    assert_eq!(item.guid(), None);
}

#[test]
fn test_repeated_tags_keep_last() {
    let rss = "<rss><channel><title>First</title><title>Second</title>\
               <item><category>a</category><category>b</category><category>c</category></item>\
               </channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), Some("Second"));
    assert_eq!(feed.items()[0].category(), Some("c"));
}

#[test]
fn test_empty_repeat_does_not_clear_earlier_value() {
    let rss = "<rss><channel><title>Kept</title><title/></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), Some("Kept"));
}

#[test]
fn test_repeat_with_markup_child_clears_field() {
    let rss = "<rss><channel><title>Old</title><title><b>New</b></title>\
               <item><guid>g1</guid><guid><!-- none --></guid></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), None);
    assert_eq!(feed.items()[0].guid(), None);
}

#[test]
fn test_latin1_feed_is_decoded() {
    let mut rss = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<rss version=\"0.91\"><channel><title>Caf".to_vec();
    rss.extend_from_slice(b"\xE9</title><item><title>Cr\xE8me br\xFBl\xE9e</title></item></channel></rss>");

    let feed = syndic_feed_parser::parse_from_bytes(&rss).expect("Should decode Latin-1");
    assert_eq!(feed.title(), Some("Caf\u{e9}"));
    assert_eq!(feed.items()[0].title(), Some("Cr\u{e8}me br\u{fb}l\u{e9}e"));
}

#[test]
fn test_undeclared_entity_kept_with_doctype() {
    let rss = r#"<?xml version="1.0"?>
<!DOCTYPE rss PUBLIC "-//Netscape Communications//DTD RSS 0.91//EN" "http://my.netscape.com/publish/formats/rss-0.91.dtd">
<rss version="0.91"><channel><title>A&eacute;B</title></channel></rss>"#;

    let feed = FeedParser::parse(rss).expect("Should tolerate DTD entities");
    assert_eq!(feed.title(), Some("A&eacute;B"));

    let without_doctype = "<rss><channel><title>A&eacute;B</title></channel></rss>";
    assert!(matches!(
        FeedParser::parse(without_doctype),
        Err(FeedError::MalformedInput(_))
    ));
}

#[test]
fn test_item_fields_do_not_leak_into_channel() {
    let rss = "<rss><channel><item><title>Only item</title><language>de</language></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.title(), None);
    assert_eq!(feed.language(), None);
    assert_eq!(feed.items()[0].title(), Some("Only item"));
}

#[test]
fn test_channel_only_fields_ignored_on_items() {
    let rss = "<rss><channel><item><ttl>5</ttl><copyright>c</copyright></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    assert_eq!(feed.ttl(), None);
    assert_eq!(feed.copyright(), None);
    assert_eq!(feed.items()[0].title(), None);
}

#[test]
fn test_nested_markup_is_not_traversed() {
    let rss = "<rss><channel><item><title><span>inner</span></title>\
               <description>Before <em>em</em> after</description></item></channel></rss>";

    let feed = FeedParser::parse(rss).expect("Should parse");
    let item = &feed.items()[0];
    assert_eq!(item.title(), None);
    assert_eq!(item.description(), Some("Before "));
}

#[test]
fn test_entities_are_decoded() {
    let rss = r#"<rss version="2.0">
  <channel>
    <title>Feed with &amp; Special &lt;Characters&gt;</title>
    <item>
      <title>Episode with "Quotes" &amp; Symbols</title>
      <description><![CDATA[<p>Raw <b>HTML</b></p>]]></description>
    </item>
  </channel>
</rss>"#;

    let feed = FeedParser::parse(rss).expect("Should handle special chars");
    assert_eq!(feed.title(), Some("Feed with & Special <Characters>"));
    assert_eq!(feed.items()[0].title(), Some(r#"Episode with "Quotes" & Symbols"#));
    assert_eq!(feed.items()[0].description(), Some("<p>Raw <b>HTML</b></p>"));
}

#[test]
fn test_rss_091_is_reported_as_09x() {
    let rss = r#"<?xml version="1.0"?>
<!DOCTYPE rss PUBLIC "-//Netscape Communications//DTD RSS 0.91//EN" "http://my.netscape.com/publish/formats/rss-0.91.dtd">
<rss version="0.91">
  <channel>
    <title>Old School</title>
    <language>en</language>
    <item><title>Legacy</title><link>http://example.com/legacy</link></item>
  </channel>
</rss>"#;

    let feed = FeedParser::parse(rss).expect("Should parse 0.91");
    assert_eq!(feed.version(), FeedVersion::Rss09x);
    assert_eq!(feed.title(), Some("Old School"));
    assert_eq!(feed.item_count(), 1);
}

#[test]
fn test_rss1_with_namespaces() {
    let rdf = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="http://example.com/">
    <title>RDF Channel</title>
    <link>http://example.com/</link>
    <description>An RSS 1.0 feed</description>
    <items>
      <rdf:Seq>
        <rdf:li rdf:resource="http://example.com/1"/>
        <rdf:li rdf:resource="http://example.com/2"/>
      </rdf:Seq>
    </items>
  </channel>
  <image rdf:about="http://example.com/logo.png"><title>Logo</title></image>
  <item rdf:about="http://example.com/1">
    <title>First</title>
    <link>http://example.com/1</link>
    <dc:pubDate>2024-01-01T12:00:00Z</dc:pubDate>
  </item>
  <item rdf:about="http://example.com/2">
    <title>Second</title>
    <link>http://example.com/2</link>
  </item>
</rdf:RDF>"#;

    let feed = FeedParser::parse(rdf).expect("Should parse RDF");
    assert_eq!(feed.version(), FeedVersion::Rss10);
    assert_eq!(feed.title(), Some("RDF Channel"));
    assert_eq!(feed.description(), Some("An RSS 1.0 feed"));
    assert_eq!(feed.item_count(), 2);
    assert_eq!(feed.items()[0].link(), Some("http://example.com/1"));
    assert!(feed.items()[0].published().is_some());
    assert_eq!(feed.items()[1].title(), Some("Second"));
}

#[test]
fn test_rss1_channel_untouched_by_item_fields() {
    let rdf = "<rdf:RDF><channel><link>http://c</link></channel>\
               <item><title>I1</title><description>d1</description></item>\
               <item><title>I2</title></item>\
               <item><title>I3</title></item></rdf:RDF>";

    let feed = FeedParser::parse(rdf).expect("Should parse");
    assert_eq!(feed.item_count(), 3);
    assert_eq!(feed.link(), Some("http://c"));
    assert_eq!(feed.title(), None);
    assert_eq!(feed.description(), None);
}

#[test]
fn test_missing_channel() {
    assert!(matches!(
        FeedParser::parse("<rss version=\"2.0\"></rss>"),
        Err(FeedError::MissingChannel)
    ));
    assert!(matches!(
        FeedParser::parse("<rdf:RDF><item/></rdf:RDF>"),
        Err(FeedError::MissingChannel)
    ));
}

#[test]
fn test_unknown_format() {
    let html = "<html><body>Not a feed</body></html>";
    assert!(matches!(
        FeedParser::parse(html),
        Err(FeedError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_malformed_xml() {
    for bad in [
        "<rss><channel><title>Unclosed",
        "<rss><channel></rss>",
        "<rss><channel><title>a</title></channel></rss></extra>",
        "",
        "plain text",
    ] {
        let result = FeedParser::parse(bad);
        assert!(
            matches!(result, Err(FeedError::MalformedInput(_))),
            "{:?} should be malformed, got {:?}",
            bad,
            result
        );
    }
}
