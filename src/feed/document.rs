use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

/// SEC-003: Maximum element nesting depth accepted in a feed body.
const MAX_XML_DEPTH: usize = 64;

/// Root of a decoded RSS document (`<rss>`).
///
/// Every text field defaults to empty when its element is missing, and
/// elements the model does not name are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub channel: Channel,
}

/// The `<channel>` element: feed metadata plus the items in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub last_build_date: String,
    pub ttl: String,
    pub language: String,
    pub managing_editor: String,
    pub web_master: String,
    pub image: Image,
    pub items: Vec<Item>,
}

/// Channel artwork. Kept for completeness, never searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
}

/// One `<item>`. Only `title` and `description` are searched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub pub_date: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub guid: String,
    pub geo_rss_point: String,
}

impl Channel {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            "link" => Some(&mut self.link),
            "pubDate" => Some(&mut self.pub_date),
            "lastBuildDate" => Some(&mut self.last_build_date),
            "ttl" => Some(&mut self.ttl),
            "language" => Some(&mut self.language),
            "managingEditor" => Some(&mut self.managing_editor),
            "webMaster" => Some(&mut self.web_master),
            _ => None,
        }
    }
}

impl Image {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "url" => Some(&mut self.url),
            "title" => Some(&mut self.title),
            "link" => Some(&mut self.link),
            _ => None,
        }
    }
}

impl Item {
    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "pubDate" => Some(&mut self.pub_date),
            "title" => Some(&mut self.title),
            "description" => Some(&mut self.description),
            "link" => Some(&mut self.link),
            "guid" => Some(&mut self.guid),
            "georss:point" => Some(&mut self.geo_rss_point),
            _ => None,
        }
    }
}

/// An open element and the character data seen directly inside it.
struct Frame {
    name: String,
    text: String,
}

/// Decodes a complete RSS body into a [`Document`].
///
/// Fails if the bytes are not UTF-8, not well-formed XML, or not rooted at
/// `<rss>`. Nothing partial is returned. Inside the root, unknown elements
/// are skipped, missing ones stay empty and a repeated element keeps its
/// last value.
pub fn parse_document(bytes: &[u8]) -> Result<Document> {
    let content = std::str::from_utf8(bytes).context("Feed body is not valid UTF-8")?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations; only the
    // five predefined XML entities are resolved by `unescape()`.
    let mut reader = Reader::from_str(content);
    reader.config_mut().expand_empty_elements = true;

    let mut document = Document::default();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if stack.is_empty() && name != "rss" {
                    bail!("Expected <rss> root element, found <{}>", name);
                }
                // SEC-003: Reject absurdly nested bodies
                if stack.len() >= MAX_XML_DEPTH {
                    bail!("XML nesting depth exceeds maximum of {} levels", MAX_XML_DEPTH);
                }

                stack.push(Frame {
                    name,
                    text: String::new(),
                });
                if element_path(&stack) == ["rss", "channel", "item"] {
                    document.channel.items.push(Item::default());
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e.unescape().context("Invalid character data in feed")?;
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(_)) => {
                store_text(&mut document, &stack);
                stack.pop();
                if stack.is_empty() {
                    return Ok(document);
                }
            }
            Ok(Event::Eof) if stack.is_empty() => bail!("Feed body contains no XML elements"),
            Ok(Event::Eof) => bail!(
                "Unexpected end of feed inside <{}>",
                stack.last().map(|f| f.name.as_str()).unwrap_or_default()
            ),
            Err(e) => bail!(
                "XML parse error at position {}: {}",
                reader.error_position(),
                e
            ),
            _ => {}
        }
    }
}

fn element_path(stack: &[Frame]) -> Vec<&str> {
    stack.iter().map(|f| f.name.as_str()).collect()
}

/// Copies the text of the innermost open element into the field it maps to.
fn store_text(document: &mut Document, stack: &[Frame]) {
    let Some(frame) = stack.last() else {
        return;
    };

    let channel = &mut document.channel;
    let slot = match element_path(stack).as_slice() {
        ["rss", "channel", field] => channel.field_mut(field),
        ["rss", "channel", "image", field] => channel.image.field_mut(field),
        ["rss", "channel", "item", field] => channel
            .items
            .last_mut()
            .and_then(|item| item.field_mut(field)),
        _ => None,
    };

    if let Some(slot) = slot {
        slot.clone_from(&frame.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:georss="http://www.georss.org/georss" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>News</title>
    <description>Top stories</description>
    <link>https://example.com/</link>
    <atom:link href="https://example.com/rss" rel="self"/>
    <pubDate>Mon, 02 Jan 2006 15:04:05 GMT</pubDate>
    <lastBuildDate>Mon, 02 Jan 2006 16:00:00 GMT</lastBuildDate>
    <ttl>15</ttl>
    <language>en-us</language>
    <managingEditor>editor@example.com</managingEditor>
    <webMaster>web@example.com</webMaster>
    <image>
      <url>https://example.com/logo.png</url>
      <title>News logo</title>
      <link>https://example.com/</link>
    </image>
    <item>
      <pubDate>Mon, 02 Jan 2006 15:04:05 GMT</pubDate>
      <title>First &amp; foremost</title>
      <description><![CDATA[<p>Body</p>]]></description>
      <link>https://example.com/1</link>
      <guid isPermaLink="false">item-1</guid>
      <georss:point>45.256 -71.92</georss:point>
    </item>
    <item>
      <title>Second</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_full_document() {
        let doc = parse_document(FULL_RSS.as_bytes()).unwrap();
        let channel = &doc.channel;

        assert_eq!(channel.title, "News");
        assert_eq!(channel.description, "Top stories");
        assert_eq!(channel.link, "https://example.com/");
        assert_eq!(channel.pub_date, "Mon, 02 Jan 2006 15:04:05 GMT");
        assert_eq!(channel.last_build_date, "Mon, 02 Jan 2006 16:00:00 GMT");
        assert_eq!(channel.ttl, "15");
        assert_eq!(channel.language, "en-us");
        assert_eq!(channel.managing_editor, "editor@example.com");
        assert_eq!(channel.web_master, "web@example.com");
        assert_eq!(
            channel.image,
            Image {
                url: "https://example.com/logo.png".into(),
                title: "News logo".into(),
                link: "https://example.com/".into(),
            }
        );

        assert_eq!(channel.items.len(), 2);
        assert_eq!(
            channel.items[0],
            Item {
                pub_date: "Mon, 02 Jan 2006 15:04:05 GMT".into(),
                title: "First & foremost".into(),
                description: "<p>Body</p>".into(),
                link: "https://example.com/1".into(),
                guid: "item-1".into(),
                geo_rss_point: "45.256 -71.92".into(),
            }
        );
    }

    #[test]
    fn test_missing_elements_default_to_empty() {
        let doc = parse_document(FULL_RSS.as_bytes()).unwrap();
        assert_eq!(
            doc.channel.items[1],
            Item {
                title: "Second".into(),
                ..Item::default()
            }
        );
    }

    #[test]
    fn test_empty_channel() {
        let doc = parse_document(br#"<rss version="2.0"><channel></channel></rss>"#).unwrap();
        assert!(doc.channel.items.is_empty());
        assert_eq!(doc.channel.image, Image::default());
    }

    #[test]
    fn test_missing_channel_defaults() {
        assert_eq!(parse_document(b"<rss/>").unwrap(), Document::default());
    }

    #[test]
    fn test_self_closing_item_still_counts() {
        let doc = parse_document(b"<rss><channel><item/><item><title/></item></channel></rss>")
            .unwrap();
        assert_eq!(doc.channel.items, vec![Item::default(), Item::default()]);
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = r#"<rss><channel>
            <generator>Hand made</generator>
            <item><title>A</title><category>x</category><enclosure url="u"/></item>
        </channel></rss>"#;

        let doc = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(doc.channel.items.len(), 1);
        assert_eq!(doc.channel.items[0].title, "A");
    }

    #[test]
    fn test_nested_markup_does_not_leak_into_field() {
        let xml = "<rss><channel><item><title>Go<b>ignored</b> 1.0</title></item></channel></rss>";

        let doc = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(doc.channel.items[0].title, "Go 1.0");
    }

    #[test]
    fn test_items_split_by_other_elements_keep_order() {
        let xml = r#"<rss><channel>
            <item><title>one</title></item>
            <item><title>two</title></item>
            <copyright>2024</copyright>
            <item><title>three</title></item>
        </channel></rss>"#;

        let doc = parse_document(xml.as_bytes()).unwrap();
        let titles: Vec<&str> = doc.channel.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_repeated_element_keeps_last_value() {
        let xml = "<rss><channel><item><title>a</title><title>b</title></item></channel></rss>";

        let doc = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(doc.channel.items[0].title, "b");
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(parse_document(b"<not valid xml").is_err());
        assert!(parse_document(b"<rss><channel><item></channel></rss>").is_err());
        assert!(parse_document(b"<rss><channel><item>").is_err());
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let err = parse_document(b"<!DOCTYPE html><html><body>Not Found</body></html>").unwrap_err();
        assert!(err.to_string().contains("<html>"));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert!(parse_document(b"").is_err());
        assert!(parse_document(b"<?xml version=\"1.0\"?>").is_err());
        assert!(parse_document(b"Service Unavailable").is_err());
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        let xml = "<rss><channel><item><title>a&bogus;b</title></item></channel></rss>";
        assert!(parse_document(xml.as_bytes()).is_err());
    }

    #[test]
    fn test_excessive_nesting_is_rejected() {
        let mut xml = String::from("<rss>");
        xml.push_str(&"<x>".repeat(MAX_XML_DEPTH));
        xml.push_str(&"</x>".repeat(MAX_XML_DEPTH));
        xml.push_str("</rss>");

        let err = parse_document(xml.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("nesting depth"));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = parse_document(&[0x3c, 0x72, 0x73, 0x73, 0x3e, 0xff, 0xfe]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let mut body = "\u{feff}".as_bytes().to_vec();
        body.extend_from_slice(b"<rss><channel><item><title>x</title></item></channel></rss>");

        let doc = parse_document(&body).unwrap();
        assert_eq!(doc.channel.items[0].title, "x");
    }
}
