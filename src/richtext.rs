//! Adapter for the provider's rich-text block format. The rest of the
//! crate only depends on two capabilities: flattening to plain text
//! (for word counting) and rendering to escaped HTML (for the views).

use htmlescape::{encode_attribute, encode_minimal};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One structured unit of formatted text, e.g. a paragraph or a list
/// item. Block and span types are kept as strings because the provider
/// is free to introduce new ones; unknown blocks render as paragraphs
/// and unknown spans render unstyled.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RichTextBlock {
  #[serde(rename = "type")]
  pub block_type: String,
  #[serde(default)]
  pub text: String,
  #[serde(default)]
  pub spans: Vec<Span>,
  /// Only present on image blocks.
  #[serde(default)]
  pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Span {
  pub start: usize,
  pub end: usize,
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub data: Option<SpanData>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SpanData {
  #[serde(default)]
  pub url: Option<String>,
}

/// Flatten blocks to plain text, joining block texts with a single
/// space so word boundaries survive.
pub fn as_text(blocks: &[RichTextBlock]) -> String {
  blocks
    .iter()
    .map(|block| block.text.as_str())
    .filter(|text| !text.is_empty())
    .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
  Unordered,
  Ordered,
}

fn list_kind(block: &RichTextBlock) -> Option<ListKind> {
  match block.block_type.as_str() {
    "list-item" => Some(ListKind::Unordered),
    "o-list-item" => Some(ListKind::Ordered),
    _ => None,
  }
}

/// Render blocks to HTML with all provider text escaped. Consecutive
/// list items collapse into a single list element.
pub fn as_html(blocks: &[RichTextBlock]) -> String {
  let mut out = String::new();

  for (kind, group) in &blocks.iter().group_by(|block| list_kind(block)) {
    match kind {
      Some(kind) => {
        let (open, close) = match kind {
          ListKind::Unordered => ("<ul>", "</ul>"),
          ListKind::Ordered => ("<ol>", "</ol>"),
        };
        out.push_str(open);
        for block in group {
          out.push_str("<li>");
          out.push_str(&spanned_html(&block.text, &block.spans));
          out.push_str("</li>");
        }
        out.push_str(close);
      }
      None => {
        for block in group {
          out.push_str(&block_html(block));
        }
      }
    }
  }

  out
}

fn block_html(block: &RichTextBlock) -> String {
  let inner = spanned_html(&block.text, &block.spans);
  match block.block_type.as_str() {
    "heading1" => format!("<h1>{inner}</h1>"),
    "heading2" => format!("<h2>{inner}</h2>"),
    "heading3" => format!("<h3>{inner}</h3>"),
    "heading4" => format!("<h4>{inner}</h4>"),
    "heading5" => format!("<h5>{inner}</h5>"),
    "heading6" => format!("<h6>{inner}</h6>"),
    "preformatted" => format!("<pre>{inner}</pre>"),
    "image" => match &block.url {
      Some(url) => format!("<img src=\"{}\">", encode_attribute(url)),
      None => String::new(),
    },
    _ => format!("<p>{inner}</p>"),
  }
}

// Span offsets are character indices into the block text. Spans are
// expected not to overlap; an overlapping span degrades to styling
// only its tail.
fn spanned_html(text: &str, spans: &[Span]) -> String {
  let chars: Vec<char> = text.chars().collect();
  let mut spans: Vec<&Span> = spans.iter().collect();
  spans.sort_by_key(|span| (span.start, span.end));

  let mut out = String::new();
  let mut pos = 0;
  for span in spans {
    let start = span.start.clamp(pos, chars.len());
    let end = span.end.clamp(start, chars.len());
    out.push_str(&escape_chars(&chars[pos..start]));

    let inner = escape_chars(&chars[start..end]);
    match span.kind.as_str() {
      "strong" => out.push_str(&format!("<strong>{inner}</strong>")),
      "em" => out.push_str(&format!("<em>{inner}</em>")),
      "hyperlink" => {
        let href = span
          .data
          .as_ref()
          .and_then(|data| data.url.as_deref())
          .unwrap_or("#");
        out
          .push_str(&format!("<a href=\"{}\">{inner}</a>", encode_attribute(href)));
      }
      _ => out.push_str(&inner),
    }
    pos = end;
  }
  out.push_str(&escape_chars(&chars[pos..]));

  out
}

fn escape_chars(chars: &[char]) -> String {
  encode_minimal(&chars.iter().collect::<String>())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn block(block_type: &str, text: &str) -> RichTextBlock {
    RichTextBlock {
      block_type: block_type.to_owned(),
      text: text.to_owned(),
      ..Default::default()
    }
  }

  #[test]
  fn test_as_text_joins_blocks() {
    let blocks = vec![
      block("paragraph", "Hello world"),
      block("image", ""),
      block("paragraph", "again"),
    ];
    assert_eq!(as_text(&blocks), "Hello world again");
    assert_eq!(as_text(&[]), "");
  }

  #[test]
  fn test_as_html_escapes_text() {
    let blocks = vec![block("paragraph", "a <b> & c")];
    assert_eq!(as_html(&blocks), "<p>a &lt;b&gt; &amp; c</p>");
  }

  #[test]
  fn test_as_html_headings_and_unknown_blocks() {
    let blocks = vec![
      block("heading2", "Title"),
      block("shiny-new-block", "Body"),
    ];
    assert_eq!(as_html(&blocks), "<h2>Title</h2><p>Body</p>");
  }

  #[test]
  fn test_as_html_groups_list_items() {
    let blocks = vec![
      block("paragraph", "Intro"),
      block("list-item", "one"),
      block("list-item", "two"),
      block("o-list-item", "first"),
    ];
    assert_eq!(
      as_html(&blocks),
      "<p>Intro</p><ul><li>one</li><li>two</li></ul><ol><li>first</li></ol>"
    );
  }

  #[test]
  fn test_spans_render_styled() {
    let blocks = vec![RichTextBlock {
      block_type: "paragraph".to_owned(),
      text: "plain bold linked".to_owned(),
      spans: vec![
        Span {
          start: 6,
          end: 10,
          kind: "strong".to_owned(),
          data: None,
        },
        Span {
          start: 11,
          end: 17,
          kind: "hyperlink".to_owned(),
          data: Some(SpanData {
            url: Some("https://example.com/a?b=c".to_owned()),
          }),
        },
      ],
      url: None,
    }];

    assert_eq!(
      as_html(&blocks),
      "<p>plain <strong>bold</strong> \
       <a href=\"https&#x3A;&#x2F;&#x2F;example&#x2E;com&#x2F;a&#x3F;b&#x3D;c\">linked</a></p>"
    );
  }

  #[test]
  fn test_span_offsets_are_character_based() {
    let blocks = vec![RichTextBlock {
      block_type: "paragraph".to_owned(),
      text: "héllo world".to_owned(),
      spans: vec![Span {
        start: 0,
        end: 5,
        kind: "em".to_owned(),
        data: None,
      }],
      url: None,
    }];

    assert_eq!(as_html(&blocks), "<p><em>héllo</em> world</p>");
  }

  #[test]
  fn test_parses_provider_json() {
    let json = serde_json::json!([
      {
        "type": "paragraph",
        "text": "Hello",
        "spans": [{ "start": 0, "end": 5, "type": "strong" }]
      },
      { "type": "image", "url": "https://img.example.com/1.png" }
    ]);

    let blocks: Vec<RichTextBlock> = serde_json::from_value(json).unwrap();
    assert_eq!(blocks[0].spans.len(), 1);
    assert_eq!(blocks[1].url.as_deref(), Some("https://img.example.com/1.png"));
  }
}
