//! Article documents parsed from PMC (JATS) XML

use crate::{CoreError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The parts of an article the extractor reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Article title
    pub title: String,

    /// Body text: all paragraphs joined with single spaces
    pub body: String,

    /// Body paragraphs in document order
    pub paragraphs: Vec<String>,
}

impl Document {
    /// Create a document from a title and body paragraphs
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        let body = paragraphs.join(" ");
        Self {
            title: title.into(),
            body,
            paragraphs,
        }
    }

    /// Parse a PMC efetch response.
    ///
    /// The title is the first `article-title`; the body is every outermost
    /// `p` under a `body` element. Text nodes are trimmed and joined with
    /// single spaces.
    pub fn from_jats_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut title: Option<String> = None;
        let mut title_parts: Vec<String> = Vec::new();
        let mut title_depth = 0usize;
        let mut saw_body = false;
        let mut body_depth = 0usize;
        let mut p_depth = 0usize;
        let mut paragraph: Vec<String> = Vec::new();
        let mut paragraphs: Vec<String> = Vec::new();

        loop {
            let text = match reader.read_event()? {
                Event::Start(e) => {
                    match e.local_name().as_ref() {
                        b"article-title" if title.is_none() => title_depth += 1,
                        b"body" => {
                            saw_body = true;
                            body_depth += 1;
                        }
                        b"p" if body_depth > 0 => p_depth += 1,
                        _ => {}
                    }
                    continue;
                }
                Event::End(e) => {
                    match e.local_name().as_ref() {
                        b"article-title" if title_depth > 0 => {
                            title_depth -= 1;
                            if title_depth == 0 {
                                let joined = title_parts.join(" ");
                                title_parts.clear();
                                if !joined.is_empty() {
                                    title = Some(joined);
                                }
                            }
                        }
                        b"body" => body_depth = body_depth.saturating_sub(1),
                        b"p" if p_depth > 0 => {
                            p_depth -= 1;
                            if p_depth == 0 && !paragraph.is_empty() {
                                paragraphs.push(paragraph.join(" "));
                                paragraph.clear();
                            }
                        }
                        _ => {}
                    }
                    continue;
                }
                Event::Text(e) => match e.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(err) => {
                        debug!("Keeping raw text after unescape failure: {}", err);
                        String::from_utf8_lossy(&e).into_owned()
                    }
                },
                Event::CData(e) => String::from_utf8_lossy(&e.into_inner()).into_owned(),
                Event::Eof => break,
                _ => continue,
            };

            let text = collapse_whitespace(&text);
            if text.is_empty() {
                continue;
            }
            if title_depth > 0 {
                title_parts.push(text.clone());
            }
            if p_depth > 0 {
                paragraph.push(text);
            }
        }

        let title = title.ok_or_else(|| {
            CoreError::Parse("no <article-title> element found".to_string())
        })?;

        if !saw_body {
            return Err(CoreError::Parse(
                "no <body> element found; the full text may not be available for this article"
                    .to_string(),
            ));
        }

        if paragraphs.is_empty() {
            warn!("Article body has no paragraph text");
            return Err(CoreError::Parse(
                "<body> contains no paragraph text".to_string(),
            ));
        }

        debug!("Parsed {} body paragraphs", paragraphs.len());
        Ok(Self::new(title, paragraphs))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
