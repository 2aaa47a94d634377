use super::Color;
use serde::{Deserialize, Serialize};

/// A span of formatted text.
///
/// `plain_text` is the service's rendering of the span and is what the
/// reductions read. Only the `text` kind is modeled; mentions and equations
/// fail to decode with an unknown-variant error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: Annotations,
    #[serde(flatten)]
    pub kind: RichTextKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextKind {
    Text { text: TextContent },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl RichText {
    /// An unformatted text span.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            plain_text: text.clone(),
            href: None,
            annotations: Annotations::default(),
            kind: RichTextKind::Text {
                text: TextContent {
                    content: text,
                    link: None,
                },
            },
        }
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.href = Some(url.clone());
        let RichTextKind::Text { text } = &mut self.kind;
        text.link = Some(Link { url });
        self
    }
}

/// Concatenates the plain text of every span. Empty input yields `""`.
pub fn plain_text(spans: &[RichText]) -> String {
    spans.iter().map(|span| span.plain_text.as_str()).collect()
}
