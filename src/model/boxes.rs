//! Content boxes: the units of content attached to a page or a sidebar.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a box holds, resolved from its `jcr:primaryType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxKind {
    Text,
    ColoredText,
    /// Bibliography reference, rendered as an `[infoscience url=…]` shortcode.
    Infoscience,
    /// News reference, rendered as an `[actu url=…]` shortcode.
    Actu,
    Faq,
    Toggle,
    /// Unrecognized type code, kept verbatim.
    Unknown(String),
}

impl BoxKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "epfl:textBox" => Self::Text,
            "epfl:coloredTextBox" => Self::ColoredText,
            "epfl:infoscienceBox" => Self::Infoscience,
            "epfl:actuBox" => Self::Actu,
            "epfl:faqContainer" => Self::Faq,
            "epfl:toggleBox" => Self::Toggle,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for BoxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::ColoredText => f.write_str("coloredText"),
            Self::Infoscience => f.write_str("infoscience"),
            Self::Actu => f.write_str("actu"),
            Self::Faq => f.write_str("faq"),
            Self::Toggle => f.write_str("toggle"),
            Self::Unknown(code) => write!(f, "unknown '{code}'"),
        }
    }
}

/// Fields only some kinds carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum BoxFields {
    #[default]
    None,
    Faq {
        question: String,
        answer: String,
    },
    Toggle {
        is_open: bool,
    },
}

/// One content unit.
///
/// `content` is what exporters render: HTML for text, FAQ and toggle boxes,
/// a shortcode for news and bibliography references, empty for unknown kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBox {
    pub kind: BoxKind,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub fields: BoxFields,
}

impl ContentBox {
    pub fn new(kind: BoxKind, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            content: content.into(),
            fields: BoxFields::None,
        }
    }

    pub fn question(&self) -> Option<&str> {
        match &self.fields {
            BoxFields::Faq { question, .. } => Some(question),
            _ => None,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match &self.fields {
            BoxFields::Faq { answer, .. } => Some(answer),
            _ => None,
        }
    }

    pub fn is_open(&self) -> Option<bool> {
        match self.fields {
            BoxFields::Toggle { is_open } => Some(is_open),
            _ => None,
        }
    }
}

impl fmt::Display for ContentBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.title)
    }
}
