use serde::{Deserialize, Serialize};

/// The role a line plays in the résumé, which decides its style and how it is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    Heading3,
    Meta,
    Bullet,
    Spacer,
    SpacerSmall,
    Body,
}

impl LineKind {
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            LineKind::Heading1 | LineKind::Heading2 | LineKind::Heading3
        )
    }

    pub fn is_spacer(self) -> bool {
        matches!(self, LineKind::Spacer | LineKind::SpacerSmall)
    }
}

/// A logical line of the résumé, before it is wrapped and positioned onto a page.
/// Spacers carry an empty text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn new<S: Into<String>>(kind: LineKind, text: S) -> Line {
        Line {
            kind,
            text: text.into(),
        }
    }

    pub fn spacer() -> Line {
        Line::new(LineKind::Spacer, "")
    }

    pub fn small_spacer() -> Line {
        Line::new(LineKind::SpacerSmall, "")
    }
}

/// A wrapped fragment of a line which has been assigned its font size and its position on the page.
/// Coordinates are expressed in points, with the origin at the bottom-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLine {
    pub kind: LineKind,
    pub text: String,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
}

/// The lines laid out onto a single page, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<PositionedLine>,
}
