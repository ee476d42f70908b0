use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;
use crate::line::LineKind;
use crate::locale::Locale;

/// Everything the layout and the serialization of a résumé depend on. Each field can be omitted
/// from the configuration file, in which case its default value is used.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentConfiguration {
    pub page_geometry: PageGeometry,
    pub styles: StyleTable,
    /// Vertical space taken by a spacer between sections.
    pub spacer: f32,
    /// Vertical space taken by a spacer between the entries of a section.
    pub small_spacer: f32,
    /// Prefix of the first wrapped fragment of a bullet line.
    pub bullet_prefix: String,
    pub locale: Locale,
    pub font: CidFontConfiguration,
}

/// The size of the page and its margins, in points.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// The font size and the leading of a kind of line, with the padding inserted before and after it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub size: f32,
    pub leading: f32,
    #[serde(default)]
    pub padding: f32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleTable {
    pub heading1: Style,
    pub heading2: Style,
    pub heading3: Style,
    pub meta: Style,
    pub body: Style,
}

/// The non-embedded CID font the viewer is expected to provide. The default, `STSong-Light`
/// with the `UniGB-UCS2-H` encoding, is part of the Adobe Asian font packs and covers both
/// simplified Chinese and Latin text.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CidFontConfiguration {
    pub base_font: String,
    pub encoding: String,
    pub registry: String,
    pub ordering: String,
    pub supplement: u32,
}

impl Default for DocumentConfiguration {
    fn default() -> Self {
        DocumentConfiguration {
            page_geometry: PageGeometry::default(),
            styles: StyleTable::default(),
            spacer: 10.0,
            small_spacer: 6.0,
            bullet_prefix: "• ".into(),
            locale: Locale::default(),
            font: CidFontConfiguration::default(),
        }
    }
}

impl Default for PageGeometry {
    /// An A4 page with 42 points of margin on every side.
    fn default() -> Self {
        PageGeometry {
            width: 595.28,
            height: 841.89,
            margins: Margins::all(42.0),
        }
    }
}

impl Margins {
    pub fn all(margin: f32) -> Self {
        Margins {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::all(42.0)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        StyleTable {
            heading1: Style::new(18.0, 24.0),
            heading2: Style {
                padding: 2.0,
                ..Style::new(14.0, 20.0)
            },
            heading3: Style::new(12.0, 18.0),
            meta: Style::new(10.0, 14.0),
            body: Style::new(11.0, 16.0),
        }
    }
}

impl Default for CidFontConfiguration {
    fn default() -> Self {
        CidFontConfiguration {
            base_font: "STSong-Light".into(),
            encoding: "UniGB-UCS2-H".into(),
            registry: "Adobe".into(),
            ordering: "GB1".into(),
            supplement: 5,
        }
    }
}

impl Style {
    pub fn new(size: f32, leading: f32) -> Self {
        Style {
            size,
            leading,
            padding: 0.0,
        }
    }
}

impl StyleTable {
    /// Retrieves the style a kind of line is laid out with. Bullets share the style of the body text.
    pub fn style_for(&self, kind: LineKind) -> &Style {
        match kind {
            LineKind::Heading1 => &self.heading1,
            LineKind::Heading2 => &self.heading2,
            LineKind::Heading3 => &self.heading3,
            LineKind::Meta => &self.meta,
            LineKind::Bullet | LineKind::Body | LineKind::Spacer | LineKind::SpacerSmall => {
                &self.body
            }
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &Style)> {
        [
            ("heading1", &self.heading1),
            ("heading2", &self.heading2),
            ("heading3", &self.heading3),
            ("meta", &self.meta),
            ("body", &self.body),
        ]
        .into_iter()
    }
}

impl PageGeometry {
    /// The horizontal space available to the text.
    pub fn usable_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// The vertical coordinate of the first baseline of a page.
    pub fn top(&self) -> f32 {
        self.height - self.margins.top
    }

    /// The lowest vertical coordinate a baseline can be placed at.
    pub fn bottom(&self) -> f32 {
        self.margins.bottom
    }
}

impl DocumentConfiguration {
    /// Reads and parses the configuration file found at the given path, then validates it.
    pub fn from_path(configuration_path: &Path) -> Result<Self, ContextError> {
        let configuration_content = std::fs::read_to_string(configuration_path).map_err(|error| {
            ContextError::with_error(
                format!("Failed to read the configuration file {:?}", configuration_path),
                &error,
            )
        })?;
        let configuration: DocumentConfiguration = serde_json::from_str(&configuration_content)
            .map_err(|error| {
                ContextError::with_error(
                    format!("Failed to parse the configuration file {:?}", configuration_path),
                    &error,
                )
            })?;
        configuration.validate()?;

        Ok(configuration)
    }

    /// Rejects the configurations which cannot be laid out: pages without area, margins which
    /// leave no room for the text, and styles whose lines could never fit onto a page.
    pub fn validate(&self) -> Result<(), ContextError> {
        let geometry = &self.page_geometry;
        if !(geometry.width > 0.0 && geometry.height > 0.0) {
            return Err(ContextError::with_context(format!(
                "Invalid page geometry, the page must be positive in size but is {}x{}",
                geometry.width, geometry.height
            )));
        }
        let margins = &geometry.margins;
        if [margins.top, margins.right, margins.bottom, margins.left]
            .iter()
            .any(|margin| !(*margin >= 0.0))
        {
            return Err(ContextError::with_context(format!(
                "Invalid page geometry, the margins must not be negative but are {:?}",
                margins
            )));
        }
        if !(geometry.usable_width() > 0.0) {
            return Err(ContextError::with_context(
                "Invalid page geometry, the horizontal margins leave no room for the text",
            ));
        }

        for (name, style) in self.styles.iter() {
            if !(style.size > 0.0 && style.leading > 0.0 && style.padding >= 0.0) {
                return Err(ContextError::with_context(format!(
                    "Invalid style {:?}, the size and the leading must be positive and the padding must not be negative",
                    name
                )));
            }
            if style.leading > geometry.top() - geometry.bottom() {
                return Err(ContextError::with_context(format!(
                    "Invalid page geometry, a line in the style {:?} is taller than the printable area of the page",
                    name
                )));
            }
        }
        if !(self.spacer >= 0.0 && self.small_spacer >= 0.0) {
            return Err(ContextError::with_context(
                "Invalid spacing, the spacers must not be negative",
            ));
        }
        self.font.validate()?;

        Ok(())
    }
}

impl CidFontConfiguration {
    /// Rejects the font settings which cannot be written out as they are: the font and its encoding
    /// become PDF names, the registry and the ordering become literal strings.
    pub fn validate(&self) -> Result<(), ContextError> {
        for (field, name) in [("baseFont", &self.base_font), ("encoding", &self.encoding)] {
            if name.is_empty() || !name.chars().all(is_regular_name_character) {
                return Err(ContextError::with_context(format!(
                    "Invalid font {} {:?}, it must be made of printable ASCII characters other than delimiters",
                    field, name
                )));
            }
        }
        for (field, string) in [("registry", &self.registry), ("ordering", &self.ordering)] {
            if string.is_empty() || !string.chars().all(is_plain_string_character) {
                return Err(ContextError::with_context(format!(
                    "Invalid font {} {:?}, it must be made of printable ASCII characters other than parentheses and backslashes",
                    field, string
                )));
            }
        }

        Ok(())
    }
}

/// Whether the character can appear in a PDF name without being escaped.
fn is_regular_name_character(character: char) -> bool {
    character.is_ascii_graphic() && !"()<>[]{}/%#".contains(character)
}

fn is_plain_string_character(character: char) -> bool {
    (character.is_ascii_graphic() || character == ' ') && !"()\\".contains(character)
}
