use crate::document_configuration::{DocumentConfiguration, Style};
use crate::error::ContextError;
use crate::line::{Line, LineKind, Page, PositionedLine};
use crate::text::wrap_text;

/// Approximated advance of a character relative to the font size, which is about right for CJK
/// glyphs and conservative for Latin ones. Real glyph metrics are not available since the font is
/// never embedded, and changing this constant changes the page count of every résumé.
pub const CHARACTER_WIDTH_RATIO: f32 = 0.92;

/// Below this many characters per line the layout would turn unreadable, so it is never reached.
pub const MINIMUM_CHARACTERS_PER_LINE: usize = 16;

/// Computes how many characters fit into a line of the given usable width at the given font size.
pub fn maximum_characters(font_size: f32, usable_width: f32) -> usize {
    let characters = (usable_width / (font_size * CHARACTER_WIDTH_RATIO)).floor();
    (characters.max(0.0) as usize).max(MINIMUM_CHARACTERS_PER_LINE)
}

/// The running state of the pagination: the lines of the pages closed so far, the lines of the
/// page being filled and the vertical position of the next baseline.
struct Paginator<'a> {
    configuration: &'a DocumentConfiguration,
    pages: Vec<Page>,
    current_page: Page,
    cursor: f32,
}

impl<'a> Paginator<'a> {
    fn new(configuration: &'a DocumentConfiguration) -> Self {
        Paginator {
            configuration,
            pages: Vec::new(),
            current_page: Page::default(),
            cursor: configuration.page_geometry.top(),
        }
    }

    fn new_page(&mut self) {
        if !self.current_page.lines.is_empty() {
            self.pages.push(std::mem::take(&mut self.current_page));
        }
        self.cursor = self.configuration.page_geometry.top();
    }

    /// Places a single fragment at the cursor, starting a new page first if its leading would
    /// cross the bottom margin.
    fn push_fragment(&mut self, kind: LineKind, style: &Style, text: String) {
        let configuration = self.configuration;
        let geometry = &configuration.page_geometry;
        if self.cursor - style.leading < geometry.bottom() {
            log::trace!(
                "Closing page {} before the fragment {:?}",
                self.pages.len() + 1,
                text
            );
            self.new_page();
        }
        self.current_page.lines.push(PositionedLine {
            kind,
            text,
            font_size: style.size,
            x: geometry.margins.left,
            y: self.cursor,
        });
        self.cursor -= style.leading;
    }

    /// Wraps the text of the line and places its fragments one below the other. The prefix
    /// is written before the first fragment while the following ones are indented by as many spaces.
    fn push_wrapped(&mut self, kind: LineKind, text: &str, prefix: &str) {
        let style = *self.configuration.styles.style_for(kind);
        let prefix_length = prefix.chars().count();
        let maximum_characters = maximum_characters(
            style.size,
            self.configuration.page_geometry.usable_width(),
        )
        .saturating_sub(prefix_length);
        let indentation = " ".repeat(prefix_length);

        for (index, fragment) in wrap_text(text, maximum_characters).into_iter().enumerate() {
            let lead = if index == 0 { prefix } else { &indentation };
            self.push_fragment(kind, &style, format!("{}{}", lead, fragment));
        }
    }

    fn push_line(&mut self, line: &Line) {
        match line.kind {
            LineKind::Spacer => self.cursor -= self.configuration.spacer,
            LineKind::SpacerSmall => self.cursor -= self.configuration.small_spacer,
            LineKind::Bullet => {
                let configuration = self.configuration;
                self.push_wrapped(line.kind, &line.text, &configuration.bullet_prefix);
            }
            kind if kind.is_heading() => {
                let padding = self.configuration.styles.style_for(kind).padding;
                self.cursor -= padding;
                self.push_wrapped(kind, &line.text, "");
                self.cursor -= padding;
            }
            kind => self.push_wrapped(kind, &line.text, ""),
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current_page.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current_page);
        }
        self.pages
    }
}

/// Lays out the lines onto pages: every line is wrapped to the usable width of the page and placed
/// below the previous one, and a new page is started whenever a line would cross the bottom margin.
/// The configuration is validated beforehand, so that malformed geometries are rejected before any
/// line is placed. The result always holds at least one page.
pub fn layout_pages(
    lines: &[Line],
    configuration: &DocumentConfiguration,
) -> Result<Vec<Page>, ContextError> {
    configuration.validate()?;

    let mut paginator = Paginator::new(configuration);
    for line in lines {
        paginator.push_line(line);
    }
    let pages = paginator.finish();
    log::debug!(
        "Laid out {} lines onto {} pages",
        pages.iter().map(|page| page.lines.len()).sum::<usize>(),
        pages.len()
    );

    Ok(pages)
}
