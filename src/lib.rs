//! This crate converts a résumé, described by a JSON document, into a minimal PDF document which
//! can display Chinese as well as Latin text without embedding any font.
//!
//! The conversion happens in two steps. First the résumé is turned into styled lines which are
//! wrapped and laid out onto fixed-size pages, then the pages are serialized byte by byte into a PDF
//! document: font objects, content streams, the cross-reference table and the trailer are all
//! written by hand. The entry point is `document::resume_to_pdf`.

/// The module where the résumé read from its JSON document is represented.
///
/// The `ResumeRecord` struct is deliberately forgiving: any field can be missing or `null`, scalars
/// can be numbers as well as strings, and lists holding something other than an array are read as
/// empty. Nothing is sanitized at this stage, values such as `"TODO"` placeholders are kept as they
/// are until the résumé is laid out.
pub mod resume;

/// The module where the résumé is turned into lines, together with the functions running the whole
/// pipeline from a `ResumeRecord` down to the bytes of the PDF document.
///
/// # Introduction
///
/// The lines are emitted in a fixed reading order: the header, the links, the highlights, the
/// experience, the projects, the skills, and finally the education and certifications. A section is
/// only printed, together with its heading, if at least one of its values survives the sanitization.
pub mod document;

/// This module contains the `DocumentConfiguration` struct, which holds the page geometry, the styles
/// of the lines, the spacing, the locale and the font of the document.
///
/// The configuration can be read from a JSON file in which every field is optional; missing fields
/// fall back to an A4 page with 42 points of margin and the `STSong-Light` CID font.
pub mod document_configuration;

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// The `ContextError` type is always returned from a `Result` type, which means that the end user can
/// expect to obtain an explanation whenever a function returns an error. If an error happened in a
/// function which was called inside a function of this library, then the user can expect to also obtain
/// information about this propagated error.
pub mod error;

/// The module where the lines are wrapped and distributed onto pages.
///
/// Since the font is never embedded, no glyph metrics are available: the number of characters that fit
/// on a line is estimated from the font size alone. A new page is started whenever the next line would
/// cross the bottom margin.
pub mod layouting;

/// The kinds of lines making up a résumé, and the positioned lines and pages produced by the layout.
pub mod line;

/// The fixed labels of the résumé in the supported languages.
pub mod locale;

/// The module where pages are serialized into a PDF document.
///
/// # Introduction
///
/// The objects of the document are allocated into an `ObjectTable` with a deterministic numbering:
/// the three font objects, then a content stream and a page dictionary for each page, then the root
/// of the page tree and the catalog. The table is validated before anything gets written, so that
/// no object can be left empty or referenced without existing.
///
/// The text is written as UTF-16BE hexadecimal strings which the viewer maps onto the glyphs of the
/// non-embedded `STSong-Light` font through the `UniGB-UCS2-H` CMap.
pub mod pdf;

/// Sanitization, wrapping and formatting of the text pulled out of the résumé.
pub mod text;
