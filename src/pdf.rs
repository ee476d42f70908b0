use std::fmt::Write as _;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document_configuration::{CidFontConfiguration, DocumentConfiguration};
use crate::error::ContextError;
use crate::line::Page;

/// The header line of the document followed by a comment holding four bytes above 127, which
/// signals to transfer programs that the file has to be treated as binary.
const PDF_HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// The resource name the single font of the document is registered under in every page.
const FONT_RESOURCE_NAME: &str = "F1";

/// The number of an object in the PDF document. Objects are numbered from 1 and, since they are
/// never updated, their generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl std::fmt::Display for ObjectId {
    /// Formats the object as an indirect reference, such as `4 0 R`.
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} 0 R", self.0)
    }
}

/// A finalized object of the document: its body is an opaque, pre-formatted sequence of PDF tokens
/// which is written out as it is, together with the objects it references.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfObject {
    pub id: ObjectId,
    pub body: String,
    pub references: Vec<ObjectId>,
}

/// The arena the objects of the document are allocated into. Object numbers are reserved first, in
/// the order they will be written in, and the bodies are filled in afterwards, since the objects
/// refer to each other in both directions (pages to their parent and the parent to its kids).
#[derive(Debug, Default)]
pub struct ObjectTable {
    slots: Vec<Option<(String, Vec<ObjectId>)>>,
}

impl ObjectTable {
    pub fn new() -> Self {
        ObjectTable::default()
    }

    /// Reserves the next object number, whose body is to be filled in later on.
    pub fn reserve(&mut self) -> ObjectId {
        self.slots.push(None);
        ObjectId(self.slots.len() as u32)
    }

    /// Fills in the body of a reserved object together with the list of objects it references.
    pub fn fill<S: Into<String>>(
        &mut self,
        id: ObjectId,
        body: S,
        references: Vec<ObjectId>,
    ) -> Result<(), ContextError> {
        let slot = (id.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or_else(|| ContextError::internal(format!("object {} was never reserved", id.0)))?;
        if slot.is_some() {
            return Err(ContextError::internal(format!(
                "object {} was filled twice",
                id.0
            )));
        }
        *slot = Some((body.into(), references));
        Ok(())
    }

    /// Checks that every reserved object has been filled in, that every reference points to an
    /// object of the table and that every object but the root, which the trailer refers to, is
    /// referenced by another one. The objects are then handed out in ascending order. A failure
    /// here is a bug in the construction of the object graph rather than a problem of the input.
    pub fn finish(self, root: ObjectId) -> Result<Vec<PdfObject>, ContextError> {
        let total_objects = self.slots.len() as u32;
        if root.0 == 0 || root.0 > total_objects {
            return Err(log_internal_error(format!(
                "the root object {} is not part of the table",
                root.0
            )));
        }

        let mut referenced = vec![false; self.slots.len()];
        referenced[root.0 as usize - 1] = true;
        let mut objects = Vec::with_capacity(self.slots.len());
        for (index, slot) in self.slots.into_iter().enumerate() {
            let id = ObjectId(index as u32 + 1);
            let Some((body, references)) = slot else {
                return Err(log_internal_error(format!(
                    "object {} was never populated",
                    id.0
                )));
            };
            for reference in &references {
                if reference.0 == 0 || reference.0 > total_objects {
                    return Err(log_internal_error(format!(
                        "object {} references the missing object {}",
                        id.0, reference.0
                    )));
                }
                referenced[reference.0 as usize - 1] = true;
            }
            objects.push(PdfObject {
                id,
                body,
                references,
            });
        }
        if let Some(index) = referenced.iter().position(|is_referenced| !is_referenced) {
            return Err(log_internal_error(format!(
                "object {} is not referenced by any other object",
                index + 1
            )));
        }

        Ok(objects)
    }
}

fn log_internal_error(context: String) -> ContextError {
    let error = ContextError::internal(context);
    log::error!("{}", error);
    error
}

/// Encodes the text as a hexadecimal string of UTF-16BE code units preceded by the byte order mark,
/// which is how the UCS-2 CMaps of CID fonts expect their character codes.
pub fn encode_utf16_hex(text: &str) -> String {
    let mut hexadecimal = String::with_capacity(4 + 4 * text.len());
    hexadecimal.push_str("FEFF");
    for code_unit in text.encode_utf16() {
        // Writing into a `String` cannot fail
        let _ = write!(hexadecimal, "{:04X}", code_unit);
    }
    hexadecimal
}

/// The operators drawing the lines of a page: each one is a self-contained text object
/// selecting the font, moving to the baseline of the line and showing its text.
pub fn content_stream(page: &Page) -> String {
    let mut stream = String::new();
    for line in &page.lines {
        stream.push_str(&format!(
            "BT\n/{} {} Tf\n{:.2} {:.2} Td\n<{}> Tj\nET\n",
            FONT_RESOURCE_NAME,
            line.font_size,
            line.x,
            line.y,
            encode_utf16_hex(&line.text)
        ));
    }
    stream
}

/// The composite font, referencing its descendant CID font.
fn type0_font_body(font: &CidFontConfiguration, descendant_font: ObjectId) -> String {
    format!(
        "<< /Type /Font /Subtype /Type0 /BaseFont /{} /Encoding /{} /DescendantFonts [{}] >>",
        font.base_font, font.encoding, descendant_font
    )
}

fn cid_font_body(font: &CidFontConfiguration, font_descriptor: ObjectId) -> String {
    format!(
        "<< /Type /Font /Subtype /CIDFontType0 /BaseFont /{}\n  /CIDSystemInfo << /Registry ({}) /Ordering ({}) /Supplement {} >>\n  /FontDescriptor {}\n>>",
        font.base_font, font.registry, font.ordering, font.supplement, font_descriptor
    )
}

/// A minimal descriptor: the metrics approximate an ideographic font, the glyphs themselves are
/// supplied by the viewer.
fn font_descriptor_body(font: &CidFontConfiguration) -> String {
    format!(
        "<< /Type /FontDescriptor /FontName /{} /Flags 4 /FontBBox [0 -200 1000 900]\n  /ItalicAngle 0 /Ascent 880 /Descent -120 /CapHeight 700 /StemV 80\n>>",
        font.base_font
    )
}

/// This struct represents a PDF document whose object graph has been fully constructed and validated,
/// so that all that remains is to write it out.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    objects: Vec<PdfObject>,
    catalog: ObjectId,
    page_count: usize,
}

impl PdfDocument {
    /// Builds the object graph of the document out of the laid out pages. The objects are numbered
    /// deterministically: the three font objects come first, then the content stream and the page
    /// dictionary of every page in turn, then the root of the page tree and finally the catalog.
    pub fn from_pages(
        pages: &[Page],
        configuration: &DocumentConfiguration,
    ) -> Result<PdfDocument, ContextError> {
        configuration.validate()?;
        if pages.is_empty() {
            return Err(log_internal_error(
                "a document needs at least one page".to_string(),
            ));
        }
        let geometry = &configuration.page_geometry;
        let font = &configuration.font;
        let mut objects = ObjectTable::new();

        let type0_font = objects.reserve();
        let cid_font = objects.reserve();
        let font_descriptor = objects.reserve();
        let page_ids: Vec<(ObjectId, ObjectId)> = pages
            .iter()
            .map(|_| (objects.reserve(), objects.reserve()))
            .collect();
        let pages_root = objects.reserve();
        let catalog = objects.reserve();

        objects.fill(
            type0_font,
            type0_font_body(font, cid_font),
            vec![cid_font],
        )?;
        objects.fill(
            cid_font,
            cid_font_body(font, font_descriptor),
            vec![font_descriptor],
        )?;
        objects.fill(font_descriptor, font_descriptor_body(font), Vec::new())?;

        for (page, (content_id, page_id)) in pages.iter().zip(page_ids.iter().copied()) {
            let stream = content_stream(page);
            // `/Length` counts bytes
            objects.fill(
                content_id,
                format!("<< /Length {} >>\nstream\n{}endstream", stream.len(), stream),
                Vec::new(),
            )?;
            objects.fill(
                page_id,
                format!(
                    "<< /Type /Page /Parent {}\n  /MediaBox [0 0 {:.2} {:.2}]\n  /Resources << /Font << /{} {} >> >>\n  /Contents {}\n>>",
                    pages_root, geometry.width, geometry.height, FONT_RESOURCE_NAME, type0_font, content_id
                ),
                vec![pages_root, type0_font, content_id],
            )?;
        }

        let kids: Vec<ObjectId> = page_ids.iter().map(|(_, page_id)| *page_id).collect();
        objects.fill(
            pages_root,
            format!(
                "<< /Type /Pages /Count {} /Kids [{}] >>",
                kids.len(),
                kids.iter()
                    .map(ObjectId::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            kids,
        )?;
        objects.fill(
            catalog,
            format!("<< /Type /Catalog /Pages {} >>", pages_root),
            vec![pages_root],
        )?;

        let objects = objects.finish(catalog)?;
        log::debug!(
            "Constructed {} PDF objects for {} pages",
            objects.len(),
            pages.len()
        );

        Ok(PdfDocument {
            objects,
            catalog,
            page_count: pages.len(),
        })
    }

    pub fn objects(&self) -> &[PdfObject] {
        &self.objects
    }

    pub fn catalog(&self) -> ObjectId {
        self.catalog
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Serializes the document: the header, every object in ascending order, the cross-reference
    /// table pointing at the byte offset of each object and finally the trailer.
    pub fn save_to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::from(PDF_HEADER);
        let mut offsets = Vec::with_capacity(self.objects.len());

        for object in &self.objects {
            // Offsets are measured on the bytes written so far, not on characters
            offsets.push(bytes.len());
            bytes.extend_from_slice(
                format!("{} 0 obj\n{}\nendobj\n", object.id.0, object.body).as_bytes(),
            );
        }

        let cross_reference_offset = bytes.len();
        let mut cross_reference_table = format!("xref\n0 {}\n", self.objects.len() + 1);
        cross_reference_table.push_str(&format!("{:010} {:05} f \n", 0, 65535));
        for offset in offsets {
            cross_reference_table.push_str(&format!("{:010} {:05} n \n", offset, 0));
        }
        bytes.extend_from_slice(cross_reference_table.as_bytes());
        bytes.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                self.catalog,
                cross_reference_offset
            )
            .as_bytes(),
        );

        bytes
    }

    /// Writes the serialized document to the writer.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), ContextError> {
        writer
            .write_all(&self.save_to_bytes())
            .map_err(|error| ContextError::with_error("Failed to write the PDF document", &error))
    }

    /// Writes the serialized document to a new file at the given path.
    pub fn save_to_pdf_file(&self, pdf_path: &Path) -> Result<(), ContextError> {
        let pdf_file = std::fs::File::create(pdf_path).map_err(|error| {
            ContextError::with_error(
                format!("Failed to create the PDF file {:?}", pdf_path),
                &error,
            )
        })?;
        let mut writer = BufWriter::new(pdf_file);
        self.save(&mut writer)?;
        writer.flush().map_err(|error| {
            ContextError::with_error(
                format!("Failed to save the PDF document to {:?}", pdf_path),
                &error,
            )
        })
    }
}
