use std::path::Path;

use crate::document_configuration::DocumentConfiguration;
use crate::error::ContextError;
use crate::layouting::layout_pages;
use crate::line::{Line, LineKind};
use crate::locale::{Labels, Locale};
use crate::pdf::PdfDocument;
use crate::resume::{Education, Experience, Link, Project, ResumeRecord, SkillGroup};
use crate::text::{format_range, join_present, safe_text};

/// Turns the résumé into the ordered sequence of lines it is printed as. Every value is sanitized
/// on the way, and sections which end up without any line are left out together with their heading.
pub fn document_lines(record: &ResumeRecord, locale: Locale) -> Vec<Line> {
    let labels = locale.labels();
    let mut lines = header_lines(record, labels);

    let link_lines: Vec<Line> = record
        .basics
        .links
        .iter()
        .filter_map(format_link)
        .map(|link| Line::new(LineKind::Bullet, link))
        .collect();
    push_section(&mut lines, labels.links, link_lines);

    push_section(
        &mut lines,
        labels.highlights,
        bullet_lines(&record.highlights),
    );

    let experience_lines = record
        .experience
        .iter()
        .flat_map(|experience| close_entry(experience_lines(experience, locale)))
        .collect();
    push_section(&mut lines, labels.experience, experience_lines);

    let project_lines = record
        .projects
        .iter()
        .flat_map(|project| close_entry(project_lines(project, labels)))
        .collect();
    push_section(&mut lines, labels.projects, project_lines);

    let skill_lines = record
        .skills
        .iter()
        .flat_map(|skill_group| close_entry(skill_lines(skill_group)))
        .collect();
    push_section(&mut lines, labels.skills, skill_lines);

    let mut education_lines: Vec<Line> = record
        .education
        .iter()
        .flat_map(|education| close_entry(education_lines(education, locale)))
        .collect();
    let certification_lines = bullet_lines(&record.certifications);
    if !certification_lines.is_empty() {
        education_lines.push(Line::new(LineKind::Heading3, labels.certifications));
        education_lines.extend(certification_lines);
    }
    push_section(&mut lines, labels.education, education_lines);

    log::debug!("Built {} lines out of the résumé", lines.len());
    lines
}

/// The name and headline of the résumé, followed by the contact details. The header is never
/// omitted: a missing name is replaced by a localized placeholder.
fn header_lines(record: &ResumeRecord, labels: &Labels) -> Vec<Line> {
    let basics = &record.basics;
    let name = safe_text(basics.name.as_deref()).unwrap_or_else(|| labels.missing_name.into());
    let title = match safe_text(basics.headline.as_deref()) {
        Some(headline) => format!("{}{}{}", name, labels.separator, headline),
        None => name,
    };

    let mut lines = vec![Line::new(LineKind::Heading1, title)];
    let contacts = [
        safe_text(basics.location.as_deref()),
        safe_text(basics.email.as_deref()),
        safe_text(basics.phone.as_deref()),
    ];
    if let Some(contacts) = join_present(&contacts, labels.separator) {
        lines.push(Line::new(LineKind::Meta, contacts));
    }

    lines
}

/// Appends the section, preceded by a spacer and its heading, only if it holds any line.
fn push_section(lines: &mut Vec<Line>, heading: &str, section_lines: Vec<Line>) {
    if section_lines.is_empty() {
        log::trace!("Omitting the empty section {:?}", heading);
        return;
    }
    lines.push(Line::spacer());
    lines.push(Line::new(LineKind::Heading2, heading));
    lines.extend(section_lines);
}

/// Separates an entry from the next one with a small spacer, unless the entry is empty.
fn close_entry(mut entry_lines: Vec<Line>) -> Vec<Line> {
    if !entry_lines.is_empty() {
        entry_lines.push(Line::small_spacer());
    }
    entry_lines
}

fn bullet_lines(values: &[Option<String>]) -> Vec<Line> {
    values
        .iter()
        .filter_map(|value| safe_text(value.as_deref()))
        .map(|text| Line::new(LineKind::Bullet, text))
        .collect()
}

/// Formats a link as `label: url`, or just as its URL. Links without a URL are dropped.
fn format_link(link: &Link) -> Option<String> {
    let url = safe_text(link.url.as_deref())?;
    Some(match safe_text(link.label.as_deref()) {
        Some(label) => format!("{}: {}", label, url),
        None => url,
    })
}

fn experience_lines(experience: &Experience, locale: Locale) -> Vec<Line> {
    let separator = locale.labels().separator;
    let mut lines = Vec::new();

    let title = safe_text(experience.title.as_deref()).or_else(|| {
        join_present(
            &[
                safe_text(experience.org.as_deref()),
                safe_text(experience.role.as_deref()),
            ],
            separator,
        )
    });
    if let Some(title) = title {
        lines.push(Line::new(LineKind::Heading3, title));
    }

    let range = format_range(
        experience.start.as_deref(),
        experience.end.as_deref(),
        locale,
    );
    let meta = [Some(range), safe_text(experience.location.as_deref())];
    if let Some(meta) = join_present(&meta, separator) {
        lines.push(Line::new(LineKind::Meta, meta));
    }

    lines.extend(bullet_lines(&experience.summary));
    lines.extend(bullet_lines(&experience.achievements));
    lines
}

fn project_lines(project: &Project, labels: &Labels) -> Vec<Line> {
    let mut lines = Vec::new();

    if let Some(name) = safe_text(project.name.as_deref()) {
        lines.push(Line::new(LineKind::Heading3, name));
    }
    if let Some(context) = safe_text(project.context.as_deref()) {
        lines.push(Line::new(
            LineKind::Meta,
            format!("{}{}", labels.context, context),
        ));
    }
    lines.extend(bullet_lines(&project.actions));
    if let Some(result) = safe_text(project.result.as_deref()) {
        lines.push(Line::new(
            LineKind::Meta,
            format!("{}{}", labels.result, result),
        ));
    }

    let evidence: Vec<String> = project.evidence.iter().filter_map(format_link).collect();
    if !evidence.is_empty() {
        lines.push(Line::new(LineKind::Meta, labels.evidence));
        lines.extend(
            evidence
                .into_iter()
                .map(|evidence| Line::new(LineKind::Bullet, evidence)),
        );
    }

    if let Some(reflection) = safe_text(project.reflection.as_deref()) {
        lines.push(Line::new(
            LineKind::Meta,
            format!("{}{}", labels.reflection, reflection),
        ));
    }
    lines
}

fn skill_lines(skill_group: &SkillGroup) -> Vec<Line> {
    let mut lines = Vec::new();
    if let Some(group) = safe_text(skill_group.group.as_deref()) {
        lines.push(Line::new(LineKind::Heading3, group));
    }
    lines.extend(bullet_lines(&skill_group.items));
    lines
}

fn education_lines(education: &Education, locale: Locale) -> Vec<Line> {
    let mut lines = Vec::new();
    if let Some(school) = safe_text(education.school.as_deref()) {
        lines.push(Line::new(LineKind::Heading3, school));
    }
    let meta = [
        safe_text(education.degree.as_deref()),
        safe_text(education.major.as_deref()),
        Some(format_range(
            education.start.as_deref(),
            education.end.as_deref(),
            locale,
        )),
    ];
    if let Some(meta) = join_present(&meta, locale.labels().separator) {
        lines.push(Line::new(LineKind::Meta, meta));
    }
    lines
}

/// Runs the whole pipeline on the résumé: its lines are built, laid out onto pages and serialized
/// into the bytes of a PDF document.
pub fn resume_to_pdf(
    record: &ResumeRecord,
    configuration: &DocumentConfiguration,
) -> Result<Vec<u8>, ContextError> {
    let pdf_document = resume_to_pdf_document(record, configuration)?;
    Ok(pdf_document.save_to_bytes())
}

/// Same as `resume_to_pdf`, but stops before the serialization so that the object graph can be inspected.
pub fn resume_to_pdf_document(
    record: &ResumeRecord,
    configuration: &DocumentConfiguration,
) -> Result<PdfDocument, ContextError> {
    let lines = document_lines(record, configuration.locale);
    let pages = layout_pages(&lines, configuration)?;
    PdfDocument::from_pages(&pages, configuration)
}

/// Renders the résumé and writes the PDF document to the given path, returning the number of pages.
pub fn save_resume_to_pdf_file(
    record: &ResumeRecord,
    configuration: &DocumentConfiguration,
    output_path: &Path,
) -> Result<usize, ContextError> {
    let pdf_document = resume_to_pdf_document(record, configuration)?;
    pdf_document.save_to_pdf_file(output_path)?;

    Ok(pdf_document.page_count())
}
