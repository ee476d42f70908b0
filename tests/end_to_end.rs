mod common;

use std::path::Path;

use resume_pdf::document::{resume_to_pdf, resume_to_pdf_document, save_resume_to_pdf_file};
use resume_pdf::document_configuration::DocumentConfiguration;
use resume_pdf::locale::Locale;
use resume_pdf::resume::ResumeRecord;

#[test]
fn a_single_experience_resume_fits_on_one_page() {
    let record = ResumeRecord::from_path(Path::new("tests/fixtures/end_to_end.json")).unwrap();
    let bytes = resume_to_pdf(&record, &DocumentConfiguration::default()).unwrap();

    common::assert_structurally_valid(&bytes);
    let pages = common::page_texts(&bytes);
    assert_eq!(pages.len(), 1);
    assert_eq!(
        pages[0],
        vec!["张三｜产品经理", "经历", "Acme｜PM", "2021 – 2023", "• Did X"]
    );
}

#[test]
fn the_english_locale_changes_the_labels_only() {
    let record = ResumeRecord::from_path(Path::new("tests/fixtures/end_to_end.json")).unwrap();
    let configuration = DocumentConfiguration {
        locale: Locale::English,
        ..DocumentConfiguration::default()
    };
    let bytes = resume_to_pdf(&record, &configuration).unwrap();

    let pages = common::page_texts(&bytes);
    assert_eq!(
        pages[0],
        vec!["张三 | 产品经理", "Experience", "Acme | PM", "2021 – 2023", "• Did X"]
    );
}

#[test]
fn an_empty_resume_still_produces_a_valid_document() {
    let record = ResumeRecord::from_slice(b"{}").unwrap();
    let bytes = resume_to_pdf(&record, &DocumentConfiguration::default()).unwrap();

    // Three font objects, one content stream, one page, the page tree and the catalog
    assert_eq!(common::assert_structurally_valid(&bytes), 7);
    assert_eq!(common::page_texts(&bytes), vec![vec!["（未填写姓名）"]]);
}

#[test]
fn long_resumes_span_several_pages() {
    let achievements: Vec<String> = (0..120)
        .map(|index| format!("\"第 {} 项成果：完成了一个非常重要的里程碑\"", index))
        .collect();
    let json = format!(
        r#"{{"basics": {{"name": "李四"}}, "experience": [{{"org": "Initech", "achievements": [{}]}}]}}"#,
        achievements.join(",")
    );
    let record = ResumeRecord::from_slice(json.as_bytes()).unwrap();
    let document = resume_to_pdf_document(&record, &DocumentConfiguration::default()).unwrap();
    assert!(document.page_count() > 1);

    let bytes = document.save_to_bytes();
    assert_eq!(
        common::assert_structurally_valid(&bytes),
        5 + 2 * document.page_count()
    );

    let lopdf_document = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(lopdf_document.get_pages().len(), document.page_count());

    let texts: Vec<String> = common::page_texts(&bytes).into_iter().flatten().collect();
    for index in 0..120 {
        let expected = format!("• 第 {} 项成果：完成了一个非常重要的里程碑", index);
        assert!(texts.contains(&expected), "{:?} is missing", expected);
    }
}

#[test]
fn placeholders_never_reach_the_document() {
    let record = ResumeRecord::from_path(Path::new("data/resume.json")).unwrap();
    let bytes = resume_to_pdf(&record, &DocumentConfiguration::default()).unwrap();

    common::assert_structurally_valid(&bytes);
    let texts: Vec<String> = common::page_texts(&bytes).into_iter().flatten().collect();
    assert!(texts.iter().all(|text| !text.contains("TODO")));
    assert!(texts.contains(&"上海｜zhangsan@example.com".to_string()));
    assert!(texts.contains(&"• GitHub: https://github.com/example".to_string()));
    assert!(texts.contains(&"2021.03 – 至今｜上海".to_string()));
    assert!(texts.contains(&"证书".to_string()));
}

#[test]
fn the_document_is_written_to_disk() {
    let record = ResumeRecord::from_path(Path::new("tests/fixtures/end_to_end.json")).unwrap();
    let output_path = std::env::temp_dir().join(format!(
        "resume-pdf-end-to-end-{}.pdf",
        std::process::id()
    ));
    let page_count =
        save_resume_to_pdf_file(&record, &DocumentConfiguration::default(), &output_path).unwrap();
    assert_eq!(page_count, 1);

    let bytes = std::fs::read(&output_path).unwrap();
    std::fs::remove_file(&output_path).unwrap();
    assert_eq!(
        bytes,
        resume_to_pdf(&record, &DocumentConfiguration::default()).unwrap()
    );
}

#[test]
fn malformed_geometry_is_rejected() {
    let record = ResumeRecord::default();
    let mut configuration = DocumentConfiguration::default();
    configuration.page_geometry.width = -595.0;
    let error = resume_to_pdf(&record, &configuration).unwrap_err();
    assert!(error.context.starts_with("Invalid page geometry"));
}

#[test]
fn fonts_which_cannot_be_written_out_are_rejected() {
    let record = ResumeRecord::default();
    let mut configuration = DocumentConfiguration::default();
    configuration.font.base_font = "ST Song".into();
    configuration.font.registry = "Ad)obe".into();
    let error = resume_to_pdf(&record, &configuration).unwrap_err();
    assert!(error.context.starts_with("Invalid font"));
}

#[test]
fn missing_resumes_are_reported() {
    let error = ResumeRecord::from_path(Path::new("tests/fixtures/missing.json")).unwrap_err();
    assert!(error.context.starts_with("Failed to read the résumé"));
    assert!(error.source_error.is_some());
}
