mod common;

use std::process::Command;

fn output_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("resume-pdf-{}-{}.pdf", name, std::process::id()))
}

#[test]
fn the_cli_writes_the_pdf_and_exits_successfully() {
    let output_path = output_path("cli-success");
    let status = Command::new(env!("CARGO_BIN_EXE_resume-pdf"))
        .args(["-d", "tests/fixtures/end_to_end.json", "-l", "en-US", "-o"])
        .arg(&output_path)
        .status()
        .unwrap();
    assert!(status.success());

    let bytes = std::fs::read(&output_path).unwrap();
    std::fs::remove_file(&output_path).unwrap();
    common::assert_structurally_valid(&bytes);
    assert_eq!(common::page_texts(&bytes)[0][1], "Experience");
}

#[test]
fn the_cli_exits_with_an_error_on_a_missing_resume() {
    let output_path = output_path("cli-failure");
    let status = Command::new(env!("CARGO_BIN_EXE_resume-pdf"))
        .args(["-d", "tests/fixtures/missing.json", "-o"])
        .arg(&output_path)
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!output_path.exists());
}

#[test]
fn the_cli_rejects_unknown_locales() {
    let status = Command::new(env!("CARGO_BIN_EXE_resume-pdf"))
        .args(["-d", "tests/fixtures/end_to_end.json", "-l", "fr-FR"])
        .status()
        .unwrap();
    assert!(!status.success());
}
