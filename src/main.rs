use clap::Parser;
use std::path::PathBuf;

use resume_pdf::{
    document::save_resume_to_pdf_file, document_configuration::DocumentConfiguration,
    error::ContextError, locale::Locale, resume::ResumeRecord,
};

/// The command line arguments are the path of the JSON résumé and the path of the output PDF file,
/// optionally together with a configuration file and the locale of the labels.
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct CliArguments {
    /// The path of the JSON résumé.
    #[arg(
        short = 'd',
        long = "document",
        value_name = "json_file",
        default_value = "data/resume.json"
    )]
    document_path: PathBuf,
    /// The path of the output PDF file.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "file_path",
        default_value = "resume.pdf"
    )]
    output_file_path: PathBuf,
    /// The path of the JSON configuration of the document.
    #[arg(short = 'c', long = "configuration", value_name = "json_file")]
    configuration_path: Option<PathBuf>,
    /// The locale of the labels, either "zh-CN" or "en-US", which overrides the configuration.
    #[arg(short = 'l', long = "locale", value_name = "locale")]
    locale: Option<Locale>,
    /// Log every step of the conversion.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() {
    let arguments = CliArguments::parse();
    env_logger::builder()
        .filter_level(if arguments.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Err(error) = fallible_main(arguments) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main(arguments: CliArguments) -> Result<(), ContextError> {
    log::debug!("{:?}", arguments);

    let mut configuration = match &arguments.configuration_path {
        Some(configuration_path) => DocumentConfiguration::from_path(configuration_path)?,
        None => DocumentConfiguration::default(),
    };
    if let Some(locale) = arguments.locale {
        configuration.locale = locale;
    }

    let record = ResumeRecord::from_path(&arguments.document_path)?;
    let page_count = save_resume_to_pdf_file(&record, &configuration, &arguments.output_file_path)
        .map_err(|error| ContextError::with_error("Failed to render the résumé", &error))?;
    log::info!(
        "Saved the {} page(s) résumé to the path: {:?}",
        page_count,
        arguments.output_file_path
    );

    Ok(())
}
