mod afweeg;
mod args;

use crate::afweeg::config_reader::{
    read_config, EvaluatorFile, ReportConfig, DEFAULT_OUTPUT_PDF,
};
use crate::afweeg::ReportResult;
use crate::args::Args;
use clap::Parser;
use log::{debug, info};

/// Merges the command line with the configuration file, if any.
fn config_from_args(args: &Args) -> ReportResult<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => ReportConfig::default(),
    };
    if !args.input.is_empty() {
        config.evaluator_files = args
            .input
            .iter()
            .map(|p| EvaluatorFile::from_path(p))
            .collect();
    }
    if let Some(name) = &args.excel_worksheet_name {
        for file in config.evaluator_files.iter_mut() {
            file.excel_worksheet_name = Some(name.clone());
        }
    }
    if args.out.is_some() {
        config.output_settings.output_pdf = args.out.clone();
    }
    if config.output_settings.output_pdf.is_none() {
        config.output_settings.output_pdf = Some(DEFAULT_OUTPUT_PDF.to_string());
    }
    if args.summary.is_some() {
        config.output_settings.output_summary = args.summary.clone();
    }
    Ok(config)
}

fn main() {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("args: {:?}", args);

    let res = config_from_args(&args)
        .and_then(|config| afweeg::run_report(&config, args.reference.clone()));
    match res {
        Ok(aggregate) => {
            info!(
                "Report done: {} projects from {} evaluators",
                aggregate.projects.len(),
                aggregate.num_evaluators()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let args = Args::parse_from(["afweegkader"]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.evaluator_files.len(), 6);
        assert_eq!(
            config.output_settings.output_pdf.as_deref(),
            Some(DEFAULT_OUTPUT_PDF)
        );
        assert_eq!(config.output_settings.output_summary, None);
    }

    #[test]
    fn inputs_replace_files() {
        let args = Args::parse_from([
            "afweegkader",
            "--input",
            "a.xlsx",
            "--input",
            "b.xlsx",
            "--excel-worksheet-name",
            "Scores",
            "--out",
            "r.pdf",
            "--summary",
            "stdout",
        ]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.evaluator_files.len(), 2);
        assert_eq!(config.evaluator_files[1].file_path, "b.xlsx");
        assert_eq!(
            config.evaluator_files[0].excel_worksheet_name.as_deref(),
            Some("Scores")
        );
        assert_eq!(config.output_settings.output_pdf.as_deref(), Some("r.pdf"));
        assert_eq!(
            config.output_settings.output_summary.as_deref(),
            Some("stdout")
        );
    }
}
