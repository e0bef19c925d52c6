use log::{debug, info, warn};

use evaluation_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use calamine::{open_workbook, Reader, Xlsx};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::afweeg::config_reader::*;

pub mod config_reader;
pub mod io_common;
pub mod io_excel;
pub mod report_pdf;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {worksheet_name} not found in {path}"))]
    MissingWorksheet {
        path: String,
        worksheet_name: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error encoding the PDF content"))]
    EncodingPdf { source: lopdf::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Cannot compute the scores"))]
    Scoring { source: ScoringErrors },
    #[snafu(display("No evaluation data: none of the {num_files} evaluator files could be read"))]
    NoData { num_files: usize },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    SummaryMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

fn slots_to_json(slots: &[Option<f64>]) -> Vec<JSValue> {
    slots.iter().map(|s| json!(s)).collect()
}

fn project_to_json(project: &AggregatedProject) -> JSValue {
    let pillars: Vec<JSValue> = project
        .pillars
        .iter()
        .map(|pillar| {
            let categories: Vec<JSValue> = pillar
                .categories
                .iter()
                .map(|c| {
                    json!({
                        "name": c.category.name(),
                        "average": c.mean(),
                        "evaluatorScores": slots_to_json(&c.slots),
                    })
                })
                .collect();
            json!({
                "name": pillar.pillar.name(),
                "average": pillar.mean(),
                "evaluatorScores": slots_to_json(&pillar.slots),
                "categories": categories,
            })
        })
        .collect();
    json!({
        "key": project.key.to_string(),
        "number": project.number,
        "title": project.title,
        "totalScore": project.mean_total(),
        "evaluatorTotals": slots_to_json(&project.totals),
        "pillars": pillars,
    })
}

pub fn build_summary_js(settings: &ReportSettings, aggregate: &Aggregate) -> JSValue {
    let projects: Vec<JSValue> = aggregate.projects.values().map(project_to_json).collect();
    json!({
        "config": settings,
        "evaluators": aggregate.evaluators,
        "projects": projects,
    })
}

/// Reads and extracts all the evaluator files.
///
/// A file that cannot be read is reported and skipped: the other evaluators
/// still count.
pub fn read_evaluations(files: &[EvaluatorFile], layout: &SheetLayout) -> Vec<EvaluatorScores> {
    let mut res: Vec<EvaluatorScores> = Vec::new();
    for file in files {
        info!("Processing {}...", file.file_path);
        match io_excel::read_excel_grid(&file.file_path, file.excel_worksheet_name.as_deref()) {
            Ok(grid) => {
                let evaluation = extract_projects(&file.label(), &grid, layout);
                res.push(evaluation);
            }
            Err(e) => {
                warn!("Error processing {}: {}", file.file_path, e);
                if let Some(source) = std::error::Error::source(&e) {
                    debug!("read_evaluations: cause: {}", source);
                }
            }
        }
    }
    res
}

fn write_summary(destination: &str, pretty_js: &str) -> ReportResult<()> {
    if destination == "stdout" {
        println!("{}", pretty_js);
        Ok(())
    } else {
        info!("Writing summary to {}", destination);
        fs::write(destination, pretty_js).context(WritingFileSnafu { path: destination })
    }
}

// Compares the parsed values: the means are written with the shortest
// representation that reads back to the same f64.
fn check_summary(summary_path: &str, summary_js: &JSValue, pretty_js_stats: &str) -> ReportResult<()> {
    let summary_ref = read_summary(summary_path)?;
    if &summary_ref != summary_js {
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        warn!("Found differences with the reference summary {}", summary_path);
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return SummaryMismatchSnafu {}.fail();
    }
    info!("The summary matches the reference {}", summary_path);
    Ok(())
}

/// Runs the whole report: reads the evaluations, aggregates them, writes the
/// summary and the PDF.
///
/// Nothing is written when no evaluator file could be read.
pub fn run_report(config: &ReportConfig, check_summary_path: Option<String>) -> ReportResult<Aggregate> {
    let layout = SheetLayout::DEFAULT;
    layout.validate().context(ScoringSnafu {})?;
    let settings = config.report_settings();
    info!("settings: {:?}", settings);

    let evaluations = read_evaluations(&config.evaluator_files, &layout);
    if evaluations.is_empty() {
        return NoDataSnafu {
            num_files: config.evaluator_files.len(),
        }
        .fail();
    }
    info!(
        "Creating summary for {} evaluation files ({} evaluator columns)",
        evaluations.len(),
        settings.evaluator_columns
    );
    let aggregate = evaluation_scoring::aggregate(&evaluations).context(ScoringSnafu {})?;

    let summary_js = build_summary_js(&settings, &aggregate);
    let pretty_js_stats = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    if let Some(summary_p) = check_summary_path {
        check_summary(&summary_p, &summary_js, &pretty_js_stats)?;
    }
    if let Some(destination) = config.output_settings.output_summary.as_deref() {
        write_summary(destination, &pretty_js_stats)?;
    }
    if let Some(pdf_path) = config.output_settings.output_pdf.as_deref() {
        report_pdf::write_report(&aggregate, &settings, pdf_path)?;
    }
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::path::Path;

    const SCORES: [&str; 12] = [
        "4 - goed",
        "sterk aanwezig",
        "3",
        "aanwezig",
        "",
        "2",
        "5",
        "gedeeltelijk aanwezig",
        "4",
        "afwezig",
        "zwak",
        "3",
    ];

    // 1 2 1 | 1 - 1 | 1 2 1 | 1 1 1: a total of 13/11.
    const LOW_SCORES: [&str; 12] = ["1", "2", "1", "1", "", "1", "1", "2", "1", "1", "1", "1"];

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Writes an evaluation workbook with the given project titles in the
    /// project columns, every project with the same scores.
    fn write_workbook(path: &Path, titles: &[&str], scores: &[&str; 12]) {
        let layout = SheetLayout::DEFAULT;
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Criteria").unwrap();
        for (idx, title) in titles.iter().enumerate() {
            let col = (layout.first_project_column + idx) as u16;
            worksheet
                .write_number(layout.number_row as u32, col, (idx + 1) as f64)
                .unwrap();
            if !title.is_empty() {
                worksheet
                    .write_string(layout.title_row as u32, col, *title)
                    .unwrap();
            }
            let rows = layout.pillar_rows.iter().flat_map(|pr| pr.rows);
            for (row, score) in rows.zip(scores.iter()) {
                if !score.is_empty() {
                    worksheet.write_string(row as u32, col, *score).unwrap();
                }
            }
        }
        workbook.save(path).unwrap();
    }

    fn config_for(dir: &Path, names: &[&str]) -> ReportConfig {
        ReportConfig {
            output_settings: OutputSettings {
                output_pdf: Some(dir.join("report.pdf").display().to_string()),
                output_summary: Some(dir.join("summary.json").display().to_string()),
                ..OutputSettings::default()
            },
            evaluator_files: names
                .iter()
                .map(|n| EvaluatorFile::from_path(&dir.join(n).display().to_string()))
                .collect(),
        }
    }

    #[test]
    fn read_workbook_layout() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.xlsx");
        write_workbook(&path, &["Groene haven", "", "Fietsroute"], &SCORES);
        let grid = io_excel::read_excel_grid(&path.display().to_string(), None).unwrap();
        assert_eq!(grid.get(1, 2), &RawCell::text("Groene haven"));
        assert_eq!(grid.get(0, 4), &RawCell::Number(3.0));
        assert_eq!(grid.get(3, 2), &RawCell::text("4 - goed"));

        let ev = extract_projects("1.xlsx", &grid, &SheetLayout::DEFAULT);
        let keys: Vec<ProjectKey> = ev.projects.keys().cloned().collect();
        assert_eq!(keys, vec![ProjectKey(1), ProjectKey(3)]);
        let p = &ev.projects[&ProjectKey(3)];
        assert_eq!(p.number, "3");
        // 4 5 3 | 4 - 2 | 5 3 4 | 1 2 3
        assert_eq!(p.total, Some(36.0 / 11.0));
    }

    #[test]
    fn named_worksheet_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.xlsx");
        write_workbook(&path, &["P"], &SCORES);
        let res = io_excel::read_excel_grid(&path.display().to_string(), Some("Scores"));
        assert!(matches!(res, Err(ReportError::MissingWorksheet { .. })));
    }

    #[test]
    fn two_identical_evaluators() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write_workbook(&dir.path().join("1.xlsx"), &["Proj X"], &SCORES);
        write_workbook(&dir.path().join("2.xlsx"), &["Proj X"], &SCORES);
        let config = config_for(dir.path(), &["1.xlsx", "2.xlsx"]);

        let agg = run_report(&config, None).unwrap();
        let p = &agg.projects[&ProjectKey(1)];
        assert_eq!(p.title, "Proj X");
        assert_eq!(p.totals.len(), 2);
        assert_eq!(p.totals[0], p.totals[1]);
        assert_eq!(p.mean_total(), p.totals[0]);
        assert_eq!(agg.evaluators, vec!["1.xlsx".to_string(), "2.xlsx".to_string()]);

        let pdf = lopdf::Document::load(dir.path().join("report.pdf")).unwrap();
        assert_eq!(pdf.get_pages().len(), 2);

        let summary: JSValue =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["projects"][0]["key"], json!("project_1"));
        assert_eq!(summary["projects"][0]["title"], json!("Proj X"));
        assert_eq!(
            summary["projects"][0]["pillars"][0]["categories"][1]["evaluatorScores"],
            json!([5.0, 5.0])
        );
        assert_eq!(summary["config"]["title"], json!(DEFAULT_TITLE));
    }

    #[test]
    fn unreadable_files_are_skipped() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write_workbook(&dir.path().join("2.xlsx"), &["Proj X", "Proj Y"], &SCORES);
        fs::write(dir.path().join("3.xlsx"), "not a workbook").unwrap();
        let config = config_for(dir.path(), &["1.xlsx", "2.xlsx", "3.xlsx"]);

        let agg = run_report(&config, None).unwrap();
        // Only the readable file takes a slot.
        assert_eq!(agg.num_evaluators(), 1);
        assert_eq!(agg.projects.len(), 2);
        assert!(dir.path().join("report.pdf").exists());
    }

    #[test]
    fn no_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), &["1.xlsx", "2.xlsx"]);
        let res = run_report(&config, None);
        assert!(matches!(res, Err(ReportError::NoData { num_files: 2 })));
        assert!(!dir.path().join("report.pdf").exists());
        assert!(!dir.path().join("summary.json").exists());
    }

    #[test]
    fn reference_summary() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write_workbook(&dir.path().join("1.xlsx"), &["Proj X"], &SCORES);
        let config = config_for(dir.path(), &["1.xlsx"]);
        run_report(&config, None).unwrap();

        let reference = dir.path().join("summary.json").display().to_string();
        run_report(&config, Some(reference.clone())).unwrap();

        let other = ReportConfig {
            output_settings: OutputSettings {
                title: Some("Andere titel".to_string()),
                ..config.output_settings.clone()
            },
            ..config.clone()
        };
        let res = run_report(&other, Some(reference));
        assert!(matches!(res, Err(ReportError::SummaryMismatch {})));
    }

    #[test]
    fn reference_summary_with_long_means() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write_workbook(&dir.path().join("1.xlsx"), &["Proj X"], &LOW_SCORES);
        write_workbook(&dir.path().join("2.xlsx"), &["Proj X"], &SCORES);
        let config = config_for(dir.path(), &["1.xlsx", "2.xlsx"]);
        let agg = run_report(&config, None).unwrap();
        let p = &agg.projects[&ProjectKey(1)];
        assert_eq!(p.totals[0], Some(13.0 / 11.0));
        assert_eq!(p.pillars[0].slots[0], Some(4.0 / 3.0));

        let reference = dir.path().join("summary.json").display().to_string();
        let res = run_report(&config, Some(reference));
        assert!(res.is_ok());
    }
}
