use crate::afweeg::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Projectevaluatie Samenvatting";
pub const DEFAULT_SUBTITLE: &str = "Board Meeting 10 juli 2025";
pub const DEFAULT_PROGRAMME: &str = "Regio Deal Waterwegregio";
pub const DEFAULT_OUTPUT_PDF: &str = "projectevaluatie_overview.pdf";
pub const DEFAULT_EVALUATOR_COLUMNS: usize = 6;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub programme: Option<String>,
    #[serde(rename = "outputPdf")]
    pub output_pdf: Option<String>,
    /// A file path or `stdout`.
    #[serde(rename = "outputSummary")]
    pub output_summary: Option<String>,
    /// The number of evaluator columns on the project pages.
    #[serde(rename = "evaluatorColumns")]
    pub evaluator_columns: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorFile {
    #[serde(rename = "filePath")]
    pub file_path: String,
    pub label: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl EvaluatorFile {
    pub fn from_path(path: &str) -> EvaluatorFile {
        EvaluatorFile {
            file_path: path.to_string(),
            label: None,
            excel_worksheet_name: None,
        }
    }

    /// The label shown in logs and in the summary.
    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| io_common::simplify_file_name(&self.file_path))
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "evaluatorFiles")]
    pub evaluator_files: Vec<EvaluatorFile>,
}

impl Default for ReportConfig {
    // The six evaluation workbooks of the board meeting.
    fn default() -> Self {
        ReportConfig {
            output_settings: OutputSettings::default(),
            evaluator_files: (1..=6)
                .map(|i| EvaluatorFile::from_path(&format!("excel/{}.xlsx", i)))
                .collect(),
        }
    }
}

impl ReportConfig {
    /// Makes the relative evaluator paths relative to the given directory.
    pub fn resolve_paths(self, root: &Path) -> ReportConfig {
        let evaluator_files = self
            .evaluator_files
            .into_iter()
            .map(|f| {
                if Path::new(&f.file_path).is_absolute() {
                    f
                } else {
                    EvaluatorFile {
                        file_path: root.join(&f.file_path).display().to_string(),
                        ..f
                    }
                }
            })
            .collect();
        ReportConfig {
            output_settings: self.output_settings,
            evaluator_files,
        }
    }

    pub fn report_settings(&self) -> ReportSettings {
        let os = &self.output_settings;
        ReportSettings {
            title: os.title.clone().unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            subtitle: os
                .subtitle
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBTITLE.to_string()),
            programme: os
                .programme
                .clone()
                .unwrap_or_else(|| DEFAULT_PROGRAMME.to_string()),
            evaluator_columns: os
                .evaluator_columns
                .filter(|c| *c > 0)
                .unwrap_or(DEFAULT_EVALUATOR_COLUMNS),
        }
    }
}

/// The settings of the report, with all the defaults filled in.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct ReportSettings {
    pub title: String,
    pub subtitle: String,
    pub programme: String,
    #[serde(rename = "evaluatorColumns")]
    pub evaluator_columns: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportConfig::default().report_settings()
    }
}

pub fn read_config(path: &str) -> ReportResult<ReportConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ReportConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    let root = Path::new(path).parent().context(MissingParentDirSnafu {})?;
    Ok(config.resolve_paths(root))
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"evaluatorFiles": [{"filePath": "a.xlsx"}]}"#).unwrap();
        assert_eq!(config.evaluator_files, vec![EvaluatorFile::from_path("a.xlsx")]);
        let settings = config.report_settings();
        assert_eq!(settings.title, DEFAULT_TITLE);
        assert_eq!(settings.programme, DEFAULT_PROGRAMME);
        assert_eq!(settings.evaluator_columns, 6);
    }

    #[test]
    fn full_config() {
        let js = r#"{
            "outputSettings": {
                "title": "Samenvatting",
                "subtitle": "Ronde 2",
                "outputPdf": "out.pdf",
                "outputSummary": "stdout",
                "evaluatorColumns": 4
            },
            "evaluatorFiles": [
                {"filePath": "1.xlsx", "label": "Jan", "excelWorksheetName": "Scores"},
                {"filePath": "/data/2.xlsx"}
            ]
        }"#;
        let config: ReportConfig = serde_json::from_str(js).unwrap();
        let settings = config.report_settings();
        assert_eq!(settings.title, "Samenvatting");
        assert_eq!(settings.subtitle, "Ronde 2");
        assert_eq!(settings.programme, DEFAULT_PROGRAMME);
        assert_eq!(settings.evaluator_columns, 4);
        assert_eq!(config.output_settings.output_summary.as_deref(), Some("stdout"));
        assert_eq!(config.evaluator_files[0].label(), "Jan");
        assert_eq!(config.evaluator_files[1].label(), "2.xlsx");

        let resolved = config.resolve_paths(Path::new("/evaluaties"));
        assert_eq!(
            Path::new(&resolved.evaluator_files[0].file_path),
            Path::new("/evaluaties/1.xlsx")
        );
        assert_eq!(resolved.evaluator_files[1].file_path, "/data/2.xlsx");
    }

    #[test]
    fn default_files() {
        let config = ReportConfig::default();
        assert_eq!(config.evaluator_files.len(), 6);
        assert_eq!(config.evaluator_files[5].file_path, "excel/6.xlsx");
    }

    #[test]
    fn missing_config_file() {
        let res = read_config("/does/not/exist.json");
        assert!(matches!(res, Err(ReportError::OpeningJson { .. })));
    }
}
