use clap::Parser;

/// Builds the summary report of the project evaluations of a board meeting.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the evaluator files and the output settings.
    /// Relative paths in this file are relative to the directory of the file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file paths, optional) The evaluator workbooks. If specified, they replace the files
    /// listed in the configuration. Without configuration nor inputs, excel/1.xlsx to
    /// excel/6.xlsx are read.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (file path) Where to write the PDF report.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or 'stdout') If specified, the summary of the scores will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, the program checks that the
    /// computed summary matches the reference and fails otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// When specified, the name of the worksheet to read in each input workbook.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, will turn on verbose logging.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
