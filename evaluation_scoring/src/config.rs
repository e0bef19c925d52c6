// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// The content of one spreadsheet cell, as far as scoring is concerned.
///
/// Readers map their own cell types onto this enumeration. Spreadsheet error
/// values (`#N/A`, `#DIV/0!`, ...) are mapped to `Empty`.
#[derive(PartialEq, Debug, Clone)]
pub enum RawCell {
    Text(String),
    Number(f64),
    /// A blank cell, a cell outside of the sheet or an error value.
    Empty,
}

impl RawCell {
    pub fn text<S: Into<String>>(s: S) -> RawCell {
        RawCell::Text(s.into())
    }

    /// The text of the cell as it would be displayed, trimmed.
    ///
    /// Integral numbers are shown without decimals, so that a project number
    /// typed as `3` in Excel shows as `3` and not `3.0`.
    pub fn display_text(&self) -> String {
        match self {
            RawCell::Text(s) => s.trim().to_string(),
            RawCell::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
            RawCell::Number(n) => n.to_string(),
            RawCell::Empty => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.display_text().is_empty()
    }
}

/// A score given by an evaluator for one category.
///
/// Always within [1, 5]. The digit and keyword rules produce whole numbers,
/// numeric cells may carry a fractional score.
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;

    /// Returns `None` for anything outside [1, 5], including NaN.
    pub fn new(value: f64) -> Option<Score> {
        if (Score::MIN..=Score::MAX).contains(&value) {
            Some(Score(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// The four evaluation themes. Each pillar groups exactly three categories.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Pillar {
    Impact,
    RegionalEmbedding,
    FinancialAccountability,
    Feasibility,
}

pub const CATEGORIES_PER_PILLAR: usize = 3;

impl Pillar {
    /// All the pillars, in the order of the evaluation form.
    pub const ALL: [Pillar; 4] = [
        Pillar::Impact,
        Pillar::RegionalEmbedding,
        Pillar::FinancialAccountability,
        Pillar::Feasibility,
    ];

    /// The name as printed on the evaluation form.
    pub fn name(&self) -> &'static str {
        match self {
            Pillar::Impact => "Impact",
            Pillar::RegionalEmbedding => "Regionale inbedding",
            Pillar::FinancialAccountability => "Financiële verantwoording",
            Pillar::Feasibility => "Haalbaarheid",
        }
    }

    fn category_names(&self) -> [&'static str; CATEGORIES_PER_PILLAR] {
        match self {
            Pillar::Impact => [
                "Impact brede welvaart",
                "Impact op bewoners",
                "Innovatie binnen gemeenten",
            ],
            Pillar::RegionalEmbedding => [
                "Regiobreedte",
                "Samenwerkingsbreedte",
                "Schaalbaarheid",
            ],
            Pillar::FinancialAccountability => [
                "Doelmatigheid",
                "Mate van (financiële) inbreng",
                "Duurzaamheid",
            ],
            Pillar::Feasibility => [
                "Tijdige realisatie",
                "Projectorganisatie",
                "Risico's en beheersmaatregelen",
            ],
        }
    }

    pub fn categories(&self) -> [Category; CATEGORIES_PER_PILLAR] {
        [0, 1, 2].map(|index| Category {
            pillar: *self,
            index,
        })
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A sub-criterion of a pillar. Only built through `Pillar::categories`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct Category {
    pillar: Pillar,
    index: usize,
}

impl Category {
    pub fn pillar(&self) -> Pillar {
        self.pillar
    }

    /// Position within the pillar, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.pillar.category_names()[self.index]
    }
}

/// Positional identity of a project: the n-th project column of the sheet,
/// starting at 1.
///
/// Evaluator files are joined on this key and not on the project title.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct ProjectKey(pub usize);

impl Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project_{}", self.0)
    }
}

/// The scores of one evaluator for the categories of one pillar.
#[derive(PartialEq, Debug, Clone)]
pub struct PillarScores {
    pub pillar: Pillar,
    /// In the order of `Pillar::categories`.
    pub scores: [Option<Score>; CATEGORIES_PER_PILLAR],
}

/// What one evaluator filled in for one project.
#[derive(PartialEq, Debug, Clone)]
pub struct ProjectScores {
    pub key: ProjectKey,
    pub number: String,
    pub title: String,
    pub pillars: Vec<PillarScores>,
    /// Mean over all the present category scores (not over the pillar means).
    pub total: Option<f64>,
}

impl ProjectScores {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarScores> {
        self.pillars.iter().find(|ps| ps.pillar == pillar)
    }
}

/// The content of one evaluator file.
#[derive(PartialEq, Debug, Clone)]
pub struct EvaluatorScores {
    /// Where the scores come from, usually the file name.
    pub source: String,
    pub projects: BTreeMap<ProjectKey, ProjectScores>,
}

// ******** Output data structures *********

/// The scores of all evaluators for one category of a project.
/// One slot per evaluator, in evaluator order.
#[derive(PartialEq, Debug, Clone)]
pub struct AggregatedCategory {
    pub category: Category,
    pub slots: Vec<Option<f64>>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AggregatedPillar {
    pub pillar: Pillar,
    /// The pillar mean of each evaluator.
    pub slots: Vec<Option<f64>>,
    pub categories: Vec<AggregatedCategory>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct AggregatedProject {
    pub key: ProjectKey,
    pub number: String,
    pub title: String,
    /// The total score of each evaluator.
    pub totals: Vec<Option<f64>>,
    /// In the order of `Pillar::ALL`.
    pub pillars: Vec<AggregatedPillar>,
}

/// The combined view over all the evaluator files.
#[derive(PartialEq, Debug, Clone)]
pub struct Aggregate {
    /// The sources of the evaluators, one per slot.
    pub evaluators: Vec<String>,
    pub projects: BTreeMap<ProjectKey, AggregatedProject>,
}

/// Coarse classification of a score, used to colour reports.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ScoreBand {
    /// Below 3
    Low,
    /// From 3 (included) to 4 (excluded)
    Mid,
    /// 4 and above
    High,
}

impl ScoreBand {
    pub fn of(score: f64) -> ScoreBand {
        if score >= 4.0 {
            ScoreBand::High
        } else if score >= 3.0 {
            ScoreBand::Mid
        } else {
            ScoreBand::Low
        }
    }
}

/// Errors that prevent the scores from being computed.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    /// No evaluator provided any data.
    NoEvaluations,
    InvalidLayout(String),
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::NoEvaluations => write!(f, "no evaluation data"),
            ScoringErrors::InvalidLayout(msg) => write!(f, "invalid sheet layout: {}", msg),
        }
    }
}

// ********* Configuration **********

/// The rows holding the three categories of a pillar.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PillarRows {
    pub pillar: Pillar,
    pub rows: [usize; CATEGORIES_PER_PILLAR],
}

/// Where things are on an evaluation sheet. All indexes start at 0.
///
/// Each project is one column. The number and the title of the project are in
/// two header rows, the scores in fixed rows below.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SheetLayout {
    pub number_row: usize,
    pub title_row: usize,
    pub first_project_column: usize,
    pub project_count: usize,
    pub pillar_rows: [PillarRows; 4],
}

impl SheetLayout {
    /// The layout of the evaluation form: projects in columns C to L, one
    /// blank row between the pillars.
    pub const DEFAULT: SheetLayout = SheetLayout {
        number_row: 0,
        title_row: 1,
        first_project_column: 2,
        project_count: 10,
        pillar_rows: [
            PillarRows {
                pillar: Pillar::Impact,
                rows: [3, 4, 5],
            },
            PillarRows {
                pillar: Pillar::RegionalEmbedding,
                rows: [7, 8, 9],
            },
            PillarRows {
                pillar: Pillar::FinancialAccountability,
                rows: [11, 12, 13],
            },
            PillarRows {
                pillar: Pillar::Feasibility,
                rows: [15, 16, 17],
            },
        ],
    };

    pub fn project_columns(&self) -> std::ops::Range<usize> {
        self.first_project_column..self.first_project_column + self.project_count
    }

    /// The key of the project in the given column.
    /// The column must be one of `project_columns`.
    pub fn key_for_column(&self, column: usize) -> ProjectKey {
        ProjectKey(column - self.first_project_column + 1)
    }

    pub fn validate(&self) -> Result<(), ScoringErrors> {
        if self.project_count == 0 {
            return Err(ScoringErrors::InvalidLayout(
                "no project columns".to_string(),
            ));
        }
        if self.number_row == self.title_row {
            return Err(ScoringErrors::InvalidLayout(format!(
                "number and title share row {}",
                self.title_row
            )));
        }
        for pillar in Pillar::ALL {
            let count = self
                .pillar_rows
                .iter()
                .filter(|pr| pr.pillar == pillar)
                .count();
            if count != 1 {
                return Err(ScoringErrors::InvalidLayout(format!(
                    "pillar {} appears {} times",
                    pillar, count
                )));
            }
        }
        let mut seen: Vec<usize> = vec![self.number_row, self.title_row];
        for row in self.pillar_rows.iter().flat_map(|pr| pr.rows) {
            if seen.contains(&row) {
                return Err(ScoringErrors::InvalidLayout(format!(
                    "row {} is used twice",
                    row
                )));
            }
            seen.push(row);
        }
        Ok(())
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        SheetLayout::DEFAULT
    }
}
