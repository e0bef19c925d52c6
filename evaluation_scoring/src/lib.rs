/*!
Score extraction and aggregation for evaluator scoring spreadsheets.

Every evaluator fills in one spreadsheet covering all the projects. This crate
turns the cells of such a sheet into scores ([`extract_projects`]) and combines
the sheets of all the evaluators into one view per project ([`aggregate`]).

The crate does not read files: callers convert their worksheets into a
[`CellGrid`] first.

```
use evaluation_scoring::*;

let grid = CellGrid::new()
    .with_cell(0, 2, RawCell::Number(1.0))
    .with_cell(1, 2, RawCell::text("Proj X"))
    .with_cell(3, 2, RawCell::text("4 - aanwezig"))
    .with_cell(5, 2, RawCell::text("sterk"));

let evaluation = extract_projects("eval1.xlsx", &grid, &SheetLayout::DEFAULT);
let aggregate = aggregate(&[evaluation])?;

let project = &aggregate.projects[&ProjectKey(1)];
assert_eq!(project.title, "Proj X");
assert_eq!(project.mean_total(), Some(4.5));
# Ok::<(), ScoringErrors>(())
```

See the [manual] for the layout of the sheets and the scoring rules.
*/

mod builder;
mod config;
pub mod manual;

use log::{debug, info};
use std::collections::BTreeMap;

pub use crate::builder::CellGrid;
pub use crate::config::*;

/// Converts a cell into a score.
///
/// Text is read with a chain of rules, the first one that succeeds wins:
/// 1. the first decimal digit of the text, if it is between 1 and 5. Only the
///    first digit is considered: `"6 of 3"` does not use the `3`.
/// 2. keywords of the evaluation form: `afwezig` (1), `zwak` (2),
///    `gedeeltelijk` (3), `aanwezig` without `sterk` (4), `sterk` (5).
/// 3. the whole text as a number within [1, 5].
///
/// Number cells go straight to the range check. Anything else is absent.
pub fn parse_score(cell: &RawCell) -> Option<Score> {
    match cell {
        RawCell::Empty => None,
        RawCell::Number(value) => Score::new(*value),
        RawCell::Text(text) => parse_score_text(text),
    }
}

pub fn parse_score_text(text: &str) -> Option<Score> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(digit) = text.chars().find_map(|c| c.to_digit(10)) {
        if (1..=5).contains(&digit) {
            return Score::new(digit as f64);
        }
    }
    if let Some(score) = keyword_score(&text.to_lowercase()) {
        return Some(score);
    }
    text.parse::<f64>().ok().and_then(Score::new)
}

// The order matters: "gedeeltelijk aanwezig" is a 3 and "sterk aanwezig" a 5.
fn keyword_score(lowered: &str) -> Option<Score> {
    let value = if lowered.contains("afwezig") {
        1.0
    } else if lowered.contains("zwak") {
        2.0
    } else if lowered.contains("gedeeltelijk") {
        3.0
    } else if lowered.contains("aanwezig") && !lowered.contains("sterk") {
        4.0
    } else if lowered.contains("sterk") {
        5.0
    } else {
        return None;
    };
    Score::new(value)
}

/// The mean of the present values, or `None` if there are none.
pub fn mean_of_present<I: IntoIterator<Item = Option<f64>>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

pub(crate) fn is_missing_title(title: &str) -> bool {
    let t = title.trim();
    // Pandas writes out missing cells as "nan".
    t.is_empty() || t.eq_ignore_ascii_case("nan")
}

impl PillarScores {
    pub fn mean(&self) -> Option<f64> {
        mean_of_present(self.scores.iter().map(|s| s.map(|s| s.value())))
    }
}

/// Reads all the projects of one evaluator sheet.
///
/// Columns without a title are skipped. The total of a project is the mean of
/// all its present category scores.
pub fn extract_projects(source: &str, grid: &CellGrid, layout: &SheetLayout) -> EvaluatorScores {
    let mut projects: BTreeMap<ProjectKey, ProjectScores> = BTreeMap::new();
    for column in layout.project_columns() {
        let key = layout.key_for_column(column);
        let title = grid.get(layout.title_row, column).display_text();
        if is_missing_title(&title) {
            debug!(
                "extract_projects: {}: column {} ({}) has no title, skipping",
                source, column, key
            );
            continue;
        }
        let number = match grid.get(layout.number_row, column).display_text() {
            n if n.is_empty() => format!("Project {}", key.0),
            n => n,
        };

        let pillars: Vec<PillarScores> = layout
            .pillar_rows
            .iter()
            .map(|pr| PillarScores {
                pillar: pr.pillar,
                scores: pr.rows.map(|row| parse_score(grid.get(row, column))),
            })
            .collect();
        let total = mean_of_present(
            pillars
                .iter()
                .flat_map(|ps| ps.scores)
                .map(|s| s.map(|s| s.value())),
        );
        debug!(
            "extract_projects: {}: {} {:?} {:?}: total {:?}",
            source, key, number, title, total
        );
        projects.insert(
            key,
            ProjectScores {
                key,
                number,
                title,
                pillars,
                total,
            },
        );
    }
    info!("Found {} projects in {}", projects.len(), source);
    EvaluatorScores {
        source: source.to_string(),
        projects,
    }
}

impl AggregatedCategory {
    pub fn mean(&self) -> Option<f64> {
        mean_of_present(self.slots.iter().cloned())
    }
}

impl AggregatedPillar {
    pub fn mean(&self) -> Option<f64> {
        mean_of_present(self.slots.iter().cloned())
    }
}

impl AggregatedProject {
    // The first record of a project decides its number and title.
    fn seed(record: &ProjectScores, num_slots: usize) -> AggregatedProject {
        AggregatedProject {
            key: record.key,
            number: record.number.clone(),
            title: record.title.clone(),
            totals: vec![None; num_slots],
            pillars: Pillar::ALL
                .iter()
                .map(|pillar| AggregatedPillar {
                    pillar: *pillar,
                    slots: vec![None; num_slots],
                    categories: pillar
                        .categories()
                        .into_iter()
                        .map(|category| AggregatedCategory {
                            category,
                            slots: vec![None; num_slots],
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn with_record(mut self, slot: usize, record: &ProjectScores) -> AggregatedProject {
        self.totals[slot] = record.total;
        for agg_pillar in self.pillars.iter_mut() {
            if let Some(ps) = record.pillar(agg_pillar.pillar) {
                agg_pillar.slots[slot] = ps.mean();
                for (agg_cat, score) in agg_pillar.categories.iter_mut().zip(ps.scores) {
                    agg_cat.slots[slot] = score.map(|s| s.value());
                }
            }
        }
        self
    }

    /// The mean over the evaluators of their total score.
    pub fn mean_total(&self) -> Option<f64> {
        mean_of_present(self.totals.iter().cloned())
    }

    pub fn pillar(&self, pillar: Pillar) -> Option<&AggregatedPillar> {
        self.pillars.iter().find(|p| p.pillar == pillar)
    }
}

impl Aggregate {
    fn empty(evaluators: Vec<String>) -> Aggregate {
        Aggregate {
            evaluators,
            projects: BTreeMap::new(),
        }
    }

    pub fn num_evaluators(&self) -> usize {
        self.evaluators.len()
    }
}

/// Combines the results of all the evaluators.
///
/// The evaluators keep their order: slot `i` of every project holds the scores
/// of `evaluations[i]`, or `None` if that evaluator has no record for the
/// project. Projects are matched on their key only.
pub fn aggregate(evaluations: &[EvaluatorScores]) -> Result<Aggregate, ScoringErrors> {
    if evaluations.is_empty() {
        return Err(ScoringErrors::NoEvaluations);
    }
    info!("Aggregating {} evaluations", evaluations.len());
    let initial = Aggregate::empty(evaluations.iter().map(|e| e.source.clone()).collect());
    let folded = evaluations
        .iter()
        .enumerate()
        .fold(initial, |acc, (slot, evaluation)| {
            fold_evaluation(acc, slot, evaluation)
        });

    let Aggregate {
        evaluators,
        projects,
    } = folded;
    let projects: BTreeMap<ProjectKey, AggregatedProject> = projects
        .into_iter()
        .filter(|(key, p)| {
            let keep = !is_missing_title(&p.title);
            if !keep {
                debug!("aggregate: dropping {} without title", key);
            }
            keep
        })
        .collect();
    Ok(Aggregate {
        evaluators,
        projects,
    })
}

fn fold_evaluation(acc: Aggregate, slot: usize, evaluation: &EvaluatorScores) -> Aggregate {
    let num_slots = acc.evaluators.len();
    let mut projects = acc.projects;
    for (key, record) in evaluation.projects.iter() {
        let current = projects
            .remove(key)
            .unwrap_or_else(|| AggregatedProject::seed(record, num_slots));
        projects.insert(*key, current.with_record(slot, record));
    }
    debug!(
        "fold_evaluation: slot {} ({}): {} projects so far",
        slot,
        evaluation.source,
        projects.len()
    );
    Aggregate {
        evaluators: acc.evaluators,
        projects,
    }
}
