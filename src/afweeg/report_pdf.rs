// Rendering of the aggregated scores as a PDF document.
//
// The layout is drawn directly with PDF operators: an overview page with one
// row per project, then one page per project with the details per evaluator.

use evaluation_scoring::*;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::afweeg::config_reader::ReportSettings;
use crate::afweeg::*;

// A4, in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
const CM: f32 = 28.35;
const MARGIN_TOP: f32 = CM;
const MARGIN_BOTTOM: f32 = CM;
const MARGIN_SIDE: f32 = 1.5 * CM;
const LINE_SPACING: f32 = 1.2;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Rgb(f32, f32, f32);

const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const TITLE_BLUE: Rgb = Rgb(0.122, 0.306, 0.475);
const HEADER_BLUE: Rgb = Rgb(0.290, 0.565, 0.851);
const PILLAR_BACKGROUND: Rgb = Rgb(0.941, 0.973, 1.0);
const BADGE_BACKGROUND: Rgb = Rgb(0.961, 0.961, 0.961);
const GRID_GREY: Rgb = Rgb(0.8, 0.8, 0.8);
const SUBTITLE_GREY: Rgb = Rgb(0.4, 0.4, 0.4);

/// Subtle background colour for a score.
pub fn band_background(score: Option<f64>) -> Option<Rgb> {
    score.map(|s| match ScoreBand::of(s) {
        ScoreBand::High => Rgb(0.910, 0.961, 0.910),
        ScoreBand::Mid => Rgb(1.0, 0.953, 0.878),
        ScoreBand::Low => Rgb(1.0, 0.922, 0.933),
    })
}

/// Averages and pillar scores: one decimal.
pub fn format_mean(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string())
}

/// Category scores of a single evaluator: no decimals.
pub fn format_category(score: Option<f64>) -> String {
    score
        .map(|s| format!("{:.0}", s))
        .unwrap_or_else(|| "-".to_string())
}

pub fn project_label(project: &AggregatedProject) -> String {
    format!("{}: {}", project.number, project.title)
}

// The standard Helvetica fonts use the WinAnsi encoding, which matches
// Latin-1 for the accented letters.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}

#[derive(PartialEq, Debug, Clone, Copy)]
struct TextStyle {
    size: f32,
    bold: bool,
    color: Rgb,
}

impl TextStyle {
    const fn new(size: f32, bold: bool) -> TextStyle {
        TextStyle {
            size,
            bold,
            color: BLACK,
        }
    }

    const fn colored(self, color: Rgb) -> TextStyle {
        TextStyle {
            size: self.size,
            bold: self.bold,
            color,
        }
    }

    fn font(&self) -> &'static str {
        if self.bold {
            "F2"
        } else {
            "F1"
        }
    }

    fn line_height(&self) -> f32 {
        self.size * LINE_SPACING
    }

    // Approximation of the Helvetica metrics, good enough for centering and
    // wrapping.
    fn text_width(&self, text: &str) -> f32 {
        let factor = if self.bold { 0.56 } else { 0.52 };
        text.chars().count() as f32 * self.size * factor
    }

    fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if !current.is_empty() && self.text_width(&candidate) > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Pages of drawing operations, with a cursor going down the current page.
struct Canvas {
    pages: Vec<Vec<Operation>>,
    y: f32,
}

impl Canvas {
    fn new() -> Canvas {
        Canvas {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN_TOP,
        }
    }

    fn push(&mut self, op: Operation) {
        match self.pages.last_mut() {
            Some(page) => page.push(op),
            None => self.pages.push(vec![op]),
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= MARGIN_BOTTOM
    }

    fn skip(&mut self, height: f32) {
        self.y -= height;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(Operation::new("q", vec![]));
        self.push(rgb_op("rg", color));
        self.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        self.push(Operation::new("f", vec![]));
        self.push(Operation::new("Q", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line: f32, color: Rgb) {
        self.push(Operation::new("q", vec![]));
        self.push(rgb_op("RG", color));
        self.push(Operation::new("w", vec![line.into()]));
        self.push(Operation::new(
            "re",
            vec![x.into(), y.into(), width.into(), height.into()],
        ));
        self.push(Operation::new("S", vec![]));
        self.push(Operation::new("Q", vec![]));
    }

    fn hline(&mut self, x: f32, y: f32, width: f32, line: f32, color: Rgb) {
        self.push(Operation::new("q", vec![]));
        self.push(rgb_op("RG", color));
        self.push(Operation::new("w", vec![line.into()]));
        self.push(Operation::new("m", vec![x.into(), y.into()]));
        self.push(Operation::new("l", vec![(x + width).into(), y.into()]));
        self.push(Operation::new("S", vec![]));
        self.push(Operation::new("Q", vec![]));
    }

    fn text(&mut self, x: f32, baseline: f32, style: TextStyle, text: &str) {
        self.push(Operation::new("BT", vec![]));
        self.push(rgb_op("rg", style.color));
        self.push(Operation::new(
            "Tf",
            vec![Object::Name(style.font().as_bytes().to_vec()), style.size.into()],
        ));
        self.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        self.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.push(Operation::new("ET", vec![]));
    }

    fn aligned_text(&mut self, x: f32, width: f32, baseline: f32, style: TextStyle, align: Align, text: &str) {
        let text_x = match align {
            Align::Left => x,
            Align::Center => x + (width - style.text_width(text)) / 2.0,
            Align::Right => x + width - style.text_width(text),
        };
        self.text(text_x, baseline, style, text);
    }

    /// A centered paragraph across the page, moving the cursor below it.
    fn heading(&mut self, style: TextStyle, text: &str, space_after: f32) {
        let width = PAGE_WIDTH - 2.0 * MARGIN_SIDE;
        for line in style.wrap(text, width) {
            self.y -= style.line_height();
            self.aligned_text(MARGIN_SIDE, width, self.y, style, Align::Center, &line);
        }
        self.y -= space_after;
    }
}

fn rgb_op(operator: &str, color: Rgb) -> Operation {
    Operation::new(operator, vec![color.0.into(), color.1.into(), color.2.into()])
}

struct TableCell {
    text: String,
    style: TextStyle,
    align: Align,
    background: Option<Rgb>,
    indent: f32,
    // Short labels stay on one line.
    wrap: bool,
}

impl TableCell {
    fn new<S: Into<String>>(text: S, style: TextStyle, align: Align) -> TableCell {
        TableCell {
            text: text.into(),
            style,
            align,
            background: None,
            indent: 0.0,
            wrap: true,
        }
    }

    fn score(score: Option<f64>, text: String, style: TextStyle) -> TableCell {
        TableCell {
            background: band_background(score),
            ..TableCell::new(text, style, Align::Center)
        }
    }
}

struct TableRow {
    cells: Vec<TableCell>,
    background: Option<Rgb>,
    padding: f32,
    line_above: Option<f32>,
    line_below: Option<f32>,
}

impl TableRow {
    fn new(cells: Vec<TableCell>, padding: f32) -> TableRow {
        TableRow {
            cells,
            background: None,
            padding,
            line_above: None,
            line_below: None,
        }
    }
}

struct Table {
    widths: Vec<f32>,
    header: TableRow,
    rows: Vec<TableRow>,
}

const CELL_SIDE_PADDING: f32 = 8.0;

fn row_layout(widths: &[f32], row: &TableRow) -> (Vec<Vec<String>>, f32) {
    let lines: Vec<Vec<String>> = row
        .cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            if cell.wrap {
                cell.style
                    .wrap(&cell.text, w - 2.0 * CELL_SIDE_PADDING - cell.indent)
            } else {
                vec![cell.text.clone()]
            }
        })
        .collect();
    let content = row
        .cells
        .iter()
        .zip(lines.iter())
        .map(|(cell, l)| l.len() as f32 * cell.style.line_height())
        .fold(0.0, f32::max);
    (lines, content + 2.0 * row.padding)
}

fn draw_row(canvas: &mut Canvas, x: f32, widths: &[f32], row: &TableRow) {
    let (lines, height) = row_layout(widths, row);
    let top = canvas.y;
    let bottom = top - height;
    let total_width: f32 = widths.iter().sum();
    if let Some(bg) = row.background {
        canvas.fill_rect(x, bottom, total_width, height, bg);
    }
    let mut cell_x = x;
    for ((cell, width), cell_lines) in row.cells.iter().zip(widths).zip(lines.iter()) {
        if let Some(bg) = cell.background {
            canvas.fill_rect(cell_x, bottom, *width, height, bg);
        }
        canvas.stroke_rect(cell_x, bottom, *width, height, 0.5, GRID_GREY);
        let content = cell_lines.len() as f32 * cell.style.line_height();
        let mut baseline = top - (height - content) / 2.0 - cell.style.size;
        for line in cell_lines {
            canvas.aligned_text(
                cell_x + CELL_SIDE_PADDING + cell.indent,
                width - 2.0 * CELL_SIDE_PADDING - cell.indent,
                baseline,
                cell.style,
                cell.align,
                line,
            );
            baseline -= cell.style.line_height();
        }
        cell_x += width;
    }
    if let Some(line) = row.line_above {
        canvas.hline(x, top, total_width, line, TITLE_BLUE);
    }
    if let Some(line) = row.line_below {
        canvas.hline(x, bottom, total_width, line, TITLE_BLUE);
    }
    canvas.y = bottom;
}

// Rows that do not fit go to a new page, below a copy of the header.
fn draw_table(canvas: &mut Canvas, table: &Table) {
    let header_height = row_layout(&table.widths, &table.header).1;
    if let Some(first) = table.rows.first() {
        if !canvas.fits(header_height + row_layout(&table.widths, first).1) {
            canvas.new_page();
        }
    }
    draw_row(canvas, MARGIN_SIDE, &table.widths, &table.header);
    for row in table.rows.iter() {
        if !canvas.fits(row_layout(&table.widths, row).1) {
            canvas.new_page();
            draw_row(canvas, MARGIN_SIDE, &table.widths, &table.header);
        }
        draw_row(canvas, MARGIN_SIDE, &table.widths, row);
    }
}

fn header_cell(text: &str, align: Align) -> TableCell {
    TableCell::new(text, TextStyle::new(10.0, true).colored(WHITE), align)
}

fn header_row(cells: Vec<TableCell>) -> TableRow {
    TableRow {
        background: Some(HEADER_BLUE),
        ..TableRow::new(cells, 10.0)
    }
}

fn overview_table(aggregate: &Aggregate) -> Table {
    let usable = PAGE_WIDTH - 2.0 * MARGIN_SIDE;
    let first = 6.0 * CM;
    let rest = (usable - first) / 5.0;
    let mut widths = vec![first];
    widths.extend(std::iter::repeat(rest).take(5));

    let mut header_cells = vec![header_cell("Project", Align::Left)];
    for pillar in Pillar::ALL {
        header_cells.push(header_cell(pillar.name(), Align::Center));
    }
    header_cells.push(header_cell("Totaalscore", Align::Center));

    let score_style = TextStyle::new(9.0, false);
    let rows = aggregate
        .projects
        .values()
        .map(|project| {
            let mut cells = vec![TableCell::new(
                project_label(project),
                TextStyle::new(9.0, true),
                Align::Left,
            )];
            for pillar in Pillar::ALL {
                let mean = project.pillar(pillar).and_then(|p| p.mean());
                cells.push(TableCell::score(mean, format_mean(mean), score_style));
            }
            let total = project.mean_total();
            cells.push(TableCell::score(
                total,
                format_mean(total),
                TextStyle::new(9.0, true),
            ));
            TableRow::new(cells, 6.0)
        })
        .collect();

    Table {
        widths,
        header: header_row(header_cells),
        rows,
    }
}

fn evaluator_cells(
    slots: &[Option<f64>],
    columns: usize,
    style: TextStyle,
    format: fn(Option<f64>) -> String,
) -> Vec<TableCell> {
    (0..columns)
        .map(|idx| {
            let score = slots.get(idx).cloned().flatten();
            TableCell::score(score, format(score), style)
        })
        .collect()
}

fn project_table(project: &AggregatedProject, columns: usize) -> Table {
    let usable = PAGE_WIDTH - 2.0 * MARGIN_SIDE;
    let first = 6.0 * CM;
    let rest = (usable - first) / (columns + 1) as f32;
    let mut widths = vec![first];
    widths.extend(std::iter::repeat(rest).take(columns + 1));

    let mut header_cells = vec![
        header_cell("Evaluatiecriteria", Align::Left),
        header_cell("Gem.", Align::Center),
    ];
    for idx in 0..columns {
        header_cells.push(TableCell {
            wrap: false,
            ..header_cell(&format!("Eval {}", idx + 1), Align::Center)
        });
    }

    let pillar_style = TextStyle::new(11.0, true);
    let category_style = TextStyle::new(9.0, false);
    let mut rows: Vec<TableRow> = Vec::new();
    let num_pillars = project.pillars.len();
    for (pillar_idx, pillar) in project.pillars.iter().enumerate() {
        let mean = pillar.mean();
        let mut cells = vec![
            TableCell::new(pillar.pillar.name(), pillar_style, Align::Left),
            TableCell::score(mean, format_mean(mean), pillar_style),
        ];
        cells.extend(evaluator_cells(&pillar.slots, columns, pillar_style, format_mean));
        rows.push(TableRow {
            background: Some(PILLAR_BACKGROUND),
            ..TableRow::new(cells, 6.0)
        });

        for category in pillar.categories.iter() {
            let mean = category.mean();
            let mut cells = vec![
                TableCell {
                    indent: 15.0,
                    ..TableCell::new(
                        format!("• {}", category.category.name()),
                        category_style,
                        Align::Left,
                    )
                },
                TableCell::score(mean, format_mean(mean), category_style),
            ];
            cells.extend(evaluator_cells(
                &category.slots,
                columns,
                category_style,
                format_category,
            ));
            rows.push(TableRow::new(cells, 4.0));
        }
        if pillar_idx + 1 < num_pillars {
            if let Some(last) = rows.last_mut() {
                last.line_below = Some(2.0);
            }
        }
    }

    let total = project.mean_total();
    let total_style = TextStyle::new(12.0, true);
    let mut cells = vec![
        TableCell::new("TOTAALSCORE", total_style, Align::Left),
        TableCell::score(total, format_mean(total), total_style),
    ];
    cells.extend(evaluator_cells(
        &project.totals,
        columns,
        TextStyle::new(12.0, false),
        format_mean,
    ));
    rows.push(TableRow {
        line_above: Some(2.0),
        ..TableRow::new(cells, 8.0)
    });

    Table {
        widths,
        header: header_row(header_cells),
        rows,
    }
}

fn draw_project_header(canvas: &mut Canvas, project: &AggregatedProject) {
    let width = PAGE_WIDTH - 2.0 * MARGIN_SIDE;
    let label_width = 13.0 * CM - 30.0;
    let label_style = TextStyle::new(16.0, true).colored(TITLE_BLUE);
    let badge_style = TextStyle::new(20.0, true).colored(TITLE_BLUE);
    let badge = format!("{}/5.0", format_mean(project.mean_total()));

    let lines = label_style.wrap(&project_label(project), label_width);
    let height = (lines.len() as f32 * label_style.line_height()).max(badge_style.line_height()) + 24.0;
    let top = canvas.y;
    let bottom = top - height;
    canvas.fill_rect(MARGIN_SIDE, bottom, width, height, BADGE_BACKGROUND);
    canvas.stroke_rect(MARGIN_SIDE, bottom, width, height, 2.0, TITLE_BLUE);

    let mut baseline = top - 12.0 - label_style.size;
    for line in lines.iter() {
        canvas.text(MARGIN_SIDE + 15.0, baseline, label_style, line);
        baseline -= label_style.line_height();
    }
    let badge_baseline = bottom + (height - badge_style.size) / 2.0 + 3.0;
    canvas.aligned_text(
        MARGIN_SIDE,
        width - 15.0,
        badge_baseline,
        badge_style,
        Align::Right,
        &badge,
    );
    canvas.y = bottom;
}

/// Draws the whole report: the titles and the overview on the first page,
/// then one page per project.
pub fn render_pages(aggregate: &Aggregate, settings: &ReportSettings) -> Vec<Vec<Operation>> {
    let columns = settings.evaluator_columns;
    if aggregate.num_evaluators() > columns {
        warn!(
            "render_pages: {} evaluators but only {} evaluator columns, the last ones are not shown individually",
            aggregate.num_evaluators(),
            columns
        );
    }

    let mut canvas = Canvas::new();
    canvas.heading(
        TextStyle::new(24.0, true).colored(TITLE_BLUE),
        &settings.title,
        8.0,
    );
    canvas.heading(
        TextStyle::new(14.0, false).colored(SUBTITLE_GREY),
        &settings.subtitle,
        6.0,
    );
    canvas.heading(
        TextStyle::new(12.0, false).colored(SUBTITLE_GREY),
        &settings.programme,
        10.0,
    );
    canvas.skip(30.0);
    canvas.heading(
        TextStyle::new(20.0, true).colored(TITLE_BLUE),
        "Overzicht Alle Projecten",
        16.0,
    );
    canvas.skip(20.0);
    draw_table(&mut canvas, &overview_table(aggregate));

    for project in aggregate.projects.values() {
        debug!("render_pages: project page for {}", project.key);
        canvas.new_page();
        draw_project_header(&mut canvas, project);
        canvas.skip(20.0);
        draw_table(&mut canvas, &project_table(project, columns));
    }
    canvas.pages
}

pub fn build_document(aggregate: &Aggregate, settings: &ReportSettings) -> ReportResult<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in render_pages(aggregate, settings) {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().context(EncodingPdfSnafu {})?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }
    info!("build_document: {} pages", kids.len());

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

pub fn write_report(aggregate: &Aggregate, settings: &ReportSettings, path: &str) -> ReportResult<()> {
    let mut doc = build_document(aggregate, settings)?;
    info!("Writing report to {}", path);
    doc.save(path)
        .map(|_| ())
        .whatever_context(format!("Error writing the report to {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(page: &[Operation]) -> Vec<String> {
        page.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.iter().map(|b| *b as char).collect()),
                _ => None,
            })
            .collect()
    }

    fn project(key: usize, title: &str, totals: Vec<Option<f64>>) -> AggregatedProject {
        let n = totals.len();
        AggregatedProject {
            key: ProjectKey(key),
            number: key.to_string(),
            title: title.to_string(),
            totals,
            pillars: Pillar::ALL
                .iter()
                .map(|p| AggregatedPillar {
                    pillar: *p,
                    slots: vec![Some(4.0); n],
                    categories: p
                        .categories()
                        .into_iter()
                        .map(|category| AggregatedCategory {
                            category,
                            slots: vec![Some(4.0); n],
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn aggregate_of(projects: Vec<AggregatedProject>, evaluators: usize) -> Aggregate {
        Aggregate {
            evaluators: (1..=evaluators).map(|i| format!("{}.xlsx", i)).collect(),
            projects: projects.into_iter().map(|p| (p.key, p)).collect(),
        }
    }

    #[test]
    fn formatting() {
        assert_eq!(format_mean(None), "-");
        assert_eq!(format_mean(Some(3.24)), "3.2");
        assert_eq!(format_mean(Some(4.0)), "4.0");
        assert_eq!(format_category(Some(4.0)), "4");
        assert_eq!(format_category(None), "-");
    }

    #[test]
    fn bands() {
        assert_eq!(band_background(None), None);
        assert_eq!(band_background(Some(4.2)), band_background(Some(5.0)));
        assert_ne!(band_background(Some(3.5)), band_background(Some(2.5)));
    }

    #[test]
    fn encoding() {
        assert_eq!(win_ansi("ë"), vec![0xEB]);
        assert_eq!(win_ansi("• a"), vec![0x95, b' ', b'a']);
        assert_eq!(win_ansi("✓"), vec![b'?']);
    }

    #[test]
    fn wrapping() {
        let style = TextStyle::new(10.0, false);
        assert_eq!(style.wrap("", 100.0), vec!["".to_string()]);
        assert_eq!(style.wrap("kort", 100.0), vec!["kort".to_string()]);
        let lines = style.wrap("een nogal lange titel voor een project", 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "een nogal lange titel voor een project");
    }

    #[test]
    fn one_page_per_project() {
        let agg = aggregate_of(
            vec![
                project(1, "Groene haven", vec![Some(4.0), None]),
                project(2, "Fietsroute", vec![Some(2.5), Some(3.0)]),
            ],
            2,
        );
        let pages = render_pages(&agg, &ReportSettings::default());
        assert_eq!(pages.len(), 3);

        let overview = strings(&pages[0]);
        assert!(overview.contains(&"Projectevaluatie Samenvatting".to_string()));
        assert!(overview.contains(&"Overzicht Alle Projecten".to_string()));
        assert!(overview.contains(&"1: Groene haven".to_string()));
        assert!(overview.contains(&"Totaalscore".to_string()));

        let detail = strings(&pages[2]);
        assert!(detail.contains(&"2: Fietsroute".to_string()));
        assert!(detail.contains(&"2.8/5.0".to_string()));
        assert!(detail.contains(&"Eval 6".to_string()));
        assert!(detail.contains(&"TOTAALSCORE".to_string()));
        // Financiële, in WinAnsi.
        assert!(detail.contains(&"Financi\u{eb}le verantwoording".to_string()));
        assert!(detail.contains(&"\u{95} Impact op bewoners".to_string()));
    }

    #[test]
    fn evaluator_headers_on_one_line() {
        let agg = aggregate_of(vec![project(1, "Groene haven", vec![Some(4.0)])], 1);
        let settings = ReportSettings::default();
        let detail = strings(&render_pages(&agg, &settings)[1]);
        for idx in 1..=settings.evaluator_columns {
            assert!(detail.contains(&format!("Eval {}", idx)));
        }
        assert!(!detail.contains(&"Eval".to_string()));

        let table = project_table(&agg.projects[&ProjectKey(1)], 6);
        let (lines, _) = row_layout(&table.widths, &table.header);
        assert!(lines.iter().all(|l| l.len() == 1));
    }

    #[test]
    fn missing_totals_badge() {
        let agg = aggregate_of(vec![project(1, "Leeg", vec![None])], 1);
        let pages = render_pages(&agg, &ReportSettings::default());
        assert!(strings(&pages[1]).contains(&"-/5.0".to_string()));
    }

    #[test]
    fn document_has_all_pages() {
        let agg = aggregate_of(vec![project(1, "Groene haven", vec![Some(4.0)])], 1);
        let doc = build_document(&agg, &ReportSettings::default()).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
