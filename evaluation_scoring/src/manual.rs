/*!

This is the long-form manual for `evaluation_scoring` and `afweegkader`.

## The evaluation sheet

Every evaluator fills in one Excel workbook. Only the first worksheet is read,
unless a worksheet name is configured. Each project is a column:

|    | A | B | C              | D              | ... | L   |
|----|---|---|----------------|----------------|-----|-----|
| 1  |   |   | 1              | 2              |     | 10  |
| 2  |   |   | Project title  | Project title  |     | ... |
| 3  |   |   |                |                |     |     |
| 4  | Impact | Impact brede welvaart | score | score |  |  |
| 5  |   | Impact op bewoners | score | score |  |  |
| 6  |   | Innovatie binnen gemeenten | score | score |  |  |
| 7  |   |   |                |                |     |     |
| 8  | Regionale inbedding | Regiobreedte | score | score | | |
| ...|   |   |                |                |     |     |

- row 1: the project number, row 2: the project title;
- rows 4-6: Impact (Impact brede welvaart, Impact op bewoners, Innovatie binnen gemeenten);
- rows 8-10: Regionale inbedding (Regiobreedte, Samenwerkingsbreedte, Schaalbaarheid);
- rows 12-14: Financiële verantwoording (Doelmatigheid, Mate van (financiële) inbreng, Duurzaamheid);
- rows 16-18: Haalbaarheid (Tijdige realisatie, Projectorganisatie, Risico's en beheersmaatregelen).

Columns C to L hold the projects. A column without a title is ignored. The
layout is described by [`SheetLayout::DEFAULT`](crate::SheetLayout::DEFAULT).

The projects of different evaluators are matched by their column, not by
their title: the third column is `project_1` in every workbook. The title and
number shown in the reports come from the first workbook that has the project.

## Scores

A score is a number between 1 and 5. Evaluators often write a short
explanation in the cell, so the content is read as follows:

1. the first digit of the text, if it is between 1 and 5 (`"4 - goed onderbouwd"` is a 4).
   Only the first digit is looked at.
2. otherwise, the keywords of the form:

| keyword                          | score |
|----------------------------------|-------|
| `afwezig`                        | 1     |
| `zwak`                           | 2     |
| `gedeeltelijk`                   | 3     |
| `aanwezig` (without `sterk`)     | 4     |
| `sterk`                          | 5     |

   The keywords are checked in this order, so `gedeeltelijk aanwezig` is a 3.
3. otherwise, the text as a number between 1 and 5.

Cells that contain a number (and not text) keep their value, including
decimals. A number cell outside [1, 5] is missing: its digits are not scanned,
so `10` or `45` in a number cell is not read as a 1 or a 4. Everything else,
blank cells included, is treated as missing.

## Averages

- pillar score of an evaluator: mean of the present category scores of the pillar;
- total score of an evaluator: mean of all the present category scores (all
  pillars together), not the mean of the pillar scores;
- averages over evaluators: mean over the evaluators that have a score.

Missing scores are never counted as zero.

## Configuration

`afweegkader` takes its input from the command line or from a JSON file:

```json
{
  "outputSettings": {
    "title": "Projectevaluatie Samenvatting",
    "subtitle": "Board Meeting 10 juli 2025",
    "programme": "Regio Deal Waterwegregio",
    "outputPdf": "projectevaluatie_overview.pdf",
    "outputSummary": "summary.json",
    "evaluatorColumns": 6
  },
  "evaluatorFiles": [
    { "filePath": "excel/1.xlsx" },
    { "filePath": "excel/2.xlsx", "label": "Evaluator 2", "excelWorksheetName": "Scores" }
  ]
}
```

All the fields of `outputSettings` are optional. File paths are relative to
the configuration file. A workbook that cannot be read is reported and left
out; the run fails only if no workbook can be read.

 */
