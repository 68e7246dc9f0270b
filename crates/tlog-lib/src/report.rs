use crate::error::{ReportError, Result};
use crate::metrics::summary::{summarize, tipo_summary, OutcomeSummary, TipoSummary};
use crate::trial::TrialRow;
use log::info;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Column separator used by both tables. Values are not padded.
pub const COLUMN_SEP: &str = "            ";

pub const TIPO_TABLE_HEADER: [&str; 3] = ["Tipo", "Acertos", "Erros"];
pub const DETAIL_TABLE_HEADER: [&str; 5] = ["Bloco", "Tentativa", "Tipo", "Resultado", "Relação"];

/// Everything that goes into the text report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub header: Vec<String>,
    pub summary: OutcomeSummary,
    pub tipos: TipoSummary,
    pub rows: Vec<TrialRow>,
}

impl Report {
    pub fn new(header: Vec<String>, rows: Vec<TrialRow>) -> Self {
        let summary = summarize(&rows);
        let tipos = tipo_summary(&rows);
        Self {
            header,
            summary,
            tipos,
            rows,
        }
    }

    /// Render the four report sections: header, summary, tipo table, detail table.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;

        let s = &self.summary;
        writeln!(f, "Hit Count: {}", s.hit_count)?;
        writeln!(f, "Miss Count: {}", s.miss_count)?;
        writeln!(f, "Hit Trial: {}", s.hit_trials.join(", "))?;
        writeln!(f, "Hit Block: {}", s.hit_blocks.join(", "))?;
        writeln!(f, "Miss Trial: {}", s.miss_trials.join(", "))?;
        writeln!(f, "Miss Block: {}", s.miss_blocks.join(", "))?;
        writeln!(f, "Hit Percentage: {:.2}%", s.hit_pct)?;
        writeln!(f, "Miss Percentage: {:.2}%", s.miss_pct)?;
        writeln!(f)?;

        write_row(f, &TIPO_TABLE_HEADER)?;
        for tally in &self.tipos {
            write_row(
                f,
                &[
                    tally.tipo.as_str(),
                    &tally.acertos.to_string(),
                    &tally.erros.to_string(),
                ],
            )?;
        }
        writeln!(f)?;

        write_row(f, &DETAIL_TABLE_HEADER)?;
        for row in &self.rows {
            write_row(
                f,
                &[
                    row.block.as_str(),
                    &row.trial,
                    &row.tipo,
                    &row.resultado,
                    &row.relation,
                ],
            )?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[&str]) -> fmt::Result {
    writeln!(f, "{}", cells.join(COLUMN_SEP))
}

/// Write the rendered report. The text is built before the file is created.
pub fn write_report(path: &Path, report: &Report) -> Result<()> {
    let text = report.render();
    fs::write(path, text).map_err(|source| ReportError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "wrote report with {} trial row(s) to {}",
        report.rows.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn row(block: &str, trial: &str, tipo: &str, resultado: &str, relation: &str) -> TrialRow {
        TrialRow {
            block: block.into(),
            trial: trial.into(),
            tipo: tipo.into(),
            resultado: resultado.into(),
            relation: relation.into(),
        }
    }

    fn sample() -> Report {
        Report::new(
            vec!["Version:1".into(), "Duration:00:05:00".into()],
            vec![
                row("1", "1", "Sort", "Hit", "Apple - Bowl"),
                row("1", "2", "Match", "Miss", ""),
                row("2", "3", "Sort", "Hit", "Key - Box"),
            ],
        )
    }

    #[test]
    fn renders_sections_in_order() {
        let text = sample().render();
        let expected = "Version:1\n\
Duration:00:05:00\n\
\n\
Hit Count: 2\n\
Miss Count: 1\n\
Hit Trial: 1, 3\n\
Hit Block: 1, 2\n\
Miss Trial: 2\n\
Miss Block: 1\n\
Hit Percentage: 66.67%\n\
Miss Percentage: 33.33%\n\
\n\
Tipo            Acertos            Erros\n\
Sort            2            0\n\
Match            0            1\n\
\n\
Bloco            Tentativa            Tipo            Resultado            Relação\n\
1            1            Sort            Hit            Apple - Bowl\n\
1            2            Match            Miss            \n\
2            3            Sort            Hit            Key - Box\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn other_results_stay_in_detail_table_only() {
        let report = Report::new(
            Vec::new(),
            vec![
                row("1", "1", "Sort", "Hit", ""),
                row("1", "2", "Drag", "Timeout", "Key - Box"),
            ],
        );
        let text = report.render();
        assert!(text.contains("1            2            Drag            Timeout            Key - Box\n"));
        assert!(!text.lines().any(|line| line.starts_with("Drag            ")));
        assert!(text.contains("Sort            1            0\n"));
        assert!(text.contains("Hit Count: 1\nMiss Count: 0\n"));
        assert!(text.contains("Hit Percentage: 100.00%\n"));
    }

    #[test]
    fn empty_report_has_zero_percentages() {
        let text = Report::new(Vec::new(), Vec::new()).render();
        assert!(text.starts_with("\nHit Count: 0\n"));
        assert!(text.contains("Hit Percentage: 0.00%\n"));
        assert!(text.contains("Miss Percentage: 0.00%\n"));
        assert!(text.contains("Hit Trial: \n"));
    }

    #[test]
    fn writes_report_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let report = sample();
        write_report(&path, &report).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.render());
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("report.txt");
        let err = write_report(&path, &sample()).unwrap_err();
        assert!(matches!(err, ReportError::WriteReport { .. }));
        assert!(!path.exists());
    }
}
