use std::io::Write;

use tracing::debug;

use crate::probe_pipeline::common::error::{ProbeError, Result};
use crate::probe_pipeline::export::table::{Cell, Table};
use crate::probe_pipeline::export::writer::TableWriter;

/// Writes tables as delimited text, one header line then one line per row.
///
/// Numbers are formatted with Rust's locale-independent `Display`; floats use
/// the shortest representation that round-trips unless a fixed precision is
/// set.
#[derive(Debug, Clone)]
pub struct CsvTableWriter {
    delimiter: char,
    float_precision: Option<usize>,
}

impl CsvTableWriter {
    pub fn new(delimiter: char, float_precision: Option<usize>) -> Self {
        Self {
            delimiter,
            float_precision,
        }
    }

    fn format_cell(&self, cell: &Cell) -> String {
        match (cell, self.float_precision) {
            (Cell::Int(v), _) => v.to_string(),
            (Cell::Float(v), Some(precision)) => format!("{:.*}", precision, v),
            (Cell::Float(v), None) => v.to_string(),
        }
    }
}

impl Default for CsvTableWriter {
    fn default() -> Self {
        Self::new(',', None)
    }
}

impl TableWriter for CsvTableWriter {
    fn write_table(&self, table: &Table, output: &mut dyn Write) -> Result<()> {
        debug!("Writing table: {} columns, {} rows", table.columns.len(), table.rows.len());

        let delimiter = self.delimiter.to_string();
        let write_err = |e: std::io::Error| ProbeError::OutputWriteError(e.to_string());

        writeln!(output, "{}", table.columns.join(delimiter.as_str())).map_err(write_err)?;
        for row in &table.rows {
            let line: Vec<String> = row.iter().map(|c| self.format_cell(c)).collect();
            writeln!(output, "{}", line.join(delimiter.as_str())).map_err(write_err)?;
        }
        output.flush().map_err(write_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table {
            columns: &["frameIndex", "R", "G", "B"],
            rows: vec![
                vec![Cell::Int(0), Cell::Float(12.5), Cell::Float(0.0), Cell::Float(1.0 / 3.0)],
                vec![Cell::Int(2), Cell::Float(255.0), Cell::Float(7.25), Cell::Float(0.5)],
            ],
        }
    }

    fn render(writer: &CsvTableWriter, table: &Table) -> String {
        let mut out = Vec::new();
        writer.write_table(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_format() {
        let text = render(&CsvTableWriter::default(), &sample_table());
        assert_eq!(
            text,
            "frameIndex,R,G,B\n0,12.5,0,0.3333333333333333\n2,255,7.25,0.5\n"
        );
    }

    #[test]
    fn test_fixed_precision_and_delimiter() {
        let text = render(&CsvTableWriter::new(';', Some(2)), &sample_table());
        assert_eq!(text, "frameIndex;R;G;B\n0;12.50;0.00;0.33\n2;255.00;7.25;0.50\n");
    }

    #[test]
    fn test_header_only() {
        let table = Table {
            columns: &["frameIndex", "R", "G", "B"],
            rows: Vec::new(),
        };
        assert_eq!(render(&CsvTableWriter::default(), &table), "frameIndex,R,G,B\n");
    }

    struct FailingOutput;

    impl Write for FailingOutput {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_reported() {
        let result = CsvTableWriter::default().write_table(&sample_table(), &mut FailingOutput);
        assert!(matches!(result, Err(ProbeError::OutputWriteError(_))));
    }
}
