//! Row-oriented table model and the column schema of each series kind.
//!
//! Column names and their order are the compatibility contract for persisted
//! exports:
//!
//! | series   | columns                                          |
//! |----------|--------------------------------------------------|
//! | line     | `distance, nativeX, nativeY, R, G, B, H, S, V`   |
//! | temporal | `frameIndex, R, G, B`                            |

use crate::probe_pipeline::sampling::{FrameRecord, SampleRecord, Series};

/// One table cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
}

/// Header plus rows, in series order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

/// A record type with a fixed column layout.
pub trait TableRecord {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

impl TableRecord for SampleRecord {
    const COLUMNS: &'static [&'static str] = &["distance", "nativeX", "nativeY", "R", "G", "B", "H", "S", "V"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Float(self.distance),
            Cell::Int(self.x as i64),
            Cell::Int(self.y as i64),
            Cell::Int(self.rgb.r as i64),
            Cell::Int(self.rgb.g as i64),
            Cell::Int(self.rgb.b as i64),
            Cell::Int(self.hsv.h as i64),
            Cell::Int(self.hsv.s as i64),
            Cell::Int(self.hsv.v as i64),
        ]
    }
}

impl TableRecord for FrameRecord {
    const COLUMNS: &'static [&'static str] = &["frameIndex", "R", "G", "B"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.frame_index as i64),
            Cell::Float(self.mean_rgb.r),
            Cell::Float(self.mean_rgb.g),
            Cell::Float(self.mean_rgb.b),
        ]
    }
}

/// Converts a series into a table. An empty series gives a header-only table.
pub fn export<R: TableRecord>(series: &Series<R>) -> Table {
    Table {
        columns: R::COLUMNS,
        rows: series.iter().map(TableRecord::cells).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe_pipeline::color::{Hsv, MeanRgb, Rgb};

    #[test]
    fn test_line_schema() {
        let series = Series::from_records(vec![SampleRecord {
            distance: 1.5,
            x: 3,
            y: 4,
            rgb: Rgb::new(10, 20, 30),
            hsv: Hsv::new(210, 66, 11),
        }]);
        let table = export(&series);
        assert_eq!(table.columns, ["distance", "nativeX", "nativeY", "R", "G", "B", "H", "S", "V"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], Cell::Float(1.5));
        assert_eq!(table.rows[0][6], Cell::Int(210));
    }

    #[test]
    fn test_temporal_schema_keeps_frame_index() {
        let series = Series::from_records(vec![
            FrameRecord { frame_index: 0, mean_rgb: MeanRgb::new(1.0, 2.0, 3.0) },
            FrameRecord { frame_index: 4, mean_rgb: MeanRgb::new(4.0, 5.0, 6.0) },
        ]);
        let table = export(&series);
        assert_eq!(table.columns, ["frameIndex", "R", "G", "B"]);
        assert_eq!(table.rows[1][0], Cell::Int(4));
    }

    #[test]
    fn test_empty_series_is_header_only() {
        let table = export(&Series::<FrameRecord>::default());
        assert_eq!(table.columns.len(), 4);
        assert!(table.rows.is_empty());
    }
}
