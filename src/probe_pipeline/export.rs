//! Series export module
//!
//! Turns a finished series into rows with a fixed column schema, writes them
//! out through a [`TableWriter`], and prepares channel data for a
//! [`PlotConsumer`].

mod table;
mod writer;
mod csv_writer;
mod plot;

pub use table::{Cell, Table, TableRecord, export};
pub use writer::TableWriter;
pub use csv_writer::CsvTableWriter;
pub use plot::{PlotConsumer, PlotData, PlotSelector};
