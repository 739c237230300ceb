use std::io::Write;

use crate::probe_pipeline::common::error::Result;
use crate::probe_pipeline::export::table::Table;

pub trait TableWriter {
    fn write_table(&self, table: &Table, output: &mut dyn Write) -> Result<()>;
}
