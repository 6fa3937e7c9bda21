//! Excel workbook ingestion

pub mod reader;

pub use reader::read_grant_rows;
