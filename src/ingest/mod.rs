pub mod row;
pub mod reader;
