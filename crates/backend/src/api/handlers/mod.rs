pub mod a001_sales_entry;
pub mod d100_sales_report;
