//! Output tables: a format independent view, rendered as CSV for the
//! archive and as Excel worksheets.

pub mod csv_table_view;
pub mod excel_table_view;
pub mod table_view;
