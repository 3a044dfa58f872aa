pub mod report_table;
pub mod sortable_header_cell;

pub use report_table::ReportTable;
pub use sortable_header_cell::SortableHeaderCell;
