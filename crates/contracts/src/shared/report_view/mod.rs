//! Sortable, exportable tabular report view model.
//!
//! Everything here is pure: the browser client owns one
//! [`TabularReportView`] per mounted report page and re-derives the sorted
//! rows, stat card values and CSV export from it on every render.

pub mod collation;
pub mod column;
pub mod csv_export;
pub mod error;
pub mod fetch_state;
pub mod format;
pub mod sort;
pub mod summary;
pub mod value;
pub mod view;

pub use column::{Align, ColumnDescriptor, ColumnKind, ColumnSchema, DisplayFormat, Visibility};
pub use csv_export::{export_filename, CsvArtifact, CsvExporter, CsvMode};
pub use error::ReportViewError;
pub use fetch_state::{
    BatchOutcome, FetchBatch, LoadPhase, PageState, Payload, RefreshTicket, LOAD_ERROR_MESSAGE,
};
pub use sort::{sort_rows, sorted_indices, SortIndicator, SortState};
pub use summary::{Metric, StatCard, ValueFormat};
pub use value::{CellValue, Row};
pub use view::TabularReportView;
