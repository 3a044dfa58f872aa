//! Types shared between the reporting backend and the browser client.
//!
//! `shared::report_view` holds the table view model every report page is
//! built on; `reports` holds the static report catalog.

pub mod reports;
pub mod shared;
