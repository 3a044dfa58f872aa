pub mod api;
pub mod report_view;
