pub mod home;
pub mod report_page;
