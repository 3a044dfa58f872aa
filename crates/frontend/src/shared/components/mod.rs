pub mod breakdown_table;
pub mod page_header;
pub mod stat_card;
pub mod table;

pub use breakdown_table::BreakdownTable;
pub use page_header::PageHeader;
pub use stat_card::StatCard;
