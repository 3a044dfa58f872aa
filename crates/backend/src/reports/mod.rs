pub mod registry;
pub mod repository;
