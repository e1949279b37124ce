pub mod catalog;
pub mod error;
pub mod select_station;
