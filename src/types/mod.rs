pub mod catalog_date;
pub mod catalog_row;
pub mod resolved_station;
pub mod year_range;
