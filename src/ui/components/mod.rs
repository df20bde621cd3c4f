pub mod header;
pub mod stats_bar;
pub mod summary;
pub mod typing_area;
