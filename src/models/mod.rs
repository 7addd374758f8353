pub mod bucket;
pub mod dates;
