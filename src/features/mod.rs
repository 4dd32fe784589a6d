pub mod listings;
pub mod schemas;
