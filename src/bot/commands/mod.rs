pub mod profile;
pub mod summary;
