pub mod cleanup;
pub mod duration;
pub mod import;
pub mod query;
