mod common;

mod categories;
mod import;
mod questions;
mod upload;
