pub mod category;
pub mod import;
pub mod question;
pub mod shared;
pub mod upload;
