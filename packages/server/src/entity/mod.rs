pub mod answer;
pub mod category;
pub mod lang;
pub mod question;
pub mod question_template;
pub mod template;

pub use lang::Lang;
