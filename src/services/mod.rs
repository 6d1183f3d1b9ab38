pub mod postal_code;
pub mod quiz_service;
pub mod shipping;
pub mod validation;

pub use postal_code::{digits_of, format_postal_code, parse_postal_code};
pub use shipping::draw_quote;
pub use validation::validate_intro;
