pub mod address;
pub mod question;
pub mod visitor;

pub use address::{AddressLookupResult, PostalCode, ShippingQuote};
pub use question::{AnswerSet, QuizOption, QuizQuestion};
pub use visitor::Visitor;
