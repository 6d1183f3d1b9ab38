pub mod renderer;

pub use renderer::{parse_intents, render};
