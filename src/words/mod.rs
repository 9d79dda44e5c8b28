//! Word list loading

mod loader;
mod models;

pub use loader::{load_words, parse_words, WordListError};
pub use models::{WordList, WordRecord};
