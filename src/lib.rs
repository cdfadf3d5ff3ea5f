pub mod config;
pub mod core;
pub mod error;
pub mod user_config;

pub use crate::config::{Config, Settings};
pub use crate::core::app::{ActiveSuggest, DictionaryApp, SuggestMode, SuggestionList};
pub use crate::error::{DictionaryError, Result};
