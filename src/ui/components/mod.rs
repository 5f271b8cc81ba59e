//! Reusable UI building blocks.
//!
//! - [`Input`]: Text input field
//! - [`SearchBar`]: Search box rendered by the app shell

mod input;
mod search_bar;

pub use input::Input;
pub use search_bar::SearchBar;
