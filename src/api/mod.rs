//! HTTP handlers.
//!
//! Each handler runs one pipeline from [`crate::directory`] and renders a page
//! or redirects back to the index.

mod detail;
mod listing;
mod reactions;

pub use detail::*;
pub use listing::*;
pub use reactions::*;

use axum::response::{Html, Redirect};

/// Result type of every page handler.
pub type PageResult = Result<Html<String>, crate::errors::AppError>;

/// POST / - nothing to handle yet, send the visitor back to the index.
pub async fn post_index() -> Redirect {
    Redirect::to("/")
}
