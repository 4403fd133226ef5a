//! Person detail endpoint.

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::PageResult;
use crate::directory;
use crate::views;
use crate::AppState;

/// GET /person/:id - Detail page for one person.
pub async fn person_detail(State(state): State<AppState>, Path(id): Path<i64>) -> PageResult {
    let person = directory::person_detail(&state.whois, id).await?;
    Ok(Html(views::person_page(&person, &state.squads)))
}
