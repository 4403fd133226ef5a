//! Person listing endpoints.

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::PageResult;
use crate::directory::{self, SortOrder};
use crate::views::{self, Listing};
use crate::AppState;

/// GET / - Everyone, in the order the WHOIS API sorted them.
pub async fn index(State(state): State<AppState>) -> PageResult {
    render_listing(&state, SortOrder::Remote, Listing::All).await
}

/// GET /sort - Everyone, sorted A-Z by name.
pub async fn sort_ascending(State(state): State<AppState>) -> PageResult {
    render_listing(&state, SortOrder::Ascending, Listing::Ascending).await
}

/// GET /sort-desc - Everyone, sorted Z-A by name.
pub async fn sort_descending(State(state): State<AppState>) -> PageResult {
    render_listing(&state, SortOrder::Descending, Listing::Descending).await
}

/// GET /squad/:squad_id - Members of one squad.
pub async fn squad_members(
    State(state): State<AppState>,
    Path(squad_id): Path<i64>,
) -> PageResult {
    let persons = directory::list_squad_members(&state.whois, squad_id).await?;
    Ok(Html(views::index_page(
        &persons,
        &state.squads,
        Listing::Squad(squad_id),
    )))
}

async fn render_listing(state: &AppState, order: SortOrder, listing: Listing) -> PageResult {
    let persons = directory::list_persons(&state.whois, order).await?;
    Ok(Html(views::index_page(&persons, &state.squads, listing)))
}
