//! Emoji reaction endpoint.

use axum::{
    extract::{rejection::FormRejection, Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

use crate::directory;
use crate::errors::AppError;
use crate::AppState;

/// Form body posted by the reaction buttons.
#[derive(Debug, Deserialize)]
pub struct ReactionForm {
    #[serde(default)]
    pub emoji: Option<String>,
}

/// POST /detail/:id/SE-GL-emoji - Add a reaction, then go back to the index.
///
/// A missing or unreadable form body counts as an unknown reaction.
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: Result<Form<ReactionForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let emoji = match form {
        Ok(Form(form)) => form.emoji,
        Err(rejection) => {
            tracing::debug!(person_id = id, "Reaction without form body: {}", rejection);
            None
        }
    };
    directory::add_reaction(&state.whois, id, emoji.as_deref()).await?;
    Ok(Redirect::to("/"))
}
