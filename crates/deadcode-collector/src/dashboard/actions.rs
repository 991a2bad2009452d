//! Mutating dashboard actions (form POSTs).

use axum::{extract::State, response::Redirect, Form};
use serde::Deserialize;

use super::parse_unit_list;
use crate::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClassesForm {
    #[serde(default)]
    pub classes: String,
}

/// `POST /reset`: clear all counts and track the submitted units from zero.
pub async fn reset(State(state): State<AppState>, Form(form): Form<ClassesForm>) -> Redirect {
    let units = parse_unit_list(&form.classes);
    state.store().reset_seeded(&units);
    tracing::info!(seeded = units.len(), "store reset");
    Redirect::to("/")
}

/// `POST /remove`: stop tracking the submitted units.
pub async fn remove(State(state): State<AppState>, Form(form): Form<ClassesForm>) -> Redirect {
    let units = parse_unit_list(&form.classes);
    let removed = state.store().remove_many(&units);
    tracing::info!(submitted = units.len(), removed, "units removed");
    Redirect::to("/")
}
