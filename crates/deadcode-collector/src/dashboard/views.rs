use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub since: DateTime<Utc>,
    pub tracked: usize,
    pub active: usize,
    pub dead: usize,
}

#[derive(Debug, Serialize)]
pub struct DeadView {
    pub since: DateTime<Utc>,
    pub dead: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UnitCount {
    pub class: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct ActiveView {
    pub since: DateTime<Utc>,
    pub active: Vec<UnitCount>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ChartData {
    pub active: usize,
    pub dead: usize,
    /// Share of tracked units that were loaded, 0.0 when nothing is tracked.
    pub active_ratio: f64,
}

/// `GET /`: summary, or the reset workflow while nothing is tracked.
pub async fn index(State(state): State<AppState>) -> Response {
    let snap = state.store().snapshot();
    if snap.counts.is_empty() {
        return Redirect::to("/reset").into_response();
    }
    let tally = snap.tally();
    Json(Summary {
        since: snap.since,
        tracked: tally.tracked(),
        active: tally.active,
        dead: tally.dead,
    })
    .into_response()
}

pub async fn dead(State(state): State<AppState>) -> Json<DeadView> {
    let snap = state.store().snapshot();
    let dead: Vec<String> = snap.dead_units().into_iter().map(str::to_string).collect();
    Json(DeadView {
        since: snap.since,
        count: dead.len(),
        dead,
    })
}

pub async fn active(State(state): State<AppState>) -> Json<ActiveView> {
    let snap = state.store().snapshot();
    let active: Vec<UnitCount> = snap
        .active_units()
        .into_iter()
        .map(|(class, count)| UnitCount {
            class: class.to_string(),
            count,
        })
        .collect();
    Json(ActiveView {
        since: snap.since,
        count: active.len(),
        active,
    })
}

pub async fn chart(State(state): State<AppState>) -> Json<ChartData> {
    let tally = state.store().tally();
    let active_ratio = match tally.tracked() {
        0 => 0.0,
        n => tally.active as f64 / n as f64,
    };
    Json(ChartData {
        active: tally.active,
        dead: tally.dead,
        active_ratio,
    })
}

const RESET_FORM: &str = r#"<!doctype html>
<title>Reset</title>
<h1>Reset</h1>
<p>Clears every count and starts a new period. Listed units are tracked from zero, one per line.</p>
<form method="post" action="/reset">
<textarea name="classes" rows="20" cols="80"></textarea>
<button type="submit">Reset</button>
</form>
"#;

const REMOVE_FORM: &str = r#"<!doctype html>
<title>Remove</title>
<h1>Remove</h1>
<p>Stops tracking the listed units, one per line.</p>
<form method="post" action="/remove">
<textarea name="classes" rows="20" cols="80"></textarea>
<button type="submit">Remove</button>
</form>
"#;

pub async fn reset_form() -> Html<&'static str> {
    Html(RESET_FORM)
}

pub async fn remove_form() -> Html<&'static str> {
    Html(REMOVE_FORM)
}
