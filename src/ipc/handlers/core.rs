use crate::fixtures;
use crate::ipc::helpers::{get_optional_date, respond, today, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn health(state: &AppState) -> serde_json::Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "students": state.students.len(),
        "attendance": state.attendance.len(),
        "marks": state.marks.len()
    })
}

/// Replaces every collection with seeded sample data.
pub fn load_sample(state: &mut AppState, seed: u64, anchor: chrono::NaiveDate) {
    let data = fixtures::sample_data(seed, anchor);
    state.students = data.students;
    state.attendance = data.attendance;
    state.marks = data.marks;
    log::info!(
        "loaded sample data (seed {}, today {}): {} students, {} attendance, {} marks",
        seed,
        anchor,
        state.students.len(),
        state.attendance.len(),
        state.marks.len()
    );
}

fn workspace_load_sample(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let seed = match params.get("seed") {
        None => state.config.fixtures.seed,
        Some(v) if v.is_null() => state.config.fixtures.seed,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| HandlerErr::bad_params("seed must be a non-negative integer"))?,
    };
    let anchor = get_optional_date(params, "today")?
        .or(state.config.fixtures.today)
        .unwrap_or_else(today);
    load_sample(state, seed, anchor);
    Ok(json!({
        "seed": seed,
        "today": anchor,
        "students": state.students.len(),
        "attendance": state.attendance.len(),
        "marks": state.marks.len()
    }))
}

fn workspace_reset(state: &mut AppState) -> serde_json::Value {
    state.students.clear();
    state.attendance.clear();
    state.marks.clear();
    log::info!("workspace reset");
    json!({ "ok": true })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(respond(&req.id, Ok(health(state)))),
        "workspace.loadSample" => Some(respond(
            &req.id,
            workspace_load_sample(state, &req.params),
        )),
        "workspace.reset" => Some(respond(&req.id, Ok(workspace_reset(state)))),
        _ => None,
    }
}
