use crate::calc::round_to;
use crate::dashboard::dashboard_overview;
use crate::ipc::helpers::{get_optional_date, respond, today, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn dashboard_open(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_optional_date(params, "date")?.unwrap_or_else(today);
    let overview = dashboard_overview(
        &state.students,
        &state.attendance,
        &state.marks,
        date,
        state.config.dashboard.options(),
    );
    let mut out = json!(overview);
    let stat = state.config.display.stat_decimals;
    let rate = state.config.display.rate_decimals;
    out["averageGpa"] = json!(round_to(overview.average_gpa, 2));
    out["averageMark"] = json!(round_to(overview.average_mark, stat));
    out["attendanceRate"] = json!(overview.attendance_rate.map(|r| round_to(r, rate)));
    for (i, point) in overview.trend.iter().enumerate() {
        out["trend"][i]["rate"] = json!(round_to(point.rate, rate));
    }
    for (i, subject) in overview.subject_averages.iter().enumerate() {
        out["subjectAverages"][i]["average"] = json!(round_to(subject.average, stat));
    }
    Ok(out)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "dashboard.open" => Some(respond(&req.id, dashboard_open(state, &req.params))),
        _ => None,
    }
}
