use crate::attendance::{
    daily_snapshot, date_stats, mark_all_statuses, mark_attendance, student_summary, trend,
    upsert_attendance,
};
use crate::calc::round_to;
use crate::ipc::helpers::{
    get_optional_str, get_required_date, get_required_str, get_required_typed, respond, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendanceRecord, AttendanceStatus, Grade, StudentStatus};
use crate::roster::{filter_students, RosterQuery};
use chrono::NaiveDate;
use serde_json::json;
use std::collections::BTreeMap;

fn rounded(state: &AppState, rate: Option<f64>) -> Option<f64> {
    rate.map(|r| round_to(r, state.config.display.rate_decimals))
}

fn attendance_day(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_required_date(params, "date")?;
    let stats = date_stats(&state.attendance, date);
    Ok(json!({
        "date": date,
        "statuses": daily_snapshot(&state.attendance, date),
        "stats": stats,
        "rate": rounded(state, stats.rate())
    }))
}

fn apply_day(
    state: &mut AppState,
    date: NaiveDate,
    statuses: &BTreeMap<String, AttendanceStatus>,
) -> serde_json::Value {
    state.attendance = mark_attendance(&state.attendance, date, statuses);
    log::info!("attendance for {} marked ({} students)", date, statuses.len());
    json!({
        "date": date,
        "marked": statuses.len(),
        "stats": date_stats(&state.attendance, date)
    })
}

fn attendance_mark(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_required_date(params, "date")?;
    let statuses: BTreeMap<String, AttendanceStatus> = get_required_typed(params, "statuses")?;
    Ok(apply_day(state, date, &statuses))
}

/// Stamps one status on the active students whose name matches the optional
/// search and grade, then saves the day with exactly those entries.
fn attendance_mark_all(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_required_date(params, "date")?;
    let status: AttendanceStatus = get_required_typed(params, "status")?;
    let grade = match get_optional_str(params, "grade")? {
        None => None,
        Some(g) => Some(
            Grade::parse(&g)
                .ok_or_else(|| HandlerErr::bad_params(format!("unknown grade: {}", g)))?,
        ),
    };
    let query = RosterQuery {
        text: get_optional_str(params, "query")?.unwrap_or_default(),
        grade,
        status: Some(StudentStatus::Active),
        name_only: true,
    };
    let targets = filter_students(&state.students, &query);
    let statuses = mark_all_statuses(&targets, status);
    Ok(apply_day(state, date, &statuses))
}

fn attendance_set_student_day(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_required_date(params, "date")?;
    let student_id = get_required_str(params, "studentId")?;
    let status: AttendanceStatus = get_required_typed(params, "status")?;
    state.attendance = upsert_attendance(
        &state.attendance,
        AttendanceRecord {
            student_id: student_id.clone(),
            date,
            status,
        },
    );
    log::info!("attendance for {} on {} set to {:?}", student_id, date, status);
    Ok(json!({ "ok": true }))
}

fn attendance_student_rate(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let summary = student_summary(&state.attendance, &student_id);
    Ok(json!({
        "studentId": student_id,
        "total": summary.total,
        "attended": summary.attended,
        "rate": rounded(state, summary.rate)
    }))
}

fn attendance_trend(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let days = match params.get("days") {
        None => state.config.dashboard.trend_days,
        Some(v) if v.is_null() => state.config.dashboard.trend_days,
        Some(v) => v
            .as_u64()
            .ok_or_else(|| HandlerErr::bad_params("days must be a non-negative integer"))?
            as usize,
    };
    let decimals = state.config.display.rate_decimals;
    let points: Vec<serde_json::Value> = trend(&state.attendance, days)
        .into_iter()
        .map(|p| {
            json!({
                "date": p.date,
                "rate": round_to(p.rate, decimals),
                "present": p.present,
                "total": p.total
            })
        })
        .collect();
    Ok(json!({ "points": points }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.day" => Some(respond(&req.id, attendance_day(state, &req.params))),
        "attendance.mark" => Some(respond(&req.id, attendance_mark(state, &req.params))),
        "attendance.markAll" => Some(respond(&req.id, attendance_mark_all(state, &req.params))),
        "attendance.setStudentDay" => Some(respond(
            &req.id,
            attendance_set_student_day(state, &req.params),
        )),
        "attendance.studentRate" => Some(respond(
            &req.id,
            attendance_student_rate(state, &req.params),
        )),
        "attendance.trend" => Some(respond(&req.id, attendance_trend(state, &req.params))),
        _ => None,
    }
}
