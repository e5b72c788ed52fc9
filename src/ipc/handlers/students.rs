use crate::ipc::helpers::{
    get_optional_str, get_required_str, get_required_typed, respond, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::model::{Grade, StudentData, StudentStatus};
use crate::roster::{filter_students, find_student, RosterQuery};
use crate::students::{
    add_student, delete_student, edit_student, remove_student_attendance, remove_student_marks,
};
use serde_json::json;

fn parse_roster_query(params: &serde_json::Value) -> Result<RosterQuery, HandlerErr> {
    let text = get_optional_str(params, "query")?.unwrap_or_default();
    let grade = match get_optional_str(params, "grade")? {
        None => None,
        Some(g) => Some(
            Grade::parse(&g)
                .ok_or_else(|| HandlerErr::bad_params(format!("unknown grade: {}", g)))?,
        ),
    };
    let status = match get_optional_str(params, "status")? {
        None => None,
        Some(s) => Some(
            StudentStatus::parse(&s)
                .ok_or_else(|| HandlerErr::bad_params(format!("unknown status: {}", s)))?,
        ),
    };
    Ok(RosterQuery {
        text,
        grade,
        status,
        name_only: false,
    })
}

fn students_list(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let query = parse_roster_query(params)?;
    let students = filter_students(&state.students, &query);
    Ok(json!({
        "students": students,
        "total": state.students.len()
    }))
}

fn students_get(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let Some(student) = find_student(&state.students, &student_id) else {
        return Err(HandlerErr::not_found("student not found"));
    };
    Ok(json!({ "student": student }))
}

fn students_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let data: StudentData = get_required_typed(params, "student")?;
    let (next, student_id) = add_student(&state.students, data)?;
    state.students = next;
    log::info!("student {} created", student_id);
    let student = find_student(&state.students, &student_id);
    Ok(json!({ "studentId": student_id, "student": student }))
}

fn students_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let data: StudentData = get_required_typed(params, "student")?;
    let applied = find_student(&state.students, &student_id).is_some();
    state.students = edit_student(&state.students, &student_id, data);
    if applied {
        log::info!("student {} updated", student_id);
    } else {
        log::warn!("update ignored, no student {}", student_id);
    }
    Ok(json!({
        "applied": applied,
        "student": find_student(&state.students, &student_id)
    }))
}

fn students_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let cascade = match params.get("cascade") {
        None => state.config.students.cascade_on_delete,
        Some(v) if v.is_null() => state.config.students.cascade_on_delete,
        Some(v) => v
            .as_bool()
            .ok_or_else(|| HandlerErr::bad_params("cascade must be a boolean"))?,
    };

    let applied = find_student(&state.students, &student_id).is_some();
    state.students = delete_student(&state.students, &student_id);

    let mut removed_attendance = 0;
    let mut removed_marks = 0;
    if cascade {
        let attendance = remove_student_attendance(&state.attendance, &student_id);
        let marks = remove_student_marks(&state.marks, &student_id);
        removed_attendance = state.attendance.len() - attendance.len();
        removed_marks = state.marks.len() - marks.len();
        state.attendance = attendance;
        state.marks = marks;
    }

    if applied {
        log::info!(
            "student {} deleted (cascade: {}, attendance rows: {}, marks rows: {})",
            student_id,
            cascade,
            removed_attendance,
            removed_marks
        );
    } else {
        log::warn!("delete ignored, no student {}", student_id);
    }
    Ok(json!({
        "applied": applied,
        "cascade": cascade,
        "removedAttendance": removed_attendance,
        "removedMarks": removed_marks
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(respond(&req.id, students_list(state, &req.params))),
        "students.get" => Some(respond(&req.id, students_get(state, &req.params))),
        "students.create" => Some(respond(&req.id, students_create(state, &req.params))),
        "students.update" => Some(respond(&req.id, students_update(state, &req.params))),
        "students.delete" => Some(respond(&req.id, students_delete(state, &req.params))),
        _ => None,
    }
}
