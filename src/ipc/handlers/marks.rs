use crate::calc::round_to;
use crate::ipc::helpers::{
    get_optional_str, get_required_f64, get_required_str, respond, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::marks::{
    filter_marks, letter_grade, overall_stats, percentage, set_mark_value, student_average,
    subject_average, upsert_mark, MarkQuery,
};
use crate::model::SubjectMark;
use serde_json::json;

fn marks_list(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let query = MarkQuery {
        student_id: get_optional_str(params, "studentId")?,
        subject: get_optional_str(params, "subject")?,
        exam: get_optional_str(params, "exam")?,
    };
    let decimals = state.config.display.stat_decimals;
    let rows: Vec<serde_json::Value> = filter_marks(&state.marks, &query)
        .into_iter()
        .map(|m| {
            let pct = percentage(&m);
            json!({
                "studentId": m.student_id,
                "subject": m.subject,
                "exam": m.exam,
                "marks": m.marks,
                "maxMarks": m.max_marks,
                "percent": round_to(pct, decimals),
                "letter": letter_grade(pct)
            })
        })
        .collect();
    Ok(json!({ "marks": rows }))
}

fn marks_upsert(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let record = SubjectMark {
        student_id: get_required_str(params, "studentId")?,
        subject: get_required_str(params, "subject")?,
        exam: get_required_str(params, "exam")?,
        marks: get_required_f64(params, "marks")?,
        max_marks: get_required_f64(params, "maxMarks")?,
    };
    let before = state.marks.len();
    state.marks = upsert_mark(&state.marks, record.clone());
    let inserted = state.marks.len() > before;
    let stored = state
        .marks
        .iter()
        .find(|m| m.same_key(&record.student_id, &record.subject, &record.exam))
        .cloned();
    log::info!(
        "mark {} {}/{}/{}",
        if inserted { "inserted" } else { "replaced" },
        record.student_id,
        record.subject,
        record.exam
    );
    Ok(json!({ "inserted": inserted, "mark": stored }))
}

fn marks_set_value(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let subject = get_required_str(params, "subject")?;
    let exam = get_required_str(params, "exam")?;
    let value = get_required_f64(params, "marks")?;
    let applied = state
        .marks
        .iter()
        .any(|m| m.same_key(&student_id, &subject, &exam));
    state.marks = set_mark_value(&state.marks, &student_id, &subject, &exam, value);
    if !applied {
        log::warn!("mark edit ignored, no {}/{}/{}", student_id, subject, exam);
    }
    let stored = state
        .marks
        .iter()
        .find(|m| m.same_key(&student_id, &subject, &exam))
        .cloned();
    Ok(json!({ "applied": applied, "mark": stored }))
}

fn marks_student_summary(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let count = state
        .marks
        .iter()
        .filter(|m| m.student_id == student_id)
        .count();
    let average = student_average(&state.marks, &student_id);
    Ok(json!({
        "studentId": student_id,
        "count": count,
        "average": round_to(average, state.config.display.stat_decimals),
        "letter": letter_grade(average)
    }))
}

fn marks_subject_average(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let subject = get_required_str(params, "subject")?;
    let average = subject_average(&state.marks, &subject);
    Ok(json!({
        "subject": subject,
        "average": round_to(average, state.config.display.stat_decimals)
    }))
}

fn marks_stats(state: &AppState) -> serde_json::Value {
    let s = overall_stats(&state.marks);
    let d = state.config.display.stat_decimals;
    json!({
        "average": round_to(s.average, d),
        "highest": round_to(s.highest, d),
        "lowest": round_to(s.lowest, d),
        "passRate": round_to(s.pass_rate, d),
        "count": s.count
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.list" => Some(respond(&req.id, marks_list(state, &req.params))),
        "marks.upsert" => Some(respond(&req.id, marks_upsert(state, &req.params))),
        "marks.setValue" => Some(respond(&req.id, marks_set_value(state, &req.params))),
        "marks.studentSummary" => Some(respond(
            &req.id,
            marks_student_summary(state, &req.params),
        )),
        "marks.subjectAverage" => Some(respond(
            &req.id,
            marks_subject_average(state, &req.params),
        )),
        "marks.stats" => Some(respond(&req.id, Ok(marks_stats(state)))),
        _ => None,
    }
}
