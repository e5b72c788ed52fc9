use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .env_remove("ROSTERD_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn new_student(first: &str, last: &str) -> serde_json::Value {
    json!({
        "firstName": first,
        "lastName": last,
        "email": format!("{}.{}@school.edu", first.to_lowercase(), last.to_lowercase()),
        "grade": "11th",
        "age": 17,
        "gender": "Female",
        "enrollmentDate": "2024-09-01",
        "address": "12 Main St",
        "parentPhone": "(555) 000-1111",
        "status": "Active",
        "gpa": 3.4
    })
}

fn ids(result: &serde_json::Value) -> Vec<String> {
    result
        .get("students")
        .and_then(|v| v.as_array())
        .expect("students array")
        .iter()
        .filter_map(|s| s.get("id").and_then(|v| v.as_str()).map(|s| s.to_string()))
        .collect()
}

#[test]
fn create_update_delete_roundtrip() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.loadSample",
        json!({ "seed": 5, "today": "2024-05-17" }),
    );
    let before = request_ok(&mut stdin, &mut reader, "2", "students.list", json!({}));
    assert_eq!(ids(&before), vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.create",
        json!({ "student": new_student("mia", "lopez") }),
    );
    let new_id = created
        .get("studentId")
        .and_then(|v| v.as_str())
        .expect("studentId")
        .to_string();
    assert_eq!(created["student"]["avatar"], "ML");
    assert_eq!(created["student"]["grade"], "11th");

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.update",
        json!({ "studentId": new_id, "student": new_student("Zara", "Khan") }),
    );
    assert_eq!(updated["applied"], true);
    assert_eq!(updated["student"]["id"], new_id.as_str());
    assert_eq!(updated["student"]["avatar"], "ZK");

    let ignored = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.update",
        json!({ "studentId": "no-such-id", "student": new_student("X", "Y") }),
    );
    assert_eq!(ignored["applied"], false);
    assert!(ignored["student"].is_null());

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "students.delete",
        json!({ "studentId": "2" }),
    );
    assert_eq!(deleted["applied"], true);
    assert_eq!(deleted["cascade"], true);
    assert_eq!(deleted["removedMarks"], 16);

    let after = request_ok(&mut stdin, &mut reader, "7", "students.list", json!({}));
    let mut expected: Vec<String> = ["1", "3", "4", "5", "6", "7", "8"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    expected.push(new_id.clone());
    assert_eq!(ids(&after), expected);

    let gone = request(
        &mut stdin,
        &mut reader,
        "8",
        "students.get",
        json!({ "studentId": "2" }),
    );
    assert_eq!(gone["ok"], false);
    assert_eq!(gone["error"]["code"], "not_found");

    let rate = request_ok(
        &mut stdin,
        &mut reader,
        "9",
        "attendance.studentRate",
        json!({ "studentId": "2" }),
    );
    assert!(rate["rate"].is_null());
    assert_eq!(rate["total"], 0);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn delete_without_cascade_keeps_rows() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.loadSample",
        json!({ "seed": 5, "today": "2024-05-17" }),
    );
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.delete",
        json!({ "studentId": "3", "cascade": false }),
    );
    assert_eq!(deleted["applied"], true);
    assert_eq!(deleted["removedAttendance"], 0);

    let summary = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "marks.studentSummary",
        json!({ "studentId": "3" }),
    );
    assert_eq!(summary["count"], 16);

    let missing = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.delete",
        json!({ "studentId": "does-not-exist", "cascade": false }),
    );
    assert_eq!(missing["applied"], false);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn list_filters_by_text_grade_and_status() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.loadSample",
        json!({ "today": "2024-05-17" }),
    );

    let all = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.list",
        json!({ "query": "", "grade": "", "status": "" }),
    );
    assert_eq!(ids(&all).len(), 8);

    let by_email = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.list",
        json!({ "query": "BEN.THOMAS" }),
    );
    assert_eq!(ids(&by_email), vec!["8"]);

    let juniors = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.list",
        json!({ "grade": "11th", "status": "Suspended" }),
    );
    assert_eq!(ids(&juniors), vec!["6"]);
    assert_eq!(juniors["total"], 8);

    let bad = request(
        &mut stdin,
        &mut reader,
        "5",
        "students.list",
        json!({ "grade": "13th" }),
    );
    assert_eq!(bad["error"]["code"], "bad_params");

    let bad_create = request(
        &mut stdin,
        &mut reader,
        "6",
        "students.create",
        json!({ "student": { "firstName": "Only" } }),
    );
    assert_eq!(bad_create["error"]["code"], "bad_params");

    drop(stdin);
    let _ = child.wait();
}
