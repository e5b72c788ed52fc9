use crate::calc::CalcError;
use crate::model::{AttendanceRecord, Student, StudentData, SubjectMark};
use serde_json::json;
use uuid::Uuid;

/// Appends a student under a fresh UUID. Returns the new roster and the id.
pub fn add_student(
    students: &[Student],
    data: StudentData,
) -> Result<(Vec<Student>, String), CalcError> {
    let id = Uuid::new_v4().to_string();
    let next = add_student_with_id(students, id.clone(), data)?;
    Ok((next, id))
}

/// Appends a student under a caller-chosen id. A collision is a broken id
/// source and is reported, never ignored.
pub fn add_student_with_id(
    students: &[Student],
    id: String,
    data: StudentData,
) -> Result<Vec<Student>, CalcError> {
    if id.trim().is_empty() {
        return Err(CalcError::new("bad_params", "student id must not be empty"));
    }
    if students.iter().any(|s| s.id() == id) {
        return Err(
            CalcError::new("duplicate_id", format!("student id {} already exists", id))
                .with_details(json!({ "studentId": id })),
        );
    }
    let mut next = students.to_vec();
    next.push(Student::new(id, data));
    Ok(next)
}

/// Replaces the fields of the student with `id`, keeping the id and
/// recomputing the avatar. Unknown ids return the roster unchanged.
pub fn edit_student(students: &[Student], id: &str, data: StudentData) -> Vec<Student> {
    students
        .iter()
        .map(|s| {
            if s.id() == id {
                s.with_data(data.clone())
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Removes the student with `id`. Unknown ids return the roster unchanged.
/// Attendance and marks rows for the student are left alone; see
/// [`remove_student_attendance`] and [`remove_student_marks`].
pub fn delete_student(students: &[Student], id: &str) -> Vec<Student> {
    students.iter().filter(|s| s.id() != id).cloned().collect()
}

pub fn remove_student_attendance(
    attendance: &[AttendanceRecord],
    student_id: &str,
) -> Vec<AttendanceRecord> {
    attendance
        .iter()
        .filter(|a| a.student_id != student_id)
        .cloned()
        .collect()
}

pub fn remove_student_marks(marks: &[SubjectMark], student_id: &str) -> Vec<SubjectMark> {
    marks
        .iter()
        .filter(|m| m.student_id != student_id)
        .cloned()
        .collect()
}
