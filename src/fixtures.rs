//! Seeded sample data for the sidecar's `workspace.loadSample` and for tests.
//! Nothing in the query or mutation modules depends on this.

use crate::model::{
    AttendanceRecord, AttendanceStatus, Gender, Grade, Student, StudentData, StudentStatus,
    SubjectMark,
};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const SUBJECTS: [&str; 8] = [
    "Mathematics",
    "English",
    "Science",
    "History",
    "Geography",
    "Computer Science",
    "Physical Education",
    "Art",
];

pub const EXAMS: [&str; 5] = ["Mid-Term", "Final", "Quiz 1", "Quiz 2", "Assignment"];

const ATTENDANCE_DAYS: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub marks: Vec<SubjectMark>,
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Active 10th grader enrolled 2023-09-01, for tests that only care about
/// the name.
pub fn student_data(first_name: &str, last_name: &str) -> StudentData {
    StudentData {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@school.edu",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        grade: Grade::Tenth,
        age: 16,
        gender: Gender::Other,
        enrollment_date: ymd(2023, 9, 1),
        address: String::new(),
        parent_phone: String::new(),
        status: StudentStatus::Active,
        gpa: 3.0,
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    grade: Grade,
    age: u32,
    gender: Gender,
    enrolled_year: i32,
    address: &str,
    parent_phone: &str,
    status: StudentStatus,
    gpa: f64,
) -> Student {
    Student::new(
        id.to_string(),
        StudentData {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            grade,
            age,
            gender,
            enrollment_date: ymd(enrolled_year, 9, 1),
            address: address.to_string(),
            parent_phone: parent_phone.to_string(),
            status,
            gpa,
        },
    )
}

pub fn sample_students() -> Vec<Student> {
    use Gender::{Female, Male};
    use Grade::{Eleventh, Ninth, Tenth, Twelfth};
    use StudentStatus::{Active, Graduated, Inactive, Suspended};
    vec![
        sample(
            "1",
            "Emma",
            "Johnson",
            "emma.johnson@school.edu",
            Tenth,
            16,
            Female,
            2023,
            "123 Oak Street, Springfield",
            "(555) 123-4567",
            Active,
            3.8,
        ),
        sample(
            "2",
            "Liam",
            "Williams",
            "liam.williams@school.edu",
            Eleventh,
            17,
            Male,
            2022,
            "456 Maple Ave, Springfield",
            "(555) 234-5678",
            Active,
            3.5,
        ),
        sample(
            "3",
            "Sophia",
            "Brown",
            "sophia.brown@school.edu",
            Ninth,
            15,
            Female,
            2024,
            "789 Pine Rd, Springfield",
            "(555) 345-6789",
            Active,
            3.9,
        ),
        sample(
            "4",
            "Noah",
            "Davis",
            "noah.davis@school.edu",
            Twelfth,
            18,
            Male,
            2021,
            "321 Elm St, Springfield",
            "(555) 456-7890",
            Graduated,
            3.2,
        ),
        sample(
            "5",
            "Olivia",
            "Martinez",
            "olivia.martinez@school.edu",
            Tenth,
            16,
            Female,
            2023,
            "654 Birch Ln, Springfield",
            "(555) 567-8901",
            Active,
            3.7,
        ),
        sample(
            "6",
            "James",
            "Garcia",
            "james.garcia@school.edu",
            Eleventh,
            17,
            Male,
            2022,
            "987 Cedar Dr, Springfield",
            "(555) 678-9012",
            Suspended,
            2.8,
        ),
        sample(
            "7",
            "Ava",
            "Anderson",
            "ava.anderson@school.edu",
            Ninth,
            14,
            Female,
            2024,
            "147 Walnut St, Springfield",
            "(555) 789-0123",
            Active,
            4.0,
        ),
        sample(
            "8",
            "Benjamin",
            "Thomas",
            "ben.thomas@school.edu",
            Twelfth,
            18,
            Male,
            2021,
            "258 Spruce Ave, Springfield",
            "(555) 890-1234",
            Inactive,
            3.1,
        ),
    ]
}

fn random_status(rng: &mut StdRng) -> AttendanceStatus {
    let roll: f64 = rng.gen();
    if roll < 0.75 {
        AttendanceStatus::Present
    } else if roll < 0.85 {
        AttendanceStatus::Late
    } else if roll < 0.93 {
        AttendanceStatus::Absent
    } else {
        AttendanceStatus::Excused
    }
}

/// One record per student per weekday over the 20 days ending at `today`.
pub fn generate_attendance(
    students: &[Student],
    today: NaiveDate,
    rng: &mut StdRng,
) -> Vec<AttendanceRecord> {
    let mut out = Vec::new();
    for s in students {
        for back in 0..ATTENDANCE_DAYS {
            let Some(date) = today.checked_sub_days(Days::new(back)) else {
                continue;
            };
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }
            out.push(AttendanceRecord {
                student_id: s.id().to_string(),
                date,
                status: random_status(rng),
            });
        }
    }
    out
}

/// Mid-Term and Final out of 100 in every subject, each in `[40, 100)`.
pub fn generate_marks(students: &[Student], rng: &mut StdRng) -> Vec<SubjectMark> {
    let max_marks = 100_u32;
    let mut out = Vec::new();
    for s in students {
        for subject in SUBJECTS {
            for exam in &EXAMS[..2] {
                let floor = 40 + rng.gen_range(0..20);
                let achieved = floor + rng.gen_range(0..(max_marks - floor));
                out.push(SubjectMark {
                    student_id: s.id().to_string(),
                    subject: subject.to_string(),
                    exam: exam.to_string(),
                    marks: f64::from(achieved),
                    max_marks: f64::from(max_marks),
                });
            }
        }
    }
    out
}

pub fn sample_data(seed: u64, today: NaiveDate) -> SampleData {
    let mut rng = StdRng::seed_from_u64(seed);
    let students = sample_students();
    let attendance = generate_attendance(&students, today, &mut rng);
    let marks = generate_marks(&students, &mut rng);
    SampleData {
        students,
        attendance,
        marks,
    }
}
