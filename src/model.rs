use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "9th")]
    Ninth,
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "11th")]
    Eleventh,
    #[serde(rename = "12th")]
    Twelfth,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Ninth, Grade::Tenth, Grade::Eleventh, Grade::Twelfth];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ninth => "9th",
            Self::Tenth => "10th",
            Self::Eleventh => "11th",
            Self::Twelfth => "12th",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == s.trim())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
    Suspended,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 4] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Graduated,
        StudentStatus::Suspended,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Graduated => "Graduated",
            Self::Suspended => "Suspended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s.trim())
    }
}

/// Editable student fields. Everything a form submits; id and avatar are
/// owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: Grade,
    pub age: u32,
    pub gender: Gender,
    pub enrollment_date: NaiveDate,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub parent_phone: String,
    pub status: StudentStatus,
    pub gpa: f64,
}

impl StudentData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Uppercased first letters of first and last name.
pub fn avatar_initials(first_name: &str, last_name: &str) -> String {
    first_name
        .trim()
        .chars()
        .take(1)
        .chain(last_name.trim().chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// A roster entry. Fields are read-only outside the crate so the id can
/// never change and the avatar always tracks the current name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: String,
    #[serde(flatten)]
    data: StudentData,
    avatar: String,
}

impl Student {
    pub(crate) fn new(id: String, data: StudentData) -> Self {
        let avatar = avatar_initials(&data.first_name, &data.last_name);
        Self { id, data, avatar }
    }

    pub(crate) fn with_data(&self, data: StudentData) -> Self {
        Self::new(self.id.clone(), data)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &StudentData {
        &self.data
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Present and Late both count toward the attendance rate.
    pub fn counts_as_attended(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMark {
    pub student_id: String,
    pub subject: String,
    pub exam: String,
    pub marks: f64,
    pub max_marks: f64,
}

impl SubjectMark {
    pub fn same_key(&self, student_id: &str, subject: &str, exam: &str) -> bool {
        self.student_id == student_id && self.subject == subject && self.exam == exam
    }
}
