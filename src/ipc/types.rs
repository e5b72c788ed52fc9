use crate::config::RosterdConfig;
use crate::model::{AttendanceRecord, Student, SubjectMark};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// The caller-side copy of every collection. Handlers pass these into the
/// engine and swap in whatever a mutation returns.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: RosterdConfig,
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub marks: Vec<SubjectMark>,
}

impl AppState {
    pub fn new(config: RosterdConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}
