use crate::attendance::{date_stats, overall_rate, trend, DateStats, TrendPoint};
use crate::marks::{overall_stats, subject_averages, SubjectAverage};
use crate::model::{AttendanceRecord, Student, StudentStatus, SubjectMark};
use crate::roster::{
    average_gpa, grade_distribution, status_counts, top_performers, GradeCount, StatusCount,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub trend_days: usize,
    pub top_performers: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            trend_days: 7,
            top_performers: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub date: NaiveDate,
    pub total_students: usize,
    pub active_students: usize,
    pub average_gpa: f64,
    pub today: DateStats,
    pub present_today: usize,
    pub absent_today: usize,
    pub attendance_rate: Option<f64>,
    pub average_mark: f64,
    pub grade_distribution: Vec<GradeCount>,
    pub status_counts: Vec<StatusCount>,
    pub top_performers: Vec<Student>,
    pub subject_averages: Vec<SubjectAverage>,
    pub trend: Vec<TrendPoint>,
}

pub fn dashboard_overview(
    students: &[Student],
    attendance: &[AttendanceRecord],
    marks: &[SubjectMark],
    today: NaiveDate,
    options: DashboardOptions,
) -> DashboardOverview {
    let day = date_stats(attendance, today);
    DashboardOverview {
        date: today,
        total_students: students.len(),
        active_students: students
            .iter()
            .filter(|s| s.data().status == StudentStatus::Active)
            .count(),
        average_gpa: average_gpa(students),
        today: day,
        present_today: day.attended(),
        absent_today: day.absent,
        attendance_rate: overall_rate(attendance),
        average_mark: overall_stats(marks).average,
        grade_distribution: grade_distribution(students),
        status_counts: status_counts(students),
        top_performers: top_performers(students, options.top_performers),
        subject_averages: subject_averages(marks),
        trend: trend(attendance, options.trend_days),
    }
}
