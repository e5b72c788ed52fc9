use crate::calc::{mean, percent};
use crate::model::SubjectMark;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const PASS_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band lower bounds are inclusive.
pub fn letter_grade(pct: f64) -> LetterGrade {
    if pct >= 90.0 {
        LetterGrade::APlus
    } else if pct >= 80.0 {
        LetterGrade::A
    } else if pct >= 70.0 {
        LetterGrade::B
    } else if pct >= 60.0 {
        LetterGrade::C
    } else if pct >= PASS_PERCENT {
        LetterGrade::D
    } else {
        LetterGrade::F
    }
}

pub fn percentage(mark: &SubjectMark) -> f64 {
    percent(mark.marks, mark.max_marks)
}

/// Mean percentage over the student's records. 0 when there are none.
pub fn student_average(marks: &[SubjectMark], student_id: &str) -> f64 {
    let pcts: Vec<f64> = marks
        .iter()
        .filter(|m| m.student_id == student_id)
        .map(percentage)
        .collect();
    mean(&pcts)
}

/// Mean percentage over every student's records for `subject`. 0 when
/// there are none.
pub fn subject_average(marks: &[SubjectMark], subject: &str) -> f64 {
    let pcts: Vec<f64> = marks
        .iter()
        .filter(|m| m.subject == subject)
        .map(percentage)
        .collect();
    mean(&pcts)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAverage {
    pub subject: String,
    pub average: f64,
    pub count: usize,
}

/// Per-subject averages, best subject first.
pub fn subject_averages(marks: &[SubjectMark]) -> Vec<SubjectAverage> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for m in marks {
        let entry = totals.entry(m.subject.as_str()).or_insert((0.0, 0));
        entry.0 += percentage(m);
        entry.1 += 1;
    }
    let mut out: Vec<SubjectAverage> = totals
        .into_iter()
        .map(|(subject, (sum, count))| SubjectAverage {
            subject: subject.to_string(),
            average: sum / (count as f64),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.average.total_cmp(&a.average));
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkStats {
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub pass_rate: f64,
    pub count: usize,
}

/// Statistics over every record's percentage. All zero when empty.
pub fn overall_stats(marks: &[SubjectMark]) -> MarkStats {
    if marks.is_empty() {
        return MarkStats::default();
    }
    let pcts: Vec<f64> = marks.iter().map(percentage).collect();
    let highest = pcts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = pcts.iter().copied().fold(f64::INFINITY, f64::min);
    let passed = pcts.iter().filter(|p| **p >= PASS_PERCENT).count();
    MarkStats {
        average: mean(&pcts),
        highest,
        lowest,
        pass_rate: 100.0 * (passed as f64) / (pcts.len() as f64),
        count: pcts.len(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkQuery {
    pub student_id: Option<String>,
    pub subject: Option<String>,
    pub exam: Option<String>,
}

pub fn filter_marks(marks: &[SubjectMark], query: &MarkQuery) -> Vec<SubjectMark> {
    marks
        .iter()
        .filter(|m| {
            let student_ok = query
                .student_id
                .as_deref()
                .map(|id| m.student_id == id)
                .unwrap_or(true);
            let subject_ok = query
                .subject
                .as_deref()
                .map(|s| m.subject == s)
                .unwrap_or(true);
            let exam_ok = query.exam.as_deref().map(|e| m.exam == e).unwrap_or(true);
            student_ok && subject_ok && exam_ok
        })
        .cloned()
        .collect()
}

fn clamp_marks(value: f64, max_marks: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max_marks)
}

/// Insert-or-replace keyed on (student, subject, exam). Achieved marks are
/// clamped into `[0, max_marks]`; a negative max is treated as 0.
pub fn upsert_mark(marks: &[SubjectMark], record: SubjectMark) -> Vec<SubjectMark> {
    let max_marks = if record.max_marks.is_nan() {
        0.0
    } else {
        record.max_marks.max(0.0)
    };
    let record = SubjectMark {
        marks: clamp_marks(record.marks, max_marks),
        max_marks,
        ..record
    };

    let mut next: Vec<SubjectMark> = Vec::with_capacity(marks.len() + 1);
    let mut placed = false;
    for m in marks {
        if m.same_key(&record.student_id, &record.subject, &record.exam) {
            if !placed {
                next.push(record.clone());
                placed = true;
            }
            continue;
        }
        next.push(m.clone());
    }
    if !placed {
        next.push(record);
    }
    next
}

/// Changes the achieved marks of an existing record, clamped to that
/// record's own maximum. Unknown keys return the input unchanged.
pub fn set_mark_value(
    marks: &[SubjectMark],
    student_id: &str,
    subject: &str,
    exam: &str,
    value: f64,
) -> Vec<SubjectMark> {
    marks
        .iter()
        .map(|m| {
            if m.same_key(student_id, subject, exam) {
                SubjectMark {
                    marks: clamp_marks(value, m.max_marks.max(0.0)),
                    ..m.clone()
                }
            } else {
                m.clone()
            }
        })
        .collect()
}
