use crate::calc::mean;
use crate::model::{Grade, Student, StudentStatus};
use serde::{Deserialize, Serialize};

/// Search criteria for the roster. `None` and empty text are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterQuery {
    #[serde(default)]
    pub text: String,
    pub grade: Option<Grade>,
    pub status: Option<StudentStatus>,
    /// Match the text against "first last" only, ignoring email.
    #[serde(default)]
    pub name_only: bool,
}

impl RosterQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, student: &Student) -> bool {
        let data = student.data();
        let needle = self.text.to_lowercase();
        let text_ok = needle.is_empty()
            || data.full_name().to_lowercase().contains(&needle)
            || (!self.name_only && data.email.to_lowercase().contains(&needle));
        let grade_ok = self.grade.map(|g| data.grade == g).unwrap_or(true);
        let status_ok = self.status.map(|s| data.status == s).unwrap_or(true);
        text_ok && grade_ok && status_ok
    }
}

/// Students matching every supplied criterion, in input order.
pub fn filter_students(students: &[Student], query: &RosterQuery) -> Vec<Student> {
    students
        .iter()
        .filter(|s| query.matches(s))
        .cloned()
        .collect()
}

pub fn find_student<'a>(students: &'a [Student], id: &str) -> Option<&'a Student> {
    students.iter().find(|s| s.id() == id)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

/// Head count per grade level, lowest grade first. Grades with nobody
/// enrolled are omitted.
pub fn grade_distribution(students: &[Student]) -> Vec<GradeCount> {
    Grade::ALL
        .into_iter()
        .map(|grade| GradeCount {
            grade,
            count: students.iter().filter(|s| s.data().grade == grade).count(),
        })
        .filter(|g| g.count > 0)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: StudentStatus,
    pub count: usize,
}

/// Head count for every status, zero-filled.
pub fn status_counts(students: &[Student]) -> Vec<StatusCount> {
    StudentStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: students.iter().filter(|s| s.data().status == status).count(),
        })
        .collect()
}

pub fn average_gpa(students: &[Student]) -> f64 {
    let gpas: Vec<f64> = students.iter().map(|s| s.data().gpa).collect();
    mean(&gpas)
}

/// Highest GPA first; ties keep roster order.
pub fn top_performers(students: &[Student], n: usize) -> Vec<Student> {
    let mut ranked: Vec<&Student> = students.iter().collect();
    ranked.sort_by(|a, b| b.data().gpa.total_cmp(&a.data().gpa));
    ranked.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_students;

    #[test]
    fn empty_query_returns_everyone_in_order() {
        let roster = sample_students();
        let out = filter_students(&roster, &RosterQuery::default());
        assert_eq!(out, roster);
    }

    #[test]
    fn text_matches_full_name_or_email_case_insensitive() {
        let roster = sample_students();
        let by_name = filter_students(&roster, &RosterQuery::text("EMMA JOH"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id(), "1");

        // "ben.thomas" only appears in the email, not in "Benjamin Thomas".
        let by_email = filter_students(&roster, &RosterQuery::text("ben.thomas@"));
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id(), "8");

        assert!(filter_students(&roster, &RosterQuery::text("nobody")).is_empty());
    }

    #[test]
    fn name_only_ignores_email() {
        let roster = sample_students();
        let q = RosterQuery {
            name_only: true,
            ..RosterQuery::text("ben.thomas")
        };
        assert!(filter_students(&roster, &q).is_empty());
        let q = RosterQuery {
            name_only: true,
            ..RosterQuery::text("school.edu")
        };
        assert!(filter_students(&roster, &q).is_empty());
        let q = RosterQuery {
            name_only: true,
            ..RosterQuery::text("benjamin")
        };
        assert_eq!(filter_students(&roster, &q).len(), 1);
    }

    #[test]
    fn grade_and_status_are_conjunctive() {
        let roster = sample_students();
        let q = RosterQuery {
            text: String::new(),
            grade: Some(Grade::Eleventh),
            status: Some(StudentStatus::Active),
            name_only: false,
        };
        let found = filter_students(&roster, &q);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), "2");

        let q = RosterQuery {
            text: "a".to_string(),
            grade: Some(Grade::Ninth),
            status: None,
            name_only: false,
        };
        let found: Vec<String> = filter_students(&roster, &q)
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(found, vec!["3".to_string(), "7".to_string()]);
    }

    #[test]
    fn breakdowns_cover_sample_roster() {
        let roster = sample_students();
        let grades = grade_distribution(&roster);
        assert_eq!(grades.len(), 4);
        assert!(grades.iter().all(|g| g.count == 2));

        let statuses = status_counts(&roster);
        let active = statuses
            .iter()
            .find(|s| s.status == StudentStatus::Active)
            .map(|s| s.count);
        assert_eq!(active, Some(5));
        assert_eq!(statuses.iter().map(|s| s.count).sum::<usize>(), roster.len());

        assert!((average_gpa(&roster) - 3.5).abs() < 1e-9);
        assert_eq!(average_gpa(&[]), 0.0);
    }

    #[test]
    fn top_performers_rank_by_gpa() {
        let roster = sample_students();
        let top: Vec<String> = top_performers(&roster, 3)
            .iter()
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(top, vec!["7".to_string(), "3".to_string(), "1".to_string()]);
        assert_eq!(top_performers(&roster, 50).len(), roster.len());
    }
}
