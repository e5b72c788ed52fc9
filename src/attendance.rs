use crate::calc::ratio_percent;
use crate::model::{AttendanceRecord, AttendanceStatus, Student};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Status per student on one day.
pub fn daily_snapshot(
    attendance: &[AttendanceRecord],
    date: NaiveDate,
) -> BTreeMap<String, AttendanceStatus> {
    let mut out = BTreeMap::new();
    for a in attendance.iter().filter(|a| a.date == date) {
        out.insert(a.student_id.clone(), a.status);
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

impl DateStats {
    fn add(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::Excused => self.excused += 1,
        }
    }

    pub fn attended(&self) -> usize {
        self.present + self.late
    }

    /// `(present + late) / total * 100`, `None` for a day with no records.
    pub fn rate(&self) -> Option<f64> {
        ratio_percent(self.attended(), self.total)
    }
}

pub fn date_stats(attendance: &[AttendanceRecord], date: NaiveDate) -> DateStats {
    let mut stats = DateStats::default();
    for a in attendance.iter().filter(|a| a.date == date) {
        stats.add(a.status);
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub total: usize,
    pub attended: usize,
    /// `None` means the student has no records at all, which is not 0%.
    pub rate: Option<f64>,
}

pub fn student_summary(attendance: &[AttendanceRecord], student_id: &str) -> StudentAttendance {
    let mut total = 0;
    let mut attended = 0;
    for a in attendance.iter().filter(|a| a.student_id == student_id) {
        total += 1;
        if a.status.counts_as_attended() {
            attended += 1;
        }
    }
    StudentAttendance {
        total,
        attended,
        rate: ratio_percent(attended, total),
    }
}

/// Unrounded attendance percentage for one student, `None` without records.
pub fn student_rate(attendance: &[AttendanceRecord], student_id: &str) -> Option<f64> {
    student_summary(attendance, student_id).rate
}

/// Attendance percentage across every record, `None` when empty.
pub fn overall_rate(attendance: &[AttendanceRecord]) -> Option<f64> {
    let attended = attendance
        .iter()
        .filter(|a| a.status.counts_as_attended())
        .count();
    ratio_percent(attended, attendance.len())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub rate: f64,
    pub present: usize,
    pub total: usize,
}

/// One point per recorded date, oldest first, limited to the `last_n` most
/// recent dates that have any records.
pub fn trend(attendance: &[AttendanceRecord], last_n: usize) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, DateStats> = BTreeMap::new();
    for a in attendance {
        by_date.entry(a.date).or_default().add(a.status);
    }
    let skip = by_date.len().saturating_sub(last_n);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, stats)| TrendPoint {
            date,
            rate: stats.rate().unwrap_or(0.0),
            present: stats.attended(),
            total: stats.total,
        })
        .collect()
}

/// Replaces the whole day: every record on `date` is dropped and one record
/// per entry of `status_by_student` is appended.
pub fn mark_attendance(
    attendance: &[AttendanceRecord],
    date: NaiveDate,
    status_by_student: &BTreeMap<String, AttendanceStatus>,
) -> Vec<AttendanceRecord> {
    let mut next: Vec<AttendanceRecord> = attendance
        .iter()
        .filter(|a| a.date != date)
        .cloned()
        .collect();
    next.extend(
        status_by_student
            .iter()
            .map(|(student_id, status)| AttendanceRecord {
                student_id: student_id.clone(),
                date,
                status: *status,
            }),
    );
    next
}

/// Insert-or-replace keyed on (student, date). A replaced record keeps its
/// position; duplicates left behind by earlier data are collapsed.
pub fn upsert_attendance(
    attendance: &[AttendanceRecord],
    record: AttendanceRecord,
) -> Vec<AttendanceRecord> {
    let mut next: Vec<AttendanceRecord> = Vec::with_capacity(attendance.len() + 1);
    let mut placed = false;
    for a in attendance {
        if a.student_id == record.student_id && a.date == record.date {
            if !placed {
                next.push(record.clone());
                placed = true;
            }
            continue;
        }
        next.push(a.clone());
    }
    if !placed {
        next.push(record);
    }
    next
}

/// The same status for every given student, ready for [`mark_attendance`].
pub fn mark_all_statuses(
    students: &[Student],
    status: AttendanceStatus,
) -> BTreeMap<String, AttendanceStatus> {
    students
        .iter()
        .map(|s| (s.id().to_string(), status))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttendanceStatus::{Absent, Excused, Late, Present};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("date")
    }

    fn rec(student: &str, d: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            student_id: student.to_string(),
            date: day(d),
            status,
        }
    }

    #[test]
    fn student_rate_counts_late_as_attended() {
        let att = vec![
            rec("1", 1, Present),
            rec("1", 2, Present),
            rec("1", 3, Present),
            rec("1", 6, Absent),
            rec("2", 1, Late),
            rec("2", 2, Excused),
        ];
        assert_eq!(student_rate(&att, "1"), Some(75.0));
        assert_eq!(student_rate(&att, "2"), Some(50.0));
    }

    #[test]
    fn no_records_is_not_zero_percent() {
        let att = vec![rec("1", 1, Absent)];
        assert_eq!(student_rate(&att, "1"), Some(0.0));
        assert_eq!(student_rate(&att, "9"), None);
        let summary = student_summary(&att, "9");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.rate, None);
        assert_eq!(overall_rate(&[]), None);
    }

    #[test]
    fn date_stats_partition_the_day() {
        let att = vec![
            rec("1", 1, Present),
            rec("2", 1, Late),
            rec("3", 1, Absent),
            rec("4", 1, Excused),
            rec("5", 1, Present),
            rec("1", 2, Absent),
        ];
        let s = date_stats(&att, day(1));
        assert_eq!(
            s,
            DateStats {
                total: 5,
                present: 2,
                absent: 1,
                late: 1,
                excused: 1
            }
        );
        assert_eq!(s.rate(), Some(60.0));
        assert_eq!(date_stats(&att, day(9)), DateStats::default());
    }

    #[test]
    fn snapshot_is_last_write_wins() {
        let att = vec![rec("1", 1, Present), rec("2", 1, Late), rec("1", 1, Absent)];
        let snap = daily_snapshot(&att, day(1));
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("1"), Some(&Absent));
        assert_eq!(snap.get("2"), Some(&Late));
        assert!(daily_snapshot(&att, day(2)).is_empty());
    }

    #[test]
    fn trend_uses_recorded_dates_only() {
        let att = vec![
            rec("1", 10, Present),
            rec("1", 1, Present),
            rec("2", 1, Absent),
            rec("1", 3, Late),
            rec("1", 7, Absent),
        ];
        let points = trend(&att, 3);
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(3), day(7), day(10)]);
        assert_eq!(points[0].rate, 100.0);
        assert_eq!(points[1].rate, 0.0);
        assert_eq!(points[1].total, 1);

        let all = trend(&att, 50);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].date, day(1));
        assert_eq!(all[0].rate, 50.0);
        assert_eq!(all[0].present, 1);
        assert!(trend(&att, 0).is_empty());
    }

    #[test]
    fn mark_attendance_replaces_whole_day() {
        let att = vec![rec("1", 1, Present), rec("2", 1, Present), rec("1", 2, Late)];
        let mut statuses = BTreeMap::new();
        statuses.insert("2".to_string(), Absent);
        statuses.insert("3".to_string(), Present);

        let next = mark_attendance(&att, day(1), &statuses);
        let snap = daily_snapshot(&next, day(1));
        assert_eq!(snap, statuses);
        assert_eq!(daily_snapshot(&next, day(2)).get("1"), Some(&Late));
        assert_eq!(next.len(), 3);

        assert_eq!(mark_attendance(&next, day(1), &statuses), next);
        // Input is untouched.
        assert_eq!(att.len(), 3);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let att = vec![rec("1", 1, Present), rec("2", 1, Present)];
        let next = upsert_attendance(&att, rec("1", 1, Excused));
        assert_eq!(next, vec![rec("1", 1, Excused), rec("2", 1, Present)]);
        let next = upsert_attendance(&next, rec("1", 2, Late));
        assert_eq!(next.len(), 3);
        assert_eq!(next[2], rec("1", 2, Late));
    }
}
