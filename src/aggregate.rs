use crate::model::{AttendanceStatus, FinancialRecord, InventoryItem, RecordKind, Student};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Critical,
    Low,
    Normal,
}

pub fn stock_status(quantity: u32, min_quantity: u32) -> StockStatus {
    let q = f64::from(quantity);
    let min = f64::from(min_quantity);
    if q <= min * 0.5 {
        StockStatus::Critical
    } else if q <= min {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total: usize,
    pub normal: usize,
    pub low: usize,
    pub critical: usize,
}

pub fn stock_summary<'a, I>(items: I) -> StockSummary
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let mut out = StockSummary::default();
    for item in items {
        out.total += 1;
        match stock_status(item.quantity, item.min_quantity) {
            StockStatus::Critical => out.critical += 1,
            StockStatus::Low => out.low += 1,
            StockStatus::Normal => out.normal += 1,
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

pub fn finance_summary<'a, I>(records: I) -> FinanceSummary
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut income = 0.0;
    let mut expense = 0.0;
    for r in records {
        match r.kind {
            RecordKind::Income => income += r.amount,
            RecordKind::Expense => expense += r.amount,
        }
    }
    FinanceSummary {
        total_income: income,
        total_expense: expense,
        balance: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
}

/// Amount per category, in order of first appearance.
pub fn category_totals<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut out: Vec<CategoryTotal> = Vec::new();
    for r in records {
        match out.iter_mut().find(|c| c.name == r.category) {
            Some(c) => c.value += r.amount,
            None => out.push(CategoryTotal {
                name: r.category.clone(),
                value: r.amount,
            }),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// Income and expense bucketed by calendar month, oldest first.
pub fn monthly_timeline<'a, I>(records: I) -> Vec<TimelinePoint>
where
    I: IntoIterator<Item = &'a FinancialRecord>,
{
    let mut buckets: BTreeMap<(i32, u32), (f64, f64)> = BTreeMap::new();
    for r in records {
        let e = buckets.entry((r.date.year(), r.date.month())).or_default();
        match r.kind {
            RecordKind::Income => e.0 += r.amount,
            RecordKind::Expense => e.1 += r.amount,
        }
    }
    buckets
        .into_iter()
        .map(|((y, m), (income, expense))| TimelinePoint {
            month: format!("{:04}-{:02}", y, m),
            income,
            expense,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub total: usize,
    pub present_percent: u32,
    pub late_percent: u32,
    pub absent_percent: u32,
}

fn rounded_percent(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Counts each student's most recent attendance record. `total` is the roster
/// size, so students without records lower every percentage.
pub fn latest_attendance_summary<'a, I>(roster: I) -> AttendanceSummary
where
    I: IntoIterator<Item = &'a Student>,
{
    let mut out = AttendanceSummary::default();
    for s in roster {
        out.total += 1;
        match s.latest_attendance().map(|a| a.status) {
            Some(AttendanceStatus::Present) => out.present += 1,
            Some(AttendanceStatus::Absent) => out.absent += 1,
            Some(AttendanceStatus::Late) => out.late += 1,
            None => {}
        }
    }
    out.present_percent = rounded_percent(out.present, out.total);
    out.late_percent = rounded_percent(out.late, out.total);
    out.absent_percent = rounded_percent(out.absent, out.total);
    out
}

/// Share of a student's records marked present, 0-100. No records gives 0.
pub fn attendance_percent(student: &Student) -> f64 {
    let total = student.attendance.len();
    if total == 0 {
        return 0.0;
    }
    let present = student
        .attendance
        .iter()
        .filter(|a| a.status == AttendanceStatus::Present)
        .count();
    present as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub total_students: usize,
    /// A=4 .. D=1, absent for an empty roster.
    pub grade_average: Option<f64>,
    pub attendance_average: Option<f64>,
    pub active_classrooms: usize,
}

pub fn roster_summary(roster: &[&Student], active_classrooms: usize) -> RosterSummary {
    let n = roster.len();
    let (grade_average, attendance_average) = if n == 0 {
        (None, None)
    } else {
        let grades: f64 = roster.iter().map(|s| s.grade.points()).sum();
        let attendance: f64 = roster.iter().map(|s| attendance_percent(s)).sum();
        (Some(grades / n as f64), Some(attendance / n as f64))
    };
    RosterSummary {
        total_students: n,
        grade_average,
        attendance_average,
        active_classrooms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attendance, Grade};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    fn record(kind: RecordKind, amount: f64, category: &str, d: NaiveDate) -> FinancialRecord {
        FinancialRecord {
            id: format!("{:?}-{}", kind, amount),
            school_id: "school1".to_string(),
            kind,
            amount,
            category: category.to_string(),
            description: String::new(),
            date: d,
        }
    }

    fn student(grade: Grade, statuses: &[AttendanceStatus]) -> Student {
        Student {
            id: "s".to_string(),
            name: "S".to_string(),
            email: "s@x".to_string(),
            school_id: "school1".to_string(),
            classroom_id: "classroom1".to_string(),
            grade,
            attendance: statuses
                .iter()
                .enumerate()
                .map(|(i, st)| Attendance {
                    id: format!("a{}", i),
                    student_id: "s".to_string(),
                    date: date(2025, 3, 31 - i as u32),
                    status: *st,
                })
                .collect(),
            profile_picture: None,
        }
    }

    #[test]
    fn stock_status_boundaries() {
        assert_eq!(stock_status(50, 50), StockStatus::Low);
        assert_eq!(stock_status(25, 50), StockStatus::Critical);
        assert_eq!(stock_status(51, 50), StockStatus::Normal);
        assert_eq!(stock_status(26, 50), StockStatus::Low);
        assert_eq!(stock_status(0, 0), StockStatus::Critical);
        // odd minimum: half of 5 is 2.5
        assert_eq!(stock_status(2, 5), StockStatus::Critical);
        assert_eq!(stock_status(3, 5), StockStatus::Low);
    }

    #[test]
    fn finance_summary_for_one_school() {
        let d = date(2025, 3, 10);
        let records = vec![
            record(RecordKind::Income, 25000.0, "Mensalidades", d),
            record(RecordKind::Expense, 15000.0, "Salários", d),
            record(RecordKind::Expense, 2500.0, "Materiais", d),
            record(RecordKind::Income, 5000.0, "Atividades Extras", d),
        ];
        let s = finance_summary(&records);
        assert_eq!(s.total_income, 30000.0);
        assert_eq!(s.total_expense, 17500.0);
        assert_eq!(s.balance, 12500.0);
    }

    #[test]
    fn category_totals_merge_and_keep_first_seen_order() {
        let d = date(2025, 3, 10);
        let records = vec![
            record(RecordKind::Expense, 10.0, "B", d),
            record(RecordKind::Income, 5.0, "A", d),
            record(RecordKind::Expense, 7.0, "B", d),
        ];
        let totals = category_totals(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].name, "B");
        assert_eq!(totals[0].value, 17.0);
        assert_eq!(totals[1].name, "A");
    }

    #[test]
    fn timeline_buckets_by_month() {
        let records = vec![
            record(RecordKind::Income, 100.0, "x", date(2025, 4, 2)),
            record(RecordKind::Expense, 40.0, "x", date(2025, 3, 30)),
            record(RecordKind::Income, 10.0, "x", date(2025, 3, 1)),
        ];
        let t = monthly_timeline(&records);
        assert_eq!(t.len(), 2);
        assert_eq!(t[0].month, "2025-03");
        assert_eq!(t[0].income, 10.0);
        assert_eq!(t[0].expense, 40.0);
        assert_eq!(t[1].month, "2025-04");
    }

    #[test]
    fn latest_attendance_summary_uses_first_record() {
        use AttendanceStatus::*;
        let roster = vec![
            student(Grade::A, &[Present, Absent]),
            student(Grade::B, &[Late, Present]),
            student(Grade::C, &[Present]),
            student(Grade::D, &[]),
        ];
        let s = latest_attendance_summary(&roster);
        assert_eq!((s.present, s.late, s.absent, s.total), (2, 1, 0, 4));
        assert_eq!(s.present_percent, 50);
        assert_eq!(s.late_percent, 25);
        assert_eq!(s.absent_percent, 0);
    }

    #[test]
    fn roster_summary_averages() {
        use AttendanceStatus::*;
        let a = student(Grade::A, &[Present, Present, Late, Absent]);
        let d = student(Grade::D, &[Present, Absent]);
        assert_eq!(attendance_percent(&a), 50.0);
        let s = roster_summary(&[&a, &d], 2);
        assert_eq!(s.total_students, 2);
        assert_eq!(s.grade_average, Some(2.5));
        assert_eq!(s.attendance_average, Some(50.0));

        let empty = roster_summary(&[], 0);
        assert_eq!(empty.grade_average, None);
        assert_eq!(attendance_percent(&student(Grade::B, &[])), 0.0);
    }

    #[test]
    fn stock_summary_counts() {
        let mk = |q: u32, m: u32| InventoryItem {
            id: format!("{}-{}", q, m),
            name: "x".to_string(),
            category: "c".to_string(),
            quantity: q,
            school_id: "school1".to_string(),
            min_quantity: m,
            price: 1.0,
        };
        let items = vec![mk(10, 50), mk(50, 50), mk(100, 50)];
        assert_eq!(
            stock_summary(&items),
            StockSummary {
                total: 3,
                normal: 1,
                low: 1,
                critical: 1
            }
        );
    }
}
