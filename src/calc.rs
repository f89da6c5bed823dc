use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw grade value as entered in the UI. Letter grades stay as text so that
/// unrecognized letters can degrade to 0 points instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scoreType", content = "grade", rename_all = "lowercase")]
pub enum Grade {
    Letter(String),
    Numeric(f64),
}

impl Grade {
    pub fn display(&self) -> String {
        match self {
            Grade::Letter(s) => s.trim().to_uppercase(),
            Grade::Numeric(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub subject: String,
    pub credits: f64,
    #[serde(flatten)]
    pub grade: Grade,
    pub period: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    Quarter,
    Semester,
    Other,
}

/// Convert a raw grade to the 0-4 point scale.
///
/// Letter grades map through the fixed A..F table, case-insensitively; any
/// letter outside the table counts as 0.0 (F-equivalent) by policy. Numeric
/// grades use threshold bands inclusive on the lower bound.
pub fn score_to_points(grade: &Grade) -> f64 {
    match grade {
        Grade::Letter(raw) => match raw.trim().to_uppercase().as_str() {
            "A" => 4.0,
            "B" => 3.0,
            "C" => 2.0,
            "D" => 1.0,
            "F" => 0.0,
            // Letters outside the table count as F-equivalent.
            _ => 0.0,
        },
        Grade::Numeric(n) => {
            if *n >= 90.0 {
                4.0
            } else if *n >= 80.0 {
                3.0
            } else if *n >= 70.0 {
                2.0
            } else if *n >= 60.0 {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Classify a period label. Total: malformed input lands in `Other` instead
/// of erroring, and an empty label becomes `(Other, "N/A")`.
pub fn parse_period(raw: &str) -> (PeriodType, String) {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return (PeriodType::Other, "N/A".to_string());
    }
    if value.starts_with('Q') {
        (PeriodType::Quarter, value)
    } else if value.starts_with('S') {
        (PeriodType::Semester, value)
    } else {
        (PeriodType::Other, value)
    }
}

/// Chronological display order: Q1..Q4, then S1, S2, then everything else.
pub fn period_sort_key(period_name: &str) -> i64 {
    match period_name {
        "Q1" => 1,
        "Q2" => 2,
        "Q3" => 3,
        "Q4" => 4,
        "S1" => 5,
        "S2" => 6,
        _ => 99,
    }
}

fn subject_icon(subject: &str) -> &'static str {
    match subject {
        "Математика" => "📐",
        "Физика" => "⚛️",
        "Химия" => "🧪",
        "Биология" => "🧬",
        "Тарих" => "🏛️",
        "Ағылшын тілі" => "📖",
        "Информатика" => "💻",
        "География" => "🌍",
        "Өнер" => "🎨",
        "Қазақ тілі" => "✍️",
        _ => "📘",
    }
}

pub fn subject_display(subject: &str) -> String {
    format!("{} {}", subject_icon(subject.trim()), subject.trim())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub subject: String,
    pub subject_display: String,
    pub credits: f64,
    #[serde(flatten)]
    pub grade: Grade,
    pub period: String,
    pub period_type: PeriodType,
    pub period_name: String,
    pub gpa_points: f64,
    pub weighted_points: f64,
}

/// Per-record pure mapping from raw records to the normalized table.
/// Recomputed on every read; normalized rows are never stored.
pub fn normalize_records(records: &[GradeRecord]) -> Vec<NormalizedRecord> {
    records
        .iter()
        .map(|r| {
            let credits = if r.credits.is_finite() && r.credits >= 0.0 {
                r.credits
            } else {
                0.0
            };
            let gpa_points = score_to_points(&r.grade);
            let (period_type, period_name) = parse_period(&r.period);
            NormalizedRecord {
                subject: r.subject.clone(),
                subject_display: subject_display(&r.subject),
                credits,
                grade: r.grade.clone(),
                period: r.period.clone(),
                period_type,
                period_name,
                gpa_points,
                weighted_points: gpa_points * credits,
            }
        })
        .collect()
}

/// Credit-weighted mean over the whole table. Zero total credits yields 0.0
/// by policy rather than dividing by zero.
pub fn compute_overall_gpa(rows: &[NormalizedRecord]) -> f64 {
    let total_credits: f64 = rows.iter().map(|r| r.credits).sum();
    if total_credits <= 0.0 {
        return 0.0;
    }
    let total_weighted: f64 = rows.iter().map(|r| r.weighted_points).sum();
    total_weighted / total_credits
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub period_type: PeriodType,
    pub period_name: String,
    pub total_weighted_points: f64,
    pub total_credits: f64,
    pub gpa: f64,
}

/// Group the normalized table by (period type, period name) and compute the
/// per-group GPA with the same zero-credit guard, sorted chronologically.
pub fn compute_period_summaries(rows: &[NormalizedRecord]) -> Vec<PeriodSummary> {
    let mut totals: HashMap<(PeriodType, String), (f64, f64)> = HashMap::new();
    for r in rows {
        let entry = totals
            .entry((r.period_type, r.period_name.clone()))
            .or_insert((0.0, 0.0));
        entry.0 += r.weighted_points;
        entry.1 += r.credits;
    }

    let mut out: Vec<PeriodSummary> = totals
        .into_iter()
        .map(
            |((period_type, period_name), (total_weighted_points, total_credits))| {
                let gpa = if total_credits > 0.0 {
                    total_weighted_points / total_credits
                } else {
                    0.0
                };
                PeriodSummary {
                    period_type,
                    period_name,
                    total_weighted_points,
                    total_credits,
                    gpa,
                }
            },
        )
        .collect();
    // Unrecognized names share sort key 99; tie-break by name for stable output.
    out.sort_by(|a, b| {
        period_sort_key(&a.period_name)
            .cmp(&period_sort_key(&b.period_name))
            .then_with(|| a.period_name.cmp(&b.period_name))
    });
    out
}
