use crate::calc::{Grade, GradeRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Subject catalog used by the randomizer; capped there so synthetic data
/// never repeats a subject.
pub const SUBJECT_CATALOG: [&str; 10] = [
    "Математика",
    "Физика",
    "Химия",
    "Биология",
    "Тарих",
    "Ағылшын тілі",
    "Информатика",
    "География",
    "Өнер",
    "Қазақ тілі",
];

pub const PERIOD_CHOICES: [&str; 6] = ["Q1", "Q2", "Q3", "Q4", "S1", "S2"];
pub const LETTER_CHOICES: [&str; 5] = ["A", "B", "C", "D", "F"];
pub const CREDIT_CHOICES: [f64; 3] = [2.0, 3.0, 4.0];

/// Non-fatal, per-action error. `code` goes on the wire unchanged.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub code: &'static str,
    pub message: String,
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: "validation_error",
            message: message.into(),
        }
    }

    pub fn invalid_grade(message: impl Into<String>) -> Self {
        Self {
            code: "invalid_grade",
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub name: String,
    pub class_name: String,
    pub student_id: String,
    pub school: String,
    pub academic_year: String,
}

/// All mutable state of one session. Owned by the request loop; every
/// operation receives it explicitly instead of touching globals.
pub struct SessionState {
    pub records: Vec<GradeRecord>,
    pub student: StudentInfo,
}

impl SessionState {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            student: StudentInfo {
                name: String::new(),
                class_name: String::new(),
                student_id: String::new(),
                school: String::new(),
                academic_year: String::new(),
            },
        }
    }

    /// Demo data a fresh session boots with, so the first summary the
    /// client asks for shows something meaningful.
    pub fn seeded() -> Self {
        let rec = |subject: &str, credits: f64, grade: Grade, period: &str| GradeRecord {
            subject: subject.to_string(),
            credits,
            grade,
            period: period.to_string(),
        };
        Self {
            records: vec![
                rec("Математика", 4.0, Grade::Letter("A".into()), "Q1"),
                rec("Физика", 3.0, Grade::Numeric(86.0), "Q1"),
                rec("Ағылшын тілі", 2.0, Grade::Letter("B".into()), "Q2"),
                rec("Тарих", 2.0, Grade::Numeric(92.0), "Q2"),
                rec("Информатика", 3.0, Grade::Letter("A".into()), "S1"),
                rec("Биология", 3.0, Grade::Numeric(74.0), "S2"),
            ],
            student: StudentInfo {
                name: "Аружан Сейіт".to_string(),
                class_name: "9A".to_string(),
                student_id: "ST-2026-014".to_string(),
                school: "№12 мектеп-лицей".to_string(),
                academic_year: "2025-2026".to_string(),
            },
        }
    }

    /// Append one record after checking its invariants. On error the store
    /// is left untouched and the caller reports the code to the UI.
    pub fn add(&mut self, record: GradeRecord) -> Result<(), StoreError> {
        let subject = record.subject.trim().to_string();
        if subject.is_empty() {
            return Err(StoreError::validation("subject must not be blank"));
        }
        if !record.credits.is_finite() || record.credits < 0.0 {
            return Err(StoreError::validation(
                "credits must be a non-negative number",
            ));
        }
        if let Grade::Numeric(n) = record.grade {
            // Out-of-range numeric grades are rejected, not clamped.
            if !(0.0..=100.0).contains(&n) {
                return Err(StoreError::validation(
                    "numeric grade must be within 0..=100",
                ));
            }
        }
        self.records.push(GradeRecord { subject, ..record });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Replace the record set with `count` synthetic records (capped at the
    /// subject catalog size). Demo/test convenience; shape is guaranteed,
    /// exact values are not.
    pub fn randomize(&mut self, count: usize) -> usize {
        let mut rng = rand::thread_rng();
        let n = count.min(SUBJECT_CATALOG.len());

        let mut records = Vec::with_capacity(n);
        for subject in SUBJECT_CATALOG.choose_multiple(&mut rng, n) {
            let grade = if rng.gen_bool(0.5) {
                Grade::Letter(
                    LETTER_CHOICES
                        .choose(&mut rng)
                        .copied()
                        .unwrap_or("B")
                        .to_string(),
                )
            } else {
                Grade::Numeric(rng.gen_range(55..=100) as f64)
            };
            records.push(GradeRecord {
                subject: subject.to_string(),
                credits: CREDIT_CHOICES.choose(&mut rng).copied().unwrap_or(3.0),
                grade,
                period: PERIOD_CHOICES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("Q1")
                    .to_string(),
            });
        }
        self.records = records;
        n
    }
}

/// Build a `GradeRecord` from request params. Type errors on the grade value
/// surface as `invalid_grade`; everything else is `validation_error`.
pub fn record_from_params(params: &serde_json::Value) -> Result<GradeRecord, StoreError> {
    let subject = params
        .get("subject")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    let credits = match params.get("credits") {
        Some(v) if v.is_number() => v.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| StoreError::validation("credits must be a number"))?,
        _ => return Err(StoreError::validation("missing credits")),
    };

    let score_type = params
        .get("scoreType")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_ascii_lowercase())
        .ok_or_else(|| StoreError::validation("missing scoreType"))?;

    let raw_grade = params
        .get("grade")
        .ok_or_else(|| StoreError::validation("missing grade"))?;

    let grade = match score_type.as_str() {
        "letter" => match raw_grade.as_str() {
            Some(s) => Grade::Letter(s.to_string()),
            None => return Err(StoreError::validation("letter grade must be a string")),
        },
        "numeric" => match raw_grade {
            v if v.is_number() => Grade::Numeric(v.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => Grade::Numeric(
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| StoreError::invalid_grade(format!("not a number: {:?}", s)))?,
            ),
            _ => return Err(StoreError::invalid_grade("grade must be a number")),
        },
        other => {
            return Err(StoreError::validation(format!(
                "scoreType must be letter or numeric, got {:?}",
                other
            )))
        }
    };

    let period = params
        .get("period")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    Ok(GradeRecord {
        subject,
        credits,
        grade,
        period,
    })
}
