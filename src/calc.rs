use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct CalcError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CalcError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CalcError {}

/// Half-up rounding to `decimals` places: `Int(x * 10^d + 0.5) / 10^d`.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals.min(9) as i32);
    ((x * scale) + 0.5).floor() / scale
}

pub fn percent(achieved: f64, out_of: f64) -> f64 {
    if out_of > 0.0 {
        100.0 * achieved / out_of
    } else {
        0.0
    }
}

/// `part / whole * 100`, or `None` when there is nothing to divide by.
pub fn ratio_percent(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(100.0 * (part as f64) / (whole as f64))
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / (values.len() as f64)
}
