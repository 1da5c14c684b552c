//! Safety score to risk verdict conversion.
//!
//! The rubric evaluator reports how *compliant* a clause is on a 0-1 scale.
//! This module inverts it into a 0-10 risk score and applies the toxicity
//! cutoff. The cutoff here is the only verdict boundary; whatever pass/fail the
//! evaluator derived from its own threshold is ignored.

/// A clause is toxic when `1 - safety` is strictly greater than this.
pub const TOXIC_RISK_CUTOFF: f64 = 0.4;

/// Risk score and toxicity verdict derived from a safety score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskVerdict {
    /// `(1 - safety) * 10`, rounded to one decimal place.
    pub risk_score: f64,
    pub is_toxic: bool,
}

/// Convert a 0-1 safety score into a [`RiskVerdict`].
///
/// The toxicity test uses the unrounded risk fraction, so a safety of exactly
/// 0.6 (risk 4.0) is not toxic.
pub fn classify(safety_score: f64) -> RiskVerdict {
    let risk = 1.0 - safety_score;
    RiskVerdict {
        risk_score: round_one_decimal(risk * 10.0),
        is_toxic: risk > TOXIC_RISK_CUTOFF,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
