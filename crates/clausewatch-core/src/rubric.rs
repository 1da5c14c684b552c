//! Scoring rubric anchoring the model's 0-10 judgment.
//!
//! Higher scores mean safer clauses. The tiers are fixed for the lifetime of a
//! detector and are rendered verbatim into the evaluation prompt.

use serde::{Deserialize, Serialize};

/// One score band and what a clause in that band looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricTier {
    pub lo: u8,
    pub hi: u8,
    pub expected_outcome: String,
}

impl RubricTier {
    pub fn new(lo: u8, hi: u8, expected_outcome: impl Into<String>) -> Self {
        Self {
            lo,
            hi,
            expected_outcome: expected_outcome.into(),
        }
    }

    pub fn contains(&self, score: u8) -> bool {
        (self.lo..=self.hi).contains(&score)
    }
}

/// Ordered list of score tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    tiers: Vec<RubricTier>,
}

impl Rubric {
    pub fn new(tiers: Vec<RubricTier>) -> Self {
        Self { tiers }
    }

    /// The four-tier employment contract safety rubric.
    pub fn contract_safety() -> Self {
        Self::new(vec![
            RubricTier::new(
                0,
                2,
                "법적 효력이 없거나 근로자에게 심각하게 불리한 독소조항.",
            ),
            RubricTier::new(
                3,
                5,
                "다툼의 여지가 있거나 근로자에게 불리하게 해석될 수 있는 조항.",
            ),
            RubricTier::new(6, 7, "대체로 공정하지만 일부 표현이 모호한 조항."),
            RubricTier::new(8, 10, "관련 법령과 판례를 완벽히 준수하는 안전한 조항."),
        ])
    }

    pub fn tiers(&self) -> &[RubricTier] {
        &self.tiers
    }

    /// The tier a raw 0-10 score falls into, if any.
    pub fn tier_for(&self, score: u8) -> Option<&RubricTier> {
        self.tiers.iter().find(|t| t.contains(score))
    }

    /// One line per tier, e.g. `"0-2: ..."`.
    pub fn render(&self) -> String {
        self.tiers
            .iter()
            .map(|t| format!("{}-{}: {}", t.lo, t.hi, t.expected_outcome))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_safety_covers_zero_to_ten() {
        let rubric = Rubric::contract_safety();
        assert_eq!(rubric.tiers().len(), 4);
        for score in 0..=10u8 {
            assert!(rubric.tier_for(score).is_some(), "no tier for {score}");
        }
        assert!(rubric.tier_for(11).is_none());
    }

    #[test]
    fn tiers_are_ordered_and_disjoint() {
        let rubric = Rubric::contract_safety();
        for pair in rubric.tiers().windows(2) {
            assert_eq!(pair[0].hi + 1, pair[1].lo);
        }
    }

    #[test]
    fn render_lists_ranges() {
        let rendered = Rubric::contract_safety().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("0-2: "));
        assert!(lines[3].starts_with("8-10: "));
    }
}
