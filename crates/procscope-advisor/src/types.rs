//! Recommendation types and scoring.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Scoring Weights
// ============================================================================

/// Weight of impact in the score.
pub const IMPACT_WEIGHT: f64 = 0.4;
/// Weight of return on investment in the score.
pub const ROI_WEIGHT: f64 = 0.3;
/// Weight of effort in the score (a cost).
pub const EFFORT_WEIGHT: f64 = -0.2;
/// Weight of confidence in the score.
pub const CONFIDENCE_WEIGHT: f64 = 0.1;

/// Scores above this are high priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 0.7;
/// Scores above this are medium priority.
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 0.4;

// ============================================================================
// Classification
// ============================================================================

/// Area a recommendation improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Throughput and cycle time.
    Performance,
    /// Fewer or cheaper steps.
    CostReduction,
    /// Controls and data protection.
    Compliance,
    /// Smaller, easier to read models.
    Simplicity,
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecommendationCategory::Performance => "performance",
            RecommendationCategory::CostReduction => "cost-reduction",
            RecommendationCategory::Compliance => "compliance",
            RecommendationCategory::Simplicity => "simplicity",
        };
        f.write_str(s)
    }
}

/// Priority bucket derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Score at most 0.4.
    Low,
    /// Score above 0.4.
    Medium,
    /// Score above 0.7.
    High,
}

impl Priority {
    /// Bucket a score.
    pub fn from_score(score: f64) -> Self {
        if score > HIGH_PRIORITY_THRESHOLD {
            Priority::High
        } else if score > MEDIUM_PRIORITY_THRESHOLD {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

// ============================================================================
// Candidates and Recommendations
// ============================================================================

/// An unscored recommendation produced by a rule.
///
/// Missing factors count as zero in the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Id of the rule that produced it.
    pub rule_id: String,
    /// Area it improves.
    pub category: RecommendationCategory,
    /// Short title.
    pub title: String,
    /// Finding that triggered the rule.
    pub description: String,
    /// Suggested steps.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Expected impact (0-1).
    #[serde(default)]
    pub impact: Option<f64>,
    /// Expected return on investment (0-1).
    #[serde(default)]
    pub roi: Option<f64>,
    /// Implementation effort (0-1, read as days for the timeline).
    #[serde(default)]
    pub effort: Option<f64>,
    /// Confidence in the finding (0-1).
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Candidate {
    /// Create a candidate with no factors set.
    pub fn new(
        rule_id: impl Into<String>,
        category: RecommendationCategory,
        title: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category,
            title: title.into(),
            description: String::new(),
            actions: Vec::new(),
            impact: None,
            roi: None,
            effort: None,
            confidence: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the suggested steps.
    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Set impact.
    pub fn with_impact(mut self, impact: f64) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Set return on investment.
    pub fn with_roi(mut self, roi: f64) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Set effort.
    pub fn with_effort(mut self, effort: f64) -> Self {
        self.effort = Some(effort);
        self
    }

    /// Set confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Weighted score clamped to `[0, 1]`.
    pub fn score(&self) -> f64 {
        let factor = |v: Option<f64>| v.unwrap_or(0.0);
        let raw = factor(self.impact) * IMPACT_WEIGHT
            + factor(self.roi) * ROI_WEIGHT
            + factor(self.effort) * EFFORT_WEIGHT
            + factor(self.confidence) * CONFIDENCE_WEIGHT;
        raw.clamp(0.0, 1.0)
    }

    /// Score the candidate.
    pub fn into_recommendation(self) -> Recommendation {
        let score = self.score();
        let effort = self.effort.unwrap_or(0.0);
        Recommendation {
            rule_id: self.rule_id,
            category: self.category,
            title: self.title,
            description: self.description,
            actions: self.actions,
            impact: self.impact.unwrap_or(0.0),
            roi: self.roi.unwrap_or(0.0),
            effort,
            confidence: self.confidence.unwrap_or(0.0),
            score,
            priority: Priority::from_score(score),
            timeline_days: effort,
        }
    }
}

/// A scored recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Id of the rule that produced it.
    pub rule_id: String,
    /// Area it improves.
    pub category: RecommendationCategory,
    /// Short title.
    pub title: String,
    /// Finding that triggered the rule.
    pub description: String,
    /// Suggested steps.
    pub actions: Vec<String>,
    /// Expected impact.
    pub impact: f64,
    /// Expected return on investment.
    pub roi: f64,
    /// Implementation effort.
    pub effort: f64,
    /// Confidence in the finding.
    pub confidence: f64,
    /// Weighted score in `[0, 1]`.
    pub score: f64,
    /// Priority bucket.
    pub priority: Priority,
    /// Effort read as days.
    pub timeline_days: f64,
}
