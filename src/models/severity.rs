use serde::{Deserialize, Serialize};

use crate::errors::CoastError;

/// Severity tier of a hazard report, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Color and heat weight derived from a severity label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeverityStyle {
    pub color: &'static str,
    pub weight: f64,
}

pub const LOW_STYLE: SeverityStyle = SeverityStyle { color: "#34f5c5", weight: 0.3 };
pub const MEDIUM_STYLE: SeverityStyle = SeverityStyle { color: "#1dcdfe", weight: 0.6 };
pub const HIGH_STYLE: SeverityStyle = SeverityStyle { color: "#e74c3c", weight: 1.0 };

/// Style for any label outside `{low, medium, high}`: neutral gray, half weight.
pub const FALLBACK_STYLE: SeverityStyle = SeverityStyle { color: "#95a5a6", weight: 0.5 };

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Strict parse used at the store boundary. Unknown labels are rejected here;
    /// only the style lookup falls back.
    pub fn parse(label: &str) -> Result<Self, CoastError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoastError::UnknownSeverity(other.to_string())),
        }
    }

    pub fn style(&self) -> SeverityStyle {
        match self {
            Self::Low => LOW_STYLE,
            Self::Medium => MEDIUM_STYLE,
            Self::High => HIGH_STYLE,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = CoastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Total style lookup over arbitrary labels. Labels are matched exactly
/// (lower-case), anything else gets [`FALLBACK_STYLE`].
pub fn style_of(label: &str) -> SeverityStyle {
    match label {
        "low" => LOW_STYLE,
        "medium" => MEDIUM_STYLE,
        "high" => HIGH_STYLE,
        _ => FALLBACK_STYLE,
    }
}

pub fn color_of(label: &str) -> &'static str {
    style_of(label).color
}

pub fn weight_of(label: &str) -> f64 {
    style_of(label).weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tiers() {
        assert_eq!(color_of("low"), "#34f5c5");
        assert_eq!(color_of("medium"), "#1dcdfe");
        assert_eq!(color_of("high"), "#e74c3c");
        assert_eq!(weight_of("low"), 0.3);
        assert_eq!(weight_of("medium"), 0.6);
        assert_eq!(weight_of("high"), 1.0);
    }

    #[test]
    fn test_unknown_labels_fall_back() {
        for label in ["", "extreme", "HIGH", "unknown", " low", "critical"] {
            assert_eq!(color_of(label), "#95a5a6", "label {:?}", label);
            assert_eq!(weight_of(label), 0.5, "label {:?}", label);
        }
    }

    #[test]
    fn test_typed_style_matches_label_lookup() {
        for severity in Severity::ALL {
            assert_eq!(severity.style(), style_of(severity.as_str()));
        }
    }

    #[test]
    fn test_weights_in_unit_interval() {
        for style in [LOW_STYLE, MEDIUM_STYLE, HIGH_STYLE, FALLBACK_STYLE] {
            assert!((0.0..=1.0).contains(&style.weight));
        }
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!(Severity::parse(" High ").unwrap(), Severity::High);
        assert!(matches!(Severity::parse("severe"), Err(CoastError::UnknownSeverity(_))));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Severity = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(back, Severity::Low);
    }
}
