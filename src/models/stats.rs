use serde::{Deserialize, Serialize};

/// Per-severity and total counts for the active subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub total: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// One numeric field on the stats display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatField {
    TotalReports,
    HighSeverity,
    MediumSeverity,
    LowSeverity,
}

impl StatField {
    pub const ALL: [StatField; 4] = [
        StatField::TotalReports,
        StatField::HighSeverity,
        StatField::MediumSeverity,
        StatField::LowSeverity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalReports => "total-reports",
            Self::HighSeverity => "high-severity",
            Self::MediumSeverity => "medium-severity",
            Self::LowSeverity => "low-severity",
        }
    }
}

impl AggregatedStats {
    pub fn get(&self, field: StatField) -> u64 {
        match field {
            StatField::TotalReports => self.total,
            StatField::HighSeverity => self.high,
            StatField::MediumSeverity => self.medium,
            StatField::LowSeverity => self.low,
        }
    }

    pub fn set(&mut self, field: StatField, value: u64) {
        match field {
            StatField::TotalReports => self.total = value,
            StatField::HighSeverity => self.high = value,
            StatField::MediumSeverity => self.medium = value,
            StatField::LowSeverity => self.low = value,
        }
    }
}
