use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FilterPreset {
    #[default]
    Session,
    Week,
    Month,
    Custom,
}

impl FilterPreset {
    /// Label persisted under the `dateFilter` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterPreset::Session => "session",
            FilterPreset::Week => "week",
            FilterPreset::Month => "month",
            FilterPreset::Custom => "custom",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "session" => Some(FilterPreset::Session),
            "week" => Some(FilterPreset::Week),
            "month" => Some(FilterPreset::Month),
            "custom" => Some(FilterPreset::Custom),
            _ => None,
        }
    }
}

/// A preset plus the raw anchors typed by the user (only read for `custom`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRangeFilter {
    pub preset: FilterPreset,
    pub anchor_start: Option<String>,
    pub anchor_end: Option<String>,
}

impl DateRangeFilter {
    pub fn preset(preset: FilterPreset) -> Self {
        Self {
            preset,
            anchor_start: None,
            anchor_end: None,
        }
    }

    pub fn custom(anchor_start: impl Into<String>, anchor_end: Option<String>) -> Self {
        Self {
            preset: FilterPreset::Custom,
            anchor_start: Some(anchor_start.into()),
            anchor_end,
        }
    }
}

/// Inclusive instant interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        t >= self.start && t <= self.end
    }
}
