//! Time-of-day and season labels.

use std::fmt;

use serde::Serialize;

// ---

/// Part of the day recommended for outdoor activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeCategory {
    Dawn,
    Morning,
    Afternoon,
    Dusk,
    Night,
    /// The classifier returned a slot outside 0..=4.
    Unknown,
}

impl TimeCategory {
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            TimeCategory::Dawn => "Dawn",
            TimeCategory::Morning => "Morning",
            TimeCategory::Afternoon => "Afternoon",
            TimeCategory::Dusk => "Dusk",
            TimeCategory::Night => "Night",
            TimeCategory::Unknown => "Unknown",
        }
    }

    /// Clock window covered by this category, `None` for Unknown.
    ///
    /// Night wraps past midnight.
    pub fn hours(&self) -> Option<&'static str> {
        // ---
        HOUR_WINDOWS
            .iter()
            .find(|window| window.category == *self)
            .map(|window| window.label)
    }

    /// Category an hour of the day (0..=23) falls into.
    ///
    /// Uses the same windows as [`TimeCategory::hours`]; the slot the
    /// classifier picks is mapped by [`time_category_from_slot`] instead.
    pub fn from_hour(hour: u32) -> TimeCategory {
        // ---
        if hour >= 24 {
            return TimeCategory::Unknown;
        }
        HOUR_WINDOWS
            .iter()
            .find(|window| window.contains(hour))
            .map_or(TimeCategory::Unknown, |window| window.category)
    }
}

/// Start-inclusive, end-exclusive window of clock hours.
struct HourWindow {
    category: TimeCategory,
    start: u32,
    end: u32,
    label: &'static str,
}

impl HourWindow {
    fn contains(&self, hour: u32) -> bool {
        // Windows with start > end wrap past midnight
        if self.start < self.end {
            (self.start..self.end).contains(&hour)
        } else {
            hour >= self.start || hour < self.end
        }
    }
}

const HOUR_WINDOWS: [HourWindow; 5] = [
    HourWindow { category: TimeCategory::Dawn, start: 6, end: 8, label: "06:00-08:00" },
    HourWindow { category: TimeCategory::Morning, start: 8, end: 12, label: "08:00-12:00" },
    HourWindow { category: TimeCategory::Afternoon, start: 12, end: 14, label: "12:00-14:00" },
    HourWindow { category: TimeCategory::Dusk, start: 14, end: 16, label: "14:00-16:00" },
    HourWindow { category: TimeCategory::Night, start: 16, end: 6, label: "16:00-06:00" },
];

impl fmt::Display for TimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map the classifier's chosen slot to its time-of-day label.
pub fn time_category_from_slot(slot: i64) -> TimeCategory {
    // ---
    match slot {
        0 => TimeCategory::Dawn,
        1 => TimeCategory::Morning,
        2 => TimeCategory::Afternoon,
        3 => TimeCategory::Dusk,
        4 => TimeCategory::Night,
        _ => TimeCategory::Unknown,
    }
}

/// Coarse seasons of the Indian subcontinent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Winter,
    Spring,
    #[serde(rename = "Pre-Monsoon (Summer)")]
    PreMonsoon,
    Monsoon,
    #[serde(rename = "Post-Monsoon (Autumn)")]
    PostMonsoon,
    Unknown,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::PreMonsoon => "Pre-Monsoon (Summer)",
            Season::Monsoon => "Monsoon",
            Season::PostMonsoon => "Post-Monsoon (Autumn)",
            Season::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn season_from_month(month: u32) -> Season {
    // ---
    match month {
        12 | 1 => Season::Winter,
        2 | 3 => Season::Spring,
        4 | 5 => Season::PreMonsoon,
        6..=9 => Season::Monsoon,
        10 | 11 => Season::PostMonsoon,
        _ => Season::Unknown,
    }
}
