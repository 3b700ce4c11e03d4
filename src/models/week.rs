use serde::{Deserialize, Serialize};
use std::fmt;

pub const PRESEASON_WEEKS: u8 = 3;
pub const REGULAR_SEASON_WEEKS: u8 = 18;
pub const POSTSEASON_WEEKS: u8 = 4;

/// Unified week numbering: 1-3 preseason, 4-21 regular season, 22-25 postseason
pub const FIRST_UNIFIED_WEEK: u8 = 1;
pub const LAST_UNIFIED_WEEK: u8 = PRESEASON_WEEKS + REGULAR_SEASON_WEEKS + POSTSEASON_WEEKS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPhase {
    Preseason,
    Regular,
    Postseason,
}

impl SeasonPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonPhase::Preseason => "preseason",
            SeasonPhase::Regular => "regular",
            SeasonPhase::Postseason => "postseason",
        }
    }

    /// Number of weeks played in this phase
    pub fn weeks(&self) -> u8 {
        match self {
            SeasonPhase::Preseason => PRESEASON_WEEKS,
            SeasonPhase::Regular => REGULAR_SEASON_WEEKS,
            SeasonPhase::Postseason => POSTSEASON_WEEKS,
        }
    }

    /// Unified week number of this phase's first week
    pub fn first_unified_week(&self) -> u8 {
        match self {
            SeasonPhase::Preseason => FIRST_UNIFIED_WEEK,
            SeasonPhase::Regular => PRESEASON_WEEKS + 1,
            SeasonPhase::Postseason => PRESEASON_WEEKS + REGULAR_SEASON_WEEKS + 1,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "preseason" | "pre" => Some(SeasonPhase::Preseason),
            "regular" | "reg" => Some(SeasonPhase::Regular),
            "postseason" | "post" => Some(SeasonPhase::Postseason),
            _ => None,
        }
    }
}

impl fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A week inside one season phase, e.g. regular season week 5.
///
/// Serialized as its phase tag (`regular-5`), which is also the
/// `season_type` column of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeasonWeek {
    pub phase: SeasonPhase,
    pub week: u8,
}

impl SeasonWeek {
    pub fn new(phase: SeasonPhase, week: u8) -> Option<Self> {
        if week >= 1 && week <= phase.weeks() {
            Some(Self { phase, week })
        } else {
            None
        }
    }

    pub fn from_unified(unified: u8) -> Option<Self> {
        [SeasonPhase::Preseason, SeasonPhase::Regular, SeasonPhase::Postseason]
            .into_iter()
            .find_map(|phase| {
                let first = phase.first_unified_week();
                if unified >= first && unified < first + phase.weeks() {
                    Some(Self { phase, week: unified - first + 1 })
                } else {
                    None
                }
            })
    }

    pub fn unified(&self) -> u8 {
        self.phase.first_unified_week() + self.week - 1
    }

    /// Phase tag used as `season_type`, e.g. `preseason-2`
    pub fn tag(&self) -> String {
        format!("{}-{}", self.phase.as_str(), self.week)
    }

    pub fn parse(tag: &str) -> Option<Self> {
        let (phase, week) = tag.trim().rsplit_once('-')?;
        let phase = SeasonPhase::parse(phase)?;
        let week = week.parse::<u8>().ok()?;
        Self::new(phase, week)
    }

    pub fn label(&self) -> String {
        match self.phase {
            SeasonPhase::Preseason => format!("Preseason Week {}", self.week),
            SeasonPhase::Regular => format!("Week {}", self.week),
            SeasonPhase::Postseason => format!("Postseason Week {}", self.week),
        }
    }

    /// The following week in unified order, `None` after the last postseason week
    pub fn next(&self) -> Option<Self> {
        Self::from_unified(self.unified() + 1)
    }

    pub fn first() -> Self {
        Self { phase: SeasonPhase::Preseason, week: 1 }
    }

    pub fn last() -> Self {
        Self { phase: SeasonPhase::Postseason, week: POSTSEASON_WEEKS }
    }
}

impl fmt::Display for SeasonWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.phase.as_str(), self.week)
    }
}

impl TryFrom<String> for SeasonWeek {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{}' is not a valid season week", value))
    }
}

impl From<SeasonWeek> for String {
    fn from(value: SeasonWeek) -> Self {
        value.tag()
    }
}

/// Output of the week calculator, also what gets persisted as "current week".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekDescriptor {
    /// Unified week number (1-25)
    pub week: u8,
    pub phase: SeasonPhase,
    pub phase_week: u8,
    pub season_type: String,
    pub label: String,
    /// Set when the calculator could not use its inputs and fell back to week 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl WeekDescriptor {
    pub fn from_season_week(season_week: SeasonWeek) -> Self {
        Self {
            week: season_week.unified(),
            phase: season_week.phase,
            phase_week: season_week.week,
            season_type: season_week.tag(),
            label: season_week.label(),
            fallback_reason: None,
        }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            fallback_reason: Some(reason.into()),
            ..Self::from_season_week(SeasonWeek::first())
        }
    }

    pub fn season_week(&self) -> SeasonWeek {
        SeasonWeek { phase: self.phase, week: self.phase_week }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_numbering_covers_all_phases() {
        assert_eq!(SeasonWeek::from_unified(1), SeasonWeek::new(SeasonPhase::Preseason, 1));
        assert_eq!(SeasonWeek::from_unified(3), SeasonWeek::new(SeasonPhase::Preseason, 3));
        assert_eq!(SeasonWeek::from_unified(4), SeasonWeek::new(SeasonPhase::Regular, 1));
        assert_eq!(SeasonWeek::from_unified(21), SeasonWeek::new(SeasonPhase::Regular, 18));
        assert_eq!(SeasonWeek::from_unified(22), SeasonWeek::new(SeasonPhase::Postseason, 1));
        assert_eq!(SeasonWeek::from_unified(25), SeasonWeek::new(SeasonPhase::Postseason, 4));
        assert_eq!(SeasonWeek::from_unified(0), None);
        assert_eq!(SeasonWeek::from_unified(26), None);

        for unified in FIRST_UNIFIED_WEEK..=LAST_UNIFIED_WEEK {
            let week = SeasonWeek::from_unified(unified).unwrap();
            assert_eq!(week.unified(), unified);
        }
    }

    #[test]
    fn test_tag_parsing() {
        let week = SeasonWeek::parse("regular-5").unwrap();
        assert_eq!(week.phase, SeasonPhase::Regular);
        assert_eq!(week.week, 5);
        assert_eq!(week.tag(), "regular-5");
        assert_eq!(SeasonWeek::parse("preseason-4"), None);
        assert_eq!(SeasonWeek::parse("regular"), None);
        assert_eq!(SeasonWeek::parse("bogus-1"), None);
    }

    #[test]
    fn test_next_stops_after_last_week() {
        assert_eq!(
            SeasonWeek::new(SeasonPhase::Preseason, 3).unwrap().next(),
            SeasonWeek::new(SeasonPhase::Regular, 1)
        );
        assert_eq!(SeasonWeek::last().next(), None);
    }
}
