use std::fmt;

mod strict;

#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub moves: Option<u32>,
    pub base_seconds: u32,
    pub increment_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Unknown,
    Unlimited,
    Sandclock,
    Normal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTimeControl {
    pub periods: Vec<Period>,
    pub mode: Mode,
}

impl ParsedTimeControl {
    fn unknown() -> Self {
        Self {
            periods: Vec::new(),
            mode: Mode::Unknown,
        }
    }
}

/// Speed class of a game, by estimated duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TimeCategory {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
}

impl TimeCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UltraBullet => "ultra-bullet",
            Self::Bullet => "bullet",
            Self::Blitz => "blitz",
            Self::Rapid => "rapid",
            Self::Classical => "classical",
        }
    }
}

impl fmt::Display for TimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_u32(s: &str) -> Option<u32> {
    s.parse().ok()
}

/// Parses a `TimeControl` tag value. Empty input and values outside the
/// standard forms come back as `Mode::Unknown`.
pub fn parse_timecontrol(raw: &str) -> ParsedTimeControl {
    strict::try_strict_parse(raw.trim()).unwrap_or_else(ParsedTimeControl::unknown)
}

pub fn category_from_parsed_timecontrol(parsed: &ParsedTimeControl) -> Option<TimeCategory> {
    if parsed.mode != Mode::Normal {
        return None;
    }

    let period = parsed.periods.first()?;
    let increment = period.increment_seconds.unwrap_or(0) as u64;
    let estimated_seconds = period.base_seconds as u64 + 40 * increment;

    match estimated_seconds {
        0..=29 => Some(TimeCategory::UltraBullet),
        30..=179 => Some(TimeCategory::Bullet),
        180..=479 => Some(TimeCategory::Blitz),
        480..=1499 => Some(TimeCategory::Rapid),
        _ => Some(TimeCategory::Classical),
    }
}

pub fn categorize_timecontrol(raw: &str) -> Option<TimeCategory> {
    category_from_parsed_timecontrol(&parse_timecontrol(raw))
}
