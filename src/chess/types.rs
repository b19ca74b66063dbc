use std::fmt;

/// Header fields of one game that the converter looks at.
#[derive(Debug, Clone, Default)]
pub struct GameHeaders {
    pub result: Option<String>,
    pub termination: Option<String>,
    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,
    pub time_control: Option<String>,
    /// Start position from the `FEN` tag, if the game does not start from
    /// the standard position.
    pub fen: Option<String>,
}

impl GameHeaders {
    /// A missing `Result` tag counts as an unfinished game.
    pub fn result_or_unknown(&self) -> &str {
        self.result.as_deref().unwrap_or(UNKNOWN_RESULT)
    }

    pub fn weaker_elo(&self) -> Option<u32> {
        Some(self.white_elo?.min(self.black_elo?))
    }
}

pub const UNKNOWN_RESULT: &str = "*";

/// Game outcome from White's point of view, written after every FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeLabel {
    WhiteWins,
    Draw,
    BlackWins,
}

impl OutcomeLabel {
    /// Maps a decided `Result` tag. `*` and anything unrecognized yield `None`.
    pub fn from_result(result: &str) -> Option<Self> {
        match result.trim() {
            "1-0" => Some(Self::WhiteWins),
            "0-1" => Some(Self::BlackWins),
            "1/2-1/2" => Some(Self::Draw),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WhiteWins => "1.0",
            Self::Draw => "0.5",
            Self::BlackWins => "0.0",
        }
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a game after it was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSummary {
    Accepted { positions: u64 },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unfinished,
    TimeForfeit,
    BelowRatingFloor,
    ExcludedTimeControl,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unfinished => "unfinished",
            Self::TimeForfeit => "time forfeit",
            Self::BelowRatingFloor => "below rating floor",
            Self::ExcludedTimeControl => "excluded time control",
        }
    }
}

/// Totals for one conversion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub games_read: u64,
    pub games_accepted: u64,
    pub skipped_unfinished: u64,
    pub skipped_time_forfeit: u64,
    pub skipped_rating: u64,
    pub skipped_time_control: u64,
    pub records_written: u64,
    pub hit_record_limit: bool,
}

impl ConvertStats {
    pub fn record(&mut self, summary: GameSummary) {
        self.games_read += 1;
        match summary {
            GameSummary::Accepted { .. } => self.games_accepted += 1,
            GameSummary::Skipped(SkipReason::Unfinished) => self.skipped_unfinished += 1,
            GameSummary::Skipped(SkipReason::TimeForfeit) => self.skipped_time_forfeit += 1,
            GameSummary::Skipped(SkipReason::BelowRatingFloor) => self.skipped_rating += 1,
            GameSummary::Skipped(SkipReason::ExcludedTimeControl) => {
                self.skipped_time_control += 1
            }
        }
    }

    pub fn games_skipped(&self) -> u64 {
        self.games_read - self.games_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_label_from_decided_results() {
        assert_eq!(OutcomeLabel::from_result("1-0"), Some(OutcomeLabel::WhiteWins));
        assert_eq!(OutcomeLabel::from_result("0-1"), Some(OutcomeLabel::BlackWins));
        assert_eq!(OutcomeLabel::from_result("1/2-1/2"), Some(OutcomeLabel::Draw));
    }

    #[test]
    fn test_outcome_label_rejects_unknown_results() {
        assert_eq!(OutcomeLabel::from_result("*"), None);
        assert_eq!(OutcomeLabel::from_result("2-0"), None);
        assert_eq!(OutcomeLabel::from_result(""), None);
    }

    #[test]
    fn test_outcome_label_rendering() {
        assert_eq!(OutcomeLabel::WhiteWins.to_string(), "1.0");
        assert_eq!(OutcomeLabel::Draw.to_string(), "0.5");
        assert_eq!(OutcomeLabel::BlackWins.to_string(), "0.0");
    }

    #[test]
    fn test_missing_result_is_unknown() {
        let headers = GameHeaders::default();
        assert_eq!(headers.result_or_unknown(), "*");
    }

    #[test]
    fn test_weaker_elo_requires_both_ratings() {
        let mut headers = GameHeaders {
            white_elo: Some(2500),
            ..Default::default()
        };
        assert_eq!(headers.weaker_elo(), None);

        headers.black_elo = Some(2400);
        assert_eq!(headers.weaker_elo(), Some(2400));
    }

    #[test]
    fn test_stats_count_skips_by_reason() {
        let mut stats = ConvertStats::default();
        stats.record(GameSummary::Accepted { positions: 10 });
        stats.record(GameSummary::Skipped(SkipReason::Unfinished));
        stats.record(GameSummary::Skipped(SkipReason::TimeForfeit));

        assert_eq!(stats.games_read, 3);
        assert_eq!(stats.games_accepted, 1);
        assert_eq!(stats.skipped_unfinished, 1);
        assert_eq!(stats.skipped_time_forfeit, 1);
        assert_eq!(stats.games_skipped(), 2);
    }
}
