use super::timecontrol::{TimeCategory, categorize_timecontrol};
use super::types::{GameHeaders, SkipReason, UNKNOWN_RESULT};

const TIME_FORFEIT: &str = "Time forfeit";

/// Game-level inclusion policy.
///
/// Unfinished and time-forfeit games are always dropped. The rating floor
/// and the time-control exclusions are off unless configured.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    pub min_elo: Option<u32>,
    pub excluded_time_controls: Vec<TimeCategory>,
}

impl GameFilter {
    pub fn check(&self, headers: &GameHeaders) -> Result<(), SkipReason> {
        if headers.result_or_unknown().trim() == UNKNOWN_RESULT {
            return Err(SkipReason::Unfinished);
        }

        if is_time_forfeit(headers.termination.as_deref()) {
            return Err(SkipReason::TimeForfeit);
        }

        if let Some(floor) = self.min_elo {
            match headers.weaker_elo() {
                Some(elo) if elo >= floor => {}
                _ => return Err(SkipReason::BelowRatingFloor),
            }
        }

        if !self.excluded_time_controls.is_empty()
            && let Some(category) = headers.time_control.as_deref().and_then(categorize_timecontrol)
            && self.excluded_time_controls.contains(&category)
        {
            return Err(SkipReason::ExcludedTimeControl);
        }

        Ok(())
    }
}

fn is_time_forfeit(termination: Option<&str>) -> bool {
    termination.is_some_and(|t| t.trim().eq_ignore_ascii_case(TIME_FORFEIT))
}
