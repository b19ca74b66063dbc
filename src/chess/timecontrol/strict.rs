use super::{Mode, ParsedTimeControl, Period, parse_u32};

/// Strict PGN `TimeControl` grammar: `?`, `-`, `*secs`, and one or more
/// `[moves/]secs[+inc]` stages joined by `:`.
pub(super) fn try_strict_parse(input: &str) -> Option<ParsedTimeControl> {
    match input {
        "?" => return Some(ParsedTimeControl::unknown()),
        "-" => {
            return Some(ParsedTimeControl {
                periods: Vec::new(),
                mode: Mode::Unlimited,
            });
        }
        _ => {}
    }

    if let Some(secs_str) = input.strip_prefix('*')
        && let Some(secs) = parse_u32(secs_str)
    {
        return Some(ParsedTimeControl {
            periods: vec![Period {
                moves: None,
                base_seconds: secs,
                increment_seconds: None,
            }],
            mode: Mode::Sandclock,
        });
    }

    if input.contains(':') {
        let periods = input
            .split(':')
            .map(parse_stage)
            .collect::<Option<Vec<Period>>>()?;
        return Some(ParsedTimeControl {
            periods,
            mode: Mode::Normal,
        });
    }

    let period = parse_stage(input)?;
    if looks_like_minute_shorthand(&period) {
        return None;
    }
    Some(ParsedTimeControl {
        periods: vec![period],
        mode: Mode::Normal,
    })
}

// "3+2" style values are minutes, not seconds; categorizing them as
// seconds would call a blitz game ultra-bullet.
fn looks_like_minute_shorthand(period: &Period) -> bool {
    if period.moves.is_some() {
        return false;
    }

    if let Some(inc) = period.increment_seconds {
        (period.base_seconds < 60 && inc <= 60)
            || ((period.base_seconds == 75 || period.base_seconds == 90) && inc == 30)
    } else {
        period.base_seconds < 60
    }
}

fn parse_stage(s: &str) -> Option<Period> {
    let (base_part, inc_part) = match s.split_once('+') {
        Some((base, inc)) => {
            if inc.contains('+') {
                return None;
            }
            (base, Some(inc))
        }
        None => (s, None),
    };

    let (moves, base_str) = match base_part.split_once('/') {
        Some((moves, base)) => (Some(parse_u32(moves)?), base),
        None => (None, base_part),
    };

    let base_seconds = parse_u32(base_str)?;
    let increment_seconds = match inc_part {
        Some(inc_str) => Some(parse_u32(inc_str)?),
        None => None,
    };

    Some(Period {
        moves,
        base_seconds,
        increment_seconds,
    })
}
