use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::env;
use std::error::Error;

const LOG_ENV: &str = "CHESS_LOG";

fn level_from_str(s: &str) -> LevelFilter {
    match s.trim().to_lowercase().as_str() {
        "off" | "none" => LevelFilter::Off,
        "error" | "err" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Level requested through `CHESS_LOG`, `Info` when unset.
pub fn level_from_env() -> LevelFilter {
    env::var(LOG_ENV)
        .map(|s| level_from_str(&s))
        .unwrap_or(LevelFilter::Info)
}

/// Installs the stderr logger. Progress and summaries go through it so the
/// output file only ever holds records.
pub fn init(quiet: bool) -> Result<(), Box<dyn Error>> {
    let level = if quiet {
        LevelFilter::Error
    } else {
        level_from_env()
    };

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_aliases() {
        assert_eq!(level_from_str("err"), LevelFilter::Error);
        assert_eq!(level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(level_from_str(" debug "), LevelFilter::Debug);
        assert_eq!(level_from_str("off"), LevelFilter::Off);
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        assert_eq!(level_from_str("loud"), LevelFilter::Info);
        assert_eq!(level_from_str(""), LevelFilter::Info);
    }
}
