use chess_fenlist::chess::{
    self, CompressionMode, ConvertConfig, ConvertError, ConvertStats, DEFAULT_MAX_RECORDS,
    DEFAULT_PROGRESS_EVERY, GameFilter, TimeCategory,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "gen_fen_list")]
#[command(version, about = "Writes one labeled FEN per position of every decided game in a PGN file")]
struct Args {
    /// PGN file, or a glob pattern matching several
    input: String,

    /// Destination file; must not exist yet
    output: PathBuf,

    /// Input decoding; defaults to zstd for `.zst` files and plain otherwise
    #[arg(long, value_enum)]
    compression: Option<CompressionMode>,

    /// Skip games where the weaker player is rated below this
    #[arg(long)]
    min_elo: Option<u32>,

    /// Skip games of this speed class (repeatable)
    #[arg(long = "exclude-time-control", value_enum)]
    exclude_time_control: Vec<TimeCategory>,

    /// Stop reading games once more than this many positions were written
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
    max_records: u64,

    /// Log progress every N positions (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: u64,

    /// Only log errors
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> ConvertConfig {
        ConvertConfig {
            filter: GameFilter {
                min_elo: self.min_elo,
                excluded_time_controls: self.exclude_time_control.clone(),
            },
            compression: self.compression,
            max_records: self.max_records,
            progress_every: self.progress_every,
        }
    }
}

fn run(args: &Args) -> Result<ConvertStats, ConvertError> {
    let stats = chess::convert(&args.input, &args.output, &args.config())?;
    if stats.hit_record_limit {
        log::info!("Stopped early at the record limit");
    }
    Ok(stats)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = chess::log::init(args.quiet) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["gen_fen_list", "games.pgn", "fens.txt"]).unwrap();
        let config = args.config();

        assert_eq!(args.input, "games.pgn");
        assert_eq!(config.max_records, 1_000_000_000);
        assert_eq!(config.progress_every, 100_000);
        assert_eq!(config.filter.min_elo, None);
        assert_eq!(config.compression, None);
    }

    #[test]
    fn test_args_optional_filters() {
        let args = Args::try_parse_from([
            "gen_fen_list",
            "games.pgn.zst",
            "fens.txt",
            "--min-elo",
            "2900",
            "--exclude-time-control",
            "bullet",
            "--exclude-time-control",
            "ultra-bullet",
            "--compression",
            "zstd",
        ])
        .unwrap();
        let config = args.config();

        assert_eq!(config.filter.min_elo, Some(2900));
        assert_eq!(
            config.filter.excluded_time_controls,
            vec![TimeCategory::Bullet, TimeCategory::UltraBullet]
        );
        assert_eq!(config.compression, Some(CompressionMode::Zstd));
    }

    #[test]
    fn test_args_require_input_and_output() {
        assert!(Args::try_parse_from(["gen_fen_list", "games.pgn"]).is_err());
    }

    #[test]
    fn test_run_reports_existing_output_with_display_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("games.pgn");
        let output = dir.path().join("fens.txt");
        std::fs::write(&input, "[Result \"1-0\"]\n\n1. e4 1-0\n").unwrap();
        std::fs::write(&output, "keep me").unwrap();

        let args = Args::try_parse_from([
            "gen_fen_list",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&args).unwrap_err();

        assert!(matches!(err, ConvertError::OutputExists(_)));
        assert_eq!(
            err.to_string(),
            format!(
                "Output file '{}' already exists; refusing to overwrite",
                output.display()
            )
        );
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn test_run_returns_stats_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("games.pgn");
        let output = dir.path().join("fens.txt");
        std::fs::write(&input, "[Result \"0-1\"]\n\n1. e4 e5 0-1\n").unwrap();

        let args = Args::try_parse_from([
            "gen_fen_list",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();
        let stats = run(&args).unwrap();

        assert_eq!(stats.records_written, 2);
        assert!(!stats.hit_record_limit);
    }
}
