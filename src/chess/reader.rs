use super::error::ConvertError;
use super::filter::GameFilter;
use super::types::{ConvertStats, GameSummary};
use super::visitor::PositionVisitor;
use super::writer::{DEFAULT_PROGRESS_EVERY, RecordWriter};

use pgn_reader::Reader;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

/// Hard ceiling on emitted records; reading stops after the game that
/// crosses it.
pub const DEFAULT_MAX_RECORDS: u64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum CompressionMode {
    Plain,
    Zstd,
}

impl CompressionMode {
    /// `.zst` files are decoded, everything else is read as plain PGN.
    pub fn for_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zst") => Self::Zstd,
            _ => Self::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub filter: GameFilter,
    /// Forces a decoder for every input instead of going by extension.
    pub compression: Option<CompressionMode>,
    pub max_records: u64,
    pub progress_every: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            filter: GameFilter::default(),
            compression: None,
            max_records: DEFAULT_MAX_RECORDS,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

pub type PgnInput = Box<dyn Read + Send>;

struct PgnReaderState {
    pgn_reader: Reader<PgnInput>,
    path: PathBuf,
    next_game_index: usize,
}

impl PgnReaderState {
    fn new(input: PgnInput, path: PathBuf) -> Self {
        Self {
            pgn_reader: Reader::new(input),
            path,
            next_game_index: 1,
        }
    }
}

enum ReadNextGameOutcome {
    GameRead(GameSummary),
    ReaderFinished,
}

/// A single path, or a glob pattern expanded to its matches in sorted order.
pub fn resolve_input_paths(pattern: &str) -> Result<Vec<PathBuf>, ConvertError> {
    if !(pattern.contains('*') || pattern.contains('?')) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut paths: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|e| ConvertError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .collect();

    if paths.is_empty() {
        return Err(ConvertError::NoInputFiles(pattern.to_string()));
    }

    paths.sort();
    Ok(paths)
}

fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput, ConvertError> {
    let file = File::open(path).map_err(|source| ConvertError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;

    match compression {
        CompressionMode::Plain => Ok(Box::new(file)),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| ConvertError::OpenInput {
                path: path.to_path_buf(),
                source,
            }),
    }
}

/// Creates the output file, failing if anything already exists at `path`.
pub fn create_output(path: &Path) -> Result<File, ConvertError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                ConvertError::OutputExists(path.to_path_buf())
            } else {
                ConvertError::CreateOutput {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
}

fn read_next_game<W: Write>(
    reader: &mut PgnReaderState,
    visitor: &mut PositionVisitor<W>,
) -> Result<ReadNextGameOutcome, ConvertError> {
    let game_index = reader.next_game_index;

    match reader.pgn_reader.read_game(visitor) {
        Ok(Some(Ok(summary))) => {
            reader.next_game_index += 1;
            if let Some(warnings) = visitor.take_warnings() {
                log::warn!(
                    "file='{}'; game_index={}; {}",
                    reader.path.display(),
                    game_index,
                    warnings
                );
            }
            Ok(ReadNextGameOutcome::GameRead(summary))
        }
        Ok(Some(Err(source))) => Err(ConvertError::Game {
            path: reader.path.clone(),
            game_index,
            source,
        }),
        Ok(None) => Ok(ReadNextGameOutcome::ReaderFinished),
        Err(source) => Err(ConvertError::Read {
            path: reader.path.clone(),
            game_index,
            source,
        }),
    }
}

/// Opens and immediately closes `path` so unreadable inputs are reported
/// before the output exists.
fn check_input_readable(path: &Path) -> Result<(), ConvertError> {
    File::open(path)
        .map(drop)
        .map_err(|source| ConvertError::OpenInput {
            path: path.to_path_buf(),
            source,
        })
}

/// Converts every game matched by `input` into labeled FEN records written
/// to `output`, which must not exist yet.
///
/// Every input is checked before the output is created, so a missing input
/// never leaves an empty output file behind. Inputs are then opened one at a
/// time and closed before the next one. Any read or replay failure aborts
/// the run; records already written stay in the output.
pub fn convert(
    input: &str,
    output: &Path,
    config: &ConvertConfig,
) -> Result<ConvertStats, ConvertError> {
    let paths = resolve_input_paths(input)?;
    for path in &paths {
        check_input_readable(path)?;
    }

    let file = create_output(output)?;
    let writer =
        RecordWriter::new(BufWriter::new(file)).with_progress_every(config.progress_every);
    let mut visitor = PositionVisitor::new(config.filter.clone(), writer);
    let mut stats = ConvertStats::default();

    'inputs: for path in paths {
        let compression = config
            .compression
            .unwrap_or_else(|| CompressionMode::for_path(&path));
        let stream = open_input_stream(&path, compression)?;
        let mut reader = PgnReaderState::new(stream, path);
        log::info!("Reading {}", reader.path.display());

        while let ReadNextGameOutcome::GameRead(summary) = read_next_game(&mut reader, &mut visitor)? {
            match summary {
                GameSummary::Accepted { positions } => log::trace!(
                    "file='{}'; game_index={}; {} positions",
                    reader.path.display(),
                    reader.next_game_index - 1,
                    positions
                ),
                GameSummary::Skipped(reason) => log::debug!(
                    "file='{}'; game_index={}; skipped ({})",
                    reader.path.display(),
                    reader.next_game_index - 1,
                    reason.as_str()
                ),
            }
            stats.record(summary);

            if visitor.records_written() > config.max_records {
                log::info!(
                    "Record limit {} exceeded after {} records; stopping",
                    config.max_records,
                    visitor.records_written()
                );
                stats.hit_record_limit = true;
                break 'inputs;
            }
        }
    }

    stats.records_written = visitor.records_written();
    visitor.into_writer().finish().map_err(ConvertError::Write)?;

    log::info!(
        "Done: {} games read, {} accepted, {} skipped, {} positions written",
        stats.games_read,
        stats.games_accepted,
        stats.games_skipped(),
        stats.records_written
    );

    Ok(stats)
}
