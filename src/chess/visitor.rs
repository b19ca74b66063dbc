use super::error::{ErrorAccumulator, GameError};
use super::filter::GameFilter;
use super::types::{GameHeaders, GameSummary, OutcomeLabel};
use super::writer::RecordWriter;

use pgn_reader::{RawTag, SanPlus, Skip, Visitor};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use std::io::Write;
use std::mem;
use std::ops::ControlFlow;

/// Raw header values of the game being read, before conversion.
#[derive(Default)]
struct HeaderFields {
    result: String,
    termination: String,
    white_elo: String,
    black_elo: String,
    time_control: String,
    fen: String,
}

impl HeaderFields {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn opt_take(field: &mut String) -> Option<String> {
        if field.is_empty() {
            None
        } else {
            Some(mem::take(field))
        }
    }

    fn set_known_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let slot: &mut String = match key {
            b"Result" => &mut self.result,
            b"Termination" => &mut self.termination,
            b"WhiteElo" => &mut self.white_elo,
            b"BlackElo" => &mut self.black_elo,
            b"TimeControl" => &mut self.time_control,
            b"FEN" => &mut self.fen,
            _ => return,
        };

        // First occurrence wins.
        if !slot.is_empty() {
            return;
        }

        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        *slot = String::from_utf8_lossy(bytes).into_owned();
    }

    fn parse_elo(raw: Option<String>, label: &str, warnings: &mut ErrorAccumulator) -> Option<u32> {
        let raw = raw?;
        let s = raw.trim();
        // Lichess writes "?" for unrated players.
        if s.is_empty() || s == "?" || s == "-" {
            return None;
        }
        match s.parse::<u32>() {
            Ok(v) => Some(v),
            Err(_) => {
                warnings.push(&format!("Conversion error: {label}='{s}'"));
                None
            }
        }
    }

    fn take_headers(&mut self, warnings: &mut ErrorAccumulator) -> GameHeaders {
        GameHeaders {
            result: Self::opt_take(&mut self.result),
            termination: Self::opt_take(&mut self.termination),
            white_elo: Self::parse_elo(Self::opt_take(&mut self.white_elo), "WhiteElo", warnings),
            black_elo: Self::parse_elo(Self::opt_take(&mut self.black_elo), "BlackElo", warnings),
            time_control: Self::opt_take(&mut self.time_control),
            fen: Self::opt_take(&mut self.fen),
        }
    }
}

/// Replay state of one accepted game.
pub struct Replay {
    pos: Chess,
    label: OutcomeLabel,
    ply: u32,
}

fn start_position(fen: &str) -> Result<Chess, GameError> {
    let fen = Fen::from_ascii(fen.trim().as_bytes())
        .map_err(|e| GameError::InvalidStartPosition(e.to_string()))?;
    fen.into_position(CastlingMode::Standard)
        .map_err(|e| GameError::InvalidStartPosition(e.to_string()))
}

/// Streaming PGN visitor that filters games on their headers and writes one
/// labeled FEN per mainline move of every accepted game.
///
/// Records are written as the moves are replayed; nothing is buffered per
/// game. Variations are skipped.
pub struct PositionVisitor<W: Write> {
    filter: GameFilter,
    writer: RecordWriter<W>,
    headers: HeaderFields,
    warnings: ErrorAccumulator,
}

impl<W: Write> PositionVisitor<W> {
    pub fn new(filter: GameFilter, writer: RecordWriter<W>) -> Self {
        Self {
            filter,
            writer,
            headers: HeaderFields::default(),
            warnings: ErrorAccumulator::default(),
        }
    }

    pub fn records_written(&self) -> u64 {
        self.writer.records_written()
    }

    /// Header conversion problems of the last game read.
    pub fn take_warnings(&mut self) -> Option<String> {
        self.warnings.take()
    }

    pub fn into_writer(self) -> RecordWriter<W> {
        self.writer
    }
}

impl<W: Write> Visitor for PositionVisitor<W> {
    type Tags = ();
    type Movetext = Replay;
    type Output = Result<GameSummary, GameError>;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.warnings = ErrorAccumulator::default();
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.set_known_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        let headers = self.headers.take_headers(&mut self.warnings);

        if let Err(reason) = self.filter.check(&headers) {
            return ControlFlow::Break(Ok(GameSummary::Skipped(reason)));
        }

        let result = headers.result_or_unknown();
        let Some(label) = OutcomeLabel::from_result(result) else {
            return ControlFlow::Break(Err(GameError::UnexpectedResult(result.to_string())));
        };

        let pos = match headers.fen.as_deref() {
            Some(fen) => match start_position(fen) {
                Ok(pos) => pos,
                Err(e) => return ControlFlow::Break(Err(e)),
            },
            None => Chess::default(),
        };

        ControlFlow::Continue(Replay { pos, label, ply: 0 })
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, replay: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let m = match san_plus.san.to_move(&replay.pos) {
            Ok(m) => m,
            Err(e) => {
                return ControlFlow::Break(Err(GameError::IllegalMove {
                    ply: replay.ply + 1,
                    san: san_plus.to_string(),
                    reason: e.to_string(),
                }));
            }
        };

        replay.pos.play_unchecked(m);
        replay.ply += 1;

        let fen = Fen::from_position(&replay.pos, EnPassantMode::Legal);
        if let Err(e) = self.writer.write_record(fen, replay.label) {
            return ControlFlow::Break(Err(GameError::Write(e)));
        }

        ControlFlow::Continue(())
    }

    fn end_game(&mut self, replay: Self::Movetext) -> Self::Output {
        Ok(GameSummary::Accepted {
            positions: u64::from(replay.ply),
        })
    }
}
