//! Turns PGN game collections into a flat training set: one line per
//! position reached in an accepted game, `<fen> <label>`, where the label
//! is the game result from White's point of view (`1.0`, `0.5`, `0.0`).

pub mod chess;

pub use chess::{ConvertConfig, ConvertError, ConvertStats, convert};
