mod error;
mod filter;
pub mod log;
mod reader;
pub mod timecontrol;
mod types;
mod visitor;
mod writer;

pub use error::{ConvertError, ErrorAccumulator, GameError};
pub use filter::GameFilter;
pub use reader::{
    CompressionMode, ConvertConfig, DEFAULT_MAX_RECORDS, PgnInput, convert, create_output,
    resolve_input_paths,
};
pub use timecontrol::TimeCategory;
pub use types::{ConvertStats, GameHeaders, GameSummary, OutcomeLabel, SkipReason};
pub use visitor::PositionVisitor;
pub use writer::{DEFAULT_PROGRESS_EVERY, RecordWriter};
