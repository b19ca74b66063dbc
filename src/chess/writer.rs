use super::types::OutcomeLabel;
use std::fmt::Display;
use std::io::{self, Write};

pub const DEFAULT_PROGRESS_EVERY: u64 = 100_000;

/// Writes `<fen> <label>` lines and keeps the run-wide record count.
pub struct RecordWriter<W: Write> {
    output: W,
    records_written: u64,
    progress_every: u64,
    progress_reports: u64,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            records_written: 0,
            progress_every: DEFAULT_PROGRESS_EVERY,
            progress_reports: 0,
        }
    }

    /// `0` turns progress reporting off.
    pub fn with_progress_every(mut self, progress_every: u64) -> Self {
        self.progress_every = progress_every;
        self
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Number of progress lines logged so far.
    pub fn progress_reports(&self) -> u64 {
        self.progress_reports
    }

    pub fn write_record(&mut self, fen: impl Display, label: OutcomeLabel) -> io::Result<()> {
        writeln!(self.output, "{} {}", fen, label)?;
        self.records_written += 1;

        if self.progress_every > 0 && self.records_written.is_multiple_of(self.progress_every) {
            self.progress_reports += 1;
            log::info!("{} positions written", self.records_written);
        }
        Ok(())
    }

    /// Flushes and hands back the underlying output.
    pub fn finish(mut self) -> io::Result<W> {
        self.output.flush()?;
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_line_format() {
        let mut writer = RecordWriter::new(Vec::new());
        writer
            .write_record("8/8/8/8/8/8/8/K6k w - - 0 1", OutcomeLabel::Draw)
            .unwrap();
        writer
            .write_record("8/8/8/8/8/8/8/K6k b - - 0 1", OutcomeLabel::BlackWins)
            .unwrap();

        assert_eq!(writer.records_written(), 2);
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            out,
            "8/8/8/8/8/8/8/K6k w - - 0 1 0.5\n8/8/8/8/8/8/8/K6k b - - 0 1 0.0\n"
        );
    }

    #[test]
    fn test_progress_disabled_still_counts() {
        let mut writer = RecordWriter::new(Vec::new()).with_progress_every(0);
        for _ in 0..5 {
            writer.write_record("fen", OutcomeLabel::WhiteWins).unwrap();
        }
        assert_eq!(writer.records_written(), 5);
        assert_eq!(writer.progress_reports(), 0);
    }

    #[test]
    fn test_progress_reported_on_multiples_only() {
        let mut writer = RecordWriter::new(Vec::new()).with_progress_every(2);

        writer.write_record("fen", OutcomeLabel::Draw).unwrap();
        assert_eq!(writer.progress_reports(), 0);
        writer.write_record("fen", OutcomeLabel::Draw).unwrap();
        assert_eq!(writer.progress_reports(), 1);
        writer.write_record("fen", OutcomeLabel::Draw).unwrap();
        assert_eq!(writer.progress_reports(), 1);
        writer.write_record("fen", OutcomeLabel::Draw).unwrap();
        writer.write_record("fen", OutcomeLabel::Draw).unwrap();
        assert_eq!(writer.progress_reports(), 2);
    }

    #[test]
    fn test_default_cadence_is_silent_below_threshold() {
        let mut writer = RecordWriter::new(Vec::new());
        for _ in 0..1_000 {
            writer.write_record("fen", OutcomeLabel::BlackWins).unwrap();
        }
        assert_eq!(writer.progress_reports(), 0);
    }
}
