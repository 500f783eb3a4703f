//! Lightweight progress reporting used by long-running matchup runs.
//! Front ends (GUI/CLI) implement this to surface status to users.

/// Sink for notifications emitted while an aggregation run is in flight.
/// All methods default to no-ops so callers can opt in piecemeal.
pub trait Progress {
    /// Called at the start with the number of fetch steps to come.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// An optional data section could not be fetched and was skipped.
    fn warn(&mut self, _msg: &str) {}

    /// One fetch step completed (successfully or skipped).
    fn item_done(&mut self) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;

impl Progress for NullProgress {}
