//! Bridges the worker thread's progress into state the UI thread reads
//! each frame.

use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// State shared between the worker and the UI thread.
#[derive(Default)]
pub struct SharedProgress {
    pub status: Mutex<String>,
    pub warnings: Mutex<Vec<String>>,
    /// `(done, total)` fetch steps, driving the progress bar.
    pub steps: Mutex<(usize, usize)>,
}

impl SharedProgress {
    pub fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap() = msg.into();
    }

    pub fn reset(&self) {
        self.warnings.lock().unwrap().clear();
        *self.steps.lock().unwrap() = (0, 0);
    }
}

/// Progress sink handed to the aggregator on the worker thread.
pub struct GuiProgress {
    shared: Arc<SharedProgress>,
}

impl GuiProgress {
    pub fn new(shared: Arc<SharedProgress>) -> Self {
        Self { shared }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        *self.shared.steps.lock().unwrap() = (0, total);
    }

    fn log(&mut self, msg: &str) {
        self.shared.set_status(msg);
    }

    fn warn(&mut self, msg: &str) {
        self.shared.warnings.lock().unwrap().push(msg.to_string());
    }

    fn item_done(&mut self) {
        self.shared.steps.lock().unwrap().0 += 1;
    }

    fn finish(&mut self) {
        let mut steps = self.shared.steps.lock().unwrap();
        steps.0 = steps.1;
    }
}
