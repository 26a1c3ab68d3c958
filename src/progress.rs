//! Progress reporting for the detection pipeline
//!
//! Progress is a fixed sequence of advisory checkpoints. Each one fires
//! exactly once, in order, on every completed detection run.

/// Pipeline checkpoints in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Loading,
    Analyzing,
    Detecting,
    Calculating,
    Complete,
}

impl Milestone {
    /// All milestones in the order they fire
    pub const ALL: [Milestone; 5] = [
        Milestone::Loading,
        Milestone::Analyzing,
        Milestone::Detecting,
        Milestone::Calculating,
        Milestone::Complete,
    ];

    /// Percentage reported for this milestone (0-100)
    pub fn percent(self) -> u8 {
        match self {
            Milestone::Loading => 10,
            Milestone::Analyzing => 30,
            Milestone::Detecting => 60,
            Milestone::Calculating => 85,
            Milestone::Complete => 100,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Milestone::Loading => "Loading image data",
            Milestone::Analyzing => "Analyzing pixel content",
            Milestone::Detecting => "Detecting sprite boundaries",
            Milestone::Calculating => "Calculating grid layout",
            Milestone::Complete => "Detection complete",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}% {}", self.percent(), self.message())
    }
}

/// Receiver for progress callbacks
///
/// Any `FnMut(u8, &str)` closure is a sink.
pub trait ProgressSink {
    fn report(&mut self, percent: u8, message: &str);

    /// Report a pipeline milestone
    fn milestone(&mut self, milestone: Milestone) {
        self.report(milestone.percent(), milestone.message());
    }
}

impl<F> ProgressSink for F
where
    F: FnMut(u8, &str),
{
    fn report(&mut self, percent: u8, message: &str) {
        self(percent, message)
    }
}

/// Sink that discards every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

/// Sink that forwards reports to the `log` facade at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&mut self, percent: u8, message: &str) {
        log::debug!("progress {:>3}%: {}", percent, message);
    }
}
