use std::time::{Duration, Instant};

use crate::config::Config;
use crate::detection::DetectedProduct;
use crate::error::LayoutError;
use crate::items::{items_from_products, Coverage};
use crate::report::{build_report, ShelfReport};

/// Analysis state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Nothing in flight; the trigger control is enabled
    Idle,
    /// Upload sent, waiting on the detection service
    Scanning,
    Analyzing,
    Calculating,
    /// A report is available
    Done,
}

impl AnalysisPhase {
    /// Whether an analysis is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            AnalysisPhase::Scanning | AnalysisPhase::Analyzing | AnalysisPhase::Calculating
        )
    }

    /// Status line shown while in this phase.
    pub fn status(self) -> &'static str {
        match self {
            AnalysisPhase::Idle => "Ready",
            AnalysisPhase::Scanning => "Scanning shelf image...",
            AnalysisPhase::Analyzing => "Analyzing products...",
            AnalysisPhase::Calculating => "Calculating shelf share...",
            AnalysisPhase::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("an analysis is already in progress ({0:?})")]
    Busy(AnalysisPhase),

    #[error("no analysis in progress")]
    NotRunning,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// The single timer driving the progress animation of one run.
#[derive(Debug, Clone, Copy)]
struct PhaseTimer {
    started: Instant,
    step: Duration,
}

impl PhaseTimer {
    /// Animation phase reached at `now`. Stays on Calculating once reached.
    fn phase_at(&self, now: Instant) -> AnalysisPhase {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = if self.step.is_zero() {
            u128::MAX
        } else {
            elapsed.as_millis() / self.step.as_millis().max(1)
        };
        match steps {
            0 => AnalysisPhase::Scanning,
            1 => AnalysisPhase::Analyzing,
            _ => AnalysisPhase::Calculating,
        }
    }
}

/// One analysis at a time: owns the phase, the timer and the latest report.
pub struct AnalysisSession {
    phase: AnalysisPhase,
    timer: Option<PhaseTimer>,
    report: Option<ShelfReport>,
    /// Products of the current report as detected, before any rescaling
    products: Vec<DetectedProduct>,
    last_error: Option<String>,
    pub config: Config,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Interval between animation phases
    pub step: Duration,
}

impl AnalysisSession {
    pub fn new(config: Config, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            phase: AnalysisPhase::Idle,
            timer: None,
            report: None,
            products: Vec::new(),
            last_error: None,
            config,
            viewport_width,
            viewport_height,
            step: Duration::from_millis(800),
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    pub fn report(&self) -> Option<&ShelfReport> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Begin a new run. Rejected while another run is in flight.
    pub fn start(&mut self, now: Instant) -> Result<(), SessionError> {
        if self.phase.is_busy() {
            return Err(SessionError::Busy(self.phase));
        }
        self.phase = AnalysisPhase::Scanning;
        self.timer = Some(PhaseTimer {
            started: now,
            step: self.step,
        });
        self.report = None;
        self.products.clear();
        self.last_error = None;
        tracing::info!("Analysis started");
        Ok(())
    }

    /// Advance the progress animation. Returns true when the phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(timer) = self.timer else {
            return false;
        };
        let next = timer.phase_at(now);
        if next != self.phase {
            tracing::debug!("Analysis phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
            true
        } else {
            false
        }
    }

    /// Finish the run with the detection service's products.
    ///
    /// Inputs without a layout (zero total weight) end in a placeholder report.
    /// Bad viewport geometry fails the run.
    pub fn complete(&mut self, products: &[DetectedProduct]) -> Result<&ShelfReport, SessionError> {
        if !self.phase.is_busy() {
            return Err(SessionError::NotRunning);
        }
        self.phase = AnalysisPhase::Calculating;

        let report = match build_report(products, self.viewport_width, self.viewport_height, &self.config) {
            Ok(report) => report,
            Err(LayoutError::DegenerateInput { items }) => {
                tracing::warn!("Nothing to lay out: {} item(s) with zero total weight", items);
                let coverage = Coverage::of(&items_from_products(products), self.config.balance_tolerance);
                ShelfReport::placeholder(coverage, self.viewport_width, self.viewport_height)
            }
            Err(e) => {
                self.fail(e.to_string());
                return Err(e.into());
            }
        };

        self.timer = None;
        self.phase = AnalysisPhase::Done;
        self.products = products.to_vec();
        Ok(self.report.insert(report))
    }

    /// Abort the run with an error message for the display layer.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!("Analysis failed: {}", message);
        self.timer = None;
        self.phase = AnalysisPhase::Idle;
        self.last_error = Some(message);
    }

    /// Drop an in-flight run without a report.
    pub fn cancel(&mut self) {
        if self.phase.is_busy() {
            tracing::info!("Analysis cancelled");
            self.timer = None;
            self.phase = AnalysisPhase::Idle;
        }
    }

    /// Back to a clean Idle state, discarding the report.
    pub fn reset(&mut self) {
        self.timer = None;
        self.report = None;
        self.products.clear();
        self.last_error = None;
        self.phase = AnalysisPhase::Idle;
    }

    /// Handle viewport resize; an existing report is laid out again.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SessionError> {
        self.viewport_width = width;
        self.viewport_height = height;
        if self.phase != AnalysisPhase::Done {
            return Ok(());
        }
        if self.report.as_ref().is_some_and(|report| !report.is_empty()) {
            self.report = Some(build_report(&self.products, width, height, &self.config)?);
        }
        Ok(())
    }
}
