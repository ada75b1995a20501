//! Collecting reporter: stores every event in memory instead of printing.

use std::io;

use crate::core::models::{CaseReport, ScriptSpec, ScriptSummary, StepFailure};
use crate::reporting::Reporter;

/// One call received by a [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    ScriptStarted {
        position: usize,
        total: usize,
        name: String,
    },
    BuildStarted { command: String },
    BuildFailed(StepFailure),
    Case(CaseReport),
    CleanFailed(StepFailure),
    Summary(ScriptSummary),
}

/// A silent [`Reporter`] that records events in the order they arrive.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Vec<ReportEvent>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ReportEvent] {
        &self.events
    }

    /// All case reports, across scripts, in emission order.
    pub fn cases(&self) -> Vec<&CaseReport> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Case(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<&ScriptSummary> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ReportEvent::Summary(summary) => Some(summary),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for CollectingReporter {
    fn script_started(
        &mut self,
        position: usize,
        total: usize,
        script: &ScriptSpec,
    ) -> io::Result<()> {
        self.events.push(ReportEvent::ScriptStarted {
            position,
            total,
            name: script.display_name().to_string(),
        });
        Ok(())
    }

    fn build_started(&mut self, _script: &ScriptSpec, command: &str) -> io::Result<()> {
        self.events.push(ReportEvent::BuildStarted {
            command: command.to_string(),
        });
        Ok(())
    }

    fn build_failed(&mut self, _script: &ScriptSpec, failure: &StepFailure) -> io::Result<()> {
        self.events.push(ReportEvent::BuildFailed(failure.clone()));
        Ok(())
    }

    fn case_passed(&mut self, report: &CaseReport) -> io::Result<()> {
        self.events.push(ReportEvent::Case(report.clone()));
        Ok(())
    }

    fn case_failed(&mut self, report: &CaseReport) -> io::Result<()> {
        self.events.push(ReportEvent::Case(report.clone()));
        Ok(())
    }

    fn clean_failed(&mut self, _script: &ScriptSpec, failure: &StepFailure) -> io::Result<()> {
        self.events.push(ReportEvent::CleanFailed(failure.clone()));
        Ok(())
    }

    fn summary(&mut self, summary: &ScriptSummary) -> io::Result<()> {
        self.events.push(ReportEvent::Summary(summary.clone()));
        Ok(())
    }
}
