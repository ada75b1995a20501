//! # Reporting Module / 报告模块
//!
//! This module defines the [`Reporter`] trait through which the evaluator hands
//! over already-classified outcomes, and two implementations: a colored,
//! localized console presenter and a collecting presenter for silent or
//! programmatic runs.
//!
//! 此模块定义了 [`Reporter`] trait，评估器通过它传递已经分类好的结果，
//! 并提供两种实现：带颜色和本地化的控制台呈现器，以及用于静默或编程式运行的收集呈现器。

pub mod collect;
pub mod console;

use std::io;

use crate::core::models::{CaseReport, ScriptSpec, ScriptSummary, StepFailure};

// Re-export common reporters
pub use collect::{CollectingReporter, ReportEvent};
pub use console::ConsoleReporter;

/// Receives outcomes from the evaluator as they happen.
///
/// Implementations only format; every decision (pass or fail, what counts
/// toward the total) is made before a method is called.
///
/// 在评估器产生结果时接收它们。
/// 实现只负责格式化；所有判断（通过或失败、计入总数的内容）都在调用方法之前完成。
pub trait Reporter {
    /// A script's evaluation is about to begin. `position` is 1-based.
    fn script_started(
        &mut self,
        position: usize,
        total: usize,
        script: &ScriptSpec,
    ) -> io::Result<()>;

    /// The build step is about to run.
    fn build_started(&mut self, script: &ScriptSpec, command: &str) -> io::Result<()>;

    /// The build step exited non-zero; the script's cases will not run.
    fn build_failed(&mut self, script: &ScriptSpec, failure: &StepFailure) -> io::Result<()>;

    /// A test case passed.
    fn case_passed(&mut self, report: &CaseReport) -> io::Result<()>;

    /// A test case failed, errored or timed out.
    fn case_failed(&mut self, report: &CaseReport) -> io::Result<()>;

    /// The clean step exited non-zero. Does not affect the tally.
    fn clean_failed(&mut self, script: &ScriptSpec, failure: &StepFailure) -> io::Result<()>;

    /// All cases of a script were processed.
    fn summary(&mut self, summary: &ScriptSummary) -> io::Result<()>;

    /// Dispatches a finished case to [`Reporter::case_passed`] or [`Reporter::case_failed`].
    fn case_finished(&mut self, report: &CaseReport) -> io::Result<()> {
        if report.outcome.is_pass() {
            self.case_passed(report)
        } else {
            self.case_failed(report)
        }
    }
}
