//! # Console Reporting Module / 控制台报告模块
//!
//! Renders outcomes as colored, localized text. Each case gets one status line;
//! failures are followed by a delimited block with the input, the expected
//! output and what the script actually produced.
//!
//! 将结果渲染为带颜色的本地化文本。每个用例一行状态；
//! 失败的用例后面跟着一个分隔块，包含输入、期望输出以及脚本的实际输出。
//!
//! # Output Format / 输出格式
//! ```text
//! Script 1/1: ./main
//! Building: gcc -O2 -o main main.c
//!  PASS  Test Case 1 (12ms)
//!  FAIL  Test Case 2 (11ms)
//! ------------------------------------------------------------
//!   Input      1 2
//!   Expected   3
//!   Actual     4
//! ------------------------------------------------------------
//!
//! Tests:	1 passed, 2 total
//! Time:	0.023s
//! ```

use colored::*;
use std::io::{self, Write};

use crate::core::models::{CaseOutcome, CaseReport, ScriptSpec, ScriptSummary, StepFailure};
use crate::infra::t;
use crate::reporting::Reporter;

const SEPARATOR_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 10;

/// Writes human-readable reports to any [`Write`] sink, stdout by default.
/// 将人类可读的报告写入任意 [`Write`] 输出，默认为 stdout。
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the sink, e.g. a `Vec<u8>` in tests.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(SEPARATOR_WIDTH).dimmed())
    }

    /// Writes `label` followed by `value`, indenting continuation lines so that
    /// multi-line values stay aligned under the first one.
    fn field(&mut self, label: &str, value: &str, color: Option<Color>) -> io::Result<()> {
        let value = if value.is_empty() {
            t!("report.empty").dimmed().to_string()
        } else {
            value.to_string()
        };
        let indent = " ".repeat(LABEL_WIDTH + 3);

        for (i, line) in value.lines().enumerate() {
            let line = match color {
                Some(color) => line.color(color).to_string(),
                None => line.to_string(),
            };
            if i == 0 {
                let label = format!("{:<width$}", label, width = LABEL_WIDTH);
                writeln!(self.out, "  {} {}", label.bold(), line)?;
            } else {
                writeln!(self.out, "{indent}{line}")?;
            }
        }
        Ok(())
    }

    fn case_line(&mut self, label: ColoredString, report: &CaseReport) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}",
            label,
            t!(
                "report.case_line",
                index = report.index,
                elapsed = report.elapsed_ms
            )
        )
    }

    fn step_failure(&mut self, banner: ColoredString, failure: &StepFailure) -> io::Result<()> {
        writeln!(self.out, "{}", banner)?;
        self.separator()?;
        self.field(&t!("report.command"), &failure.command, None)?;
        let exit = failure
            .exit_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| t!("report.not_started").to_string());
        self.field(&t!("report.exit_code"), &exit, None)?;
        self.field(&t!("report.error"), failure.stderr.trim_end(), Some(Color::Red))?;
        self.separator()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn script_started(
        &mut self,
        position: usize,
        total: usize,
        script: &ScriptSpec,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{} {}",
            t!("report.script_header", position = position, total = total).bold(),
            script.display_name().cyan()
        )
    }

    fn build_started(&mut self, _script: &ScriptSpec, command: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "{}",
            t!("report.build_started", command = command).dimmed()
        )?;
        self.out.flush()
    }

    fn build_failed(&mut self, _script: &ScriptSpec, failure: &StepFailure) -> io::Result<()> {
        self.step_failure(t!("report.build_failed").red().bold(), failure)
    }

    fn case_passed(&mut self, report: &CaseReport) -> io::Result<()> {
        let label = format!(" {} ", t!("report.pass")).white().on_green();
        self.case_line(label, report)
    }

    fn case_failed(&mut self, report: &CaseReport) -> io::Result<()> {
        let label = format!(" {} ", t!("report.fail")).white().on_red();
        self.case_line(label, report)?;

        self.separator()?;
        self.field(&t!("report.input"), &report.input, None)?;
        match &report.outcome {
            CaseOutcome::Fail { expected, actual } => {
                self.field(&t!("report.expected"), expected, Some(Color::Green))?;
                self.field(&t!("report.actual"), actual, Some(Color::Red))?;
            }
            CaseOutcome::RuntimeError { exit_code, stderr } => {
                if let Some(code) = exit_code {
                    self.field(&t!("report.exit_code"), &code.to_string(), None)?;
                }
                self.field(&t!("report.error"), stderr.trim_end(), Some(Color::Red))?;
            }
            CaseOutcome::Timeout { limit } => {
                let message = t!("report.timeout_message", secs = limit.as_secs());
                self.field(&t!("report.error"), &message, Some(Color::Red))?;
            }
            CaseOutcome::Pass => {}
        }
        self.separator()
    }

    fn clean_failed(&mut self, _script: &ScriptSpec, failure: &StepFailure) -> io::Result<()> {
        self.step_failure(t!("report.clean_failed").yellow().bold(), failure)
    }

    fn summary(&mut self, summary: &ScriptSummary) -> io::Result<()> {
        let passed = t!("report.passed_count", count = summary.passed);
        let passed = if summary.all_passed() {
            passed.green()
        } else {
            passed.red()
        };
        writeln!(
            self.out,
            "\n{}\t{}, {}",
            t!("report.tests_label").bold(),
            passed,
            t!("report.total_count", count = summary.total)
        )?;
        writeln!(
            self.out,
            "{}\t{:.3}s",
            t!("report.time_label").bold(),
            summary.elapsed_secs()
        )?;
        self.out.flush()
    }
}
