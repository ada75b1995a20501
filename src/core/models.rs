//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness:
//! the loaded configuration (scripts, test cases, execution context), the
//! result of a single process invocation, and the classified outcome of a
//! test case.
//!
//! 此模块定义了整个测试工具中使用的核心数据结构：
//! 已加载的配置（脚本、测试用例、执行上下文）、单次进程调用的结果，
//! 以及测试用例的分类结果。

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A single input / expected-output pair.
/// 单个输入 / 期望输出对。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCase {
    /// Text written to the script's standard input / 写入脚本标准输入的文本
    pub input: String,
    /// Expected standard output / 期望的标准输出
    pub output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// The input with trailing whitespace removed, as fed to the script.
    /// 去除尾部空白后的输入，即实际传给脚本的内容。
    pub fn trimmed_input(&self) -> &str {
        self.input.trim_end()
    }

    /// The expected output with trailing whitespace removed.
    /// 去除尾部空白后的期望输出。
    pub fn trimmed_output(&self) -> &str {
        self.output.trim_end()
    }
}

/// One runnable unit: the per-case `run` command plus optional one-shot
/// `build` and `clean` steps.
///
/// 一个可运行单元：每个用例执行的 `run` 命令，以及可选的一次性
/// `build` 和 `clean` 步骤。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSpec {
    /// Optional display name. Falls back to the `run` command.
    /// 可选的显示名称。未设置时使用 `run` 命令。
    pub name: Option<String>,
    /// Command invoked once per test case. Never empty.
    /// 每个测试用例调用一次的命令。不能为空。
    pub run: String,
    /// Command run once before any test case.
    /// 在所有测试用例之前运行一次的命令。
    pub build: Option<String>,
    /// Command run once after all test cases.
    /// 在所有测试用例之后运行一次的命令。
    pub clean: Option<String>,
}

impl ScriptSpec {
    /// A script with only a `run` command.
    pub fn from_run(run: impl Into<String>) -> Self {
        Self {
            name: None,
            run: run.into(),
            build: None,
            clean: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.run)
    }
}

/// Timeout and working-directory policy for `run` invocations.
///
/// `ExecutionContext::default()` (no timeout, inherited working directory) is
/// the context used for `build` and `clean` steps.
///
/// `run` 调用的超时和工作目录策略。
/// `ExecutionContext::default()`（无超时、继承工作目录）用于 `build` 和 `clean` 步骤。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub timeout: Option<Duration>,
    pub workdir: Option<PathBuf>,
}

/// The fully normalized configuration. Built once, read-only afterwards.
/// 完全规范化的配置。只构建一次，之后只读。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scripts: Vec<ScriptSpec>,
    pub tests: Vec<TestCase>,
    pub context: ExecutionContext,
}

/// Captured result of a process that ran to completion.
/// 运行完成的进程的捕获结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code. Processes killed by a signal report `128 + signal` on Unix.
    /// 退出码。在 Unix 上被信号终止的进程报告 `128 + signal`。
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed_ms: u64,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Outcome of a single process invocation.
/// 单次进程调用的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process exited before the deadline / 进程在截止时间前退出
    Exited(ExecutionResult),
    /// The deadline elapsed and the process was killed / 超时，进程已被终止
    TimedOut { limit: Duration },
}

impl ProcessOutcome {
    /// Elapsed milliseconds for reporting. A timeout counts as the full limit.
    /// 用于报告的耗时（毫秒）。超时按完整时限计算。
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            ProcessOutcome::Exited(result) => result.elapsed_ms,
            ProcessOutcome::TimedOut { limit } => limit.as_millis() as u64,
        }
    }
}

/// Classified result of running one test case.
/// 运行单个测试用例的分类结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Zero exit and matching output / 退出码为零且输出匹配
    Pass,
    /// Zero exit but the trimmed output differs / 退出码为零但输出不同
    Fail { expected: String, actual: String },
    /// Non-zero exit, or the process could not be started (`exit_code` is `None`).
    /// 非零退出，或进程无法启动（此时 `exit_code` 为 `None`）。
    RuntimeError {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// The process exceeded the configured timeout / 进程超出了配置的超时时间
    Timeout { limit: Duration },
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

/// Everything the presenter needs to render one test case.
/// 呈现器渲染单个测试用例所需的全部信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// 1-based position in the test list / 在测试列表中的位置（从 1 开始）
    pub index: usize,
    /// Trimmed input that was fed to the script / 传给脚本的已修剪输入
    pub input: String,
    pub outcome: CaseOutcome,
    pub elapsed_ms: u64,
}

/// A failed `build` or `clean` step.
/// 失败的 `build` 或 `clean` 步骤。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub command: String,
    /// `None` when the command could not be started / 命令无法启动时为 `None`
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// How a script's evaluation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    /// All test cases were run / 所有测试用例均已运行
    Completed,
    /// The build step failed, no test case was run / 构建失败，未运行任何测试用例
    BuildFailed,
}

/// Per-script tally produced after all of its cases were processed.
/// 处理完脚本的所有用例后生成的统计结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSummary {
    pub name: String,
    pub status: ScriptStatus,
    pub passed: usize,
    pub total: usize,
    pub elapsed_ms: u64,
}

impl ScriptSummary {
    /// Total elapsed time in seconds. Millisecond input keeps it at three decimals.
    /// 总耗时（秒）。以毫秒累计，因此精度为三位小数。
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    pub fn all_passed(&self) -> bool {
        self.status == ScriptStatus::Completed && self.passed == self.total
    }
}

impl fmt::Display for ScriptSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} passed in {:.3}s",
            self.name,
            self.passed,
            self.total,
            self.elapsed_secs()
        )
    }
}

/// Totals over every script of a run.
/// 一次运行中所有脚本的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scripts: Vec<ScriptSummary>,
}

impl RunSummary {
    /// `true` if any script failed to build or has a non-passing case.
    /// 如果任何脚本构建失败或存在未通过的用例，则返回 `true`。
    pub fn has_failures(&self) -> bool {
        self.scripts.iter().any(|s| !s.all_passed())
    }

    pub fn passed(&self) -> usize {
        self.scripts.iter().map(|s| s.passed).sum()
    }

    pub fn total(&self) -> usize {
        self.scripts.iter().map(|s| s.total).sum()
    }
}
