//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module drives the build → cases → clean lifecycle of each script,
//! classifies every test case and hands the results to a [`Reporter`] as soon
//! as they are known.
//!
//! 此模块驱动每个脚本的 构建 → 用例 → 清理 生命周期，
//! 对每个测试用例进行分类，并在结果产生后立即交给 [`Reporter`]。

use anyhow::Result;

use crate::{
    core::models::{
        CaseOutcome, CaseReport, Config, ExecutionContext, ProcessOutcome, RunSummary,
        ScriptSpec, ScriptStatus, ScriptSummary, StepFailure, TestCase,
    },
    infra::command,
    reporting::Reporter,
};

/// Classifies a finished invocation against the expected output.
///
/// Only a zero exit whose stdout equals the expected output, both with
/// trailing whitespace trimmed, is a pass.
///
/// 根据期望输出对已完成的调用进行分类。
/// 只有退出码为零且 stdout 与期望输出（均去除尾部空白后）完全相等时才算通过。
pub fn classify(case: &TestCase, outcome: &ProcessOutcome) -> CaseOutcome {
    match outcome {
        ProcessOutcome::TimedOut { limit } => CaseOutcome::Timeout { limit: *limit },
        ProcessOutcome::Exited(result) if !result.success() => CaseOutcome::RuntimeError {
            exit_code: Some(result.exit_code),
            stderr: result.stderr.clone(),
        },
        ProcessOutcome::Exited(result) => {
            let actual = result.stdout.trim_end();
            let expected = case.trimmed_output();
            if actual == expected {
                CaseOutcome::Pass
            } else {
                CaseOutcome::Fail {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                }
            }
        }
    }
}

/// Runs one test case and returns its report.
///
/// # Arguments
/// * `run` - The script's `run` command
/// * `index` - 1-based position of the case, used for reporting
/// * `case` - The test case; its trimmed input is fed to stdin
/// * `context` - Timeout and working directory for the invocation
pub async fn run_test_case(
    run: &str,
    index: usize,
    case: &TestCase,
    context: &ExecutionContext,
) -> CaseReport {
    let input = case.trimmed_input();
    let (outcome, elapsed_ms) = match command::run_command(run, input, context).await {
        Ok(process) => (classify(case, &process), process.elapsed_ms()),
        Err(e) => {
            tracing::debug!(run, index, error = %e, "test case could not be started");
            (
                CaseOutcome::RuntimeError {
                    exit_code: None,
                    stderr: format!("{e:#}"),
                },
                0,
            )
        }
    };

    CaseReport {
        index,
        input: input.to_string(),
        outcome,
        elapsed_ms,
    }
}

/// Runs a one-shot `build` or `clean` step with the default context.
/// Returns `None` on a zero exit.
async fn run_step(command: &str) -> Option<StepFailure> {
    let failure = |exit_code, stderr| {
        Some(StepFailure {
            command: command.to_string(),
            exit_code,
            stderr,
        })
    };

    match command::run_command(command, "", &ExecutionContext::default()).await {
        Ok(ProcessOutcome::Exited(result)) if result.success() => None,
        Ok(ProcessOutcome::Exited(result)) => failure(Some(result.exit_code), result.stderr),
        Ok(ProcessOutcome::TimedOut { limit }) => {
            failure(None, format!("timed out after {}s", limit.as_secs()))
        }
        Err(e) => failure(None, format!("{e:#}")),
    }
}

/// Evaluates one script against every test case.
///
/// A failing build aborts this script only: no case runs, clean is skipped and
/// the returned summary has [`ScriptStatus::BuildFailed`]. A failing clean is
/// reported and leaves the tally unchanged.
///
/// 针对所有测试用例评估一个脚本。
/// 构建失败只会中止当前脚本：不运行任何用例、跳过清理，返回的摘要状态为
/// [`ScriptStatus::BuildFailed`]。清理失败只会被报告，不影响统计。
///
/// # Returns
/// The script summary, or an error if the reporter could not write.
pub async fn evaluate_script(
    script: &ScriptSpec,
    tests: &[TestCase],
    context: &ExecutionContext,
    reporter: &mut dyn Reporter,
) -> Result<ScriptSummary> {
    let name = script.display_name().to_string();

    if let Some(build) = &script.build {
        tracing::debug!(script = name.as_str(), build = build.as_str(), "running build step");
        reporter.build_started(script, build)?;
        if let Some(failure) = run_step(build).await {
            tracing::debug!(script = name.as_str(), exit_code = ?failure.exit_code, "build failed");
            reporter.build_failed(script, &failure)?;
            return Ok(ScriptSummary {
                name,
                status: ScriptStatus::BuildFailed,
                passed: 0,
                total: tests.len(),
                elapsed_ms: 0,
            });
        }
    }

    let mut passed = 0;
    let mut elapsed_ms = 0;
    for (i, case) in tests.iter().enumerate() {
        let report = run_test_case(&script.run, i + 1, case, context).await;
        if report.outcome.is_pass() {
            passed += 1;
        }
        elapsed_ms += report.elapsed_ms;
        reporter.case_finished(&report)?;
    }

    if let Some(clean) = &script.clean {
        tracing::debug!(script = name.as_str(), clean = clean.as_str(), "running clean step");
        if let Some(failure) = run_step(clean).await {
            tracing::warn!(
                script = name.as_str(),
                exit_code = ?failure.exit_code,
                "clean step failed"
            );
            reporter.clean_failed(script, &failure)?;
        }
    }

    let summary = ScriptSummary {
        name,
        status: ScriptStatus::Completed,
        passed,
        total: tests.len(),
        elapsed_ms,
    };
    reporter.summary(&summary)?;
    Ok(summary)
}

/// Evaluates every script of the configuration in order, one full
/// build/cases/clean cycle at a time.
///
/// 按顺序评估配置中的每个脚本，每次完成一个完整的 构建/用例/清理 周期。
pub async fn run_config(config: &Config, reporter: &mut dyn Reporter) -> Result<RunSummary> {
    let total = config.scripts.len();
    let mut scripts = Vec::with_capacity(total);

    for (i, script) in config.scripts.iter().enumerate() {
        reporter.script_started(i + 1, total, script)?;
        let summary = evaluate_script(script, &config.tests, &config.context, reporter).await?;
        tracing::debug!(%summary, "script finished");
        scripts.push(summary);
    }

    Ok(RunSummary { scripts })
}
