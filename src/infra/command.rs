//! # Command Execution Module / 命令执行模块
//!
//! Runs a single command string as a child process: feeds its standard input,
//! captures standard output and standard error, and enforces the optional
//! timeout and working directory of an [`ExecutionContext`].
//!
//! 将单个命令字符串作为子进程运行：写入其标准输入，捕获标准输出和标准错误，
//! 并应用 [`ExecutionContext`] 中可选的超时和工作目录。

use anyhow::{Context, Result, anyhow};
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};

use crate::core::models::{ExecutionContext, ExecutionResult, ProcessOutcome};

/// Splits a command string into a program and its arguments.
///
/// Words are split with POSIX shell rules, then `~` and defined environment
/// variables are expanded inside each word. Undefined variables are left as
/// written so that e.g. `awk '{print $1}'` reaches the program intact.
///
/// 按 POSIX shell 规则将命令字符串拆分为程序和参数，
/// 然后在每个词中展开 `~` 和已定义的环境变量。未定义的变量保持原样。
pub fn parse_command(command: &str) -> Result<(String, Vec<String>)> {
    let words = shlex::split(command)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", command))?;

    let mut words = words.iter().map(|word| expand_word(word));
    let program = words
        .next()
        .ok_or_else(|| anyhow!("Empty command after parsing: {:?}", command))?;

    Ok((program, words.collect()))
}

fn expand_word(word: &str) -> String {
    shellexpand::full_with_context_no_errors(
        word,
        || std::env::var("HOME").ok(),
        |var| std::env::var(var).ok(),
    )
    .into_owned()
}

/// Runs `command` with `input` on its standard input.
///
/// The input is written in full and the pipe is closed, while stdout and
/// stderr are drained concurrently. If `context.timeout` elapses first the
/// child is killed and [`ProcessOutcome::TimedOut`] is returned.
///
/// # Arguments
/// * `command` - The command string, e.g. `python3 main.py`
/// * `input` - Text written to the child's standard input
/// * `context` - Timeout and working directory for this invocation
///
/// # Returns
/// The process outcome, or an error if the command could not be parsed or
/// spawned (for example a missing program).
///
/// 运行 `command`，并将 `input` 写入其标准输入。
/// 输入会被完整写入并关闭管道，同时并发读取 stdout 和 stderr。
/// 如果 `context.timeout` 先到期，子进程会被终止并返回 [`ProcessOutcome::TimedOut`]。
pub async fn run_command(
    command: &str,
    input: &str,
    context: &ExecutionContext,
) -> Result<ProcessOutcome> {
    let (program, args) = parse_command(command)?;

    let mut cmd = Command::new(&program);
    cmd.args(&args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(workdir) = &context.workdir {
        cmd.current_dir(workdir);
    }

    tracing::debug!(
        command,
        workdir = ?context.workdir,
        timeout = ?context.timeout,
        "spawning process"
    );

    let start_time = Instant::now();
    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn command: {command}"))?;

    let stdin = child.stdin.take();
    let execution = async {
        let ((), output) = tokio::join!(
            write_stdin(stdin, input.as_bytes()),
            child.wait_with_output()
        );
        output
    };

    let output = match context.timeout {
        Some(limit) => match tokio::time::timeout(limit, execution).await {
            Ok(output) => output,
            Err(_) => {
                // Dropping the future drops the child, which kills it.
                tracing::debug!(command, ?limit, "process timed out and was killed");
                return Ok(ProcessOutcome::TimedOut { limit });
            }
        },
        None => execution.await,
    }
    .with_context(|| format!("Failed to wait for command: {command}"))?;

    let elapsed_ms = (start_time.elapsed().as_secs_f64() * 1000.0).round() as u64;
    let exit_code = exit_code(output.status);
    tracing::debug!(command, exit_code, elapsed_ms, "process exited");

    Ok(ProcessOutcome::Exited(ExecutionResult {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        elapsed_ms,
    }))
}

async fn write_stdin(stdin: Option<ChildStdin>, input: &[u8]) {
    let Some(mut stdin) = stdin else {
        return;
    };
    // A child that exits without reading its input closes the pipe early.
    if let Err(e) = stdin.write_all(input).await {
        tracing::debug!(error = %e, "could not write the whole input to stdin");
    }
    if let Err(e) = stdin.shutdown().await {
        tracing::debug!(error = %e, "could not close stdin");
    }
}

/// Maps an exit status to a numeric code. Signals become `128 + signal` on Unix.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}
