//! # Reporting Module Unit Tests / Reporting 模块单元测试
//!
//! Renders outcomes through `ConsoleReporter` into an in-memory buffer and
//! checks the text, and checks the dispatch of `CollectingReporter`.
//!
//! 通过 `ConsoleReporter` 将结果渲染到内存缓冲区并检查文本，
//! 同时检查 `CollectingReporter` 的分发。

use script_harness::models::{
    CaseOutcome, CaseReport, ScriptSpec, ScriptStatus, ScriptSummary, StepFailure,
};
use script_harness::reporting::{CollectingReporter, ConsoleReporter, ReportEvent, Reporter};
use std::time::Duration;

fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>)) -> String {
    colored::control::set_override(false);
    let mut reporter = ConsoleReporter::new(Vec::new());
    f(&mut reporter);
    String::from_utf8(reporter.into_inner()).unwrap()
}

fn report(index: usize, input: &str, outcome: CaseOutcome, elapsed_ms: u64) -> CaseReport {
    CaseReport {
        index,
        input: input.to_string(),
        outcome,
        elapsed_ms,
    }
}

#[cfg(test)]
mod console_tests {
    use super::*;

    #[test]
    fn test_pass_is_a_single_line() {
        let output = render(|r| {
            r.case_finished(&report(1, "hello", CaseOutcome::Pass, 12)).unwrap();
        });

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("PASS"));
        assert!(output.contains("Test Case 1 (12ms)"));
        assert!(!output.contains("Input"));
    }

    #[test]
    fn test_fail_renders_input_expected_and_actual() {
        let outcome = CaseOutcome::Fail {
            expected: "ab".to_string(),
            actual: "ba".to_string(),
        };
        let output = render(|r| {
            r.case_finished(&report(2, "ab", outcome, 5)).unwrap();
        });

        assert!(output.contains("FAIL"));
        assert!(output.contains("Test Case 2 (5ms)"));
        assert!(output.contains("Input"));
        assert!(output.contains("Expected"));
        assert!(output.contains("Actual"));
        assert!(output.contains("ba"));
        assert!(output.contains(&"-".repeat(60)));
    }

    #[test]
    fn test_multi_line_values_are_indented() {
        let outcome = CaseOutcome::Fail {
            expected: "1\n2".to_string(),
            actual: "1\n3".to_string(),
        };
        let output = render(|r| {
            r.case_failed(&report(1, "x", outcome, 1)).unwrap();
        });

        assert!(output.lines().any(|line| line.trim() == "3" && line.starts_with("    ")));
    }

    #[test]
    fn test_empty_actual_output_is_marked() {
        let outcome = CaseOutcome::Fail {
            expected: "something".to_string(),
            actual: String::new(),
        };
        let output = render(|r| {
            r.case_failed(&report(1, "x", outcome, 1)).unwrap();
        });

        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_runtime_error_shows_stderr_and_exit_code() {
        let outcome = CaseOutcome::RuntimeError {
            exit_code: Some(3),
            stderr: "Traceback: boom\n".to_string(),
        };
        let output = render(|r| {
            r.case_finished(&report(4, "1 2", outcome, 30)).unwrap();
        });

        assert!(output.contains("Test Case 4 (30ms)"));
        assert!(output.contains("Exit code"));
        assert!(output.contains("Error"));
        assert!(output.contains("Traceback: boom"));
        assert!(!output.contains("Expected"));
    }

    #[test]
    fn test_timeout_shows_the_limit() {
        let outcome = CaseOutcome::Timeout {
            limit: Duration::from_secs(2),
        };
        let output = render(|r| {
            r.case_finished(&report(1, "x", outcome, 2000)).unwrap();
        });

        assert!(output.contains("Test Case 1 (2000ms)"));
        assert!(output.contains("Timed out after 2s"));
    }

    #[test]
    fn test_summary_lines() {
        let summary = ScriptSummary {
            name: "cat".to_string(),
            status: ScriptStatus::Completed,
            passed: 1,
            total: 2,
            elapsed_ms: 25,
        };
        let output = render(|r| r.summary(&summary).unwrap());

        assert!(output.contains("Tests:"));
        assert!(output.contains("1 passed, 2 total"));
        assert!(output.contains("Time:"));
        assert!(output.contains("0.025s"));
    }

    #[test]
    fn test_build_started_names_the_command() {
        let output = render(|r| {
            r.build_started(&ScriptSpec::from_run("./main"), "gcc -o main main.c")
                .unwrap();
        });

        assert_eq!(output, "Building: gcc -o main main.c\n");
    }

    #[test]
    fn test_build_failure_banner() {
        let failure = StepFailure {
            command: "gcc main.c".to_string(),
            exit_code: Some(1),
            stderr: "main.c:1: error".to_string(),
        };
        let output = render(|r| {
            r.build_failed(&ScriptSpec::from_run("./a.out"), &failure).unwrap();
        });

        assert!(output.contains("Build Failed"));
        assert!(output.contains("gcc main.c"));
        assert!(output.contains("main.c:1: error"));
    }

    #[test]
    fn test_clean_failure_without_exit_code() {
        let failure = StepFailure {
            command: "missing-tool".to_string(),
            exit_code: None,
            stderr: "No such file or directory".to_string(),
        };
        let output = render(|r| {
            r.clean_failed(&ScriptSpec::from_run("cat"), &failure).unwrap();
        });

        assert!(output.contains("Clean Failed"));
        assert!(output.contains("not started"));
    }

    #[test]
    fn test_script_header_uses_display_name() {
        let script = ScriptSpec {
            name: Some("python solution".to_string()),
            run: "python3 main.py".to_string(),
            build: None,
            clean: None,
        };
        let output = render(|r| r.script_started(2, 3, &script).unwrap());

        assert!(output.contains("Script 2/3:"));
        assert!(output.contains("python solution"));
    }
}

#[cfg(test)]
mod collecting_tests {
    use super::*;

    #[test]
    fn test_case_finished_records_both_kinds() {
        let mut reporter = CollectingReporter::new();
        let failed = CaseOutcome::Fail {
            expected: "a".to_string(),
            actual: "b".to_string(),
        };

        reporter.case_finished(&report(1, "a", CaseOutcome::Pass, 1)).unwrap();
        reporter.case_finished(&report(2, "a", failed.clone(), 1)).unwrap();

        let cases = reporter.cases();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].outcome, CaseOutcome::Pass);
        assert_eq!(cases[1].outcome, failed);
        assert!(reporter.summaries().is_empty());
        assert!(matches!(reporter.events()[0], ReportEvent::Case(_)));
    }

    #[test]
    fn test_build_started_is_recorded() {
        let mut reporter = CollectingReporter::new();
        reporter
            .build_started(&ScriptSpec::from_run("./main"), "make")
            .unwrap();

        assert_eq!(
            reporter.events(),
            [ReportEvent::BuildStarted {
                command: "make".to_string()
            }]
        );
    }
}
