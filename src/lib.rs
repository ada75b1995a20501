//! # Script Harness Library / Script Harness 库
//!
//! This library provides the core functionality for the `script-harness` tool,
//! a configuration-driven test harness that runs scripts against
//! input / expected-output test cases.
//!
//! 此库为 `script-harness` 工具提供核心功能，
//! 这是一个配置驱动的测试工具，针对 输入 / 期望输出 测试用例运行脚本。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, configuration loading and the test evaluator
//! - `infra` - Process execution, path helpers and logging
//! - `reporting` - The `Reporter` trait and its console / collecting implementations
//! - `cli` - Command-line interface
//!
//! - `core` - 数据模型、配置加载和测试评估器
//! - `infra` - 进程执行、路径辅助和日志
//! - `reporting` - `Reporter` trait 及其控制台 / 收集实现
//! - `cli` - 命令行接口

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::{config, execution, models};

/// Selects the UI language.
///
/// An explicit `requested` language wins; otherwise the system locale is used.
/// The full locale (e.g. "zh-CN") is tried first, then its language part
/// (e.g. "en" from "en-US"), and finally the default "en".
///
/// Returns the locale that was set.
pub fn init_locale(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        locale.as_str()
    } else {
        locale
            .split(['-', '_'])
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
    lang.to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
