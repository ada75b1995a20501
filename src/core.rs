//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the harness:
//! data models, configuration loading and the test evaluator.
//!
//! 此模块包含测试工具的核心功能：
//! 数据模型、配置加载和测试评估器。

pub mod config;
pub mod error;
pub mod execution;
pub mod models;

// Re-exports
pub use config::load_config;
pub use error::ConfigError;
pub use execution::{evaluate_script, run_config};
pub use models::{CaseOutcome, Config, ScriptSpec, TestCase};
