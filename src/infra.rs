//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the harness,
//! including process execution, path handling and logging setup.
//!
//! 此模块为测试工具提供基础设施服务，
//! 包括进程执行、路径处理和日志初始化。

pub mod command;
pub mod fs;
pub mod logging;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
