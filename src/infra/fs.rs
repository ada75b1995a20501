//! # File System Operations Module / 文件系统操作模块
//!
//! Path helpers used while loading the configuration: locating the
//! configuration's directory and resolving the working directory.
//!
//! 加载配置时使用的路径辅助函数：定位配置文件所在目录并解析工作目录。

use std::io;
use std::path::{Path, PathBuf};

/// Returns the absolute directory containing the configuration file.
///
/// # Arguments
/// * `config_path` - Path to the configuration file, absolute or relative to the current directory
///
/// # Returns
/// The absolute parent directory. No file system access is performed.
pub fn config_dir(config_path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(config_path)?;
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}

/// Resolves a configured working directory.
/// A leading `~` is expanded; relative paths are taken relative to `base_dir`.
///
/// 解析配置的工作目录。
/// 会展开开头的 `~`；相对路径以 `base_dir` 为基准。
pub fn resolve_workdir(base_dir: &Path, raw: &str) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    let path = Path::new(expanded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
