//! # Configuration Module / 配置模块
//!
//! Loads the harness configuration document and normalizes it into a
//! [`Config`]. The document may be YAML, TOML or JSON; all three are read into
//! one untyped value tree first and then deserialized into the same raw
//! structures, so validation and error messages are the same regardless of
//! format.
//!
//! 加载测试工具的配置文档并将其规范化为 [`Config`]。
//! 文档可以是 YAML、TOML 或 JSON；三者都会先被读入同一棵无类型的值树，
//! 再反序列化为相同的原始结构，因此无论格式如何，校验和错误信息都是一致的。
//!
//! ```yaml
//! script:
//!   - python3 main.py
//!   - run: ./main
//!     build: gcc -O2 -o main main.c
//!     clean: rm -f main
//! tests:
//!   - input: "1 2"
//!     output: "3"
//! context:
//!   timeout: 2
//!   workdir: ./solutions
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::error::{ConfigError, Result};
use crate::core::models::{Config, ExecutionContext, ScriptSpec, TestCase};
use crate::infra;

/// Document formats accepted for the configuration file.
/// 配置文件接受的文档格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Picks the format from the file extension. Anything that is not
    /// `.toml` or `.json` is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    fn parse(self, text: &str) -> Result<Value> {
        let parsed = match self {
            ConfigFormat::Yaml => serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str::<Value>(text).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            format: self.name(),
            message,
        })
    }
}

/// The document as written, before any check serde cannot express.
/// An explicit null is treated the same as an absent key.
///
/// 按原样书写的文档，尚未进行 serde 无法表达的检查。
/// 显式的 null 与缺失的键同等对待。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    script: Option<RawScripts>,
    tests: Option<Vec<TestCase>>,
    context: Option<RawContext>,
}

/// The `context` mapping as written.
/// 按原样书写的 `context` 映射。
#[derive(Debug, Default, Deserialize)]
#[serde(default, expecting = "a mapping with optional `timeout` and `workdir`")]
struct RawContext {
    timeout: Option<i64>,
    workdir: Option<String>,
}

/// A single `script` entry as written in the document.
/// 文档中所写的单个 `script` 条目。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, expecting = "a command string or a mapping with `run`")]
pub enum RawScript {
    /// A bare command string, shorthand for `{ run: <command> }`.
    Command(String),
    /// A mapping with optional lifecycle steps. `run` is still unchecked here.
    Detailed {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        run: Option<String>,
        #[serde(default)]
        build: Option<String>,
        #[serde(default)]
        clean: Option<String>,
    },
}

/// The `script` field: either one entry or an ordered sequence of entries.
/// `script` 字段：单个条目或有序的条目序列。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
    untagged,
    expecting = "a command string, a mapping with `run`, or a sequence of those"
)]
pub enum RawScripts {
    // Tried first so a sequence is never read as a mapping's fields.
    Many(Vec<RawScript>),
    One(RawScript),
}

impl RawScripts {
    /// Normalizes into the ordered list of scripts the evaluator runs.
    /// 规范化为评估器运行的有序脚本列表。
    pub fn normalize(self) -> Result<Vec<ScriptSpec>> {
        match self {
            RawScripts::One(script) => Ok(vec![script.normalize("script")?]),
            RawScripts::Many(scripts) => {
                if scripts.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        field: "script".to_string(),
                        message: "must list at least one script".to_string(),
                    });
                }
                scripts
                    .into_iter()
                    .enumerate()
                    .map(|(i, script)| script.normalize(&format!("script[{i}]")))
                    .collect()
            }
        }
    }
}

impl RawScript {
    fn normalize(self, field: &str) -> Result<ScriptSpec> {
        match self {
            RawScript::Command(run) => Ok(ScriptSpec::from_run(non_blank(run, field)?)),
            RawScript::Detailed {
                name,
                run,
                build,
                clean,
            } => {
                let run_field = format!("{field}.run");
                let run = run.ok_or_else(|| ConfigError::MissingField {
                    field: run_field.clone(),
                })?;
                Ok(ScriptSpec {
                    name: name.filter(|n| !n.trim().is_empty()),
                    run: non_blank(run, &run_field)?,
                    build: build
                        .map(|b| non_blank(b, &format!("{field}.build")))
                        .transpose()?,
                    clean: clean
                        .map(|c| non_blank(c, &format!("{field}.clean")))
                        .transpose()?,
                })
            }
        }
    }
}

impl RawContext {
    fn normalize(self, base_dir: &Path) -> Result<ExecutionContext> {
        let timeout = match self.timeout {
            None => None,
            Some(secs) if secs > 0 => Some(Duration::from_secs(secs.unsigned_abs())),
            Some(secs) => {
                return Err(ConfigError::InvalidValue {
                    field: "context.timeout".to_string(),
                    message: format!("must be a positive number of seconds, got {secs}"),
                });
            }
        };

        let workdir = match self.workdir {
            Some(raw) => {
                let resolved = infra::fs::resolve_workdir(base_dir, &raw);
                if !infra::fs::is_directory(&resolved) {
                    return Err(ConfigError::InvalidValue {
                        field: "context.workdir".to_string(),
                        message: format!("directory does not exist: {}", resolved.display()),
                    });
                }
                resolved
            }
            None => base_dir.to_path_buf(),
        };

        Ok(ExecutionContext {
            timeout,
            workdir: Some(workdir),
        })
    }
}

/// Reads and normalizes the configuration file at `path`.
///
/// This is the only place the harness reads a file. An omitted
/// `context.workdir` resolves to the directory containing `path`.
///
/// 读取并规范化 `path` 处的配置文件。
/// 这是测试工具唯一读取文件的地方。省略 `context.workdir` 时，
/// 它解析为包含 `path` 的目录。
pub fn load_config(path: &Path) -> Result<Config> {
    let read_error = |source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let text = fs::read_to_string(path).map_err(read_error)?;
    let base_dir = infra::fs::config_dir(path).map_err(read_error)?;
    parse_config(&text, ConfigFormat::from_path(path), &base_dir)
}

/// Parses configuration text. `base_dir` anchors the default and relative
/// working directories.
///
/// 解析配置文本。`base_dir` 是默认工作目录和相对工作目录的基准。
pub fn parse_config(text: &str, format: ConfigFormat, base_dir: &Path) -> Result<Config> {
    let raw = match format.parse(text)? {
        // An empty YAML document parses as null
        Value::Null => RawConfig::default(),
        document @ Value::Object(_) => {
            serde_path_to_error::deserialize(document).map_err(field_error)?
        }
        _ => {
            return Err(ConfigError::InvalidType {
                field: "(document)".to_string(),
                message: "the document must be a mapping".to_string(),
            });
        }
    };

    let scripts = raw
        .script
        .ok_or_else(|| ConfigError::MissingField {
            field: "script".to_string(),
        })?
        .normalize()?;
    let tests = raw.tests.ok_or_else(|| ConfigError::MissingField {
        field: "tests".to_string(),
    })?;
    let context = raw.context.unwrap_or_default().normalize(base_dir)?;

    Ok(Config {
        scripts,
        tests,
        context,
    })
}

/// Turns a deserialization error into a [`ConfigError`] naming the field.
fn field_error(err: serde_path_to_error::Error<serde_json::Error>) -> ConfigError {
    let path = err.path().to_string();
    let message = err.into_inner().to_string();

    // serde reports a missing field at its parent, e.g. `tests[1]`
    let missing = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next());
    match missing {
        Some(name) => ConfigError::MissingField {
            field: format!("{path}.{name}"),
        },
        None => ConfigError::InvalidType {
            field: path,
            message,
        },
    }
}

fn non_blank(command: String, field: &str) -> Result<String> {
    if command.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "command must not be empty".to_string(),
        });
    }
    Ok(command)
}
