//! Line-oriented operation scripts for the `commonkv` CLI.
//!
//! One operation per line:
//!
//! ```text
//! set KEY JSON        replace the values under KEY
//! add KEY JSON        append values under KEY
//! get KEY             fetch one value
//! get-all KEY         fetch every value
//! features            list store features
//! can-do CMD          ask the commands feature about CMD
//! cmd NAME [JSON]     run a command through the commands feature
//! close               close the store
//! ```
//!
//! A JSON array is taken as the value list; any other JSON value is a
//! single value. Blank lines and lines starting with `#` are skipped.

use std::io::Write;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use commonkv::kv::value_list;
use commonkv::{CommonKv, Feature};

const COMMANDS_FEATURE: &str = "commands";

/// Errors raised while parsing or running a script.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode result: {0}")]
    Encode(serde_json::Error),
}

/// A single parsed script operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Set { key: String, values: Vec<Value> },
    Add { key: String, values: Vec<Value> },
    Get { key: String },
    GetAll { key: String },
    Features,
    CanDo { cmd: String },
    Cmd { name: String, payload: Option<Value> },
    Close,
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse(source: &str) -> Result<Vec<Op>, ScriptError> {
    let mut ops = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(op) = parse_line(idx + 1, raw)? {
            ops.push(op);
        }
    }
    Ok(ops)
}

fn parse_line(line: usize, raw: &str) -> Result<Option<Op>, ScriptError> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = split_word(text);
    let op = match word {
        "set" | "add" => {
            let (key, json) = split_word(rest);
            let key = required(line, word, "KEY", key)?;
            let text = required(line, word, "JSON", json)?;
            let values = value_list(parse_json(line, &text)?);
            if word == "set" {
                Op::Set { key, values }
            } else {
                Op::Add { key, values }
            }
        }
        "get" => Op::Get {
            key: single_arg(line, word, "KEY", rest)?,
        },
        "get-all" => Op::GetAll {
            key: single_arg(line, word, "KEY", rest)?,
        },
        "can-do" => Op::CanDo {
            cmd: single_arg(line, word, "CMD", rest)?,
        },
        "cmd" => {
            let (name, json) = split_word(rest);
            let name = required(line, word, "NAME", name)?;
            let payload = if json.is_empty() {
                None
            } else {
                Some(parse_json(line, json)?)
            };
            Op::Cmd { name, payload }
        }
        "features" | "close" => {
            if !rest.is_empty() {
                return Err(ScriptError::Parse {
                    line,
                    message: format!("'{}' takes no arguments", word),
                });
            }
            if word == "features" {
                Op::Features
            } else {
                Op::Close
            }
        }
        other => {
            return Err(ScriptError::Parse {
                line,
                message: format!("unknown operation '{}'", other),
            });
        }
    };

    Ok(Some(op))
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    }
}

fn required(line: usize, op: &str, what: &str, value: &str) -> Result<String, ScriptError> {
    if value.is_empty() {
        return Err(ScriptError::Parse {
            line,
            message: format!("'{}' expects {}", op, what),
        });
    }
    Ok(value.to_string())
}

fn single_arg(line: usize, op: &str, what: &str, rest: &str) -> Result<String, ScriptError> {
    let (arg, extra) = split_word(rest);
    if !extra.is_empty() {
        return Err(ScriptError::Parse {
            line,
            message: format!("'{}' takes only {}", op, what),
        });
    }
    required(line, op, what, arg)
}

fn parse_json(line: usize, text: &str) -> Result<Value, ScriptError> {
    serde_json::from_str(text).map_err(|source| ScriptError::Json { line, source })
}

/// Run `ops` against `store`, writing one JSON line per operation.
///
/// Store and command failures are written as `{"error": ...}` lines and do
/// not stop the run.
pub fn run<W: Write>(store: &mut dyn CommonKv, ops: &[Op], out: &mut W) -> Result<(), ScriptError> {
    for op in ops {
        let line = match execute(store, op) {
            Ok(value) => value,
            Err(message) => {
                tracing::warn!(error = %message, "operation failed");
                json!({ "error": message })
            }
        };
        let encoded = serde_json::to_string(&line).map_err(ScriptError::Encode)?;
        writeln!(out, "{}", encoded)?;
    }
    Ok(())
}

fn execute(store: &mut dyn CommonKv, op: &Op) -> Result<Value, String> {
    match op {
        Op::Set { key, values } => to_json(store.set_value(key, values.clone())),
        Op::Add { key, values } => to_json(store.add_values(key, values.clone())),
        Op::Get { key } => to_json(store.get_value(key)),
        Op::GetAll { key } => to_json(store.get_values(key)),
        Op::Features => to_json(Ok::<_, String>(store.iterate_features().collect::<Vec<_>>())),
        Op::CanDo { cmd } => with_commands(store, |feature| Ok::<_, String>(feature.can_do_cmd(cmd))),
        Op::Cmd { name, payload } => {
            with_commands(store, |feature| feature.do_cmd(name, payload.clone()))
        }
        Op::Close => to_json(store.close()),
    }
}

fn with_commands<T, E, F>(store: &dyn CommonKv, f: F) -> Result<Value, String>
where
    T: Serialize,
    E: std::fmt::Display,
    F: FnOnce(&dyn Feature) -> Result<T, E>,
{
    let feature = store
        .feature(COMMANDS_FEATURE)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Feature '{}' is not available", COMMANDS_FEATURE))?;
    to_json(f(feature.as_ref()))
}

fn to_json<T: Serialize, E: std::fmt::Display>(result: Result<T, E>) -> Result<Value, String> {
    let value = result.map_err(|e| e.to_string())?;
    serde_json::to_value(value).map_err(|e| e.to_string())
}
