use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use commonkv::{StoreConfig, open_store};

mod script;

use script::ScriptError;

/// Scenarios run by `commonkv demo`, each against a fresh store.
const DEMO_SCENARIOS: &[(&str, &str)] = &[
    ("replace", "set foo [1,2,3]\nset foo [4,5,6]\nclose\n"),
    ("append", "set foo [1,2,3]\nadd foo [4,5,6]\nclose\n"),
    ("features", "features\nclose\n"),
    (
        "together",
        "set foo [1,2,3]\nset bar [4,5,6]\nget foo\nget-all bar\ncan-do keys\ncmd keys\nclose\n",
    ),
];

/// CLI-specific errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Library error (wraps all commonkv errors)
    #[error(transparent)]
    Library(#[from] commonkv::Error),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<commonkv::KvError> for AppError {
    fn from(e: commonkv::KvError) -> Self {
        Self::Library(e.into())
    }
}

impl From<commonkv::config::ConfigError> for AppError {
    fn from(e: commonkv::config::ConfigError) -> Self {
        Self::Library(e.into())
    }
}

#[derive(Parser)]
#[command(name = "commonkv")]
#[command(about = "Exercise a CommonKV store from the command line")]
struct Cli {
    /// Store configuration file (TOML); defaults to the in-memory backend
    #[arg(long, global = true, env = "COMMONKV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo scenarios, printing each result as JSON
    Demo,

    /// Execute an operation script against a fresh store
    Exec {
        /// Script file (stdin if not specified)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())?;
    Ok(())
}

fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)?,
        None => StoreConfig::default(),
    };
    tracing::debug!(backend = ?config.backend, "loaded store configuration");

    match cli.command {
        Commands::Demo => {
            for (name, source) in DEMO_SCENARIOS {
                tracing::info!(scenario = *name, "running demo scenario");
                writeln!(out, "{}", json!({ "scenario": name }))?;
                let ops = script::parse(source)?;
                let mut store = open_store(&config)?;
                script::run(store.as_mut(), &ops, out)?;
            }
        }
        Commands::Exec { file } => {
            let source = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let ops = script::parse(&source)?;
            let mut store = open_store(&config)?;
            script::run(store.as_mut(), &ops, out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenarios_parse() {
        for (name, source) in DEMO_SCENARIOS {
            assert!(script::parse(source).is_ok(), "scenario {} failed to parse", name);
        }
    }

    #[test]
    fn test_cli_parses_exec_with_file() {
        let cli = Cli::try_parse_from(["commonkv", "exec", "--file", "ops.txt"]).unwrap();
        match cli.command {
            Commands::Exec { file } => assert_eq!(file, Some(PathBuf::from("ops.txt"))),
            Commands::Demo => panic!("expected exec"),
        }
    }

    fn json_lines(out: Vec<u8>) -> anyhow::Result<Vec<serde_json::Value>> {
        let text = String::from_utf8(out)?;
        let lines = text
            .lines()
            .map(serde_json::from_str)
            .collect::<Result<Vec<serde_json::Value>, _>>()?;
        Ok(lines)
    }

    #[test]
    fn test_demo_prints_only_json_lines() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["commonkv", "demo"])?;
        let mut out = Vec::new();
        run(cli, &mut out)?;

        let lines = json_lines(out)?;
        let scenarios: Vec<&serde_json::Value> = lines
            .iter()
            .filter_map(|line| line.get("scenario"))
            .collect();
        assert_eq!(
            scenarios,
            vec![
                &json!("replace"),
                &json!("append"),
                &json!("features"),
                &json!("together")
            ]
        );
        assert!(lines.contains(&json!({"cmd": "keys", "payload": null, "data": ["bar", "foo"]})));
        assert!(lines.contains(&json!([{"feature": "commands", "exists": true}])));
        Ok(())
    }

    #[test]
    fn test_exec_file_with_config() -> anyhow::Result<()> {
        let mut config = tempfile::NamedTempFile::new()?;
        writeln!(config, "backend = \"memory\"")?;
        let mut ops = tempfile::NamedTempFile::new()?;
        writeln!(ops, "set foo [1,2,3]")?;
        writeln!(ops, "add foo 4")?;
        writeln!(ops, "get-all foo")?;
        writeln!(ops, "close")?;

        let config_path = config.path().to_string_lossy().into_owned();
        let ops_path = ops.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "commonkv",
            "--config",
            config_path.as_str(),
            "exec",
            "--file",
            ops_path.as_str(),
        ])?;
        let mut out = Vec::new();
        run(cli, &mut out)?;

        let lines = json_lines(out)?;
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1]["old"], json!([1, 2, 3]));
        assert_eq!(lines[2], json!({"key": "foo", "values": [1, 2, 3, 4]}));
        assert_eq!(lines[3], json!({"closed": true, "keys": 1}));
        Ok(())
    }

    #[test]
    fn test_invalid_config_is_reported() -> anyhow::Result<()> {
        let mut config = tempfile::NamedTempFile::new()?;
        writeln!(config, "backend = \"redis\"")?;

        let config_path = config.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["commonkv", "--config", config_path.as_str(), "demo"])?;
        let mut out = Vec::new();
        let err = run(cli, &mut out).unwrap_err();

        assert!(matches!(err, AppError::Library(ref e) if e.is_config()));
        assert!(out.is_empty());
        Ok(())
    }
}
