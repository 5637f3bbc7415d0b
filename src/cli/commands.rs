//! CLI command implementations.

use crate::bench::{BenchConfig, BenchRunner, SizeStep};
use crate::cli::output::{OutputFormat, format_bench_results, format_drain, format_strategies};
use crate::cli::parser::{Cli, Commands};
use crate::error::{CommandError, Result};
use crate::io::BenchFile;
use crate::session::SessionRegistry;
use crate::strategy::{available_strategies, create_strategy};
use std::path::{Path, PathBuf};

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Run {
            file_size_mb,
            times,
            from,
            to,
            step,
            strategies,
            file,
        } => {
            let config = BenchConfig {
                file_size: file_size_mb.checked_mul(1024 * 1024).ok_or_else(|| {
                    CommandError::InvalidArgument(format!("--file-size-mb too large: {file_size_mb}"))
                })?,
                times: *times,
                buffer_size_from: *from,
                buffer_size_to: *to,
                step: step.parse::<SizeStep>()?,
            };
            cmd_run(config, strategies, file.as_ref(), format)
        }
        Commands::Drain {
            file,
            buffer_size,
            repeat,
        } => cmd_drain(file, *buffer_size, *repeat, format),
        Commands::Strategies => cmd_strategies(format),
    }
}

fn cmd_run(
    config: BenchConfig,
    strategies: &[String],
    file: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<String> {
    let mut runner = if strategies.is_empty() {
        BenchRunner::new(config)?
    } else {
        BenchRunner::with_strategies(config, strategies)?
    };

    let results = match file {
        Some(path) => runner.run_on(&BenchFile::existing(path)?)?,
        None => runner.run()?,
    };
    Ok(format_bench_results(runner.config(), &results, format))
}

fn cmd_drain(file: &Path, buffer_size: usize, repeat: u32, format: OutputFormat) -> Result<String> {
    if repeat == 0 {
        return Err(CommandError::InvalidArgument("--repeat must be > 0".to_string()).into());
    }

    let registry = SessionRegistry::new();
    let handle = registry.create(file, buffer_size)?;
    let runs = (0..repeat)
        .map(|_| registry.run(handle))
        .collect::<Result<Vec<_>>>();
    registry.destroy(handle)?;

    Ok(format_drain(file, &runs?, format))
}

fn cmd_strategies(format: OutputFormat) -> Result<String> {
    let mut list = Vec::new();
    for name in available_strategies() {
        let strategy = create_strategy(name)?;
        list.push((name, strategy.description()));
    }
    Ok(format_strategies(&list, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::error::{BenchError, SessionError};
    use tempfile::TempDir;

    fn make_cli(format: &str, command: Commands) -> Cli {
        Cli {
            verbose: false,
            format: format.to_string(),
            command,
        }
    }

    #[test]
    fn test_cmd_drain_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ten.bin");
        std::fs::write(&path, b"0123456789").unwrap();

        let cli = make_cli(
            "text",
            Commands::Drain {
                file: path,
                buffer_size: 4,
                repeat: 2,
            },
        );
        let output = execute(&cli).unwrap();
        assert!(output.contains("Run 1:"));
        assert!(output.contains("Total bytes:   10"));
        assert!(output.contains("Run 2:"));
        assert!(output.contains("Total bytes:   0"));
    }

    #[test]
    fn test_cmd_drain_missing_file_reads_nothing() {
        let cli = make_cli(
            "json",
            Commands::Drain {
                file: PathBuf::from("/nonexistent/file.bin"),
                buffer_size: 4,
                repeat: 1,
            },
        );
        let output = execute(&cli).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["runs"][0]["reads"], 0);
        assert_eq!(value["runs"][0]["stop"], "no_file");
    }

    #[test]
    fn test_cmd_drain_zero_buffer() {
        let cli = make_cli(
            "text",
            Commands::Drain {
                file: PathBuf::from("/tmp/any"),
                buffer_size: 0,
                repeat: 1,
            },
        );
        assert!(matches!(
            execute(&cli),
            Err(Error::Session(SessionError::InvalidBufferSize { .. }))
        ));
    }

    #[test]
    fn test_cmd_drain_zero_repeat() {
        let cli = make_cli(
            "text",
            Commands::Drain {
                file: PathBuf::from("/tmp/any"),
                buffer_size: 4,
                repeat: 0,
            },
        );
        assert!(matches!(
            execute(&cli),
            Err(Error::Command(CommandError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn test_cmd_run_on_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bench.bin");
        std::fs::write(&path, vec![0u8; 16 * 1024]).unwrap();

        let cli = make_cli(
            "text",
            Commands::Run {
                file_size_mb: 1,
                times: 1,
                from: 1024,
                to: 2048,
                step: "x2".to_string(),
                strategies: vec!["file".to_string(), "session".to_string()],
                file: Some(path),
            },
        );
        let output = execute(&cli).unwrap();
        assert!(output.starts_with("name\tcost(ms)"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_cmd_run_bad_step() {
        let cli = make_cli(
            "text",
            Commands::Run {
                file_size_mb: 1,
                times: 1,
                from: 1024,
                to: 2048,
                step: "/2".to_string(),
                strategies: Vec::new(),
                file: None,
            },
        );
        assert!(matches!(
            execute(&cli),
            Err(Error::Bench(BenchError::InvalidStep { .. }))
        ));
    }

    #[test]
    fn test_cmd_strategies() {
        let cli = make_cli("text", Commands::Strategies);
        let output = execute(&cli).unwrap();
        for name in available_strategies() {
            assert!(output.contains(name));
        }
    }
}
