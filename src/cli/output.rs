//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::bench::{BenchConfig, BenchResult, format_report};
use crate::error::Error;
use crate::session::RunStats;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats the results of a sweep.
#[must_use]
pub fn format_bench_results(
    config: &BenchConfig,
    results: &[BenchResult],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_report(results),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Sweep<'a> {
                config: &'a BenchConfig,
                results: &'a [BenchResult],
            }
            format_json(&Sweep { config, results })
        }
    }
}

/// Formats the runs of a drain command.
#[must_use]
pub fn format_drain(path: &Path, runs: &[RunStats], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_drain_text(path, runs),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Drain<'a> {
                path: String,
                runs: &'a [RunStats],
            }
            format_json(&Drain {
                path: path.to_string_lossy().to_string(),
                runs,
            })
        }
    }
}

fn format_drain_text(path: &Path, runs: &[RunStats]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Drained {}", path.display());
    for (index, stats) in runs.iter().enumerate() {
        let _ = writeln!(output, "\nRun {}:", index + 1);
        let _ = writeln!(output, "  Buffer size:   {} bytes", stats.buffer_size);
        let _ = writeln!(output, "  Reads:         {}", stats.reads);
        let _ = writeln!(output, "  Full chunks:   {}", stats.full_chunks);
        let _ = writeln!(output, "  Tail bytes:    {}", stats.tail_bytes);
        let _ = writeln!(output, "  Total bytes:   {}", stats.bytes);
        let _ = writeln!(output, "  Stopped on:    {:?}", stats.stop);
        let _ = writeln!(output, "  Elapsed:       {} ns", stats.elapsed_nanos);
        if let Some(mib_s) = stats.throughput_mib_per_sec() {
            let _ = writeln!(output, "  Throughput:    {mib_s:.1} MiB/s");
        }
    }
    output
}

/// Formats the strategy list.
#[must_use]
pub fn format_strategies(strategies: &[(&str, &str)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::from("Strategies:\n");
            for (name, description) in strategies {
                let _ = writeln!(output, "  {name:<10} {description}");
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Strategy<'a> {
                name: &'a str,
                description: &'a str,
            }
            let list: Vec<_> = strategies
                .iter()
                .map(|&(name, description)| Strategy { name, description })
                .collect();
            format_json(&list)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput {
                success: bool,
                error: String,
            }
            format_json(&ErrorOutput {
                success: false,
                error: error.to_string(),
            })
        }
    }
}

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .unwrap_or_else(|e| format!("{{\"error\": \"JSON serialization failed: {e}\"}}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::SizeStep;
    use crate::error::SessionError;
    use crate::session::StopReason;

    fn stats() -> RunStats {
        RunStats {
            buffer_size: 4,
            reads: 3,
            full_chunks: 2,
            tail_bytes: 2,
            bytes: 10,
            stop: StopReason::ShortRead,
            elapsed_nanos: 1000,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("anything"), OutputFormat::Text);
    }

    #[test]
    fn test_format_drain_text() {
        let output = format_drain(Path::new("/tmp/ten.bin"), &[stats()], OutputFormat::Text);
        assert!(output.contains("/tmp/ten.bin"));
        assert!(output.contains("Reads:         3"));
        assert!(output.contains("ShortRead"));
        assert!(output.contains("MiB/s"));
    }

    #[test]
    fn test_format_drain_json() {
        let output = format_drain(Path::new("/tmp/ten.bin"), &[stats()], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["runs"][0]["reads"], 3);
        assert_eq!(value["runs"][0]["stop"], "short_read");
    }

    #[test]
    fn test_format_bench_results_json() {
        let config = BenchConfig {
            step: SizeStep::Add(1024),
            ..BenchConfig::default()
        };
        let results = vec![BenchResult {
            name: "file".to_string(),
            cost_nanos: 5,
            buffer_size: 1024,
            file_size: 1,
            times: 1,
        }];
        let output = format_bench_results(&config, &results, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["config"]["step"]["method"], "add");
        assert_eq!(value["config"]["step"]["by"], 1024);
        assert_eq!(value["results"][0]["name"], "file");
    }

    #[test]
    fn test_format_strategies() {
        let list = [("file", "plain reads"), ("mmap", "mapped")];
        let text = format_strategies(&list, OutputFormat::Text);
        assert!(text.contains("file"));
        assert!(text.contains("mapped"));

        let json = format_strategies(&list, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["name"], "mmap");
    }

    #[test]
    fn test_format_error() {
        let err: Error = SessionError::UnknownHandle { handle: 4 }.into();
        assert!(format_error(&err, OutputFormat::Text).contains("unknown session handle"));

        let json = format_error(&err, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"], false);
    }
}
