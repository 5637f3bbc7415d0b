//! Benchmark results and the text report.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

/// Average cost of one strategy at one buffer size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchResult {
    /// Strategy name.
    pub name: String,
    /// Average duration of a timed run in nanoseconds.
    pub cost_nanos: u64,
    /// Buffer size in bytes.
    pub buffer_size: usize,
    /// Size of the file read in bytes.
    pub file_size: u64,
    /// Configured number of timed runs.
    pub times: u32,
}

impl BenchResult {
    /// Cost rounded to whole milliseconds.
    #[must_use]
    pub const fn cost_millis(&self) -> u64 {
        (self.cost_nanos + 500_000) / 1_000_000
    }
}

impl PartialOrd for BenchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BenchResult {
    /// Cheapest first; ties broken by name then buffer size so sorting is
    /// deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost_nanos
            .cmp(&other.cost_nanos)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.buffer_size.cmp(&other.buffer_size))
    }
}

/// Renders results as a tab-separated table, cheapest first.
///
/// The `compare` column is each cost relative to the cheapest one.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_report(results: &[BenchResult]) -> String {
    let mut sorted = results.to_vec();
    sorted.sort();

    let mut output = String::from("name\tcost(ms)\tbufferSize(byte)\tfileSize(MB)\ttimes\tcompare");
    let fastest = sorted.first().map_or(0, |r| r.cost_nanos);

    for result in &sorted {
        let compare = if fastest == 0 {
            "x-".to_string()
        } else {
            format!("x{:.2}", result.cost_nanos as f64 / fastest as f64)
        };
        let _ = write!(
            output,
            "\n{}\t{}\t{}\t{}\t{}\t{}",
            result.name,
            result.cost_millis(),
            result.buffer_size,
            result.file_size / (1024 * 1024),
            result.times,
            compare
        );
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, cost_nanos: u64, buffer_size: usize) -> BenchResult {
        BenchResult {
            name: name.to_string(),
            cost_nanos,
            buffer_size,
            file_size: 64 * 1024 * 1024,
            times: 3,
        }
    }

    #[test]
    fn test_cost_millis_rounds() {
        assert_eq!(result("a", 1_499_999, 1).cost_millis(), 1);
        assert_eq!(result("a", 1_500_000, 1).cost_millis(), 2);
        assert_eq!(result("a", 0, 1).cost_millis(), 0);
    }

    #[test]
    fn test_sort_by_cost() {
        let mut results = vec![
            result("mmap", 30, 1024),
            result("file", 10, 1024),
            result("buffered", 20, 1024),
        ];
        results.sort();
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["file", "buffered", "mmap"]);
    }

    #[test]
    fn test_format_report() {
        let results = vec![
            result("session", 4_000_000, 4096),
            result("file", 2_000_000, 4096),
        ];
        let report = format_report(&results);
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(
            lines[0],
            "name\tcost(ms)\tbufferSize(byte)\tfileSize(MB)\ttimes\tcompare"
        );
        assert_eq!(lines[1], "file\t2\t4096\t64\t3\tx1.00");
        assert_eq!(lines[2], "session\t4\t4096\t64\t3\tx2.00");
    }

    #[test]
    fn test_format_report_zero_cost() {
        let report = format_report(&[result("file", 0, 1)]);
        assert!(report.contains("x-"));
    }

    #[test]
    fn test_format_report_empty() {
        let report = format_report(&[]);
        assert_eq!(report.lines().count(), 1);
    }
}
