//! Benchmark configuration.

use crate::error::{BenchError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the buffer size grows between sweep steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "method", content = "by")]
pub enum SizeStep {
    /// Add a fixed number of bytes.
    Add(usize),
    /// Multiply by a fixed factor.
    Multiply(usize),
}

impl SizeStep {
    /// Applies the step, returning `None` on overflow.
    #[must_use]
    pub const fn next(self, size: usize) -> Option<usize> {
        match self {
            Self::Add(by) => size.checked_add(by),
            Self::Multiply(by) => size.checked_mul(by),
        }
    }
}

impl FromStr for SizeStep {
    type Err = crate::Error;

    /// Parses `+N` as [`SizeStep::Add`] and `xN`, `XN` or `*N` as
    /// [`SizeStep::Multiply`].
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BenchError::InvalidStep {
            input: s.to_string(),
        };
        let s = s.trim();
        let mut chars = s.chars();
        let method = chars.next().ok_or_else(invalid)?;
        let by: usize = chars.as_str().trim().parse().map_err(|_| invalid())?;

        match method {
            '+' => Ok(Self::Add(by)),
            'x' | 'X' | '*' => Ok(Self::Multiply(by)),
            _ => Err(invalid().into()),
        }
    }
}

impl fmt::Display for SizeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(by) => write!(f, "+{by}"),
            Self::Multiply(by) => write!(f, "x{by}"),
        }
    }
}

/// Parameters of one benchmark sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchConfig {
    /// Size of the generated test file in bytes.
    pub file_size: u64,
    /// Timed runs per strategy and buffer size; costs are averaged.
    pub times: u32,
    /// First buffer size in bytes.
    pub buffer_size_from: usize,
    /// Last buffer size in bytes (inclusive).
    pub buffer_size_to: usize,
    /// Growth between buffer sizes.
    pub step: SizeStep,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            file_size: 64 * 1024 * 1024,
            times: 3,
            buffer_size_from: 1024,
            buffer_size_to: 1024 * 1024,
            step: SizeStep::Multiply(2),
        }
    }
}

impl BenchConfig {
    /// Checks that the sweep is finite and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let reject = |reason: &str| -> Result<()> {
            Err(BenchError::InvalidConfig {
                reason: reason.to_string(),
            }
            .into())
        };

        if self.times == 0 {
            return reject("times must be > 0");
        }
        if self.buffer_size_from == 0 {
            return reject("buffer size must be > 0");
        }
        if self.buffer_size_from > self.buffer_size_to {
            return reject("buffer size range is empty");
        }
        if i32::try_from(self.buffer_size_to).is_err() {
            return reject("buffer size must fit in a 32-bit signed integer");
        }
        match self.step {
            SizeStep::Add(0) => reject("add step must be > 0"),
            SizeStep::Multiply(by) if by < 2 => reject("multiply step must be >= 2"),
            _ => Ok(()),
        }
    }

    /// Buffer sizes of the sweep, in order.
    #[must_use]
    pub fn buffer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut size = self.buffer_size_from;
        while size <= self.buffer_size_to {
            sizes.push(size);
            match self.step.next(size) {
                Some(next) if next > size => size = next,
                _ => break,
            }
        }
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("+1024", SizeStep::Add(1024); "add")]
    #[test_case("x2", SizeStep::Multiply(2); "lower x")]
    #[test_case("X4", SizeStep::Multiply(4); "upper x")]
    #[test_case("*8", SizeStep::Multiply(8); "star")]
    #[test_case(" +16 ", SizeStep::Add(16); "padded")]
    fn test_parse_step(input: &str, expected: SizeStep) {
        assert_eq!(input.parse::<SizeStep>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("/2"; "divide")]
    #[test_case("x"; "no amount")]
    #[test_case("+abc"; "not a number")]
    #[test_case("x-2"; "negative")]
    fn test_parse_step_invalid(input: &str) {
        assert!(matches!(
            input.parse::<SizeStep>(),
            Err(crate::Error::Bench(BenchError::InvalidStep { .. }))
        ));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(SizeStep::Add(512).to_string(), "+512");
        assert_eq!(SizeStep::Multiply(2).to_string(), "x2");
    }

    #[test]
    fn test_buffer_sizes_multiply() {
        let config = BenchConfig {
            buffer_size_from: 1024,
            buffer_size_to: 8192,
            step: SizeStep::Multiply(2),
            ..BenchConfig::default()
        };
        assert_eq!(config.buffer_sizes(), vec![1024, 2048, 4096, 8192]);
    }

    #[test]
    fn test_buffer_sizes_add() {
        let config = BenchConfig {
            buffer_size_from: 100,
            buffer_size_to: 350,
            step: SizeStep::Add(100),
            ..BenchConfig::default()
        };
        assert_eq!(config.buffer_sizes(), vec![100, 200, 300]);
    }

    #[test]
    fn test_buffer_sizes_overflow_stops() {
        let config = BenchConfig {
            buffer_size_from: usize::MAX - 1,
            buffer_size_to: usize::MAX,
            step: SizeStep::Add(5),
            ..BenchConfig::default()
        };
        assert_eq!(config.buffer_sizes(), vec![usize::MAX - 1]);
    }

    #[test]
    fn test_default_is_valid() {
        BenchConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validate_rejects() {
        let base = BenchConfig::default();
        let cases = [
            BenchConfig { times: 0, ..base.clone() },
            BenchConfig { buffer_size_from: 0, ..base.clone() },
            BenchConfig {
                buffer_size_from: 10,
                buffer_size_to: 5,
                ..base.clone()
            },
            BenchConfig { step: SizeStep::Add(0), ..base.clone() },
            BenchConfig { step: SizeStep::Multiply(1), ..base.clone() },
            BenchConfig {
                buffer_size_to: usize::MAX,
                ..base
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
