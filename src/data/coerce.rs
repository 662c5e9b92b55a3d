//! Numeric coercion for spreadsheet-exported cells
//!
//! Cells may carry thousands separators ("1,234.50"), be blank, or hold junk. Junk
//! becomes zero so one bad row never breaks an aggregation.

use serde::Serialize;

/// Outcome of parsing one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    /// Empty cell, read as zero
    Blank,
    /// Unparseable or non-finite, read as zero
    Malformed,
}

impl Coerced {
    pub fn value(self) -> f64 {
        match self {
            Coerced::Value(v) => v,
            Coerced::Blank | Coerced::Malformed => 0.0,
        }
    }
}

/// Parse a numeric cell, stripping thousands separators first
pub fn parse_numeric(raw: &str) -> Coerced {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Coerced::Blank;
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::Value(v),
        _ => Coerced::Malformed,
    }
}

/// Parse a numeric cell, substituting zero for anything unusable
pub fn coerce_numeric(raw: &str) -> f64 {
    parse_numeric(raw).value()
}

/// A cell that was recovered to zero during loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedValue {
    /// Source file or label
    pub origin: String,
    /// 1-based line number in the source, header included
    pub line: usize,
    pub column: String,
    pub raw: String,
}

/// Recovered data-quality problems from one load
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadDiagnostics {
    pub malformed_values: Vec<MalformedValue>,
}

impl LoadDiagnostics {
    /// Coerce a cell and record it if it had to be replaced
    pub fn coerce(&mut self, raw: &str, origin: &str, line: usize, column: &str) -> f64 {
        match parse_numeric(raw) {
            Coerced::Malformed => {
                tracing::debug!(
                    "Malformed value '{}' in {} line {} column '{}', using 0",
                    raw,
                    origin,
                    line,
                    column
                );
                self.malformed_values.push(MalformedValue {
                    origin: origin.to_string(),
                    line,
                    column: column.to_string(),
                    raw: raw.to_string(),
                });
                0.0
            }
            other => other.value(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.malformed_values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_numeric("10"), Coerced::Value(10.0));
        assert_eq!(parse_numeric(" 2.5 "), Coerced::Value(2.5));
        assert_eq!(parse_numeric("-3"), Coerced::Value(-3.0));
    }

    #[test]
    fn test_parse_strips_thousands_separators() {
        assert_eq!(parse_numeric("1,234"), Coerced::Value(1234.0));
        assert_eq!(parse_numeric("12,345.67"), Coerced::Value(12345.67));
        assert_eq!(parse_numeric("1,000,000"), Coerced::Value(1_000_000.0));
    }

    #[test]
    fn test_parse_blank_and_malformed() {
        assert_eq!(parse_numeric(""), Coerced::Blank);
        assert_eq!(parse_numeric("   "), Coerced::Blank);
        assert_eq!(parse_numeric("abc"), Coerced::Malformed);
        assert_eq!(parse_numeric("NaN"), Coerced::Malformed);
        assert_eq!(parse_numeric("inf"), Coerced::Malformed);
        assert_eq!(parse_numeric("$12"), Coerced::Malformed);
    }

    #[test]
    fn test_coerce_numeric_defaults_to_zero() {
        assert_eq!(coerce_numeric("abc"), 0.0);
        assert_eq!(coerce_numeric(""), 0.0);
        assert_eq!(coerce_numeric("3,000"), 3000.0);
    }

    #[test]
    fn test_diagnostics_record_only_malformed() {
        let mut diagnostics = LoadDiagnostics::default();
        assert_eq!(diagnostics.coerce("abc", "may.csv", 3, "Count"), 0.0);
        assert_eq!(diagnostics.coerce("", "may.csv", 4, "Count"), 0.0);
        assert_eq!(diagnostics.coerce("7", "may.csv", 5, "Count"), 7.0);

        assert_eq!(diagnostics.malformed_values.len(), 1);
        let recorded = &diagnostics.malformed_values[0];
        assert_eq!(recorded.line, 3);
        assert_eq!(recorded.column, "Count");
        assert_eq!(recorded.raw, "abc");
    }
}
