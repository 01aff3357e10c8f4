// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Range thresholds, severities, and the monitoring status line.
//!
//! Each [`Measurement`] carries an optional critical and an optional warning
//! [`ValueRange`]. A value outside the critical range is [`Severity::Critical`],
//! otherwise a value outside the warning range is [`Severity::Warning`];
//! absent ranges never trigger. An [`Evaluation`] aggregates measurements by
//! taking the worst severity and renders them as
//!
//! ```text
//! WARNING ntp.example:323 chosen peer 192.0.2.1, offset=75s(WARN), stratum=2|offset=75.00000000 stratum=2
//! ^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^  ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! worst   subject                                 label=value[annotation]       performance data
//! ```

use std::fmt;
use std::str::FromStr;

/// An inclusive range with optional bounds.
///
/// Parsed from `min:max`, where either side may be empty. A bare number `N`
/// means `:N`.
///
/// ```
/// use chronymon_client::threshold::ValueRange;
///
/// let range: ValueRange = "0:60".parse().unwrap();
/// assert!(range.contains(0.0) && range.contains(60.0));
/// assert!(!range.contains(60.5));
/// assert!(":60".parse::<ValueRange>().unwrap().contains(-1.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueRange {
    /// Smallest accepted value.
    pub min: Option<f64>,
    /// Largest accepted value.
    pub max: Option<f64>,
}

impl ValueRange {
    /// A range with the given bounds.
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        ValueRange { min, max }
    }

    /// Accepts integers strictly below `limit`.
    pub fn integers_below(limit: u32) -> Self {
        ValueRange::new(None, Some(f64::from(limit) - 1.0))
    }

    /// Whether `value` violates no bound. NaN is never contained by a bounded range.
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{min}")?;
        }
        f.write_str(":")?;
        if let Some(max) = self.max {
            write!(f, "{max}")?;
        }
        Ok(())
    }
}

/// Errors from parsing a [`ValueRange`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeParseError {
    /// The rejected input.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl fmt::Display for RangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid range {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for RangeParseError {}

impl FromStr for ValueRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: &'static str| RangeParseError {
            input: s.to_string(),
            reason,
        };
        let bound = |text: &str| -> Result<Option<f64>, RangeParseError> {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            match text.parse::<f64>() {
                Ok(value) if value.is_nan() => Err(error("bound is not a number")),
                Ok(value) => Ok(Some(value)),
                Err(_) => Err(error("bound is not a number")),
            }
        };

        let (min, max) = match s.split_once(':') {
            Some((min, max)) => (bound(min)?, bound(max)?),
            None => match bound(s)? {
                Some(max) => (None, Some(max)),
                None => return Err(error("empty range")),
            },
        };
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(error("minimum is greater than maximum"));
        }
        Ok(ValueRange { min, max })
    }
}

/// Outcome of checking one or more measurements. Ordered from best to worst.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    /// Every range is satisfied.
    #[default]
    Ok,
    /// A warning range is violated.
    Warning,
    /// A critical range is violated.
    Critical,
}

impl Severity {
    /// The status word leading a status line.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        }
    }

    /// The suffix appended to a measurement that triggered this severity.
    pub fn annotation(self) -> &'static str {
        match self {
            Severity::Ok => "",
            Severity::Warning => "(WARN)",
            Severity::Critical => "(CRIT)",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Check `value` against a critical and a warning range.
pub fn evaluate(value: f64, critical: Option<&ValueRange>, warning: Option<&ValueRange>) -> Severity {
    if critical.is_some_and(|r| !r.contains(value)) {
        Severity::Critical
    } else if warning.is_some_and(|r| !r.contains(value)) {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// How a measurement's value is printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueFormat {
    /// Fractional; performance data uses 8 decimals.
    Real,
    /// Whole number.
    Integer,
}

/// A labelled value with its thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Name used in both the details and the performance data.
    pub label: &'static str,
    /// The value as printed.
    pub value: f64,
    /// Printed after the value in the details only.
    pub unit: &'static str,
    /// Printing style.
    pub format: ValueFormat,
    /// Compare `|value|` rather than `value` against the ranges.
    pub magnitude: bool,
    /// Range outside of which the measurement is critical.
    pub critical: Option<ValueRange>,
    /// Range outside of which the measurement is a warning.
    pub warning: Option<ValueRange>,
}

impl Measurement {
    /// A fractional measurement without thresholds.
    pub fn real(label: &'static str, value: f64) -> Self {
        Measurement {
            label,
            value,
            unit: "",
            format: ValueFormat::Real,
            magnitude: false,
            critical: None,
            warning: None,
        }
    }

    /// A whole-number measurement without thresholds.
    pub fn integer(label: &'static str, value: u32) -> Self {
        Measurement {
            format: ValueFormat::Integer,
            ..Measurement::real(label, f64::from(value))
        }
    }

    /// Set the unit suffix.
    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = unit;
        self
    }

    /// Compare the absolute value against the ranges.
    pub fn magnitude(mut self) -> Self {
        self.magnitude = true;
        self
    }

    /// Set the critical range.
    pub fn critical(mut self, range: Option<ValueRange>) -> Self {
        self.critical = range;
        self
    }

    /// Set the warning range.
    pub fn warning(mut self, range: Option<ValueRange>) -> Self {
        self.warning = range;
        self
    }

    /// The severity of this measurement alone.
    pub fn severity(&self) -> Severity {
        let value = if self.magnitude {
            self.value.abs()
        } else {
            self.value
        };
        evaluate(value, self.critical.as_ref(), self.warning.as_ref())
    }

    fn detail(&self, severity: Severity) -> String {
        match self.format {
            ValueFormat::Real => format!(
                "{}={}{}{}",
                self.label,
                self.value,
                self.unit,
                severity.annotation()
            ),
            ValueFormat::Integer => format!(
                "{}={:.0}{}{}",
                self.label,
                self.value,
                self.unit,
                severity.annotation()
            ),
        }
    }

    fn perfdata(&self) -> String {
        match self.format {
            ValueFormat::Real => format!("{}={:.8}", self.label, self.value),
            ValueFormat::Integer => format!("{}={:.0}", self.label, self.value),
        }
    }
}

/// Measurements together with their individual and aggregate severities.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// The worst severity among the measurements.
    pub severity: Severity,
    results: Vec<(Measurement, Severity)>,
}

impl Evaluation {
    /// Evaluate every measurement, keeping their order for output.
    pub fn new(measurements: impl IntoIterator<Item = Measurement>) -> Self {
        let results: Vec<_> = measurements
            .into_iter()
            .map(|m| {
                let severity = m.severity();
                (m, severity)
            })
            .collect();
        let severity = aggregate(results.iter().map(|(_, s)| *s));
        Evaluation { severity, results }
    }

    /// Severity of the measurement named `label`.
    pub fn severity_of(&self, label: &str) -> Option<Severity> {
        self.results
            .iter()
            .find(|(m, _)| m.label == label)
            .map(|(_, s)| *s)
    }

    /// `label=value[annotation]` for each measurement, comma separated.
    pub fn details(&self) -> String {
        self.results
            .iter()
            .map(|(m, s)| m.detail(*s))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `label=value` for each measurement, space separated.
    pub fn perfdata(&self) -> String {
        self.results
            .iter()
            .map(|(m, _)| m.perfdata())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `<SEVERITY> <subject>, <details>|<perfdata>`.
    pub fn status_line(&self, subject: &str) -> String {
        format!(
            "{} {}, {}|{}",
            self.severity,
            subject,
            self.details(),
            self.perfdata()
        )
    }
}

/// The worst of `severities`, or OK when there are none.
pub fn aggregate(severities: impl IntoIterator<Item = Severity>) -> Severity {
    severities.into_iter().max().unwrap_or_default()
}
