use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{DiffError, DiffResult};

/// Default similarity threshold for classifying a replacement pair
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Comparison-only transform that can be switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreOption {
    /// Strip punctuation (ASCII plus CJK/typographic marks)
    Punct,
    /// Strip all whitespace
    Space,
}

impl IgnoreOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            IgnoreOption::Punct => "punct",
            IgnoreOption::Space => "space",
        }
    }
}

impl fmt::Display for IgnoreOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IgnoreOption {
    type Err = DiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "punct" => Ok(IgnoreOption::Punct),
            "space" => Ok(IgnoreOption::Space),
            other => Err(DiffError::InvalidIgnoreOptions(vec![other.to_string()])),
        }
    }
}

/// Set of enabled ignore options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(BTreeSet<IgnoreOption>);

impl IgnoreSet {
    /// Empty set - compare literal text
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse raw tokens; surrounding whitespace and case are ignored, empty tokens skipped.
    /// Every unrecognized token is reported at once, sorted and de-duplicated.
    pub fn parse<I, S>(values: I) -> DiffResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = BTreeSet::new();
        let mut invalid = BTreeSet::new();

        for value in values {
            let token = value.as_ref().trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            match token.parse::<IgnoreOption>() {
                Ok(option) => {
                    options.insert(option);
                }
                Err(_) => {
                    invalid.insert(token);
                }
            }
        }

        if !invalid.is_empty() {
            return Err(DiffError::InvalidIgnoreOptions(invalid.into_iter().collect()));
        }
        Ok(Self(options))
    }

    /// Parse the comma separated form used on the command line, e.g. `"punct, space"`
    pub fn parse_list(list: &str) -> DiffResult<Self> {
        Self::parse(list.split(','))
    }

    pub fn with(mut self, option: IgnoreOption) -> Self {
        self.0.insert(option);
        self
    }

    pub fn contains(&self, option: IgnoreOption) -> bool {
        self.0.contains(&option)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = IgnoreOption> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<IgnoreOption> for IgnoreSet {
    fn from_iter<T: IntoIterator<Item = IgnoreOption>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validated comparison settings.
///
/// Fields are private so a `CompareConfig` can only exist with a threshold
/// inside `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareConfig {
    ignore: IgnoreSet,
    threshold: f64,
}

impl CompareConfig {
    pub fn new(ignore: IgnoreSet, threshold: f64) -> DiffResult<Self> {
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DiffError::ThresholdOutOfRange(threshold));
        }
        Ok(Self { ignore, threshold })
    }

    /// Build from unvalidated front-end input: ignore tokens first, then threshold
    pub fn from_raw<I, S>(ignore_tokens: I, threshold: f64) -> DiffResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignore = IgnoreSet::parse(ignore_tokens)?;
        Self::new(ignore, threshold)
    }

    pub fn ignore(&self) -> &IgnoreSet {
        &self.ignore
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::none(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
