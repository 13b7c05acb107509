use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column at which TeX hard-wraps log lines (`max_print_line`).
pub const DEFAULT_WRAP_WIDTH: usize = 79;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid file base name pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("wrap width must be greater than zero")]
    ZeroWrapWidth,
}

/// Knobs accepted by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Patterns kept for the caller. Parsing never looks at them.
    pub file_base_names: Vec<String>,
    /// Drop records whose `raw` text was already reported.
    pub ignore_duplicates: bool,
    /// Physical line length that marks a hard wrap.
    pub wrap_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            file_base_names: vec!["compiles".to_string(), "/usr/local".to_string()],
            ignore_duplicates: false,
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.wrap_width == 0 {
            return Err(OptionsError::ZeroWrapWidth);
        }
        Ok(())
    }

    pub fn with_ignore_duplicates(mut self, ignore: bool) -> Self {
        self.ignore_duplicates = ignore;
        self
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    pub fn with_file_base_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_base_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Compiles [`file_base_names`](Self::file_base_names) for post-filtering.
    pub fn file_base_name_patterns(&self) -> Result<Vec<Regex>, OptionsError> {
        self.file_base_names
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| OptionsError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}
