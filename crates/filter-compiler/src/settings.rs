use crate::error::{FilterError, Result};

pub const MAX_DEPTH_ENV: &str = "USER_FILTER_MAX_DEPTH";
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Highest configurable depth. Every group level costs two JSON nesting
/// levels, so deeper trees hit the decoder's recursion limit (128) before
/// they could reach the guard.
pub const MAX_DEPTH_LIMIT: usize = 48;

/// Knobs for a compilation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompilerSettings {
    /// Deepest group nesting that is compiled; the root group is level 1.
    pub max_depth: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        CompilerSettings {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompilerSettings {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Read settings through `get_env`, falling back to defaults for unset keys.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(raw) = get_env(MAX_DEPTH_ENV) {
            settings.max_depth = parse_max_depth(MAX_DEPTH_ENV, &raw)?;
        }
        Ok(settings)
    }
}

pub fn parse_max_depth(key: &str, raw: &str) -> Result<usize> {
    let invalid = |message: &str| FilterError::InvalidSetting {
        key: key.to_string(),
        value: raw.to_string(),
        message: message.to_string(),
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be at least 1")),
        Ok(depth) if depth > MAX_DEPTH_LIMIT => {
            Err(invalid(&format!("must not exceed {MAX_DEPTH_LIMIT}")))
        }
        Ok(depth) => Ok(depth),
        Err(_) => Err(invalid("expected a positive integer")),
    }
}
