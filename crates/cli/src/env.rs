use crate::error::CliError;
use std::{collections::HashMap, path::Path};

/// Layered lookup for compiler settings: an optional settings file on top
/// of a snapshot of the process environment. The process environment itself
/// is never modified.
#[derive(Debug, Clone, Default)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Overlay the `KEY=VALUE` entries of a dotenv file.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let overlay = dotenv::from_path_iter(path)
            .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
            .map_err(|e| CliError::Config(format!("Invalid env file {}: {}", path.display(), e)))?;

        self.vars.extend(overlay);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_entries_are_visible() {
        let file = settings_file(
            "# Compiler limits\nUSER_FILTER_MAX_DEPTH=12\nRUST_LOG=\"filter_compiler=debug\"\n",
        );

        let mut env = EnvManager::default();
        env.load_from_file(file.path()).unwrap();
        assert_eq!(env.get("USER_FILTER_MAX_DEPTH").as_deref(), Some("12"));
        assert_eq!(env.get("RUST_LOG").as_deref(), Some("filter_compiler=debug"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_file_overrides_snapshot() {
        let mut env = EnvManager {
            vars: HashMap::from([("USER_FILTER_MAX_DEPTH".to_string(), "4".to_string())]),
        };
        let file = settings_file("USER_FILTER_MAX_DEPTH='9'\n");
        env.load_from_file(file.path()).unwrap();
        assert_eq!(env.get("USER_FILTER_MAX_DEPTH").as_deref(), Some("9"));
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let file = settings_file("NO EQUALS SIGN\n");
        let mut env = EnvManager::default();
        assert!(matches!(
            env.load_from_file(file.path()),
            Err(CliError::Config(_))
        ));
        assert!(matches!(
            env.load_from_file("/nonexistent/user-filter.env"),
            Err(CliError::Config(_))
        ));
    }
}
