use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::settings::error::SettingsError;

/// Environment variable manager that loads from the process and .env files
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
    sensitive_patterns: Vec<String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            sensitive_patterns: Self::default_sensitive_patterns(),
        }
    }

    /// Load variables from a .env file. Variables already present in the
    /// process environment keep their value.
    ///
    /// Returns `Ok(false)` when the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<bool, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No env file at {}", path.display());
            return Ok(false);
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SettingsError::EnvFile(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        let parsed = Self::parse_env_content(&content)?;
        let count = parsed.len();
        for (key, value) in parsed {
            self.vars.entry(key).or_insert(value);
        }

        info!("Loaded {} variables from {}", count, path.display());
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Whether a variable name looks like it holds a secret.
    pub fn is_sensitive(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.sensitive_patterns.iter().any(|p| key.contains(p))
    }

    /// The value of `key`, masked when the name looks sensitive.
    pub fn display_value(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| {
            if self.is_sensitive(key) {
                "****".to_string()
            } else {
                v.to_string()
            }
        })
    }

    fn parse_env_content(content: &str) -> Result<HashMap<String, String>, SettingsError> {
        let mut vars = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            // Parse KEY=VALUE format
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                if key.is_empty() {
                    return Err(SettingsError::EnvFile(format!(
                        "Invalid env file: empty key at line {}",
                        line_num + 1
                    )));
                }

                vars.insert(key.to_string(), Self::unquote_value(value));
            } else {
                return Err(SettingsError::EnvFile(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            }
        }

        Ok(vars)
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }

    /// Default patterns for sensitive variable detection
    fn default_sensitive_patterns() -> Vec<String> {
        ["password", "passwd", "secret", "token", "credential", "private", "access_key"]
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}
