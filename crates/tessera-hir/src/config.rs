//! Printer configuration, loaded from a `[print]` table in TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HirError, Result};

/// Default indentation width in spaces
const DEFAULT_INDENT: usize = 4;

/// How [`Printer`](crate::hir::pretty::Printer) renders HIR
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Number of spaces per nesting level
    pub indent_size: usize,
    /// Suffix each statement line with its source span as a comment
    pub show_spans: bool,
    /// Whether whole-program output ends with a newline
    pub trailing_newline: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT,
            show_spans: false,
            trailing_newline: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    print: PrintConfig,
}

impl PrintConfig {
    /// Parse the `[print]` table of a TOML document. A missing table or
    /// missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HirError::Config`] if the document is not valid TOML or a
    /// key has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(source).map_err(|e| HirError::Config(e.to_string()))?;
        Ok(file.print)
    }

    /// Load the configuration from a file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`HirError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no printer config, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| HirError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = PrintConfig::default();
        assert_eq!(config.indent_size, 4);
        assert!(!config.show_spans);
        assert!(config.trailing_newline);
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = PrintConfig::from_toml_str("[print]\nshow_spans = true\n").unwrap();
        assert!(config.show_spans);
        assert_eq!(config.indent_size, 4);

        let empty = PrintConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PrintConfig::default());
    }

    #[test]
    fn wrong_type_is_a_config_error() {
        let err = PrintConfig::from_toml_str("[print]\nindent_size = \"wide\"\n").unwrap_err();
        assert!(matches!(err, HirError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tessera.toml");
        fs::write(&path, "[print]\nindent_size = 2\ntrailing_newline = false\n").unwrap();

        let config = PrintConfig::load(&path).unwrap();
        assert_eq!(config.indent_size, 2);
        assert!(!config.trailing_newline);

        let missing = PrintConfig::load(tmp.path().join("absent.toml")).unwrap();
        assert_eq!(missing, PrintConfig::default());
    }
}
