//! Configuration file support for md2typst CLI
//!
//! Loads page setup overrides from a TOML file given with `--config`.

use anyhow::{Context, Result};
use md2typst_core::PageSetup;
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Page setup emitted at the top of every document
    pub page: PageConfig,
}

/// Page setup configuration; unset keys keep the built-in defaults
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PageConfig {
    /// Paper size, e.g. "a4" or "us-letter" (default: "a4")
    pub paper: Option<String>,
    /// Body font family (default: "SimSun")
    pub font: Option<String>,
    /// Body font size as a Typst length (default: "12pt")
    pub font_size: Option<String>,
    /// Text language code (default: "zh")
    pub lang: Option<String>,
    /// Paragraph line leading as a Typst length (default: "1.5em")
    pub leading: Option<String>,
    /// Paragraph first-line indent as a Typst length (default: "2em")
    pub first_line_indent: Option<String>,
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Page setup with configured values applied over the defaults
    pub fn page_setup(&self) -> PageSetup {
        let defaults = PageSetup::default();
        let page = self.page.clone();
        PageSetup {
            paper: page.paper.unwrap_or(defaults.paper),
            font: page.font.unwrap_or(defaults.font),
            font_size: page.font_size.unwrap_or(defaults.font_size),
            lang: page.lang.unwrap_or(defaults.lang),
            leading: page.leading.unwrap_or(defaults.leading),
            first_line_indent: page.first_line_indent.unwrap_or(defaults.first_line_indent),
        }
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).context("failed to serialize JSON schema")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.page.paper.is_none());
        assert_eq!(config.page_setup(), PageSetup::default());
    }

    #[test]
    fn test_parse_page_section() {
        let config: Config = toml::from_str(
            r#"
            [page]
            paper = "us-letter"
            font = "Libertinus Serif"
            font_size = "11pt"
            lang = "en"
            leading = "0.65em"
            first_line_indent = "0em"
            "#,
        )
        .unwrap();

        let page = config.page_setup();
        assert_eq!(page.paper, "us-letter");
        assert_eq!(page.font, "Libertinus Serif");
        assert_eq!(page.font_size, "11pt");
        assert_eq!(page.lang, "en");
        assert_eq!(page.leading, "0.65em");
        assert_eq!(page.first_line_indent, "0em");
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [page]
            lang = "en"
            "#,
        )
        .unwrap();

        let page = config.page_setup();
        assert_eq!(page.lang, "en");
        // Everything else keeps the defaults
        assert_eq!(page.paper, "a4");
        assert_eq!(page.font, "SimSun");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: Config = toml::from_str(
            r#"
            [page]
            paper = "a5"
            margin = "2cm"

            [other]
            key = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.page_setup().paper, "a5");
    }

    #[test]
    fn test_invalid_type_rejected() {
        let result: Result<Config, _> = toml::from_str("[page]\npaper = 4\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("PageConfig"));
        assert!(schema.contains("first_line_indent"));
    }
}
