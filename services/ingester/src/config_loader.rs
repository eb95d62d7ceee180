//! Configuration loader for the site ingester
//!
//! Reads the optional YAML configuration file (see `config/ingester.yaml`).
//! Missing keys fall back to the built-in defaults.
//!
//! Supports environment variable substitution using ${VAR} and
//! ${VAR:-default} syntax.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::IngesterConfig;

// ============================================================================
// Loading Functions
// ============================================================================

/// Load and validate an ingester configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<IngesterConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Parse configuration text after environment substitution.
pub fn parse_config(content: &str) -> Result<IngesterConfig> {
    let expanded = expand_env_vars(content)?;

    // An empty (or comment-only) file is a valid "use the defaults".
    let has_content = expanded.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(IngesterConfig::default());
    }

    let mut config: IngesterConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse YAML")?;
    config.logging.level = config.logging.level.to_lowercase();

    config.validate()?;

    Ok(config)
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand environment variables in the format ${VAR} or ${VAR:-default}
///
/// YAML comments (a `#` at line start or after whitespace) are copied
/// verbatim.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_comment = false;
    let mut prev = '\n';

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            in_comment = false;
        } else if ch == '#' && prev.is_whitespace() {
            in_comment = true;
        }
        prev = ch;

        if in_comment || ch != '$' || chars.peek() != Some(&'{') {
            result.push(ch);
            continue;
        }
        chars.next();

        let mut var_expr = String::new();
        let mut depth = 1;
        loop {
            match chars.next() {
                Some('{') => {
                    depth += 1;
                    var_expr.push('{');
                }
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    var_expr.push('}');
                }
                Some(c) => var_expr.push(c),
                None => anyhow::bail!("Unclosed variable substitution: ${{{}", var_expr),
            }
        }

        result.push_str(&resolve_var_expr(&var_expr)?);
        prev = '}';
    }

    Ok(result)
}

/// Resolve variable expression (supports VAR and VAR:-default syntax)
fn resolve_var_expr(expr: &str) -> Result<String> {
    match expr.split_once(":-") {
        Some((name, default)) => match std::env::var(name.trim()) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Ok(default.to_string()),
        },
        None => std::env::var(expr.trim())
            .with_context(|| format!("Environment variable {} not set", expr.trim())),
    }
}
