//! `.env` loading and config-home resolution
//!
//! Supports the common subset of the format: `KEY=VALUE` lines, `#`
//! comments, blank lines, an optional `export ` prefix and single or double
//! quotes around the value.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Name of the optional environment file in the home directory
pub const ENV_FILE_NAME: &str = ".env";

/// Optional override for the config-home directory name
pub const CLI_HOME_VAR: &str = "CLI_HOME";

/// Parse `.env` contents into key/value pairs; malformed lines are skipped
pub fn parse_env_file(contents: &str) -> BTreeMap<String, String> {
    contents.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }

    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    // Unquoted values may carry a trailing comment
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

/// Read `<home>/.env`; a missing file yields an empty map
pub fn load_env_file(home: &Path) -> io::Result<BTreeMap<String, String>> {
    let path = home.join(ENV_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(parse_env_file(&contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e),
    }
}

/// Resolve the config home under `home`
///
/// A non-empty `CLI_HOME` value names the directory; otherwise `default_dir`
/// is used. The result always stays under `home`: root and drive prefixes
/// of an absolute `CLI_HOME` are dropped before joining.
pub fn resolve_config_home(home: &Path, cli_home: Option<&str>, default_dir: &str) -> PathBuf {
    let relative = cli_home
        .map(|dir| relative_to_home(dir.trim()))
        .filter(|dir| !dir.as_os_str().is_empty());

    match relative {
        Some(dir) => home.join(dir),
        None => home.join(default_dir),
    }
}

fn relative_to_home(dir: &str) -> PathBuf {
    Path::new(dir)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}
