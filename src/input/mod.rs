//! URL collection from positional arguments, URL list files and JSON
//!
//! Plain mode concatenates positional URLs with the lines of an optional
//! list file. JSON mode reads a JSON array of strings from either a single
//! positional file path or piped stdin; mixing sources in JSON mode is
//! rejected.

use log::debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::error::{AliveError, Result};
use crate::reporting::logging;

const AMBIGUOUS_JSON_INPUT: &str = "In JSON mode (-j), use a single positional file path argument or pipe JSON data via stdin";

/// Where the URLs for one run come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSources {
    /// Positional arguments: URLs, or one JSON file path in JSON mode
    pub positional: Vec<String>,
    /// Line-delimited URL list
    pub file: Option<PathBuf>,
    /// Expect a JSON array instead of plain URLs
    pub json: bool,
}

impl UrlSources {
    /// Collect the URL list for this run.
    ///
    /// `stdin` should be `None` when standard input is a terminal; it is only
    /// read in JSON mode without any positional argument or list file. An
    /// empty result is an error.
    pub fn collect(&self, stdin: Option<&mut dyn Read>) -> Result<Vec<String>> {
        let urls = if self.json {
            let urls = self.collect_json(stdin)?;
            logging::log_input_info(0, 0, urls.len());
            urls
        } else {
            let mut urls = self.positional.clone();
            let from_file = match &self.file {
                Some(path) => read_url_file(path)?,
                None => Vec::new(),
            };
            logging::log_input_info(urls.len(), from_file.len(), 0);
            urls.extend(from_file);
            urls
        };

        if urls.is_empty() {
            return Err(AliveError::Input("No URLs provided".to_string()));
        }
        Ok(urls)
    }

    fn collect_json(&self, stdin: Option<&mut dyn Read>) -> Result<Vec<String>> {
        match (self.positional.as_slice(), &self.file, stdin) {
            ([], None, Some(reader)) => {
                debug!("Reading JSON URL list from stdin");
                let mut content = String::new();
                reader.read_to_string(&mut content)?;
                parse_json_urls(&content)
            }
            ([path], None, _) => {
                debug!("Reading JSON URL list from {path}");
                let content = read_existing(Path::new(path))?;
                parse_json_urls(&content)
            }
            _ => Err(AliveError::Input(AMBIGUOUS_JSON_INPUT.to_string())),
        }
    }
}

/// Read a line-delimited URL list; lines are trimmed and blank lines skipped.
pub fn read_url_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = read_existing(path)?;
    debug!("Read URL list {}", path.display());
    Ok(parse_url_lines(&content))
}

/// Split text into URLs, one per non-blank line.
pub fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a JSON document that must be an array of strings.
pub fn parse_json_urls(content: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let serde_json::Value::Array(items) = value else {
        return Err(AliveError::Input(
            "JSON input must be a list of URLs".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::String(url) => Ok(url),
            other => Err(AliveError::Input(format!(
                "JSON input item {index} is not a string: {other}"
            ))),
        })
        .collect()
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AliveError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}
