//! The `key: value` variable preamble sent by the engine ahead of the
//! dialogue proper.

use std::collections::HashMap;

use crate::error::{AgiError, Result};

/// Variables collected from the AGI preamble.
///
/// Keys are lowercased on insert since engine casing is not trusted;
/// last write wins on duplicate keys.
#[derive(Debug, Default)]
pub struct AgiVariables(HashMap<String, String>);

impl AgiVariables {
    /// Parse one preamble line into the set.
    ///
    /// The line splits on the first `:`; the value keeps everything after
    /// it minus leading whitespace. Returns false for lines without a
    /// colon, which are skipped rather than fatal.
    pub fn insert_line(&mut self, line: &str) -> bool {
        match line.split_once(':') {
            Some((key, value)) => {
                self.0
                    .insert(key.trim().to_lowercase(), value.trim_start().to_string());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a key that the protocol contract requires to be present
    /// and non-empty.
    pub fn required(&self, key: &'static str) -> Result<&str> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AgiError::MissingArgument(key)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
