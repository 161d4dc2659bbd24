//! Parsed TxRep input: a map from dotted path to raw value.

use std::cell::Cell;
use std::collections::HashMap;
use std::str::FromStr;

use super::error::TxRepError;
use super::writer::join;
use crate::config::MAX_TXREP_DEPTH;

/// TxRep text split into `path -> value` with comments stripped.
///
/// Lookups are by path, so field order in the input does not matter.
/// Every accessor reports the full path of whatever is missing or
/// malformed.
#[derive(Debug)]
pub struct TxRepSource {
    fields: HashMap<String, String>,
    depth: Cell<u32>,
}

impl TxRepSource {
    /// Splits `text` into fields. Blank lines are skipped; anything else
    /// must be `path: value`, optionally followed by ` (comment)`.
    pub fn parse(text: &str) -> Result<Self, TxRepError> {
        let mut fields = HashMap::new();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || TxRepError::MalformedLine(number + 1);
            let (path, rest) = line.split_once(':').ok_or_else(malformed)?;
            let path = path.trim();
            if path.is_empty() || path.contains(char::is_whitespace) {
                return Err(malformed());
            }
            let value = value_token(rest.trim()).ok_or_else(malformed)?;
            if fields.insert(path.to_string(), value.to_string()).is_some() {
                return Err(TxRepError::DuplicateField(path.to_string()));
            }
        }
        Ok(Self {
            fields,
            depth: Cell::new(0),
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    /// The raw value at `path`.
    pub fn get(&self, path: &str) -> Result<&str, TxRepError> {
        self.fields
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| TxRepError::MissingField(path.to_string()))
    }

    /// The value at `path` parsed with its `FromStr` impl.
    pub fn value<T: FromStr>(&self, path: &str) -> Result<T, TxRepError> {
        let raw = self.get(path)?;
        raw.parse().map_err(|_| TxRepError::malformed(path, raw))
    }

    pub fn bool(&self, path: &str) -> Result<bool, TxRepError> {
        match self.get(path)? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(TxRepError::malformed(path, other)),
        }
    }

    /// A JSON-quoted string of at most `max` bytes.
    pub fn string(&self, path: &str, max: usize) -> Result<String, TxRepError> {
        let raw = self.get(path)?;
        let value: String =
            serde_json::from_str(raw).map_err(|_| TxRepError::malformed(path, raw))?;
        if value.len() > max {
            return Err(TxRepError::malformed(path, raw));
        }
        Ok(value)
    }

    /// Hex-encoded bytes, at most `max` of them.
    pub fn hex(&self, path: &str, max: usize) -> Result<Vec<u8>, TxRepError> {
        let raw = self.get(path)?;
        let bytes = hex::decode(raw).map_err(|_| TxRepError::malformed(path, raw))?;
        if bytes.len() > max {
            return Err(TxRepError::malformed(path, raw));
        }
        Ok(bytes)
    }

    /// Exactly `N` hex-encoded bytes.
    pub fn hex_fixed<const N: usize>(&self, path: &str) -> Result<[u8; N], TxRepError> {
        let raw = self.get(path)?;
        let mut out = [0u8; N];
        hex::decode_to_slice(raw, &mut out).map_err(|_| TxRepError::malformed(path, raw))?;
        Ok(out)
    }

    /// The `path.len` of an array, checked against `max`.
    pub fn len(&self, path: &str, max: usize) -> Result<usize, TxRepError> {
        let len_path = join(path, "len");
        let len: usize = self.value(&len_path)?;
        if len > max {
            return Err(TxRepError::ArrayLength {
                path: path.to_string(),
                len,
                max,
            });
        }
        Ok(len)
    }

    /// The `path._present` flag of an optional value.
    pub fn present(&self, path: &str) -> Result<bool, TxRepError> {
        self.bool(&join(path, "_present"))
    }

    /// The `path.type` arm name of a union.
    pub fn arm(&self, path: &str) -> Result<&str, TxRepError> {
        self.get(&join(path, "type"))
    }

    /// Runs `f` one nesting level deeper, failing past the depth ceiling.
    pub fn nested<T>(
        &self,
        path: &str,
        f: impl FnOnce(&Self) -> Result<T, TxRepError>,
    ) -> Result<T, TxRepError> {
        let depth = self.depth.get();
        if depth >= MAX_TXREP_DEPTH {
            return Err(TxRepError::DepthLimitExceeded {
                path: path.to_string(),
            });
        }
        self.depth.set(depth + 1);
        let result = f(self);
        self.depth.set(depth);
        result
    }
}

/// The value part of `rest`, which is the text after the colon with
/// surrounding whitespace removed. A quoted string may contain spaces and
/// parentheses; anything else ends at the first space. What follows the
/// value must be nothing or a parenthesised comment.
fn value_token(rest: &str) -> Option<&str> {
    let end = if rest.starts_with('"') {
        let mut escaped = false;
        let close = rest.char_indices().skip(1).find(|&(_, c)| {
            if escaped {
                escaped = false;
                false
            } else if c == '\\' {
                escaped = true;
                false
            } else {
                c == '"'
            }
        })?;
        close.0 + 1
    } else {
        rest.find(char::is_whitespace).unwrap_or(rest.len())
    };
    let (value, tail) = rest.split_at(end);
    let tail = tail.trim_start();
    if tail.is_empty() || tail.starts_with('(') {
        Some(value)
    } else {
        None
    }
}
