//! Line-oriented TxRep output.

use std::fmt::Display;

use chrono::{DateTime, Utc};

use crate::transaction::amount::format_amount;

/// Appends `path: value` lines in the order they are written.
///
/// Canonical order is the caller's job: struct fields in declaration
/// order, array items by index, union arm fields after the `type` line.
#[derive(Debug, Default)]
pub struct TxRepWriter {
    out: String,
}

impl TxRepWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, path: &str, value: impl Display) {
        self.out.push_str(path);
        self.out.push_str(": ");
        self.out.push_str(&value.to_string());
        self.out.push('\n');
    }

    /// A field followed by ` (comment)`. Comments are for humans; the
    /// parser drops them.
    pub fn field_with_comment(&mut self, path: &str, value: impl Display, comment: impl Display) {
        self.out.push_str(path);
        self.out.push_str(": ");
        self.out.push_str(&value.to_string());
        self.out.push_str(" (");
        self.out.push_str(&comment.to_string());
        self.out.push_str(")\n");
    }

    /// JSON-quoted string value.
    pub fn string(&mut self, path: &str, value: &str) {
        self.field(path, quote(value));
    }

    /// Lowercase hex value.
    pub fn hex(&mut self, path: &str, bytes: &[u8]) {
        self.field(path, hex::encode(bytes));
    }

    /// Stroops, annotated with the decimal amount: `400004000 (40.0004e7)`.
    pub fn amount(&mut self, path: &str, stroops: i64) {
        self.field_with_comment(path, stroops, format_args!("{}e7", format_amount(stroops)));
    }

    /// UNIX seconds, annotated with the UTC date unless zero (unbounded).
    pub fn timestamp(&mut self, path: &str, seconds: u64) {
        let date = i64::try_from(seconds)
            .ok()
            .filter(|s| *s != 0)
            .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0));
        match date {
            Some(date) => self.field_with_comment(path, seconds, date.format("%Y-%m-%dT%H:%M:%SZ")),
            None => self.field(path, seconds),
        }
    }

    /// The `type` line of a union.
    pub fn union_arm(&mut self, path: &str, arm: &str) {
        self.field(&join(path, "type"), arm);
    }

    /// The `v: 0` line of an `ext` union.
    pub fn ext_v0(&mut self, path: &str) {
        self.field(&join(path, "ext.v"), 0);
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

/// `path.name`, or just `name` at the root.
pub fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

/// `path[index]`.
pub fn index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

fn quote(value: &str) -> String {
    // Serializing a &str cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}
