//! Named-capture regex decoder for arbitrary line formats.

use std::io::BufRead;

use logfold_engine::Record;
use regex::Regex;
use serde_json::Value;

use crate::error::{DecodeError, Result};
use crate::Decoder;

/// Decodes lines against a user-supplied pattern; every named capture
/// group becomes a string field, in declaration order. Lines that do not
/// match are logged and skipped.
pub struct RegexDecoder<R: BufRead> {
    reader: R,
    pattern: Regex,
    names: Vec<String>,
    line: String,
}

impl<R: BufRead> RegexDecoder<R> {
    /// Compile `pattern` and wrap `reader`. Fails on an invalid pattern or
    /// one without named capture groups, since such a pattern could never
    /// produce a field.
    pub fn new(reader: R, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        let names: Vec<String> = pattern
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(DecodeError::NoNamedCaptures);
        }
        Ok(Self {
            reader,
            pattern,
            names,
            line: String::new(),
        })
    }
}

impl<R: BufRead> Decoder for RegexDecoder<R> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(captures) = self.pattern.captures(line) else {
                log::warn!("skipping line not matching the record pattern: {line}");
                continue;
            };

            let mut record = Record::new();
            for name in &self.names {
                // A group that did not participate still yields a field, so
                // the column set stays stable across records.
                let text = captures.name(name).map_or("", |m| m.as_str());
                record.insert(name.clone(), Value::String(text.to_string()));
            }
            return Ok(Some(record));
        }
    }
}
