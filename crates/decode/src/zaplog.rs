//! Decoder for zap console lines.

use std::io::BufRead;

use logfold_engine::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::Result;
use crate::Decoder;

/// Shape of a zap console line:
///
/// ```text
/// 2024-08-22 09:00:06.956 ERROR dbsvr/counter.go:202 [GetCounterBatch] empty counter list {"process": 8982}
/// ```
static ZAPLOG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}) (TRACE|DEBUG|INFO|WARN|ERROR) (.*\.go:\d+) \[.*\] (.*) (\{.*\})$",
    )
    .expect("zaplog line pattern is valid")
});

/// Line-oriented decoder for zap's console encoder output. Lines that do
/// not match the expected shape are logged and skipped, so one corrupt
/// line never kills the stream.
pub struct ZaplogDecoder<R: BufRead> {
    reader: R,
    line: String,
}

impl<R: BufRead> ZaplogDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> Decoder for ZaplogDecoder<R> {
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
            let Some(captures) = ZAPLOG_LINE.captures(line) else {
                log::warn!("skipping invalid log entry: {line}");
                continue;
            };

            let mut record = Record::new();
            record.insert("datetime".into(), Value::String(captures[1].to_string()));
            record.insert("level".into(), Value::String(captures[2].to_string()));
            record.insert("position".into(), Value::String(captures[3].to_string()));
            record.insert("message".into(), Value::String(captures[4].to_string()));

            // The trailing field object is best effort: a broken tail keeps
            // the line fields instead of dropping the whole line.
            match serde_json::from_str::<Record>(&captures[5]) {
                Ok(fields) => record.extend(fields),
                Err(err) => log::debug!("ignoring unparsable zap fields: {err}"),
            }

            return Ok(Some(record));
        }
    }
}
