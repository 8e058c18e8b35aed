//! # logfold-decode
//!
//! Decoders that turn a raw byte stream into [`Record`]s for the
//! aggregation engine. Three formats are supported:
//!
//! - `json`: a stream of JSON objects, one record per object
//! - `zaplog`: zap console lines (`<ts> <LEVEL> <file.go:line> [func] <msg> {fields}`)
//! - `regex`: arbitrary lines matched by a user pattern with named capture groups
//!
//! ## Example
//!
//! ```
//! use logfold_decode::{Decoder, JsonDecoder};
//!
//! let input: &[u8] = br#"{"level": "info"} {"level": "warn"}"#;
//! let mut decoder = JsonDecoder::new(input);
//!
//! let first = decoder.next_record()?.unwrap();
//! assert_eq!(first["level"], "info");
//! # Ok::<(), logfold_decode::DecodeError>(())
//! ```

mod error;
mod json;
mod pattern;
mod zaplog;

pub use error::{DecodeError, Result};
pub use json::JsonDecoder;
pub use pattern::RegexDecoder;
pub use zaplog::ZaplogDecoder;

use logfold_engine::Record;

/// A sequential source of records.
///
/// `Ok(None)` is clean end of stream. `Err` is stream-fatal: the decoder
/// cannot make further progress and ingestion must stop. Recoverable
/// problems, such as one unparsable line in a line-oriented format, are
/// handled inside the decoder, which logs and skips.
pub trait Decoder {
    fn next_record(&mut self) -> Result<Option<Record>>;
}
