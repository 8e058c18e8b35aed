//! Stream-of-JSON-objects decoder.

use std::io;

use logfold_engine::Record;
use serde_json::de::IoRead;
use serde_json::StreamDeserializer;

use crate::error::Result;
use crate::Decoder;

/// Decodes a stream of concatenated or whitespace-separated JSON objects,
/// one record per object.
///
/// Any malformed document, including a non-object top level, is
/// stream-fatal: a JSON producer that emits garbage cannot be resynced.
pub struct JsonDecoder<R: io::Read> {
    stream: StreamDeserializer<'static, IoRead<R>, Record>,
}

impl<R: io::Read> JsonDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: serde_json::Deserializer::from_reader(reader).into_iter(),
        }
    }
}

impl<R: io::Read> Decoder for JsonDecoder<R> {
    fn next_record(&mut self) -> Result<Option<Record>> {
        match self.stream.next() {
            None => Ok(None),
            Some(result) => Ok(Some(result?)),
        }
    }
}
