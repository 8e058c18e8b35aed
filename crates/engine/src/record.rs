use serde_json::{Map, Value};

/// A decoded log record: field name to scalar or nested value.
///
/// Field order is decode-time insertion order (`serde_json` is built with
/// `preserve_order`), which keeps key derivation from a first record
/// deterministic.
pub type Record = Map<String, Value>;

/// Text form of one field, as shown in a table cell and used in canonical
/// strings.
///
/// Strings render bare, `null` and missing fields render empty, everything
/// else renders as compact JSON.
pub fn field_text(record: &Record, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Comparison identity of a record: its key-field values concatenated in
/// key-set order. Records whose canonical strings are within the
/// configured edit distance fold into the same group.
pub fn canonical(record: &Record, keys: &[String]) -> String {
    let mut out = String::new();
    for key in keys {
        out.push_str(&field_text(record, key));
    }
    out
}
