use crate::record::Record;

/// Derive a key set from the first ingested record: its field names in
/// decode order. An empty record yields no keys, so derivation retries on
/// the next record.
pub(crate) fn derive(record: &Record) -> Vec<String> {
    record.keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derive_keeps_decode_order() {
        let record = serde_json::json!({"datetime": "t", "level": "INFO", "message": "m"})
            .as_object()
            .cloned()
            .unwrap();
        assert_eq!(derive(&record), vec!["datetime", "level", "message"]);
    }

    #[test]
    fn derive_from_empty_record_yields_no_keys() {
        assert!(derive(&Record::new()).is_empty());
    }
}
