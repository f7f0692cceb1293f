use std::collections::BTreeMap;

use uedoc::ueformat::UeFormatError;

use super::{emit_json, hash_hex, render_json};

#[test]
fn render_json_pretty_prints() {
	let text = render_json(&BTreeMap::from([("lods", 2)])).expect("map encodes");
	assert_eq!(text, "{\n  \"lods\": 2\n}");
}

#[test]
fn json_encode_failure_is_an_error() {
	let payload = BTreeMap::from([((1, 2), "pair")]);

	let err = render_json(&payload).expect_err("tuple keys cannot be json object keys");
	assert!(matches!(err, UeFormatError::Io(_)));
	assert!(err.to_string().contains("key must be a string"), "{err}");
	assert!(emit_json(&payload).is_err());
}

#[test]
fn hash_hex_shows_negative_hashes_as_unsigned() {
	assert_eq!(hash_hex(42), "0x0000002a");
	assert_eq!(hash_hex(-1), "0xffffffff");
}
