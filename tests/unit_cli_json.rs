#![allow(missing_docs)]

use std::process::Command;

use uedoc_testkit::{ArchiveWriter, FileWriter};

fn run_json(args: &[&str]) -> serde_json::Value {
	let output = Command::new(env!("CARGO_BIN_EXE_uedoc")).args(args).output().expect("uedoc command executes");
	assert!(output.status.success(), "uedoc failed: {}", String::from_utf8_lossy(&output.stderr));
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn legacy_model() -> Vec<u8> {
	let mut w = ArchiveWriter::new();
	w.section("VERTICES", 3, |w| {
		w.floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
	});
	w.section("INDICES", 3, |w| {
		w.ints(&[0, 1, 2]);
	});
	w.section("VERTEXCOLORS", 3, |w| {
		w.raw(&[255; 12]);
	});
	FileWriter::new("UEMODEL").version(1).object_name("SM_Old").zstd().finish(w.as_bytes())
}

#[test]
fn show_reports_legacy_model_as_single_lod() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join("old.uemodel");
	std::fs::write(&path, legacy_model()).expect("fixture written");
	let path = path.to_string_lossy().into_owned();

	let json = run_json(&["show", &path, "--json", "--validate"]);
	assert_eq!(json["object_name"], "SM_Old");
	assert_eq!(json["asset"]["kind"], "model");
	assert_eq!(json["asset"]["lods"][0]["name"], "LOD0");
	assert_eq!(json["asset"]["lods"][0]["color_channels"][0], "COL0");
	assert!(json["asset"]["skeleton"].is_null());
	assert_eq!(json["warnings"].as_array().map(Vec::len), Some(0));

	let info = run_json(&["info", &path, "--json"]);
	assert_eq!(info["version"], 1);
	assert_eq!(info["version_name"], "SerializeBinormalSign");
}

#[test]
fn missing_file_exits_with_error() {
	let output = Command::new(env!("CARGO_BIN_EXE_uedoc"))
		.args(["info", "/nonexistent/nothing.uemodel"])
		.output()
		.expect("uedoc command executes");
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: io:"));
}
