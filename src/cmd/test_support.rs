use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

use uedoc_testkit::{ArchiveWriter, FileWriter};

static UEDOC_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_uedoc(args: &[&str]) -> Output {
	Command::new(uedoc_bin()).args(args).output().expect("uedoc command executes")
}

pub(crate) fn run_uedoc_json(args: &[&str]) -> serde_json::Value {
	let output = run_uedoc(args);
	assert!(
		output.status.success(),
		"uedoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Write `bytes` under `dir` and return the path as a CLI argument.
pub(crate) fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> String {
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("fixture written");
	path.to_string_lossy().into_owned()
}

pub(crate) fn triangle_lod(w: &mut ArchiveWriter, name: &str) {
	w.fstring(name);
	w.sized(|w| {
		w.section("VERTICES", 3, |w| {
			w.floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
		});
		w.section("INDICES", 3, |w| {
			w.ints(&[0, 1, 2]);
		});
		w.section("MATERIALS", 1, |w| {
			w.fstring("M_Default").i32(0).i32(1);
		});
	});
}

/// Skinned model with two LODs, a two-bone skeleton, and one unknown section.
pub(crate) fn model_file() -> Vec<u8> {
	let mut w = ArchiveWriter::new();
	w.section("LODS", 2, |w| {
		triangle_lod(w, "LOD0");
		triangle_lod(w, "LOD1");
	});
	w.section("SKELETON", 0, |w| {
		w.section("BONES", 2, |w| {
			w.fstring("root").i32(-1).floats(&[0.0; 3]).floats(&[0.0, 0.0, 0.0, 1.0]);
			w.fstring("tip").i32(0).floats(&[0.0, 0.0, 5.0]).floats(&[0.0, 0.0, 0.0, 1.0]);
		});
	});
	w.section("NANITE", 1, |w| {
		w.raw(&[0; 8]);
	});
	FileWriter::new("UEMODEL").object_name("SK_Fixture").zstd().finish(w.as_bytes())
}

pub(crate) fn anim_file() -> Vec<u8> {
	let mut w = ArchiveWriter::new();
	w.i32(48).f32(24.0);
	w.section("TRACKS", 1, |w| {
		w.fstring("root");
		w.i32(1).i32(0).floats(&[0.0, 0.0, 1.0]);
		w.i32(0);
		w.i32(0);
	});
	FileWriter::new("UEANIM").object_name("A_Fixture").finish(w.as_bytes())
}

pub(crate) fn world_file() -> Vec<u8> {
	let mut w = ArchiveWriter::new();
	w.section("MESHES", 1, |w| {
		w.i32(42);
		w.sized(|w| {
			w.section("LODS", 1, |w| triangle_lod(w, "LOD0"));
		});
	});
	w.section("ACTORS", 3, |w| {
		for (name, hash) in [("A", 42), ("B", 42), ("C", 7)] {
			w.fstring(name).i32(hash).floats(&[1.0, 2.0, 3.0]).floats(&[0.0, 0.0, 0.0, 1.0]).floats(&[1.0; 3]);
		}
	});
	FileWriter::new("UEWORLD").object_name("W_Fixture").finish(w.as_bytes())
}

fn uedoc_bin() -> &'static PathBuf {
	UEDOC_BIN.get_or_init(resolve_uedoc_bin)
}

fn resolve_uedoc_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_uedoc") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| manifest_dir.join("target"));

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "uedoc.exe" } else { "uedoc" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "uedoc"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build uedoc binary at {}", bin.display());

	bin
}
