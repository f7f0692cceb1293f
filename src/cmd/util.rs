use std::path::Path;

use uedoc::ueformat::{DecodeOptions, Result, UeFile, ZstdDecompressor};

/// Open `path` with a zstd decompressor bounded by `options`.
pub(crate) fn open_file(path: &Path, options: &DecodeOptions) -> Result<UeFile> {
	let decompressor = ZstdDecompressor::from_options(options);
	UeFile::open(path, &decompressor)
}

/// Render a mesh hash the way hashes are printed everywhere in the CLI.
pub(crate) fn hash_hex(hash: i32) -> String {
	format!("0x{:08x}", hash as u32)
}

/// Render a float triple with fixed precision.
pub(crate) fn vec3_label(value: [f32; 3]) -> String {
	format!("({:.3}, {:.3}, {:.3})", value[0], value[1], value[2])
}

/// Pretty-print `payload` as JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let text = render_json(payload)?;
	println!("{text}");
	Ok(())
}

/// Encode `payload` as pretty JSON, reporting encoder failures as IO errors.
pub(crate) fn render_json<T: serde::Serialize>(payload: &T) -> Result<String> {
	Ok(serde_json::to_string_pretty(payload).map_err(std::io::Error::from)?)
}

#[cfg(test)]
mod tests;
