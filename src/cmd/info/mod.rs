use std::path::PathBuf;

use uedoc::ueformat::{DecodeOptions, Result, UeFile};

use crate::cmd::util::{emit_json, open_file};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header fields and the top-level section table.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = open_file(&path, &DecodeOptions::default())?;
	let sections = top_level_sections(&file)?;

	if json {
		return emit_json(&InfoJson {
			path: path.display().to_string(),
			identifier: file.header.kind.identifier(),
			version: file.header.version.as_u8(),
			version_name: file.header.version.as_str(),
			object_name: file.header.object_name.clone(),
			compression: file.header.compression.as_str(),
			header_size: file.header.header_size,
			compressed_size: file.header.compressed_size,
			uncompressed_size: file.header.uncompressed_size,
			payload_len: file.payload().len(),
			sections,
		});
	}

	println!("path: {}", path.display());
	println!("identifier: {}", file.header.kind.identifier());
	println!("version: {} ({})", file.header.version.as_u8(), file.header.version.as_str());
	println!("object_name: {}", file.header.object_name);
	println!("compression: {}", file.header.compression.as_str());
	println!("header_size: {}", file.header.header_size);
	println!("compressed_size: {}", file.header.compressed_size);
	println!("uncompressed_size: {}", file.header.uncompressed_size);
	println!("payload_len: {}", file.payload().len());
	println!("sections:");
	for section in &sections {
		println!("  {} count={} len={} at={}", section.name, section.count, section.byte_len, section.offset);
	}

	Ok(())
}

fn top_level_sections(file: &UeFile) -> Result<Vec<SectionJson>> {
	file.sections()?
		.map(|section| {
			let section = section?;
			Ok(SectionJson {
				offset: section.payload.offset(),
				name: section.header.name,
				count: section.header.count,
				byte_len: section.header.byte_len,
			})
		})
		.collect()
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	identifier: &'static str,
	version: u8,
	version_name: &'static str,
	object_name: String,
	compression: &'static str,
	header_size: usize,
	compressed_size: usize,
	uncompressed_size: usize,
	payload_len: usize,
	sections: Vec<SectionJson>,
}

#[derive(serde::Serialize)]
struct SectionJson {
	name: String,
	count: i32,
	byte_len: usize,
	offset: usize,
}
