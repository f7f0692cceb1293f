use std::path::PathBuf;

use uedoc::ueformat::{Archive, AssetKind, DecodeOptions, FormatVersion, Result, Section, SectionIter, UeFile};

use crate::cmd::util::{emit_json, hash_hex, open_file};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Which container sections get descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
	Model,
	World,
	Flat,
}

/// Print the nested section tree without decoding payloads.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = open_file(&path, &DecodeOptions::default())?;
	let tree = section_tree(&file)?;

	if json {
		return emit_json(&SectionsJson {
			path: path.display().to_string(),
			identifier: file.header.kind.identifier(),
			sections: tree,
		});
	}

	println!("path: {}", path.display());
	println!("identifier: {}", file.header.kind.identifier());
	for node in &tree {
		print_node(node, 0);
	}

	Ok(())
}

fn section_tree(file: &UeFile) -> Result<Vec<NodeJson>> {
	let layout = match file.header.kind {
		AssetKind::Model if file.header.version >= FormatVersion::LevelOfDetailFormatRestructure => Layout::Model,
		AssetKind::World => Layout::World,
		_ => Layout::Flat,
	};
	file.sections()?.map(|section| section_node(section?, layout)).collect()
}

fn section_node(section: Section<'_>, layout: Layout) -> Result<NodeJson> {
	let Section { header, payload } = section;
	let children = match (layout, header.name.as_str()) {
		(Layout::Model, "LODS") => lod_nodes(payload, header.element_count()?)?,
		(Layout::Model, "SKELETON") => nested_sections(payload)?,
		(Layout::World, "MESHES") => mesh_nodes(payload, header.element_count()?)?,
		_ => Vec::new(),
	};

	Ok(NodeJson {
		label: header.name,
		count: Some(header.count),
		byte_len: header.byte_len,
		offset: payload.offset(),
		children,
	})
}

fn nested_sections(payload: Archive<'_>) -> Result<Vec<NodeJson>> {
	SectionIter::new(payload).map(|section| section_node(section?, Layout::Flat)).collect()
}

fn lod_nodes(mut payload: Archive<'_>, count: usize) -> Result<Vec<NodeJson>> {
	payload.read_array(count, |ar| {
		let name = ar.read_fstring()?;
		let size = ar.read_count("lod byte length")?;
		let body = ar.chunk(size)?;
		Ok(NodeJson {
			label: format!("lod {name}"),
			count: None,
			byte_len: size,
			offset: body.offset(),
			children: nested_sections(body)?,
		})
	})
}

fn mesh_nodes(mut payload: Archive<'_>, count: usize) -> Result<Vec<NodeJson>> {
	payload.read_array(count, |ar| {
		let hash = ar.read_i32()?;
		let size = ar.read_count("mesh byte length")?;
		let body = ar.chunk(size)?;
		Ok(NodeJson {
			label: format!("mesh {}", hash_hex(hash)),
			count: None,
			byte_len: size,
			offset: body.offset(),
			children: Vec::new(),
		})
	})
}

fn print_node(node: &NodeJson, depth: usize) {
	let indent = "  ".repeat(depth);
	match node.count {
		Some(count) => println!("{indent}{} count={count} len={} at={}", node.label, node.byte_len, node.offset),
		None => println!("{indent}{} len={} at={}", node.label, node.byte_len, node.offset),
	}
	for child in &node.children {
		print_node(child, depth + 1);
	}
}

#[derive(serde::Serialize)]
struct SectionsJson {
	path: String,
	identifier: &'static str,
	sections: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct NodeJson {
	label: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	count: Option<i32>,
	byte_len: usize,
	offset: usize,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	children: Vec<NodeJson>,
}
