use std::path::PathBuf;

use uedoc::ueformat::{Animation, Asset, CollectedDiagnostics, DecodeOptions, MeshCache, Model, Result, World};

use crate::cmd::util::{emit_json, hash_hex, open_file, vec3_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Uniform unit scale applied to positions.
	#[arg(long, default_value_t = 1.0)]
	pub scale: f32,
	/// Reject triangles indexing past their vertex list.
	#[arg(long)]
	pub validate: bool,
	#[arg(long)]
	pub json: bool,
}

/// Decode the whole asset and print a summary.
pub fn run(args: Args) -> Result<()> {
	let Args { path, scale, validate, json } = args;

	let options = DecodeOptions {
		scale,
		validate_indices: validate,
		..DecodeOptions::default()
	};
	let file = open_file(&path, &options)?;
	let diagnostics = CollectedDiagnostics::new();

	let asset = match file.decode(&options, &diagnostics)? {
		Asset::Model(model) => AssetJson::Model(model_summary(&model)),
		Asset::Animation(anim) => AssetJson::Animation(anim_summary(&anim)),
		Asset::World(world) => AssetJson::World(world_summary(&world, &diagnostics)?),
	};

	let warnings = diagnostics.into_messages();
	for message in &warnings {
		tracing::warn!("{message}");
	}

	if json {
		return emit_json(&ShowJson {
			path: path.display().to_string(),
			identifier: file.header.kind.identifier(),
			object_name: file.header.object_name.clone(),
			scale,
			asset,
			warnings,
		});
	}

	println!("path: {}", path.display());
	println!("identifier: {}", file.header.kind.identifier());
	println!("object_name: {}", file.header.object_name);
	println!("scale: {scale}");
	match &asset {
		AssetJson::Model(model) => print_model(model),
		AssetJson::Animation(anim) => print_anim(anim),
		AssetJson::World(world) => print_world(world),
	}
	println!("warnings: {}", warnings.len());

	Ok(())
}

fn model_summary(model: &Model) -> ModelJson {
	ModelJson {
		skinned: model.is_skinned(),
		lods: model
			.lods
			.iter()
			.map(|lod| LodJson {
				name: lod.name.clone(),
				vertices: lod.vertex_count(),
				triangles: lod.triangle_count(),
				normals: lod.normals.len(),
				uv_channels: lod.uvs.len(),
				color_channels: lod.colors.iter().map(|color| color.name.clone()).collect(),
				materials: lod.materials.iter().map(|material| material.name.clone()).collect(),
				weights: lod.weights.len(),
				morph_targets: lod.morph_targets.iter().map(|morph| morph.name.clone()).collect(),
			})
			.collect(),
		collisions: model
			.collisions
			.iter()
			.map(|hull| CollisionJson {
				name: hull.name.clone(),
				vertices: hull.vertices.len(),
				triangles: hull.indices.len(),
			})
			.collect(),
		skeleton: model.skeleton.as_ref().map(|skeleton| SkeletonJson {
			bones: skeleton.bones.len(),
			roots: skeleton.bones.iter().filter(|bone| bone.is_root()).map(|bone| bone.name.clone()).collect(),
			sockets: skeleton.sockets.len(),
			virtual_bones: skeleton.virtual_bones.len(),
		}),
	}
}

fn anim_summary(anim: &Animation) -> AnimJson {
	AnimJson {
		num_frames: anim.num_frames,
		frames_per_second: anim.frames_per_second,
		duration_seconds: anim.duration_seconds(),
		tracks: anim
			.tracks
			.iter()
			.map(|track| TrackJson {
				name: track.name.clone(),
				position_keys: track.position_keys.len(),
				rotation_keys: track.rotation_keys.len(),
				scale_keys: track.scale_keys.len(),
			})
			.collect(),
		curves: anim
			.curves
			.iter()
			.map(|curve| CurveJson {
				name: curve.name.clone(),
				keys: curve.keys.len(),
			})
			.collect(),
	}
}

fn world_summary(world: &World<'_>, diagnostics: &CollectedDiagnostics) -> Result<WorldJson> {
	let cache = MeshCache::new();
	let resolved = world.resolve_actors(&cache, diagnostics)?;

	let mut meshes = Vec::with_capacity(world.meshes.len());
	for mesh in &world.meshes {
		let model = cache.get_or_decode(mesh, diagnostics)?;
		meshes.push(MeshJson {
			hash: hash_hex(mesh.hash),
			byte_len: mesh.model_size,
			instances: world.actors.iter().filter(|actor| actor.model_hash == mesh.hash).count(),
			model: model_summary(&model),
		});
	}

	let actors = resolved
		.iter()
		.map(|item| {
			let actor = &world.actors[item.actor];
			ActorJson {
				name: actor.name.clone(),
				mesh: hash_hex(actor.model_hash),
				location: actor.location,
				resolved: item.model.is_some(),
			}
		})
		.collect();

	Ok(WorldJson {
		decoded_meshes: cache.len(),
		unresolved_actors: resolved.iter().filter(|item| item.model.is_none()).count(),
		meshes,
		actors,
	})
}

fn print_model(model: &ModelJson) {
	println!("kind: model");
	println!("skinned: {}", model.skinned);
	println!("lods: {}", model.lods.len());
	for lod in &model.lods {
		println!(
			"  {}: vertices={} triangles={} uv_channels={} colors={} materials=[{}] weights={} morphs={}",
			lod.name,
			lod.vertices,
			lod.triangles,
			lod.uv_channels,
			lod.color_channels.len(),
			lod.materials.join(", "),
			lod.weights,
			lod.morph_targets.len()
		);
	}
	println!("collisions: {}", model.collisions.len());
	for hull in &model.collisions {
		println!("  {}: vertices={} triangles={}", hull.name, hull.vertices, hull.triangles);
	}
	match &model.skeleton {
		Some(skeleton) => println!(
			"skeleton: bones={} roots=[{}] sockets={} virtual_bones={}",
			skeleton.bones,
			skeleton.roots.join(", "),
			skeleton.sockets,
			skeleton.virtual_bones
		),
		None => println!("skeleton: -"),
	}
}

fn print_anim(anim: &AnimJson) {
	println!("kind: animation");
	println!("frames: {} @ {} fps ({:.3}s)", anim.num_frames, anim.frames_per_second, anim.duration_seconds);
	println!("tracks: {}", anim.tracks.len());
	for track in &anim.tracks {
		println!(
			"  {}: pos={} rot={} scale={}",
			track.name, track.position_keys, track.rotation_keys, track.scale_keys
		);
	}
	println!("curves: {}", anim.curves.len());
	for curve in &anim.curves {
		println!("  {}: keys={}", curve.name, curve.keys);
	}
}

fn print_world(world: &WorldJson) {
	println!("kind: world");
	println!("meshes: {} (decoded {})", world.meshes.len(), world.decoded_meshes);
	for mesh in &world.meshes {
		let triangles: usize = mesh.model.lods.first().map(|lod| lod.triangles).unwrap_or(0);
		println!("  {}: len={} instances={} lod0_triangles={}", mesh.hash, mesh.byte_len, mesh.instances, triangles);
	}
	println!("actors: {} (unresolved {})", world.actors.len(), world.unresolved_actors);
	for actor in &world.actors {
		let mark = if actor.resolved { "" } else { " [missing mesh]" };
		println!("  {} -> {} at {}{mark}", actor.name, actor.mesh, vec3_label(actor.location));
	}
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	identifier: &'static str,
	object_name: String,
	scale: f32,
	asset: AssetJson,
	warnings: Vec<String>,
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AssetJson {
	Model(ModelJson),
	Animation(AnimJson),
	World(WorldJson),
}

#[derive(serde::Serialize)]
struct ModelJson {
	skinned: bool,
	lods: Vec<LodJson>,
	collisions: Vec<CollisionJson>,
	skeleton: Option<SkeletonJson>,
}

#[derive(serde::Serialize)]
struct LodJson {
	name: String,
	vertices: usize,
	triangles: usize,
	normals: usize,
	uv_channels: usize,
	color_channels: Vec<String>,
	materials: Vec<String>,
	weights: usize,
	morph_targets: Vec<String>,
}

#[derive(serde::Serialize)]
struct CollisionJson {
	name: String,
	vertices: usize,
	triangles: usize,
}

#[derive(serde::Serialize)]
struct SkeletonJson {
	bones: usize,
	roots: Vec<String>,
	sockets: usize,
	virtual_bones: usize,
}

#[derive(serde::Serialize)]
struct AnimJson {
	num_frames: i32,
	frames_per_second: f32,
	duration_seconds: f32,
	tracks: Vec<TrackJson>,
	curves: Vec<CurveJson>,
}

#[derive(serde::Serialize)]
struct TrackJson {
	name: String,
	position_keys: usize,
	rotation_keys: usize,
	scale_keys: usize,
}

#[derive(serde::Serialize)]
struct CurveJson {
	name: String,
	keys: usize,
}

#[derive(serde::Serialize)]
struct WorldJson {
	decoded_meshes: usize,
	unresolved_actors: usize,
	meshes: Vec<MeshJson>,
	actors: Vec<ActorJson>,
}

#[derive(serde::Serialize)]
struct MeshJson {
	hash: String,
	byte_len: usize,
	instances: usize,
	model: ModelJson,
}

#[derive(serde::Serialize)]
struct ActorJson {
	name: String,
	mesh: String,
	location: [f32; 3],
	resolved: bool,
}
