use std::sync::Arc;

use uedoc_testkit::ArchiveWriter;

use crate::ueformat::{Asset, AssetKind, CollectedDiagnostics, DecodeOptions, FormatVersion, MeshCache, World, decode_asset};

fn write_triangle_model(w: &mut ArchiveWriter, material: &str) {
	w.section("LODS", 1, |w| {
		w.fstring("LOD0");
		w.sized(|w| {
			w.section("VERTICES", 3, |w| {
				w.floats(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
			});
			w.section("INDICES", 3, |w| {
				w.ints(&[0, 1, 2]);
			});
			w.section("MATERIALS", 1, |w| {
				w.fstring(material).i32(0).i32(1);
			});
		});
	});
}

fn write_actor(w: &mut ArchiveWriter, name: &str, hash: i32, location: [f32; 3]) {
	w.fstring(name).i32(hash).floats(&location).floats(&[0.0, 0.0, 0.0, 1.0]).floats(&[1.0, 1.0, 1.0]);
}

fn village() -> ArchiveWriter {
	let mut w = ArchiveWriter::new();
	w.section("MESHES", 2, |w| {
		w.i32(1111);
		w.sized(|w| write_triangle_model(w, "M_Fence"));
		w.i32(2222);
		w.sized(|w| write_triangle_model(w, "M_Well"));
	});
	w.section("ACTORS", 4, |w| {
		write_actor(w, "Fence_1", 1111, [0.0, 0.0, 0.0]);
		write_actor(w, "Fence_2", 1111, [100.0, 0.0, 0.0]);
		write_actor(w, "Well", 2222, [50.0, 50.0, 0.0]);
		write_actor(w, "Ghost", 9999, [0.0, 0.0, 0.0]);
	});
	w
}

fn decode_world<'a>(payload: &'a [u8], options: &DecodeOptions) -> World<'a> {
	match decode_asset(AssetKind::World, payload, FormatVersion::LATEST, options, &CollectedDiagnostics::new()).expect("world decodes") {
		Asset::World(world) => world,
		other => panic!("expected world, got {:?}", other.kind()),
	}
}

#[test]
fn meshes_stay_undecoded_until_requested() {
	let w = village();
	let world = decode_world(w.as_bytes(), &DecodeOptions::scaled(0.01));

	assert_eq!(world.meshes.len(), 2);
	assert_eq!(world.actors.len(), 4);
	assert_eq!(world.actors[1].location, [1.0, 0.0, 0.0]);
	assert_eq!(world.actors[1].scale, [1.0, 1.0, 1.0]);

	let fence = world.mesh(1111).expect("fence mesh");
	assert_eq!(fence.model_size, fence.archive().len());
	assert_eq!(fence.version(), FormatVersion::LATEST);

	let model = fence.decode_model(&CollectedDiagnostics::new()).expect("fence decodes");
	assert_eq!(model.lods[0].materials[0].name, "M_Fence");
	assert_eq!(model.lods[0].vertices[1], [0.01, 0.0, 0.0]);
}

#[test]
fn shared_hash_decodes_once() {
	let w = village();
	let world = decode_world(w.as_bytes(), &DecodeOptions::default());
	let cache = MeshCache::new();
	assert!(cache.is_empty());

	let resolved = world.resolve_actors(&cache, &CollectedDiagnostics::new()).expect("actors resolve");
	assert_eq!(resolved.len(), 4);
	assert_eq!(resolved.iter().map(|item| item.actor).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

	let first = resolved[0].model.as_ref().expect("fence model");
	let second = resolved[1].model.as_ref().expect("fence model");
	assert!(Arc::ptr_eq(first, second));
	let well = resolved[2].model.as_ref().expect("well model");
	assert!(!Arc::ptr_eq(first, well));
	assert_eq!(well.lods[0].materials[0].name, "M_Well");

	assert_eq!(cache.len(), 2);
	let cached = cache.get(world.mesh(1111).expect("fence mesh")).expect("cached fence");
	assert!(Arc::ptr_eq(first, &cached));
}

#[test]
fn missing_hash_resolves_to_none() {
	let w = village();
	let world = decode_world(w.as_bytes(), &DecodeOptions::default());
	let cache = MeshCache::new();

	let resolved = world.resolve_actors(&cache, &CollectedDiagnostics::new()).expect("actors resolve");
	assert_eq!(world.actors[resolved[3].actor].name, "Ghost");
	assert!(resolved[3].model.is_none());
	assert!(world.mesh(9999).is_none());
	assert_eq!(cache.len(), 2);
}

#[test]
fn broken_mesh_fails_only_when_decoded() {
	let mut w = ArchiveWriter::new();
	w.section("MESHES", 1, |w| {
		w.i32(7);
		w.sized(|w| {
			w.section("LODS", 1, |w| {
				w.fstring("LOD0");
				w.i32(1000);
			});
		});
	});
	let world = decode_world(w.as_bytes(), &DecodeOptions::default());
	let mesh = world.mesh(7).expect("mesh listed");
	let err = mesh.decode_model(&CollectedDiagnostics::new()).expect_err("lod overruns");
	assert!(err.is_truncation());

	let cache = MeshCache::new();
	assert!(cache.get_or_decode(mesh, &CollectedDiagnostics::new()).is_err());
	assert!(cache.get(mesh).is_none());
}

#[test]
fn unknown_world_section_warns() {
	let mut w = ArchiveWriter::new();
	w.section("LIGHTS", 3, |w| {
		w.raw(&[0; 12]);
	});
	w.section("ACTORS", 1, |w| write_actor(w, "Lonely", 5, [1.0, 2.0, 3.0]));

	let diagnostics = CollectedDiagnostics::new();
	let world = match decode_asset(AssetKind::World, w.as_bytes(), FormatVersion::LATEST, &DecodeOptions::default(), &diagnostics).expect("world decodes") {
		Asset::World(world) => world,
		other => panic!("expected world, got {:?}", other.kind()),
	};
	assert!(world.meshes.is_empty());
	assert_eq!(world.actors[0].name, "Lonely");
	assert_eq!(diagnostics.messages(), vec!["unknown world section: LIGHTS".to_owned()]);
}

#[test]
fn cache_keeps_scales_apart() {
	let w = village();
	let unit = decode_world(w.as_bytes(), &DecodeOptions::default());
	let half = decode_world(w.as_bytes(), &DecodeOptions::scaled(0.5));
	let cache = MeshCache::new();

	let unit_fence = cache.get_or_decode(unit.mesh(1111).expect("fence"), &CollectedDiagnostics::new()).expect("unit decode");
	assert!(cache.get(half.mesh(1111).expect("fence")).is_none());
	let half_fence = cache.get_or_decode(half.mesh(1111).expect("fence"), &CollectedDiagnostics::new()).expect("scaled decode");

	assert!(!Arc::ptr_eq(&unit_fence, &half_fence));
	assert_eq!(unit_fence.lods[0].vertices[1], [1.0, 0.0, 0.0]);
	assert_eq!(half_fence.lods[0].vertices[1], [0.5, 0.0, 0.0]);
	assert_eq!(cache.len(), 2);

	let again = cache.get_or_decode(unit.mesh(1111).expect("fence"), &CollectedDiagnostics::new()).expect("cached");
	assert!(Arc::ptr_eq(&unit_fence, &again));
}
