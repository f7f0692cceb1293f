use std::sync::Arc;

use rayon::prelude::*;

use crate::ueformat::options::DecodeContext;
use crate::ueformat::section::{Scope, SectionKind, scan_sections};
use crate::ueformat::{Archive, Diagnostics, FormatVersion, MeshCache, Model, Result};

/// A scene of placed mesh instances.
#[derive(Debug, Clone, Default)]
pub struct World<'a> {
	/// Distinct meshes, keyed by content hash, still undecoded.
	pub meshes: Vec<HashedMesh<'a>>,
	/// Placed instances.
	pub actors: Vec<Actor>,
}

/// Model sub-archive kept as an unparsed span until a consumer asks for it.
#[derive(Debug, Clone, Copy)]
pub struct HashedMesh<'a> {
	/// Content hash referenced by [`Actor::model_hash`].
	pub hash: i32,
	/// Declared sub-archive length.
	pub model_size: usize,
	archive: Archive<'a>,
	version: FormatVersion,
	scale: f32,
	validate_indices: bool,
}

/// One placed mesh instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
	/// Actor name.
	pub name: String,
	/// Hash of the [`HashedMesh`] this actor places.
	pub model_hash: i32,
	/// World location, scaled.
	pub location: [f32; 3],
	/// Rotation as stored.
	pub rotation: [f32; 4],
	/// Scale as stored.
	pub scale: [f32; 3],
}

/// Actor paired with its decoded model.
#[derive(Debug, Clone)]
pub struct ResolvedActor {
	/// Index into [`World::actors`].
	pub actor: usize,
	/// Decoded model, `None` when no mesh carries the actor's hash.
	pub model: Option<Arc<Model>>,
}

/// Identity of one decoded mesh within a [`MeshCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MeshKey {
	hash: i32,
	scale_bits: u32,
	version: FormatVersion,
	validate_indices: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldSection {
	Meshes,
	Actors,
}

impl SectionKind for WorldSection {
	const SCOPE: Scope = Scope::World;

	fn from_name(name: &str) -> Option<Self> {
		match name {
			"MESHES" => Some(Self::Meshes),
			"ACTORS" => Some(Self::Actors),
			_ => None,
		}
	}
}

impl<'a> World<'a> {
	pub(crate) fn from_archive(ar: &mut Archive<'a>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let mut world = Self::default();
		scan_sections(ar, ctx.diagnostics, |ar, section: WorldSection, header| {
			match section {
				WorldSection::Meshes => world.meshes = ar.read_array(header.element_count()?, |ar| HashedMesh::from_archive(ar, ctx))?,
				WorldSection::Actors => world.actors = ar.read_array(header.element_count()?, |ar| Actor::from_archive(ar, ctx.scale))?,
			}
			Ok(())
		})?;
		Ok(world)
	}

	/// Find the mesh carrying `hash`.
	pub fn mesh(&self, hash: i32) -> Option<&HashedMesh<'a>> {
		self.meshes.iter().find(|mesh| mesh.hash == hash)
	}

	/// Decode each actor's model through `cache`, in parallel.
	///
	/// Actors sharing a hash share one decode and one `Arc<Model>`.
	pub fn resolve_actors(&self, cache: &MeshCache, diagnostics: &dyn Diagnostics) -> Result<Vec<ResolvedActor>> {
		self.actors
			.par_iter()
			.enumerate()
			.map(|(actor, item)| {
				let model = match self.mesh(item.model_hash) {
					Some(mesh) => Some(cache.get_or_decode(mesh, diagnostics)?),
					None => None,
				};
				Ok(ResolvedActor { actor, model })
			})
			.collect()
	}
}

impl<'a> HashedMesh<'a> {
	fn from_archive(ar: &mut Archive<'a>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let hash = ar.read_i32()?;
		let model_size = ar.read_count("mesh byte length")?;
		let archive = ar.chunk(model_size)?;
		Ok(Self {
			hash,
			model_size,
			archive,
			version: ctx.version,
			scale: ctx.scale,
			validate_indices: ctx.validate_indices,
		})
	}

	/// Bounded reader over the undecoded model sections.
	pub fn archive(&self) -> Archive<'a> {
		self.archive
	}

	/// File version the sub-archive was written with.
	pub fn version(&self) -> FormatVersion {
		self.version
	}

	/// Unit scale the world was decoded with.
	pub fn scale(&self) -> f32 {
		self.scale
	}

	/// Everything besides the bytes that shapes the decoded model.
	pub(crate) fn cache_key(&self) -> MeshKey {
		MeshKey {
			hash: self.hash,
			scale_bits: self.scale.to_bits(),
			version: self.version,
			validate_indices: self.validate_indices,
		}
	}

	/// Decode the sub-archive into a model with the world's scale.
	pub fn decode_model(&self, diagnostics: &dyn Diagnostics) -> Result<Model> {
		let ctx = DecodeContext {
			scale: self.scale,
			version: self.version,
			validate_indices: self.validate_indices,
			diagnostics,
		};
		let mut ar = self.archive;
		Model::from_archive(&mut ar, &ctx)
	}
}

impl Actor {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			model_hash: ar.read_i32()?,
			location: ar.read_scaled_vec3(scale)?,
			rotation: ar.read_floats()?,
			scale: ar.read_floats()?,
		})
	}
}

#[cfg(test)]
mod tests;
