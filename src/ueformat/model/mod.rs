mod collision;
mod lod;
mod skeleton;

/// Convex collision hull.
pub use collision::ConvexCollision;
/// Level-of-detail mesh and its per-vertex payloads.
pub use lod::{Material, ModelLod, MorphTarget, MorphTargetDelta, VertexColor, Weight};
/// Skeleton hierarchy types.
pub use skeleton::{Bone, Skeleton, Socket, VirtualBone};

use crate::ueformat::options::DecodeContext;
use crate::ueformat::section::{Scope, SectionKind, scan_sections};
use crate::ueformat::{Archive, FormatVersion, Result};

use lod::LodSection;
use skeleton::SkeletonSection;

/// Name given to the single LOD of a model written before the `LODS` layout.
pub const LEGACY_LOD_NAME: &str = "LOD0";

/// One decoded mesh asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
	/// LODs, finest first, as written.
	pub lods: Vec<ModelLod>,
	/// Convex collision hulls.
	pub collisions: Vec<ConvexCollision>,
	/// Skeleton, absent for static meshes.
	pub skeleton: Option<Skeleton>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModelSection {
	Lods,
	Skeleton,
	Collision,
}

impl SectionKind for ModelSection {
	const SCOPE: Scope = Scope::Model;

	fn from_name(name: &str) -> Option<Self> {
		match name {
			"LODS" => Some(Self::Lods),
			"SKELETON" => Some(Self::Skeleton),
			"COLLISION" => Some(Self::Collision),
			_ => None,
		}
	}
}

/// Model payload written before `LevelOfDetailFormatRestructure`: mesh and
/// skeleton sections sit directly at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegacyModelSection {
	Mesh(LodSection),
	Skeleton(SkeletonSection),
	Collision,
}

impl SectionKind for LegacyModelSection {
	const SCOPE: Scope = Scope::Model;

	fn from_name(name: &str) -> Option<Self> {
		if name == "COLLISION" {
			return Some(Self::Collision);
		}
		LodSection::from_name(name)
			.map(Self::Mesh)
			.or_else(|| SkeletonSection::from_name(name).map(Self::Skeleton))
	}
}

impl Model {
	pub(crate) fn from_archive(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let model = if ctx.version >= FormatVersion::LevelOfDetailFormatRestructure {
			Self::read_sections(ar, ctx)?
		} else {
			Self::read_legacy_sections(ar, ctx)?
		};

		if ctx.validate_indices {
			model.validate()?;
		}
		Ok(model)
	}

	fn read_sections(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let mut model = Self::default();
		scan_sections(ar, ctx.diagnostics, |ar, section: ModelSection, header| {
			match section {
				ModelSection::Lods => model.lods = ar.read_array(header.element_count()?, |ar| ModelLod::from_archive(ar, ctx))?,
				ModelSection::Skeleton => {
					let mut body = ar.chunk(header.byte_len)?;
					model.skeleton = Some(Skeleton::from_archive(&mut body, ctx)?);
				}
				ModelSection::Collision => model.collisions = ar.read_array(header.element_count()?, |ar| ConvexCollision::from_archive(ar, ctx.scale))?,
			}
			Ok(())
		})?;
		Ok(model)
	}

	fn read_legacy_sections(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let mut lod = ModelLod {
			name: LEGACY_LOD_NAME.to_owned(),
			..ModelLod::default()
		};
		let mut skeleton: Option<Skeleton> = None;
		let mut collisions = Vec::new();

		scan_sections(ar, ctx.diagnostics, |ar, section: LegacyModelSection, header| match section {
			LegacyModelSection::Mesh(section) => lod.read_section(ar, section, header, ctx),
			LegacyModelSection::Skeleton(section) => skeleton.get_or_insert_with(Skeleton::default).read_section(ar, section, header, ctx),
			LegacyModelSection::Collision => {
				collisions = ar.read_array(header.element_count()?, |ar| ConvexCollision::from_archive(ar, ctx.scale))?;
				Ok(())
			}
		})?;

		Ok(Self {
			lods: vec![lod],
			collisions,
			skeleton,
		})
	}

	/// Check index bounds of every LOD and collision hull.
	pub fn validate(&self) -> Result<()> {
		for lod in &self.lods {
			lod.validate()?;
		}
		for collision in &self.collisions {
			collision.validate()?;
		}
		Ok(())
	}

	/// Whether any LOD carries skinning influences.
	pub fn is_skinned(&self) -> bool {
		self.lods.iter().any(|lod| !lod.weights.is_empty())
	}
}
