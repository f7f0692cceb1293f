use crate::ueformat::options::DecodeContext;
use crate::ueformat::section::{Scope, SectionHeader, SectionKind, scan_sections};
use crate::ueformat::{Archive, FormatVersion, Result, UeFormatError};

/// One level-of-detail mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelLod {
	/// LOD name as exported.
	pub name: String,
	/// Vertex positions, scaled.
	pub vertices: Vec<[f32; 3]>,
	/// Triangles as zero-based vertex indices, signed as stored.
	pub indices: Vec<[i32; 3]>,
	/// Per-vertex normals (stored sign component dropped).
	pub normals: Vec<[f32; 3]>,
	/// Vertex color channels.
	pub colors: Vec<VertexColor>,
	/// UV channels, each with its own length.
	pub uvs: Vec<Vec<[f32; 2]>>,
	/// Material bindings over triangle ranges.
	pub materials: Vec<Material>,
	/// Sparse skinning influences.
	pub weights: Vec<Weight>,
	/// Shape keys.
	pub morph_targets: Vec<MorphTarget>,
}

/// Named vertex color channel with components normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexColor {
	/// Channel name.
	pub name: String,
	/// RGBA per vertex.
	pub data: Vec<[f32; 4]>,
}

/// Material bound to a range of triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
	/// Material slot name.
	pub name: String,
	/// First index of the range.
	pub first_index: i32,
	/// Number of faces in the range.
	pub num_faces: i32,
}

/// One skinning influence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight {
	/// Index into the skeleton's bones.
	pub bone_index: i16,
	/// Influenced vertex.
	pub vertex_index: i32,
	/// Influence amount.
	pub weight: f32,
}

/// Named sparse set of per-vertex deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTarget {
	/// Shape key name.
	pub name: String,
	/// Affected vertices only.
	pub deltas: Vec<MorphTargetDelta>,
}

/// Delta applied to one vertex by a morph target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphTargetDelta {
	/// Position delta, scaled.
	pub position: [f32; 3],
	/// Normal delta.
	pub normal: [f32; 3],
	/// Affected vertex.
	pub vertex_index: i32,
}

/// Sections understood inside a LOD chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LodSection {
	Vertices,
	Indices,
	Normals,
	Tangents,
	VertexColors,
	TexCoords,
	Materials,
	Weights,
	MorphTargets,
}

impl SectionKind for LodSection {
	const SCOPE: Scope = Scope::Lod;

	fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"VERTICES" => Self::Vertices,
			"INDICES" => Self::Indices,
			"NORMALS" => Self::Normals,
			"TANGENTS" => Self::Tangents,
			"VERTEXCOLORS" => Self::VertexColors,
			"TEXCOORDS" => Self::TexCoords,
			"MATERIALS" => Self::Materials,
			"WEIGHTS" => Self::Weights,
			"MORPHTARGETS" => Self::MorphTargets,
			_ => return None,
		})
	}
}

impl ModelLod {
	pub(crate) fn from_archive(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let name = ar.read_fstring()?;
		let size = ar.read_count("lod byte length")?;
		let mut body = ar.chunk(size)?;

		let mut lod = Self { name, ..Self::default() };
		scan_sections(&mut body, ctx.diagnostics, |ar, section: LodSection, header| lod.read_section(ar, section, header, ctx))?;
		Ok(lod)
	}

	/// Decode one known section into this LOD. Shared with the pre-LOD model layout.
	pub(crate) fn read_section(&mut self, ar: &mut Archive<'_>, section: LodSection, header: &SectionHeader, ctx: &DecodeContext<'_>) -> Result<()> {
		// Tangents are not decoded; the scanner seeks past them.
		if section == LodSection::Tangents {
			return Ok(());
		}

		let count = header.element_count()?;
		match section {
			LodSection::Vertices => self.vertices = ar.read_scaled_vec3_vector(count, ctx.scale)?,
			LodSection::Indices => self.indices = read_triangles(ar, count)?,
			LodSection::Normals => self.normals = read_normals(ar, count, ctx.version)?,
			LodSection::Tangents => {}
			LodSection::VertexColors => self.colors = read_vertex_colors(ar, count, ctx.version)?,
			LodSection::TexCoords => {
				self.uvs = ar.read_array(count, |ar| {
					let len = ar.read_count("uv count")?;
					ar.read_float_groups::<2>(len)
				})?;
			}
			LodSection::Materials => self.materials = ar.read_array(count, Material::from_archive)?,
			LodSection::Weights => self.weights = ar.read_array(count, Weight::from_archive)?,
			LodSection::MorphTargets => self.morph_targets = ar.read_array(count, |ar| MorphTarget::from_archive(ar, ctx.scale))?,
		}
		Ok(())
	}

	/// Number of vertices.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Number of triangles.
	pub fn triangle_count(&self) -> usize {
		self.indices.len()
	}

	/// Check that every triangle index addresses an existing vertex.
	pub fn validate(&self) -> Result<()> {
		check_triangles(&self.name, &self.indices, self.vertices.len())
	}
}

impl Material {
	fn from_archive(ar: &mut Archive<'_>) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			first_index: ar.read_i32()?,
			num_faces: ar.read_i32()?,
		})
	}
}

impl Weight {
	fn from_archive(ar: &mut Archive<'_>) -> Result<Self> {
		Ok(Self {
			bone_index: ar.read_i16()?,
			vertex_index: ar.read_i32()?,
			weight: ar.read_f32()?,
		})
	}
}

impl MorphTarget {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			deltas: ar.read_bulk_array(|ar| MorphTargetDelta::from_archive(ar, scale))?,
		})
	}
}

impl MorphTargetDelta {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			position: ar.read_scaled_vec3(scale)?,
			normal: ar.read_floats()?,
			vertex_index: ar.read_i32()?,
		})
	}
}

/// Read `count` signed indices as triangles.
pub(crate) fn read_triangles(ar: &mut Archive<'_>, count: usize) -> Result<Vec<[i32; 3]>> {
	if count % 3 != 0 {
		return Err(UeFormatError::IndexCountNotTriangles { count });
	}
	let flat = ar.read_int_vector(count)?;
	Ok(flat.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]]).collect())
}

/// Reject negative indices and indices at or past `vertex_count`.
pub(crate) fn check_triangles(owner: &str, triangles: &[[i32; 3]], vertex_count: usize) -> Result<()> {
	let in_range = |index: i32| usize::try_from(index).is_ok_and(|index| index < vertex_count);
	match triangles.iter().flatten().copied().find(|index| !in_range(*index)) {
		Some(index) => Err(UeFormatError::IndexOutOfRange {
			owner: owner.to_owned(),
			index,
			vertex_count,
		}),
		None => Ok(()),
	}
}

fn read_normals(ar: &mut Archive<'_>, count: usize, version: FormatVersion) -> Result<Vec<[f32; 3]>> {
	if version < FormatVersion::SerializeBinormalSign {
		return ar.read_float_groups::<3>(count);
	}
	// Stored as sign, X, Y, Z.
	let packed = ar.read_float_groups::<4>(count)?;
	Ok(packed.into_iter().map(|[_, x, y, z]| [x, y, z]).collect())
}

fn read_vertex_colors(ar: &mut Archive<'_>, count: usize, version: FormatVersion) -> Result<Vec<VertexColor>> {
	if version < FormatVersion::AddMultipleVertexColors {
		let data = read_color_data(ar, count)?;
		return Ok(vec![VertexColor { name: "COL0".to_owned(), data }]);
	}

	ar.read_array(count, |ar| {
		let name = ar.read_fstring()?;
		let len = ar.read_count("vertex color count")?;
		let data = read_color_data(ar, len)?;
		Ok(VertexColor { name, data })
	})
}

fn read_color_data(ar: &mut Archive<'_>, count: usize) -> Result<Vec<[f32; 4]>> {
	let raw = ar.read_byte_groups::<4>(count)?;
	Ok(raw.into_iter().map(|rgba| rgba.map(|channel| f32::from(channel) / 255.0)).collect())
}
