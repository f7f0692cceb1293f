use crate::ueformat::model::lod::{check_triangles, read_triangles};
use crate::ueformat::{Archive, Result};

/// One convex collision hull.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexCollision {
	/// Hull name.
	pub name: String,
	/// Hull vertices, scaled.
	pub vertices: Vec<[f32; 3]>,
	/// Hull triangles.
	pub indices: Vec<[i32; 3]>,
}

impl ConvexCollision {
	pub(crate) fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		let name = ar.read_fstring()?;

		let vertex_count = ar.read_count("collision vertex count")?;
		let vertices = ar.read_scaled_vec3_vector(vertex_count, scale)?;

		let index_count = ar.read_count("collision index count")?;
		let indices = read_triangles(ar, index_count)?;

		Ok(Self { name, vertices, indices })
	}

	/// Check that every triangle index addresses an existing vertex.
	pub fn validate(&self) -> Result<()> {
		check_triangles(&self.name, &self.indices, self.vertices.len())
	}
}
