use crate::ueformat::options::DecodeContext;
use crate::ueformat::section::{Scope, SectionHeader, SectionKind, scan_sections};
use crate::ueformat::{Archive, Result};

/// Bone hierarchy, sockets, and virtual bones of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
	/// Bones in file order, parent-indexed.
	pub bones: Vec<Bone>,
	/// Named attachment points.
	pub sockets: Vec<Socket>,
	/// Bone aliases.
	pub virtual_bones: Vec<VirtualBone>,
}

/// One skeletal joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
	/// Bone name.
	pub name: String,
	/// Parent bone index, `-1` for roots.
	pub parent_index: i32,
	/// Local position, scaled.
	pub position: [f32; 3],
	/// Local rotation as raw XYZW components.
	pub rotation: [f32; 4],
}

/// Named attachment point parented to a bone by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Socket {
	/// Socket name.
	pub name: String,
	/// Name of the bone the socket hangs from.
	pub parent_name: String,
	/// Local position, scaled.
	pub position: [f32; 3],
	/// Local rotation as raw XYZW components.
	pub rotation: [f32; 4],
	/// Local scale.
	pub scale: [f32; 3],
}

/// Alias redirecting one joint through another's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualBone {
	/// Source bone name.
	pub source_name: String,
	/// Target bone name.
	pub target_name: String,
	/// Name of the virtual bone.
	pub virtual_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkeletonSection {
	Bones,
	Sockets,
	VirtualBones,
}

impl SectionKind for SkeletonSection {
	const SCOPE: Scope = Scope::Skeleton;

	fn from_name(name: &str) -> Option<Self> {
		match name {
			"BONES" => Some(Self::Bones),
			"SOCKETS" => Some(Self::Sockets),
			"VIRTUALBONES" => Some(Self::VirtualBones),
			_ => None,
		}
	}
}

impl Skeleton {
	pub(crate) fn from_archive(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let mut skeleton = Self::default();
		scan_sections(ar, ctx.diagnostics, |ar, section: SkeletonSection, header| skeleton.read_section(ar, section, header, ctx))?;
		Ok(skeleton)
	}

	pub(crate) fn read_section(&mut self, ar: &mut Archive<'_>, section: SkeletonSection, header: &SectionHeader, ctx: &DecodeContext<'_>) -> Result<()> {
		let scale = ctx.scale;
		match section {
			SkeletonSection::Bones => self.bones = ar.read_array(header.element_count()?, |ar| Bone::from_archive(ar, scale))?,
			SkeletonSection::Sockets => self.sockets = ar.read_array(header.element_count()?, |ar| Socket::from_archive(ar, scale))?,
			SkeletonSection::VirtualBones => self.virtual_bones = ar.read_array(header.element_count()?, VirtualBone::from_archive)?,
		}
		Ok(())
	}

	/// Find a bone index by name.
	pub fn bone_index(&self, name: &str) -> Option<usize> {
		self.bones.iter().position(|bone| bone.name == name)
	}

	/// Return the parent of bone `index`, `None` for roots and dangling parents.
	pub fn parent_of(&self, index: usize) -> Option<&Bone> {
		let parent = usize::try_from(self.bones.get(index)?.parent_index).ok()?;
		self.bones.get(parent)
	}
}

impl Bone {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			parent_index: ar.read_i32()?,
			position: ar.read_scaled_vec3(scale)?,
			rotation: ar.read_floats()?,
		})
	}

	/// Whether the bone has no parent.
	pub fn is_root(&self) -> bool {
		self.parent_index < 0
	}

	/// Rotation reordered to W-first.
	pub fn rotation_wxyz(&self) -> [f32; 4] {
		let [x, y, z, w] = self.rotation;
		[w, x, y, z]
	}
}

impl Socket {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			parent_name: ar.read_fstring()?,
			position: ar.read_scaled_vec3(scale)?,
			rotation: ar.read_floats()?,
			scale: ar.read_floats()?,
		})
	}
}

impl VirtualBone {
	fn from_archive(ar: &mut Archive<'_>) -> Result<Self> {
		Ok(Self {
			source_name: ar.read_fstring()?,
			target_name: ar.read_fstring()?,
			virtual_name: ar.read_fstring()?,
		})
	}
}
