/// Ordinal file format revision written after the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FormatVersion {
	/// Initial layout.
	BeforeCustomVersionWasAdded = 0,
	/// Normals carry a leading binormal sign component.
	SerializeBinormalSign = 1,
	/// Vertex colors become a list of named channels.
	AddMultipleVertexColors = 2,
	/// Models may carry convex collision hulls.
	AddConvexCollisionGeom = 3,
	/// Mesh data moves under a `LODS` section.
	LevelOfDetailFormatRestructure = 4,
	/// Skeletons may carry virtual bones.
	SerializeVirtualBones = 5,
	/// `UEWORLD` files become available.
	AddWorldExport = 6,
}

impl FormatVersion {
	/// Newest revision this decoder understands.
	pub const LATEST: Self = Self::AddWorldExport;

	/// Map a raw version byte, `None` for revisions newer than [`Self::LATEST`].
	pub fn from_u8(value: u8) -> Option<Self> {
		Some(match value {
			0 => Self::BeforeCustomVersionWasAdded,
			1 => Self::SerializeBinormalSign,
			2 => Self::AddMultipleVertexColors,
			3 => Self::AddConvexCollisionGeom,
			4 => Self::LevelOfDetailFormatRestructure,
			5 => Self::SerializeVirtualBones,
			6 => Self::AddWorldExport,
			_ => return None,
		})
	}

	/// Raw version byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Render revision name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::BeforeCustomVersionWasAdded => "BeforeCustomVersionWasAdded",
			Self::SerializeBinormalSign => "SerializeBinormalSign",
			Self::AddMultipleVertexColors => "AddMultipleVertexColors",
			Self::AddConvexCollisionGeom => "AddConvexCollisionGeom",
			Self::LevelOfDetailFormatRestructure => "LevelOfDetailFormatRestructure",
			Self::SerializeVirtualBones => "SerializeVirtualBones",
			Self::AddWorldExport => "AddWorldExport",
		}
	}
}
