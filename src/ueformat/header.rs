use crate::ueformat::{Archive, Compression, FormatVersion, Result, UeFormatError};

/// Magic literal opening every UEFORMAT stream.
pub const MAGIC: &[u8; 8] = b"UEFORMAT";

/// Asset family selected by the header identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
	/// `UEMODEL`: meshes, skeleton, collision.
	Model,
	/// `UEANIM`: keyframe tracks and curves.
	Animation,
	/// `UEWORLD`: hashed meshes and actor placements.
	World,
}

impl AssetKind {
	/// Identifier string written in the header.
	pub fn identifier(self) -> &'static str {
		match self {
			Self::Model => "UEMODEL",
			Self::Animation => "UEANIM",
			Self::World => "UEWORLD",
		}
	}

	/// Map a header identifier to its asset kind.
	pub fn from_identifier(identifier: &str) -> Option<Self> {
		match identifier {
			"UEMODEL" => Some(Self::Model),
			"UEANIM" => Some(Self::Animation),
			"UEWORLD" => Some(Self::World),
			_ => None,
		}
	}

	/// Oldest file version that can carry this asset kind.
	pub fn min_version(self) -> FormatVersion {
		match self {
			Self::Model | Self::Animation => FormatVersion::BeforeCustomVersionWasAdded,
			Self::World => FormatVersion::AddWorldExport,
		}
	}
}

/// Parsed UEFORMAT file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
	/// Asset family of the payload.
	pub kind: AssetKind,
	/// File format revision.
	pub version: FormatVersion,
	/// Name of the exported object.
	pub object_name: String,
	/// Payload compression mode.
	pub compression: Compression,
	/// Payload size once decompressed.
	pub uncompressed_size: usize,
	/// Payload size as stored.
	pub compressed_size: usize,
	/// Byte offset where the payload starts.
	pub header_size: usize,
}

impl FileHeader {
	/// Parse the header from the start of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut ar = Archive::new(bytes);

		let magic: [u8; 8] = match ar.read_code() {
			Ok(value) => value,
			Err(_) => return Err(UeFormatError::BadMagic { magic: first8(bytes) }),
		};
		if &magic != MAGIC {
			return Err(UeFormatError::BadMagic { magic });
		}

		let identifier = ar.read_fstring()?;
		let kind = AssetKind::from_identifier(&identifier).ok_or(UeFormatError::UnknownIdentifier { identifier })?;

		let raw_version = ar.read_u8()?;
		let version = FormatVersion::from_u8(raw_version)
			.filter(|version| *version >= kind.min_version())
			.ok_or(UeFormatError::UnsupportedVersion {
				identifier: kind.identifier(),
				version: raw_version,
			})?;

		let object_name = ar.read_fstring()?;

		let (compression, uncompressed_size, compressed_size) = if ar.read_bool()? {
			let method = ar.read_fstring()?;
			let compression = Compression::from_name(&method).ok_or(UeFormatError::UnsupportedCompression { method })?;
			let uncompressed_size = ar.read_count("uncompressed size")?;
			let compressed_size = ar.read_count("compressed size")?;
			(compression, uncompressed_size, compressed_size)
		} else {
			(Compression::None, ar.remaining(), ar.remaining())
		};

		Ok(Self {
			kind,
			version,
			object_name,
			compression,
			uncompressed_size,
			compressed_size,
			header_size: ar.pos(),
		})
	}
}

fn first8(bytes: &[u8]) -> [u8; 8] {
	let mut magic = [0_u8; 8];
	let take = bytes.len().min(8);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;
