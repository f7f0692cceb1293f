use std::fs;
use std::path::Path;

use crate::ueformat::options::DecodeContext;
use crate::ueformat::{
	Animation, Archive, AssetKind, Compression, DecodeOptions, Decompressor, Diagnostics, FileHeader, FormatVersion, Model, Result, SectionIter,
	UeFormatError, World,
};

/// Decoded top-level entity.
#[derive(Debug, Clone)]
pub enum Asset<'a> {
	/// `UEMODEL` payload.
	Model(Model),
	/// `UEANIM` payload.
	Animation(Animation),
	/// `UEWORLD` payload, borrowing the file's bytes for deferred meshes.
	World(World<'a>),
}

impl Asset<'_> {
	/// Asset family of this value.
	pub fn kind(&self) -> AssetKind {
		match self {
			Self::Model(_) => AssetKind::Model,
			Self::Animation(_) => AssetKind::Animation,
			Self::World(_) => AssetKind::World,
		}
	}
}

/// Opened UEFORMAT file with parsed header and decompressed payload.
pub struct UeFile {
	/// Parsed file header.
	pub header: FileHeader,
	payload: Vec<u8>,
}

impl UeFile {
	/// Read, parse, and decompress a file from disk.
	pub fn open(path: impl AsRef<Path>, decompressor: &dyn Decompressor) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(raw, decompressor)
	}

	/// Parse and decompress an in-memory file.
	pub fn from_bytes(mut raw: Vec<u8>, decompressor: &dyn Decompressor) -> Result<Self> {
		let header = FileHeader::parse(&raw)?;
		tracing::debug!(
			identifier = header.kind.identifier(),
			version = header.version.as_u8(),
			object = %header.object_name,
			compression = header.compression.as_str(),
			"parsed header"
		);

		let payload = match header.compression {
			Compression::None => raw.split_off(header.header_size),
			method => decompressor.decompress(method, &raw[header.header_size..], header.uncompressed_size)?,
		};

		Ok(Self { header, payload })
	}

	/// Decompressed payload bytes following the header.
	pub fn payload(&self) -> &[u8] {
		&self.payload
	}

	/// Reader over the whole payload.
	pub fn archive(&self) -> Archive<'_> {
		Archive::new(&self.payload)
	}

	/// Iterate the top-level section records, skipping the animation header if present.
	pub fn sections(&self) -> Result<SectionIter<'_>> {
		let mut ar = self.archive();
		if self.header.kind == AssetKind::Animation {
			ar.skip(Animation::HEADER_SIZE)?;
		}
		Ok(SectionIter::new(ar))
	}

	/// Decode the payload according to the header's asset kind.
	pub fn decode(&self, options: &DecodeOptions, diagnostics: &dyn Diagnostics) -> Result<Asset<'_>> {
		decode_asset(self.header.kind, &self.payload, self.header.version, options, diagnostics)
	}

	/// Decode a `UEMODEL` payload.
	pub fn decode_model(&self, options: &DecodeOptions, diagnostics: &dyn Diagnostics) -> Result<Model> {
		match self.decode_kind(AssetKind::Model, options, diagnostics)? {
			Asset::Model(model) => Ok(model),
			other => Err(mismatch(AssetKind::Model, other.kind())),
		}
	}

	/// Decode a `UEANIM` payload.
	pub fn decode_animation(&self, options: &DecodeOptions, diagnostics: &dyn Diagnostics) -> Result<Animation> {
		match self.decode_kind(AssetKind::Animation, options, diagnostics)? {
			Asset::Animation(anim) => Ok(anim),
			other => Err(mismatch(AssetKind::Animation, other.kind())),
		}
	}

	/// Decode a `UEWORLD` payload.
	pub fn decode_world(&self, options: &DecodeOptions, diagnostics: &dyn Diagnostics) -> Result<World<'_>> {
		match self.decode_kind(AssetKind::World, options, diagnostics)? {
			Asset::World(world) => Ok(world),
			other => Err(mismatch(AssetKind::World, other.kind())),
		}
	}

	fn decode_kind(&self, expected: AssetKind, options: &DecodeOptions, diagnostics: &dyn Diagnostics) -> Result<Asset<'_>> {
		if self.header.kind != expected {
			return Err(mismatch(expected, self.header.kind));
		}
		self.decode(options, diagnostics)
	}
}

/// Decode an already-decompressed payload of the given asset kind.
pub fn decode_asset<'a>(
	kind: AssetKind,
	payload: &'a [u8],
	version: FormatVersion,
	options: &DecodeOptions,
	diagnostics: &dyn Diagnostics,
) -> Result<Asset<'a>> {
	let ctx = DecodeContext::new(options, version, diagnostics);
	let mut ar = Archive::new(payload);

	let asset = match kind {
		AssetKind::Model => Asset::Model(Model::from_archive(&mut ar, &ctx)?),
		AssetKind::Animation => Asset::Animation(Animation::from_archive(&mut ar, &ctx)?),
		AssetKind::World => Asset::World(World::from_archive(&mut ar, &ctx)?),
	};
	tracing::debug!(identifier = kind.identifier(), bytes = payload.len(), "decoded payload");
	Ok(asset)
}

fn mismatch(expected: AssetKind, found: AssetKind) -> UeFormatError {
	UeFormatError::AssetKindMismatch {
		expected: expected.identifier(),
		found: found.identifier(),
	}
}
