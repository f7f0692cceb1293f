use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, UeFormatError>;

/// Errors produced while reading and decoding UEFORMAT data.
#[derive(Debug, Error)]
pub enum UeFormatError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading magic is not `UEFORMAT`.
	#[error("not a UEFORMAT file (magic={magic:?})")]
	BadMagic {
		/// First up-to-8 bytes of the stream.
		magic: [u8; 8],
	},
	/// Identifier string names no known asset kind.
	#[error("unknown asset identifier {identifier:?}")]
	UnknownIdentifier {
		/// Identifier read from the header.
		identifier: String,
	},
	/// File version is newer than this decoder or too old for the asset kind.
	#[error("unsupported file version {version} for {identifier}")]
	UnsupportedVersion {
		/// Identifier read from the header.
		identifier: &'static str,
		/// Raw version byte.
		version: u8,
	},
	/// Compression type is not supported by the decompressor.
	#[error("unsupported compression {method:?}")]
	UnsupportedCompression {
		/// Compression type string from the header.
		method: String,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Decompressed length differs from the header's declared size.
	#[error("decompressed {actual} bytes, header declared {expected}")]
	DecompressedSizeMismatch {
		/// Declared uncompressed size.
		expected: usize,
		/// Bytes actually produced.
		actual: usize,
	},
	/// Caller asked for one asset kind but the file holds another.
	#[error("expected {expected} asset, file contains {found}")]
	AssetKindMismatch {
		/// Requested identifier.
		expected: &'static str,
		/// Identifier found in the file.
		found: &'static str,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Absolute payload offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available in the current reader.
		rem: usize,
	},
	/// A section's declared byte length runs past its reader's bound.
	#[error("section {section} at offset {at} declares {len} bytes, remaining {rem}")]
	SectionLenOutOfRange {
		/// Section name.
		section: String,
		/// Absolute offset of the section payload.
		at: usize,
		/// Declared payload length.
		len: i64,
		/// Bytes still available in the enclosing reader.
		rem: usize,
	},
	/// A count or length field was negative.
	#[error("negative {what} {value} at offset {at}")]
	NegativeLength {
		/// Which field was being read.
		what: &'static str,
		/// Absolute offset of the field.
		at: usize,
		/// Parsed signed value.
		value: i64,
	},
	/// Triangle index list length is not a multiple of three.
	#[error("index count {count} is not a multiple of 3")]
	IndexCountNotTriangles {
		/// Number of indices read.
		count: usize,
	},
	/// A triangle references a vertex past the end of the vertex list.
	#[error("index {index} out of range for {vertex_count} vertices in {owner}")]
	IndexOutOfRange {
		/// LOD or collision name owning the triangle.
		owner: String,
		/// Offending index value.
		index: i32,
		/// Number of vertices available.
		vertex_count: usize,
	},
}

impl UeFormatError {
	/// Whether the error came from reading past the end of a buffer.
	pub fn is_truncation(&self) -> bool {
		matches!(self, Self::UnexpectedEof { .. })
	}

	/// Whether the error reports a structurally malformed layout.
	pub fn is_malformed_layout(&self) -> bool {
		matches!(
			self,
			Self::SectionLenOutOfRange { .. } | Self::NegativeLength { .. } | Self::IndexCountNotTriangles { .. } | Self::IndexOutOfRange { .. }
		)
	}
}
