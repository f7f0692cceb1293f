//! Fixture writers for synthesizing UEFORMAT archives in tests.
//!
//! The decoder never encodes, so tests build their inputs byte by byte with
//! these helpers instead of shipping binary fixture files.

/// Latest file version ordinal understood by the decoder.
pub const LATEST_VERSION: u8 = 6;

/// Little-endian byte sink mirroring the archive primitives.
#[derive(Debug, Default, Clone)]
pub struct ArchiveWriter {
	bytes: Vec<u8>,
}

impl ArchiveWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Consume the writer and return its bytes.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Borrow the bytes written so far.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Number of bytes written so far.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether nothing has been written yet.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Append one byte.
	pub fn u8(&mut self, value: u8) -> &mut Self {
		self.bytes.push(value);
		self
	}

	/// Append a one-byte boolean.
	pub fn bool(&mut self, value: bool) -> &mut Self {
		self.u8(u8::from(value))
	}

	/// Append a little-endian `i16`.
	pub fn i16(&mut self, value: i16) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `i32`.
	pub fn i32(&mut self, value: i32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `u32`.
	pub fn u32(&mut self, value: u32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append a little-endian `f32`.
	pub fn f32(&mut self, value: f32) -> &mut Self {
		self.raw(&value.to_le_bytes())
	}

	/// Append consecutive `f32` values.
	pub fn floats(&mut self, values: &[f32]) -> &mut Self {
		for value in values {
			self.f32(*value);
		}
		self
	}

	/// Append consecutive `i32` values.
	pub fn ints(&mut self, values: &[i32]) -> &mut Self {
		for value in values {
			self.i32(*value);
		}
		self
	}

	/// Append raw bytes verbatim.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Append a narrow length-prefixed string with its trailing NUL.
	pub fn fstring(&mut self, value: &str) -> &mut Self {
		let len = i32::try_from(value.len() + 1).expect("fixture string fits in i32");
		self.i32(len);
		self.raw(value.as_bytes());
		self.u8(0)
	}

	/// Append a wide (UTF-16) length-prefixed string with its trailing NUL.
	pub fn wide_fstring(&mut self, value: &str) -> &mut Self {
		let units: Vec<u16> = value.encode_utf16().collect();
		let len = i32::try_from(units.len() + 1).expect("fixture string fits in i32");
		self.i32(-len);
		for unit in units {
			self.raw(&unit.to_le_bytes());
		}
		self.raw(&[0, 0])
	}

	/// Append a section record whose byte length is measured from `build`.
	pub fn section(&mut self, name: &str, count: i32, build: impl FnOnce(&mut ArchiveWriter)) -> &mut Self {
		let mut body = ArchiveWriter::new();
		build(&mut body);
		let len = i32::try_from(body.len()).expect("fixture section fits in i32");
		self.section_raw(name, count, len, body.as_bytes())
	}

	/// Append a section record with an explicitly declared byte length.
	pub fn section_raw(&mut self, name: &str, count: i32, byte_len: i32, payload: &[u8]) -> &mut Self {
		self.fstring(name);
		self.i32(count);
		self.i32(byte_len);
		self.raw(payload)
	}

	/// Append an `i32` byte-length prefix followed by the body from `build`.
	pub fn sized(&mut self, build: impl FnOnce(&mut ArchiveWriter)) -> &mut Self {
		let mut body = ArchiveWriter::new();
		build(&mut body);
		let len = i32::try_from(body.len()).expect("fixture block fits in i32");
		self.i32(len);
		self.raw(body.as_bytes())
	}
}

/// Builder for a complete UEFORMAT file around a section payload.
#[derive(Debug, Clone)]
pub struct FileWriter {
	identifier: String,
	version: u8,
	object_name: String,
	compression: Option<String>,
}

impl FileWriter {
	/// Start a file for the given identifier (`UEMODEL`, `UEANIM`, `UEWORLD`).
	pub fn new(identifier: &str) -> Self {
		Self {
			identifier: identifier.to_owned(),
			version: LATEST_VERSION,
			object_name: "Fixture".to_owned(),
			compression: None,
		}
	}

	/// Override the version byte.
	pub fn version(mut self, version: u8) -> Self {
		self.version = version;
		self
	}

	/// Override the object name.
	pub fn object_name(mut self, name: &str) -> Self {
		self.object_name = name.to_owned();
		self
	}

	/// Compress the payload with zstd.
	pub fn zstd(self) -> Self {
		self.compression("ZSTD")
	}

	/// Declare an arbitrary compression type; only `ZSTD` actually compresses.
	pub fn compression(mut self, kind: &str) -> Self {
		self.compression = Some(kind.to_owned());
		self
	}

	/// Encode header and payload into file bytes.
	pub fn finish(&self, payload: &[u8]) -> Vec<u8> {
		let mut out = ArchiveWriter::new();
		out.raw(b"UEFORMAT");
		out.fstring(&self.identifier);
		out.u8(self.version);
		out.fstring(&self.object_name);

		match &self.compression {
			None => {
				out.bool(false);
				out.raw(payload);
			}
			Some(kind) => {
				let packed = if kind == "ZSTD" {
					zstd::encode_all(payload, 0).expect("zstd fixture encodes")
				} else {
					payload.to_vec()
				};
				out.bool(true);
				out.fstring(kind);
				out.i32(i32::try_from(payload.len()).expect("fixture payload fits in i32"));
				out.i32(i32::try_from(packed.len()).expect("fixture payload fits in i32"));
				out.raw(&packed);
			}
		}

		out.into_bytes()
	}
}
