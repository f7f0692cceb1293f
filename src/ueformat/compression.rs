use std::io::Read;

use crate::ueformat::{DecodeOptions, MAX_DECOMPRESSED_BYTES, Result, UeFormatError};

/// Payload compression declared by the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed payload.
	None,
	/// zstd-compressed payload.
	Zstd,
	/// gzip-compressed payload.
	Gzip,
}

impl Compression {
	/// Map a header compression name.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"ZSTD" => Some(Self::Zstd),
			"GZIP" => Some(Self::Gzip),
			_ => None,
		}
	}

	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
			Self::Gzip => "gzip",
		}
	}
}

/// Turns a stored payload into plain section bytes before decoding starts.
pub trait Decompressor: Send + Sync {
	/// Decompress `payload`, which must expand to exactly `uncompressed_size` bytes.
	fn decompress(&self, method: Compression, payload: &[u8], uncompressed_size: usize) -> Result<Vec<u8>>;
}

/// Decompressor backed by the `zstd` crate.
#[derive(Debug, Clone, Copy)]
pub struct ZstdDecompressor {
	max_output: usize,
}

impl Default for ZstdDecompressor {
	fn default() -> Self {
		Self::new(MAX_DECOMPRESSED_BYTES)
	}
}

impl ZstdDecompressor {
	/// Create a decompressor refusing outputs above `max_output` bytes.
	pub fn new(max_output: usize) -> Self {
		Self { max_output }
	}

	/// Decompressor honoring [`DecodeOptions::max_decompressed_bytes`].
	pub fn from_options(options: &DecodeOptions) -> Self {
		Self::new(options.max_decompressed_bytes)
	}

	/// Output ceiling in bytes.
	pub fn max_output(&self) -> usize {
		self.max_output
	}
}

impl Decompressor for ZstdDecompressor {
	fn decompress(&self, method: Compression, payload: &[u8], uncompressed_size: usize) -> Result<Vec<u8>> {
		if uncompressed_size > self.max_output {
			return Err(UeFormatError::DecompressedTooLarge { limit: self.max_output });
		}

		let out = match method {
			Compression::None => payload.to_vec(),
			Compression::Zstd => decode_zstd(payload, uncompressed_size, self.max_output)?,
			Compression::Gzip => {
				return Err(UeFormatError::UnsupportedCompression {
					method: "GZIP".to_owned(),
				});
			}
		};

		if out.len() != uncompressed_size {
			return Err(UeFormatError::DecompressedSizeMismatch {
				expected: uncompressed_size,
				actual: out.len(),
			});
		}

		tracing::debug!(method = method.as_str(), stored = payload.len(), decoded = out.len(), "decompressed payload");
		Ok(out)
	}
}

fn decode_zstd(raw: &[u8], expected: usize, limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::with_capacity(expected);
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(UeFormatError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

#[cfg(test)]
mod tests;
