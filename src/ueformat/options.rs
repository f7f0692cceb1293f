use crate::ueformat::{Diagnostics, FormatVersion};

/// Default cap on decompressed payload size.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;

/// Caller-supplied decode settings.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Uniform unit scale applied to every position-like field.
	pub scale: f32,
	/// Maximum accepted decompressed payload size. Payload decoding never
	/// decompresses; build the decompressor with
	/// [`ZstdDecompressor::from_options`](crate::ueformat::ZstdDecompressor::from_options)
	/// to apply it.
	pub max_decompressed_bytes: usize,
	/// Reject triangles that index past the vertex list.
	pub validate_indices: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			scale: 1.0,
			max_decompressed_bytes: MAX_DECOMPRESSED_BYTES,
			validate_indices: false,
		}
	}
}

impl DecodeOptions {
	/// Default options with a custom unit scale.
	pub fn scaled(scale: f32) -> Self {
		Self { scale, ..Self::default() }
	}

	/// Preset for inspection tooling: unit scale, index validation on.
	pub fn for_inspect() -> Self {
		Self {
			validate_indices: true,
			..Self::default()
		}
	}
}

/// Per-decode state threaded through every parser.
#[derive(Clone, Copy)]
pub(crate) struct DecodeContext<'d> {
	pub(crate) scale: f32,
	pub(crate) version: FormatVersion,
	pub(crate) validate_indices: bool,
	pub(crate) diagnostics: &'d dyn Diagnostics,
}

impl<'d> DecodeContext<'d> {
	pub(crate) fn new(options: &DecodeOptions, version: FormatVersion, diagnostics: &'d dyn Diagnostics) -> Self {
		Self {
			scale: options.scale,
			version,
			validate_indices: options.validate_indices,
			diagnostics,
		}
	}
}
