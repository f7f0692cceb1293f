use crate::ueformat::options::DecodeContext;
use crate::ueformat::section::{Scope, SectionKind, scan_sections};
use crate::ueformat::{Archive, Result};

/// One skeletal animation clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Animation {
	/// Number of frames in the clip.
	pub num_frames: i32,
	/// Playback rate.
	pub frames_per_second: f32,
	/// Per-bone keyframe tracks.
	pub tracks: Vec<Track>,
	/// Scalar curves (morph targets, material parameters).
	pub curves: Vec<Curve>,
}

/// Sample of a value at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Key<T> {
	/// Frame index; frames need not be contiguous.
	pub frame: i32,
	/// Sampled value.
	pub value: T,
}

/// Position or scale sample.
pub type VectorKey = Key<[f32; 3]>;
/// Rotation sample stored as raw XYZW.
pub type QuatKey = Key<[f32; 4]>;
/// Scalar curve sample.
pub type FloatKey = Key<f32>;

impl QuatKey {
	/// Rotation reordered to W-first.
	pub fn to_wxyz(&self) -> [f32; 4] {
		let [x, y, z, w] = self.value;
		[w, x, y, z]
	}
}

/// Keyframes for one bone. The three lists are independently sparse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
	/// Bone name.
	pub name: String,
	/// Position keys, scaled.
	pub position_keys: Vec<VectorKey>,
	/// Rotation keys.
	pub rotation_keys: Vec<QuatKey>,
	/// Scale keys.
	pub scale_keys: Vec<VectorKey>,
}

/// Scalar animation channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
	/// Curve name.
	pub name: String,
	/// Keys in file order.
	pub keys: Vec<FloatKey>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimSection {
	Tracks,
	Curves,
}

impl SectionKind for AnimSection {
	const SCOPE: Scope = Scope::Animation;

	fn from_name(name: &str) -> Option<Self> {
		match name {
			"TRACKS" => Some(Self::Tracks),
			"CURVES" => Some(Self::Curves),
			_ => None,
		}
	}
}

impl Animation {
	/// Size of the fixed frame-count and rate header.
	pub const HEADER_SIZE: usize = 8;

	pub(crate) fn from_archive(ar: &mut Archive<'_>, ctx: &DecodeContext<'_>) -> Result<Self> {
		let mut anim = Self {
			num_frames: ar.read_i32()?,
			frames_per_second: ar.read_f32()?,
			..Self::default()
		};

		scan_sections(ar, ctx.diagnostics, |ar, section: AnimSection, header| {
			match section {
				AnimSection::Tracks => anim.tracks = ar.read_array(header.element_count()?, |ar| Track::from_archive(ar, ctx.scale))?,
				AnimSection::Curves => anim.curves = ar.read_array(header.element_count()?, Curve::from_archive)?,
			}
			Ok(())
		})?;
		Ok(anim)
	}

	/// Clip length in seconds, zero when the rate is not positive.
	pub fn duration_seconds(&self) -> f32 {
		if self.frames_per_second > 0.0 {
			self.num_frames as f32 / self.frames_per_second
		} else {
			0.0
		}
	}

	/// Find a track by bone name.
	pub fn track(&self, name: &str) -> Option<&Track> {
		self.tracks.iter().find(|track| track.name == name)
	}
}

impl Track {
	fn from_archive(ar: &mut Archive<'_>, scale: f32) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			position_keys: ar.read_bulk_array(|ar| {
				Ok(VectorKey {
					frame: ar.read_i32()?,
					value: ar.read_scaled_vec3(scale)?,
				})
			})?,
			rotation_keys: ar.read_bulk_array(|ar| {
				Ok(QuatKey {
					frame: ar.read_i32()?,
					value: ar.read_floats()?,
				})
			})?,
			scale_keys: ar.read_bulk_array(|ar| {
				Ok(VectorKey {
					frame: ar.read_i32()?,
					value: ar.read_floats()?,
				})
			})?,
		})
	}
}

impl Curve {
	fn from_archive(ar: &mut Archive<'_>) -> Result<Self> {
		Ok(Self {
			name: ar.read_fstring()?,
			keys: ar.read_bulk_array(|ar| {
				Ok(FloatKey {
					frame: ar.read_i32()?,
					value: ar.read_f32()?,
				})
			})?,
		})
	}
}
