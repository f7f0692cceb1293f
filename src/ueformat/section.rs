use crate::ueformat::{Archive, Diagnostics, Result, UeFormatError};

/// Header of one named section record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
	/// Section name, such as `VERTICES` or `BONES`.
	pub name: String,
	/// Declared element count as stored. Only known sections interpret it.
	pub count: i32,
	/// Offset of the count field within the top-level payload.
	pub count_at: usize,
	/// Declared payload length in bytes.
	pub byte_len: usize,
	/// Payload start, relative to the reader the header was parsed from.
	pub start: usize,
}

impl SectionHeader {
	/// Parse `[name][i32 count][i32 byte_len]` and validate the length against the reader's bound.
	pub fn parse(ar: &mut Archive<'_>) -> Result<Self> {
		let name = ar.read_fstring()?;
		let count_at = ar.offset();
		let count = ar.read_i32()?;
		let len_at = ar.offset();
		let raw_len = ar.read_i32()?;
		let Ok(byte_len) = usize::try_from(raw_len) else {
			return Err(UeFormatError::NegativeLength {
				what: "section byte length",
				at: len_at,
				value: i64::from(raw_len),
			});
		};

		if byte_len > ar.remaining() {
			return Err(UeFormatError::SectionLenOutOfRange {
				section: name,
				at: ar.offset(),
				len: i64::from(raw_len),
				rem: ar.remaining(),
			});
		}

		Ok(Self {
			name,
			count,
			count_at,
			byte_len,
			start: ar.pos(),
		})
	}

	/// Element count for sections that hold an array, rejecting negative values.
	pub fn element_count(&self) -> Result<usize> {
		usize::try_from(self.count).map_err(|_| UeFormatError::NegativeLength {
			what: "section element count",
			at: self.count_at,
			value: i64::from(self.count),
		})
	}

	/// Payload end, relative to the reader the header was parsed from.
	pub fn end(&self) -> usize {
		self.start + self.byte_len
	}
}

/// Container whose sections are being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
	/// Top-level model payload.
	Model,
	/// One level of detail.
	Lod,
	/// Skeleton chunk.
	Skeleton,
	/// Animation payload.
	Animation,
	/// World payload.
	World,
}

impl Scope {
	/// Render scope as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Model => "model",
			Self::Lod => "lod",
			Self::Skeleton => "skeleton",
			Self::Animation => "animation",
			Self::World => "world",
		}
	}
}

/// Closed set of section names a container understands.
pub(crate) trait SectionKind: Sized {
	/// Scope reported when a name is not recognized.
	const SCOPE: Scope;

	/// Map a section name to its variant, `None` for unknown names.
	fn from_name(name: &str) -> Option<Self>;
}

/// Run the section protocol until `ar` is exhausted.
///
/// Known sections go to `handle`; unknown ones are reported and skipped.
/// Either way the cursor ends at the section's declared end.
pub(crate) fn scan_sections<'a, K: SectionKind>(
	ar: &mut Archive<'a>,
	diagnostics: &dyn Diagnostics,
	mut handle: impl FnMut(&mut Archive<'a>, K, &SectionHeader) -> Result<()>,
) -> Result<()> {
	while !ar.eof() {
		let header = SectionHeader::parse(ar)?;
		match K::from_name(&header.name) {
			Some(kind) => handle(ar, kind, &header)?,
			None => {
				diagnostics.warn(&format!("unknown {} section: {}", K::SCOPE.as_str(), header.name));
				ar.skip(header.byte_len)?;
			}
		}
		ar.seek(header.end())?;
	}
	Ok(())
}

/// One section record with its payload carved as a bounded reader.
#[derive(Debug, Clone)]
pub struct Section<'a> {
	/// Parsed record header.
	pub header: SectionHeader,
	/// Reader spanning exactly the declared payload.
	pub payload: Archive<'a>,
}

/// Iterator over raw section records, without interpreting payloads.
pub struct SectionIter<'a> {
	ar: Archive<'a>,
	done: bool,
}

impl<'a> SectionIter<'a> {
	/// Iterate sections from the current position of `ar`.
	pub fn new(ar: Archive<'a>) -> Self {
		Self { ar, done: false }
	}
}

impl<'a> Iterator for SectionIter<'a> {
	type Item = Result<Section<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.ar.eof() {
			self.done = true;
			return None;
		}

		let item = SectionHeader::parse(&mut self.ar).and_then(|header| {
			let payload = self.ar.chunk(header.byte_len)?;
			Ok(Section { header, payload })
		});
		if item.is_err() {
			self.done = true;
		}
		Some(item)
	}
}
