use crate::ueformat::{Result, UeFormatError};

/// Bounded little-endian reader over an immutable byte slice.
///
/// Offsets returned by [`Archive::pos`] are relative to the reader's own
/// start. Readers carved with [`Archive::chunk`] remember their absolute
/// position in the top-level payload so errors can point at it.
#[derive(Debug, Clone, Copy)]
pub struct Archive<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Archive<'a> {
	/// Create a reader at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, base: 0 }
	}

	/// Return current offset relative to this reader's start.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return current offset within the top-level payload.
	pub fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Return this reader's total byte length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Whether this reader spans zero bytes.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Whether the offset has reached this reader's own bound.
	pub fn eof(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	/// Return every byte this reader spans, independent of position.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Read exactly `n` bytes and advance.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(self.eof_error(n));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed number of bytes into an array.
	pub fn read_code<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_code::<1>()?[0])
	}

	/// Read a one-byte boolean (nonzero is true).
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	/// Read a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_code()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_code()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_code()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_code()?))
	}

	/// Read an `i32` that must be a non-negative count or length.
	pub fn read_count(&mut self, what: &'static str) -> Result<usize> {
		let at = self.offset();
		let value = self.read_i32()?;
		usize::try_from(value).map_err(|_| UeFormatError::NegativeLength {
			what,
			at,
			value: i64::from(value),
		})
	}

	/// Read a signed-length-prefixed string.
	///
	/// A positive length selects one byte per character, a negative length
	/// selects UTF-16 code units. Both forms carry a trailing NUL that is
	/// dropped.
	pub fn read_fstring(&mut self) -> Result<String> {
		let len = self.read_i32()?;
		if len >= 0 {
			let raw = self.read_exact(len as usize)?;
			let text = raw.strip_suffix(&[0]).unwrap_or(raw);
			return Ok(String::from_utf8_lossy(text).into_owned());
		}

		let units = len.unsigned_abs() as usize;
		let need = units.checked_mul(2).ok_or_else(|| self.eof_error(usize::MAX))?;
		let raw = self.read_exact(need)?;
		let mut code: Vec<u16> = raw.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect();
		if code.last() == Some(&0) {
			code.pop();
		}
		Ok(String::from_utf16_lossy(&code))
	}

	/// Read `N` consecutive floats.
	pub fn read_floats<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0.0_f32; N];
		for slot in &mut out {
			*slot = self.read_f32()?;
		}
		Ok(out)
	}

	/// Read three floats and multiply each by `scale`.
	pub fn read_scaled_vec3(&mut self, scale: f32) -> Result<[f32; 3]> {
		Ok(self.read_floats::<3>()?.map(|value| value * scale))
	}

	/// Read `n` consecutive floats.
	pub fn read_float_vector(&mut self, n: usize) -> Result<Vec<f32>> {
		let raw = self.read_elements(n, 4)?;
		Ok(raw.chunks_exact(4).map(|item| f32::from_le_bytes([item[0], item[1], item[2], item[3]])).collect())
	}

	/// Read `n` consecutive signed integers.
	pub fn read_int_vector(&mut self, n: usize) -> Result<Vec<i32>> {
		let raw = self.read_elements(n, 4)?;
		Ok(raw.chunks_exact(4).map(|item| i32::from_le_bytes([item[0], item[1], item[2], item[3]])).collect())
	}

	/// Read `n` consecutive bytes.
	pub fn read_byte_vector(&mut self, n: usize) -> Result<&'a [u8]> {
		self.read_exact(n)
	}

	/// Read `n` groups of `N` floats.
	pub fn read_float_groups<const N: usize>(&mut self, n: usize) -> Result<Vec<[f32; N]>> {
		let raw = self.read_elements(n, 4 * N)?;
		Ok(raw
			.chunks_exact(4 * N)
			.map(|item| std::array::from_fn(|idx| f32::from_le_bytes([item[idx * 4], item[idx * 4 + 1], item[idx * 4 + 2], item[idx * 4 + 3]])))
			.collect())
	}

	/// Read `n` three-float vectors, each component multiplied by `scale`.
	pub fn read_scaled_vec3_vector(&mut self, n: usize, scale: f32) -> Result<Vec<[f32; 3]>> {
		let mut out = self.read_float_groups::<3>(n)?;
		for item in &mut out {
			*item = item.map(|value| value * scale);
		}
		Ok(out)
	}

	/// Read `n` groups of `N` bytes.
	pub fn read_byte_groups<const N: usize>(&mut self, n: usize) -> Result<Vec<[u8; N]>> {
		let raw = self.read_elements(n, N)?;
		Ok(raw.chunks_exact(N).map(|item| std::array::from_fn(|idx| item[idx])).collect())
	}

	/// Carve a reader over the next `len` bytes and advance past them.
	///
	/// The returned reader reaches [`Archive::eof`] at its own bound.
	pub fn chunk(&mut self, len: usize) -> Result<Archive<'a>> {
		let base = self.offset();
		let bytes = self.read_exact(len)?;
		Ok(Archive { bytes, pos: 0, base })
	}

	/// Advance without interpreting bytes.
	pub fn skip(&mut self, len: usize) -> Result<()> {
		self.read_exact(len).map(|_| ())
	}

	/// Move to an absolute position within this reader (backwards allowed).
	pub fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.bytes.len() {
			return Err(UeFormatError::UnexpectedEof {
				at: self.base + pos,
				need: pos - self.bytes.len(),
				rem: 0,
			});
		}
		self.pos = pos;
		Ok(())
	}

	/// Decode exactly `count` elements in order.
	pub fn read_array<T>(&mut self, count: usize, mut element: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
		let mut out = Vec::with_capacity(count.min(self.remaining()));
		for _ in 0..count {
			out.push(element(self)?);
		}
		Ok(out)
	}

	/// Read an `i32` count prefix, then decode that many elements.
	pub fn read_bulk_array<T>(&mut self, element: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
		let count = self.read_count("array count")?;
		self.read_array(count, element)
	}

	fn read_elements(&mut self, n: usize, width: usize) -> Result<&'a [u8]> {
		let need = n.checked_mul(width).ok_or_else(|| self.eof_error(usize::MAX))?;
		self.read_exact(need)
	}

	fn eof_error(&self, need: usize) -> UeFormatError {
		UeFormatError::UnexpectedEof {
			at: self.offset(),
			need,
			rem: self.remaining(),
		}
	}
}
