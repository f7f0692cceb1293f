use crate::ueformat::{Compression, DecodeOptions, Decompressor, MAX_DECOMPRESSED_BYTES, UeFormatError, ZstdDecompressor};

#[test]
fn zstd_roundtrip_matches_declared_size() {
	let payload: Vec<u8> = (0..4096_u32).map(|idx| (idx % 251) as u8).collect();
	let packed = zstd::encode_all(payload.as_slice(), 3).expect("zstd encodes");

	let out = ZstdDecompressor::default()
		.decompress(Compression::Zstd, &packed, payload.len())
		.expect("zstd decodes");
	assert_eq!(out, payload);
}

#[test]
fn size_mismatch_is_rejected() {
	let packed = zstd::encode_all(&[7_u8; 10][..], 0).expect("zstd encodes");
	let err = ZstdDecompressor::default()
		.decompress(Compression::Zstd, &packed, 11)
		.expect_err("declared size differs");
	assert!(matches!(err, UeFormatError::DecompressedSizeMismatch { expected: 11, actual: 10 }));
}

#[test]
fn output_limit_is_enforced() {
	let packed = zstd::encode_all(&[0_u8; 1024][..], 0).expect("zstd encodes");
	let decompressor = ZstdDecompressor::new(512);

	let err = decompressor.decompress(Compression::Zstd, &packed, 1024).expect_err("declared size over limit");
	assert!(matches!(err, UeFormatError::DecompressedTooLarge { limit: 512 }));

	let err = decompressor.decompress(Compression::Zstd, &packed, 100).expect_err("actual output over limit");
	assert!(matches!(err, UeFormatError::DecompressedTooLarge { limit: 512 }));
}

#[test]
fn gzip_is_reported_unsupported() {
	let err = ZstdDecompressor::default()
		.decompress(Compression::Gzip, &[0x1f, 0x8b], 0)
		.expect_err("gzip not supported");
	assert!(matches!(err, UeFormatError::UnsupportedCompression { ref method } if method == "GZIP"));
}

#[test]
fn names_map_to_modes() {
	assert_eq!(Compression::from_name("ZSTD"), Some(Compression::Zstd));
	assert_eq!(Compression::from_name("GZIP"), Some(Compression::Gzip));
	assert_eq!(Compression::from_name("zstd"), None);
	assert_eq!(Compression::Zstd.as_str(), "zstd");
}

#[test]
fn options_limit_reaches_decompressor() {
	assert_eq!(ZstdDecompressor::from_options(&DecodeOptions::default()).max_output(), MAX_DECOMPRESSED_BYTES);

	let options = DecodeOptions {
		max_decompressed_bytes: 64,
		..DecodeOptions::default()
	};
	let decompressor = ZstdDecompressor::from_options(&options);
	assert_eq!(decompressor.max_output(), 64);

	let packed = zstd::encode_all(&[1_u8; 100][..], 0).expect("zstd encodes");
	let err = decompressor.decompress(Compression::Zstd, &packed, 100).expect_err("over options limit");
	assert!(matches!(err, UeFormatError::DecompressedTooLarge { limit: 64 }));
}
