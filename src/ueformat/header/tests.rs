use uedoc_testkit::{ArchiveWriter, FileWriter};

use crate::ueformat::{AssetKind, Compression, FileHeader, FormatVersion, UeFormatError};

#[test]
fn parses_uncompressed_model_header() {
	let bytes = FileWriter::new("UEMODEL").object_name("SM_Chair").finish(&[1, 2, 3]);
	let header = FileHeader::parse(&bytes).expect("header parses");

	assert_eq!(header.kind, AssetKind::Model);
	assert_eq!(header.version, FormatVersion::LATEST);
	assert_eq!(header.object_name, "SM_Chair");
	assert_eq!(header.compression, Compression::None);
	assert_eq!(header.uncompressed_size, 3);
	assert_eq!(header.header_size, bytes.len() - 3);
}

#[test]
fn parses_compressed_header_sizes() {
	let payload = vec![0_u8; 64];
	let bytes = FileWriter::new("UEANIM").zstd().finish(&payload);
	let header = FileHeader::parse(&bytes).expect("header parses");

	assert_eq!(header.kind, AssetKind::Animation);
	assert_eq!(header.compression, Compression::Zstd);
	assert_eq!(header.uncompressed_size, 64);
	assert_eq!(header.compressed_size, bytes.len() - header.header_size);
}

#[test]
fn rejects_bad_magic() {
	let err = FileHeader::parse(b"PSKFILE1-chunks").expect_err("wrong magic");
	assert!(matches!(err, UeFormatError::BadMagic { magic } if &magic == b"PSKFILE1"));

	let err = FileHeader::parse(b"UE").expect_err("short input");
	assert!(matches!(err, UeFormatError::BadMagic { .. }));
}

#[test]
fn rejects_unknown_identifier() {
	let bytes = FileWriter::new("UETEXTURE").finish(&[]);
	let err = FileHeader::parse(&bytes).expect_err("unknown identifier");
	assert!(matches!(err, UeFormatError::UnknownIdentifier { ref identifier } if identifier == "UETEXTURE"));
}

#[test]
fn rejects_future_version() {
	let bytes = FileWriter::new("UEMODEL").version(FormatVersion::LATEST.as_u8() + 1).finish(&[]);
	let err = FileHeader::parse(&bytes).expect_err("future version");
	assert!(matches!(err, UeFormatError::UnsupportedVersion { version: 7, .. }));
}

#[test]
fn rejects_world_before_world_export_version() {
	let bytes = FileWriter::new("UEWORLD").version(FormatVersion::SerializeVirtualBones.as_u8()).finish(&[]);
	let err = FileHeader::parse(&bytes).expect_err("world needs AddWorldExport");
	assert!(matches!(err, UeFormatError::UnsupportedVersion { identifier: "UEWORLD", version: 5 }));
}

#[test]
fn rejects_unknown_compression_name() {
	let mut w = ArchiveWriter::new();
	w.raw(b"UEFORMAT").fstring("UEMODEL").u8(6).fstring("Obj").bool(true).fstring("LZ4").i32(0).i32(0);
	let err = FileHeader::parse(w.as_bytes()).expect_err("unknown compression");
	assert!(matches!(err, UeFormatError::UnsupportedCompression { ref method } if method == "LZ4"));
}

#[test]
fn accepts_wide_object_name() {
	let mut w = ArchiveWriter::new();
	w.raw(b"UEFORMAT").fstring("UEMODEL").u8(6).wide_fstring("Stuhl_\u{fc}").bool(false);
	let header = FileHeader::parse(w.as_bytes()).expect("header parses");
	assert_eq!(header.object_name, "Stuhl_\u{fc}");
	assert_eq!(header.uncompressed_size, 0);
}
