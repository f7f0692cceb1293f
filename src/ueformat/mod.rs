mod anim;
mod archive;
mod cache;
mod compression;
mod diagnostics;
mod error;
mod file;
mod header;
mod model;
mod options;
mod section;
mod version;
mod world;

/// Animation clip, track, curve, and key types.
pub use anim::{Animation, Curve, FloatKey, Key, QuatKey, Track, VectorKey};
/// Bounded little-endian archive reader.
pub use archive::Archive;
/// Decode-once mesh store for worlds.
pub use cache::MeshCache;
/// Payload compression modes and the decompression service.
pub use compression::{Compression, Decompressor, ZstdDecompressor};
/// Warning sinks for non-fatal decode diagnostics.
pub use diagnostics::{CollectedDiagnostics, Diagnostics, SilentDiagnostics, TracingDiagnostics};
/// Error and result aliases.
pub use error::{Result, UeFormatError};
/// File abstraction and payload dispatcher.
pub use file::{Asset, UeFile, decode_asset};
/// File header representation.
pub use header::{AssetKind, FileHeader, MAGIC};
/// Model entity types.
pub use model::{Bone, ConvexCollision, LEGACY_LOD_NAME, Material, Model, ModelLod, MorphTarget, MorphTargetDelta, Skeleton, Socket, VertexColor, VirtualBone, Weight};
/// Caller-supplied decode settings.
pub use options::{DecodeOptions, MAX_DECOMPRESSED_BYTES};
/// Section record protocol types.
pub use section::{Scope, Section, SectionHeader, SectionIter};
/// File format revisions.
pub use version::FormatVersion;
/// World entity types.
pub use world::{Actor, HashedMesh, ResolvedActor, World};
