//! Public library API for decoding UEFORMAT (Unreal export) archives.

/// Archive reading, section scanning, and model/animation/world decoding.
pub mod ueformat;
