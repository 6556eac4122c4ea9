#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`error::IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// Drawing of detection overlays on 8-bit RGB images.
pub mod draw;

/// High-level image reading and writing functions.
///
/// Converts between planar double-precision buffers and 8-bit RGB files.
/// See [`functional::read_image_rgb`] to load a file of any supported format.
pub mod functional;

/// XML detection reports.
pub mod xml;

pub use crate::draw::Detection;
pub use crate::error::IoError;
