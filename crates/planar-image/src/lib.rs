#![deny(missing_docs)]
//! Planar double-precision image buffers with strided, optionally aliased views.

/// Error types for the image module.
pub mod error;

/// image representation for resampling purposes.
pub mod image;

/// strided addressing of channel planes.
pub mod layout;

/// crop geometry.
pub mod region;

/// ownership-tagged sample storage.
pub mod storage;

pub use crate::error::ImageError;
pub use crate::image::{ImageBuffer, ImageSize, OwnedImage};
pub use crate::layout::PlaneLayout;
pub use crate::region::{PixelBox, Region};
pub use crate::storage::Storage;
