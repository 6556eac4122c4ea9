//! Planar double-precision image buffers, resampling operators and image I/O.
//!
//! ```
//! use planar::image::{ImageBuffer, ImageSize, Region};
//! use planar::imgproc::{crop::crop, pyramid::reduce, resize::resize, subsample::subsample};
//!
//! let image = ImageBuffer::from_channel_values(
//!     ImageSize { width: 64, height: 48 },
//!     &[10.0, 20.0, 30.0],
//! ).unwrap();
//!
//! let small = subsample(&image, 0.25).unwrap();
//! let large = resize(&small, 2.0).unwrap();
//! let half = reduce(&image).unwrap();
//! let (patch, offset) = crop(&image, Region::new(8.0, 8.0, 23.0, 15.0)).unwrap();
//!
//! assert_eq!(small.size(), ImageSize { width: 16, height: 12 });
//! assert_eq!(large.size(), ImageSize { width: 32, height: 24 });
//! assert_eq!(half.size(), ImageSize { width: 32, height: 24 });
//! assert_eq!(patch.size(), ImageSize { width: 16, height: 8 });
//! assert_eq!((offset.x, offset.y), (8, 8));
//! ```

#[doc(inline)]
pub use planar_image as image;

#[doc(inline)]
pub use planar_imgproc as imgproc;

#[doc(inline)]
pub use planar_io as io;
