#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// area weight tables for box-filter resampling.
pub mod kernel;

/// binomial reduce and Gaussian pyramid operations.
pub mod pyramid;

/// linear interpolation resize module.
pub mod resize;

/// transposed two-pass machinery shared by the resampling operators.
pub mod separable;

/// area-averaging subsample module.
pub mod subsample;
