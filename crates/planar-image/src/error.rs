/// An error type for the image buffer and its operators.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the plane data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when fewer fill values than channels are given.
    #[error("Expected at least {1} channel values, got {0}")]
    InvalidChannelValues(usize, usize),

    /// Error when the image size is not valid for an operation.
    #[error("Invalid image size ({0}x{1}): {2}")]
    InvalidImageSize(usize, usize, &'static str),

    /// Error when the scale factor is out of the accepted range.
    #[error("Invalid scale factor {0}: {1}")]
    InvalidScale(f64, &'static str),

    /// Error when the number of channels is not supported by an operation.
    #[error("Unsupported number of channels {0}, at most {1} are supported")]
    UnsupportedChannelCount(usize, usize),

    /// Error when a crop region is empty once clipped to the image.
    #[error("Region ({0}, {1}, {2}, {3}) is empty after clipping")]
    InvalidRegion(f64, f64, f64, f64),

    /// Error when a pixel index is out of bounds.
    #[error("Pixel index (x: {0}, y: {1}) is out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a channel index is out of bounds.
    #[error("Channel index {0} is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a plane layout reaches outside of its storage.
    #[error("Layout needs {0} elements but the storage holds {1}")]
    LayoutOutOfBounds(usize, usize),

    /// Error when writing through a read-only view.
    #[error("Cannot write through a read-only view")]
    ReadOnlyView,
}
