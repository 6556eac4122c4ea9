/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode or encode the image file.
    #[error("Failed to encode or decode the image. {0}")]
    ImageCodecError(#[from] image::ImageError),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] planar_image::ImageError),

    /// Error to write the XML report.
    #[error("Failed to encode the xml report. {0}")]
    XmlEncodingError(String),

    /// The buffer cannot be converted to an 8-bit RGB image.
    #[error("Unsupported number of channels {0}, expected 1 or 3")]
    UnsupportedChannelCount(usize),

    /// The buffer is larger than an image file can hold.
    #[error("Image of {0}x{1} pixels is too large to encode")]
    ImageTooLarge(usize, usize),
}
