use planar_image::{ImageBuffer, ImageError, ImageSize};

/// Largest channel count accepted by [`crate::subsample::subsample`] and
/// [`crate::pyramid::reduce`]; both operators are meant for RGB planes.
pub const MAX_RESAMPLE_CHANNELS: usize = 3;

/// Destination extent of a scaled axis, `len * scale` rounded half up.
#[inline]
pub fn scaled_extent(len: usize, scale: f64) -> usize {
    (len as f64 * scale + 0.5).floor() as usize
}

/// Destination size of a scaled image, both axes rounded half up.
pub fn scaled_size(size: ImageSize, scale: f64) -> ImageSize {
    ImageSize {
        width: scaled_extent(size.width, scale),
        height: scaled_extent(size.height, scale),
    }
}

pub(crate) fn check_resample_channels(src: &ImageBuffer<'_>) -> Result<(), ImageError> {
    if src.num_channels() > MAX_RESAMPLE_CHANNELS {
        return Err(ImageError::UnsupportedChannelCount(
            src.num_channels(),
            MAX_RESAMPLE_CHANNELS,
        ));
    }
    Ok(())
}

/// One row of a transposed destination plane.
///
/// Element `i` of the line is column `i` of the destination row, so consecutive
/// elements are `stride` samples apart in the underlying storage.
pub struct TransposedLine<'a> {
    data: &'a mut [f64],
    stride: usize,
    len: usize,
}

impl TransposedLine<'_> {
    /// Number of elements in the line.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line has no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Overwrite element `i`.
    #[inline]
    pub fn set(&mut self, i: usize, value: f64) {
        self.data[i * self.stride] = value;
    }

    /// The storage starting at element 0, for callers that address the line with
    /// precomputed flat offsets (`i * stride`).
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [f64] {
        &mut self.data[..]
    }
}

/// Apply a 1-D pass along the rows of every column of `src`, writing the results
/// transposed into `dst`.
///
/// For every channel `c < channels` and source column `x`, `line_fn` receives the
/// contiguous rows of that column and the destination row `x` of plane `c`. Running
/// the pass twice, first on the image and then on the intermediate, filters both axes
/// and restores the original orientation.
///
/// # Errors
///
/// Returns an error if `dst` does not have one row per source column, if either
/// image has fewer than `channels` planes or if `dst` is read-only.
pub fn transposed_pass<F>(
    src: &ImageBuffer<'_>,
    dst: &mut ImageBuffer<'_>,
    channels: usize,
    mut line_fn: F,
) -> Result<(), ImageError>
where
    F: FnMut(&[f64], &mut TransposedLine<'_>),
{
    if dst.height() != src.width() {
        return Err(ImageError::InvalidImageSize(
            dst.height(),
            dst.width(),
            "transposed destination needs one row per source column",
        ));
    }
    if channels > src.num_channels() {
        return Err(ImageError::ChannelIndexOutOfBounds(
            channels - 1,
            src.num_channels(),
        ));
    }
    if channels > dst.num_channels() {
        return Err(ImageError::ChannelIndexOutOfBounds(
            channels - 1,
            dst.num_channels(),
        ));
    }

    let dst_layout = *dst.layout();
    let dst_data = dst.as_mut_slice()?;
    if dst_layout.is_empty() {
        return Ok(());
    }
    for c in 0..channels {
        for x in 0..src.width() {
            let start = dst_layout.index(c, x, 0);
            let end = dst_layout.index(c, x, dst_layout.size_x - 1) + 1;
            let mut line = TransposedLine {
                data: &mut dst_data[start..end],
                stride: dst_layout.step_y,
                len: dst_layout.size_x,
            };
            line_fn(src.column(c, x), &mut line);
        }
    }

    Ok(())
}
