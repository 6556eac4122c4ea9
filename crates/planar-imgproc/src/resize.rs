use planar_image::{ImageBuffer, ImageError, ImageSize, OwnedImage};

use crate::separable::{scaled_size, transposed_pass};

/// Linear interpolation taps along one axis.
///
/// Destination sample `i` reads the source samples `pre[i]` and `pre[i] + 1`, the
/// first weighted by `alpha[i]` and the second by `1 - alpha[i]`. The end points map
/// onto the end points: the first sample is pinned to `pre = 0, alpha = 1` and the
/// last one to `pre = src_len - 2, alpha = 0`, so both copy the source ends exactly
/// and no tap reads past the source.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearTaps {
    /// Index of the lower source sample of each destination sample.
    pub pre: Vec<usize>,
    /// Weight of the lower source sample of each destination sample.
    pub alpha: Vec<f64>,
}

impl LinearTaps {
    /// Compute the taps mapping `src_len` samples onto `dst_len` samples.
    ///
    /// # Errors
    ///
    /// Returns an error if `src_len < 2` or `dst_len == 0`.
    pub fn new(src_len: usize, dst_len: usize) -> Result<Self, ImageError> {
        if src_len < 2 {
            return Err(ImageError::InvalidImageSize(
                src_len,
                dst_len,
                "linear resize needs at least two source samples per axis",
            ));
        }
        if dst_len == 0 {
            return Err(ImageError::InvalidImageSize(
                src_len,
                dst_len,
                "linear resize needs at least one destination sample per axis",
            ));
        }

        let scale = (dst_len as f64 - 1.0) / (src_len as f64 - 1.0);
        let inv_scale = 1.0 / scale;

        let mut pre = vec![0; dst_len];
        let mut alpha = vec![0.0; dst_len];
        pre[0] = 0;
        alpha[0] = 1.0;
        for i in 1..dst_len.saturating_sub(1) {
            let pos = inv_scale * i as f64;
            let floor = pos.floor();
            pre[i] = floor as usize;
            alpha[i] = 1.0 - (pos - floor);
        }
        // a single destination sample takes the last source sample
        pre[dst_len - 1] = src_len - 2;
        alpha[dst_len - 1] = 0.0;

        Ok(Self { pre, alpha })
    }

    /// Number of destination samples.
    pub fn len(&self) -> usize {
        self.pre.len()
    }

    /// Whether there is no destination sample.
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty()
    }

    /// Interpolate destination sample `i` from the source line.
    #[inline]
    pub fn sample(&self, src: &[f64], i: usize) -> f64 {
        let (pre, alpha) = (self.pre[i], self.alpha[i]);
        src[pre] * alpha + src[pre + 1] * (1.0 - alpha)
    }
}

/// Resize an image by `scale` with linear interpolation along each axis.
///
/// The destination size is `size * scale` rounded half up on both axes. The corner
/// rows and columns of the destination equal the corner rows and columns of the
/// source. Every channel is resized.
///
/// # Arguments
///
/// * `src` - The source image, at least 2x2.
/// * `scale` - The scale factor, `scale > 0`.
///
/// # Errors
///
/// Returns an error if the scale is not positive, if the source has fewer than two
/// rows or columns or if the destination would be empty.
///
/// # Example
///
/// ```
/// use planar_image::{ImageBuffer, ImageSize};
/// use planar_imgproc::resize::resize;
///
/// let image = ImageBuffer::from_fn(ImageSize { width: 3, height: 3 }, 1, |_, y, x| {
///     (y * 3 + x) as f64
/// }).unwrap();
///
/// let resized = resize(&image, 5.0 / 3.0).unwrap();
///
/// assert_eq!(resized.size(), ImageSize { width: 5, height: 5 });
/// assert_eq!(resized.get(0, 4, 4), Some(8.0));
/// assert_eq!(resized.get(0, 0, 1), Some(0.5));
/// ```
pub fn resize(src: &ImageBuffer<'_>, scale: f64) -> Result<OwnedImage, ImageError> {
    if !(scale > 0.0 && scale.is_finite()) {
        return Err(ImageError::InvalidScale(scale, "expected a finite scale > 0"));
    }

    let dst_size = scaled_size(src.size(), scale);
    if src.width() < 2 || src.height() < 2 {
        return Err(ImageError::InvalidImageSize(
            src.height(),
            src.width(),
            "linear resize needs at least 2x2 pixels",
        ));
    }
    if dst_size.width == 0 || dst_size.height == 0 {
        return Err(ImageError::InvalidImageSize(
            dst_size.height,
            dst_size.width,
            "scale leaves an empty image",
        ));
    }
    log::debug!(
        "resize {}x{} -> {}x{}",
        src.width(),
        src.height(),
        dst_size.width,
        dst_size.height
    );

    let channels = src.num_channels();
    let mut dst = ImageBuffer::new(dst_size, channels)?;
    let mut tmp = ImageBuffer::new(
        ImageSize {
            width: dst_size.height,
            height: src.width(),
        },
        channels,
    )?;

    // resize the columns, transposed
    resize_transposed(src, &mut tmp)?;
    // resize the old rows, transposed back
    resize_transposed(&tmp, &mut dst)?;

    Ok(dst)
}

fn resize_transposed(src: &ImageBuffer<'_>, dst: &mut ImageBuffer<'_>) -> Result<(), ImageError> {
    let taps = LinearTaps::new(src.height(), dst.width())?;
    transposed_pass(src, dst, src.num_channels(), |column, line| {
        for i in 0..taps.len() {
            line.set(i, taps.sample(column, i));
        }
    })
}
