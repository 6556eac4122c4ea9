use planar_image::{ImageBuffer, ImageError, ImageSize, OwnedImage};

use crate::separable::{check_resample_channels, scaled_size, transposed_pass, TransposedLine};

/// The 5-tap binomial low-pass kernel, `[1, 4, 6, 4, 1] / 16`.
pub const BINOMIAL_TAPS: [f64; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Smallest destination extent [`reduce`] can produce.
pub const MIN_REDUCED_EXTENT: usize = 3;

#[inline]
fn five_tap(s: &[f64], c: usize) -> f64 {
    s[c - 2] * BINOMIAL_TAPS[0]
        + s[c - 1] * BINOMIAL_TAPS[1]
        + s[c] * BINOMIAL_TAPS[2]
        + s[c + 1] * BINOMIAL_TAPS[3]
        + s[c + 2] * BINOMIAL_TAPS[4]
}

/// Low-pass and decimate one source line by two.
///
/// Destination sample `y` is centered on source sample `2 * y`. The first and last
/// samples use the kernel truncated at the border and renormalized. The second to
/// last sample uses the full kernel when the source is long enough
/// (`2 * dst_len <= src_len`), otherwise a 4-tap truncation that stops one sample
/// past its center.
fn reduce_line(s: &[f64], line: &mut TransposedLine<'_>) {
    let dheight = line.len();
    let sheight = s.len();

    // first row
    line.set(0, s[0] * 0.6875 + s[1] * 0.25 + s[2] * 0.0625);

    // middle rows
    for y in 1..dheight - 2 {
        line.set(y, five_tap(s, 2 * y));
    }

    // last two rows
    let c = 2 * (dheight - 2);
    let value = if dheight * 2 <= sheight {
        five_tap(s, c)
    } else {
        s[c + 1] * 0.3125 + s[c] * 0.375 + s[c - 1] * 0.25 + s[c - 2] * 0.0625
    };
    line.set(dheight - 2, value);

    let c = 2 * (dheight - 1);
    line.set(dheight - 1, s[c] * 0.6875 + s[c - 1] * 0.25 + s[c - 2] * 0.0625);
}

/// Halve an image with a 5-tap binomial anti-aliasing filter.
///
/// This is the reduce step of a Burt-Adelson Gaussian pyramid. Both axes are halved
/// with `size * 0.5` rounded half up.
///
/// # Arguments
///
/// * `src` - The source image, with at most three channels and at least 5x5 pixels.
///
/// # Errors
///
/// Returns an error if the image has more than three channels or if the halved
/// image would have fewer than three rows or columns.
///
/// # Example
///
/// ```
/// use planar_image::{ImageBuffer, ImageSize};
/// use planar_imgproc::pyramid::reduce;
///
/// let image = ImageBuffer::from_channel_values(
///     ImageSize { width: 10, height: 7 },
///     &[255.0, 128.0, 0.0],
/// ).unwrap();
///
/// let half = reduce(&image).unwrap();
///
/// assert_eq!(half.size(), ImageSize { width: 5, height: 4 });
/// assert_eq!(half.get(1, 3, 4), Some(128.0));
/// ```
pub fn reduce(src: &ImageBuffer<'_>) -> Result<OwnedImage, ImageError> {
    check_resample_channels(src)?;

    let dst_size = scaled_size(src.size(), 0.5);
    if dst_size.width < MIN_REDUCED_EXTENT || dst_size.height < MIN_REDUCED_EXTENT {
        return Err(ImageError::InvalidImageSize(
            src.height(),
            src.width(),
            "reduce needs at least 5x5 pixels",
        ));
    }
    log::debug!(
        "reduce {}x{} -> {}x{}",
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

    // reduce the columns, transposed
    transposed_pass(src, &mut tmp, channels, reduce_line)?;
    // reduce the old rows, transposed back
    transposed_pass(&tmp, &mut dst, channels, reduce_line)?;

    Ok(dst)
}

/// Build a Gaussian pyramid by repeated [`reduce`] calls.
///
/// The first level is a copy of `src`. Levels are added while the image is large
/// enough to be halved, up to `max_levels` levels in total.
///
/// # Errors
///
/// Returns an error if the image has more than three channels.
pub fn build_pyramid(
    src: &ImageBuffer<'_>,
    max_levels: usize,
) -> Result<Vec<OwnedImage>, ImageError> {
    check_resample_channels(src)?;

    let mut levels = Vec::with_capacity(max_levels);
    if max_levels == 0 {
        return Ok(levels);
    }
    levels.push(src.to_owned_buffer());

    while levels.len() < max_levels {
        let Some(last) = levels.last() else {
            break;
        };
        let half = scaled_size(last.size(), 0.5);
        if half.width < MIN_REDUCED_EXTENT || half.height < MIN_REDUCED_EXTENT {
            break;
        }
        let next = reduce(last)?;
        levels.push(next);
    }

    Ok(levels)
}
