use planar_image::ImageError;

/// Distance from an integer sample boundary below which a partial coverage is
/// treated as no coverage at all.
///
/// Back-projected interval ends that land within this distance of a sample
/// boundary only differ from it by floating point rounding; emitting an entry for
/// them would add a near-zero weight.
pub const BOUNDARY_EPSILON: f64 = 1e-3;

/// One weighted contribution of a source sample to a destination sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaInfo {
    /// Index of the source sample along the filtered axis.
    pub src: usize,
    /// Flat offset of the destination sample, `dst_index * width`.
    pub dst: usize,
    /// Weight of the contribution.
    pub alpha: f64,
}

/// Accumulate `alpha * src[e.src]` into `dst[e.dst]` for every entry `e`.
///
/// Several entries usually target the same destination, so `dst` must be zeroed
/// beforehand.
#[inline]
pub fn alphacopy(src: &[f64], dst: &mut [f64], entries: &[AlphaInfo]) {
    for e in entries {
        dst[e.dst] += e.alpha * src[e.src];
    }
}

/// Precomputed area weights to shrink an axis of `src_len` samples to `dst_len`.
///
/// Destination sample `dy` back-projects onto the source interval
/// `[dy * inv, (dy + 1) * inv)` with `inv = src_len / dst_len`, and takes the mean of
/// the samples it covers, partially covered boundary samples weighted by their
/// covered fraction. The table does not depend on the line it is applied to, so a
/// single table serves every column of every channel.
///
/// # Examples
///
/// ```
/// use planar_imgproc::kernel::AreaWeights;
///
/// let weights = AreaWeights::new(4, 2, 1).unwrap();
/// let mut dst = [0.0; 2];
/// weights.apply(&[1.0, 3.0, 5.0, 7.0], &mut dst);
/// assert_eq!(dst, [2.0, 6.0]);
/// ```
#[derive(Clone, Debug)]
pub struct AreaWeights {
    entries: Vec<AlphaInfo>,
    dst_len: usize,
    width: usize,
}

impl AreaWeights {
    /// Build the table.
    ///
    /// # Arguments
    ///
    /// * `src_len` - Number of source samples along the axis.
    /// * `dst_len` - Number of destination samples, at most `src_len`.
    /// * `width` - Distance between consecutive destination samples in the line the
    ///   table is applied to.
    ///
    /// # Errors
    ///
    /// Returns an error when `dst_len > src_len`, the table only shrinks.
    pub fn new(src_len: usize, dst_len: usize, width: usize) -> Result<Self, ImageError> {
        if dst_len > src_len {
            return Err(ImageError::InvalidImageSize(
                src_len,
                dst_len,
                "area weights only support downscaling",
            ));
        }
        if dst_len == 0 {
            return Ok(Self {
                entries: Vec::new(),
                dst_len,
                width,
            });
        }

        let scale = dst_len as f64 / src_len as f64;
        let inv_scale = src_len as f64 / dst_len as f64;

        let capacity = (dst_len as f64 * inv_scale).ceil() as usize + 2 * dst_len;
        let mut entries = Vec::with_capacity(capacity);

        for dy in 0..dst_len {
            let fsy1 = dy as f64 * inv_scale;
            let fsy2 = fsy1 + inv_scale;
            let sy1 = fsy1.ceil() as usize;
            let sy2 = fsy2.floor() as usize;
            let dst = dy * width;

            if sy1 as f64 - fsy1 > BOUNDARY_EPSILON {
                entries.push(AlphaInfo {
                    src: sy1 - 1,
                    dst,
                    alpha: (sy1 as f64 - fsy1) * scale,
                });
            }

            for sy in sy1..sy2 {
                debug_assert!(sy < src_len);
                entries.push(AlphaInfo {
                    src: sy,
                    dst,
                    alpha: scale,
                });
            }

            if fsy2 - sy2 as f64 > BOUNDARY_EPSILON {
                debug_assert!(sy2 < src_len);
                entries.push(AlphaInfo {
                    src: sy2,
                    dst,
                    alpha: (fsy2 - sy2 as f64) * scale,
                });
            }
        }

        Ok(Self {
            entries,
            dst_len,
            width,
        })
    }

    /// The weight entries, grouped by destination sample in increasing order.
    pub fn entries(&self) -> &[AlphaInfo] {
        &self.entries
    }

    /// Number of destination samples the table writes.
    pub fn dst_len(&self) -> usize {
        self.dst_len
    }

    /// Distance between consecutive destination samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Accumulate the weighted source line into a zeroed destination line.
    #[inline]
    pub fn apply(&self, src: &[f64], dst: &mut [f64]) {
        alphacopy(src, dst, &self.entries);
    }
}
