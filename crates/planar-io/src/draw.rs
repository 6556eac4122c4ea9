use planar_image::Region;

/// Outline color of a part box.
pub const BOX_COLOR: [u8; 3] = [0, 0, 255];

/// Color of the dot marking the center of a part box.
pub const CENTER_COLOR: [u8; 3] = [255, 0, 0];

/// Radius of the center dot, in pixels.
pub const CENTER_RADIUS: i64 = 2;

/// A scored detection made of one or more part boxes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Detection {
    /// The part boxes, in image coordinates.
    pub boxes: Vec<Region>,
    /// The detection score.
    pub score: f64,
    /// Index of the model component that fired; component `k` looks towards
    /// `90 - 15 * k` degrees.
    pub component: i32,
}

impl Detection {
    /// Viewpoint of the detection in degrees.
    pub fn view(&self) -> i32 {
        90 - 15 * self.component
    }
}

/// Set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel(img: &mut image::RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && x < i64::from(img.width()) && y >= 0 && y < i64::from(img.height()) {
        img.put_pixel(x as u32, y as u32, image::Rgb(color));
    }
}

/// Draws the outline of a rectangle on an image inplace.
///
/// The rectangle covers `width` columns starting at `x` and `height` rows starting at
/// `y`. Parts outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `x`, `y` - The top-left corner of the rectangle.
/// * `width`, `height` - The extent of the rectangle, in pixels.
/// * `color` - The color of the outline.
pub fn draw_rect(
    img: &mut image::RgbImage,
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    color: [u8; 3],
) {
    if width <= 0 || height <= 0 {
        return;
    }
    let (x2, y2) = (x + width - 1, y + height - 1);
    for i in x..=x2 {
        set_pixel(img, i, y, color);
        set_pixel(img, i, y2, color);
    }
    for j in y..=y2 {
        set_pixel(img, x, j, color);
        set_pixel(img, x2, j, color);
    }
}

/// Draws a filled disc on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the disc as a tuple of (x, y).
/// * `radius` - The radius of the disc.
/// * `color` - The color of the disc.
pub fn draw_disc(img: &mut image::RgbImage, center: (i64, i64), radius: i64, color: [u8; 3]) {
    let (cx, cy) = center;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                set_pixel(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draws every part box of every detection on an image inplace.
///
/// Each box is outlined in [`BOX_COLOR`] and its center marked with a dot of
/// [`CENTER_COLOR`]. Box corners are truncated to whole pixels, the center is rounded
/// to the nearest pixel.
pub fn draw_detections(img: &mut image::RgbImage, detections: &[Detection]) {
    for detection in detections {
        for part in &detection.boxes {
            let x1 = part.x1 as i64;
            let y1 = part.y1 as i64;
            let w = part.x2 as i64 - x1;
            let h = part.y2 as i64 - y1;
            draw_rect(img, x1, y1, w, h, BOX_COLOR);

            let (cx, cy) = part.center();
            draw_disc(
                img,
                (cx.round() as i64, cy.round() as i64),
                CENTER_RADIUS,
                CENTER_COLOR,
            );
        }
    }
}
