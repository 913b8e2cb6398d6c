use crate::types::{CanvasBounds, Placement};

/// Pick a random top-left origin that keeps the image footprint on the canvas
///
/// Each axis is drawn uniformly from `0..=max(canvas - image, 0)`; an image
/// larger than the canvas along an axis is pinned to 0 there.
pub fn place(
    canvas: CanvasBounds,
    image_width: u32,
    image_height: u32,
    rng: &mut fastrand::Rng,
) -> Placement {
    let max_x = canvas.width.saturating_sub(image_width);
    let max_y = canvas.height.saturating_sub(image_height);

    Placement::new(rng.u32(0..=max_x), rng.u32(0..=max_y))
}
