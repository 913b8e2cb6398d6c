use crate::math::Rgb;

/// One image pixel, positioned relative to the image's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: Rgb,
}

impl Pixel {
    pub const fn new(x: u32, y: u32, color: Rgb) -> Self {
        Self { x, y, color }
    }
}

/// Decoded image - pixels in row-major order (y outer, x inner)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl ImageDescriptor {
    /// Build from a row-major color buffer, `colors.len()` must be `width * height`
    pub fn from_colors(width: u32, height: u32, colors: &[Rgb]) -> Option<Self> {
        if colors.len() as u64 != width as u64 * height as u64 {
            return None;
        }

        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .zip(colors)
            .map(|((x, y), &color)| Pixel::new(x, y, color))
            .collect();

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Size of the remote drawing surface, fetched once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasBounds {
    pub width: u32,
    pub height: u32,
}

impl CanvasBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check whether an absolute coordinate lies on the canvas
    pub fn contains(&self, x: u64, y: u64) -> bool {
        x < self.width as u64 && y < self.height as u64
    }
}

/// Canvas-relative origin of the current pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

impl Placement {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Absolute canvas coordinate of an image pixel at this placement
    pub fn locate(&self, pixel: &Pixel) -> (u64, u64) {
        (
            self.x as u64 + pixel.x as u64,
            self.y as u64 + pixel.y as u64,
        )
    }
}
