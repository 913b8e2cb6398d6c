pub mod image_file;

pub use image_file::{decode_image, load_image};
