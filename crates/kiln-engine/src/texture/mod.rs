//! Image decoding and sampled GPU textures.

mod decode;
mod gpu;

pub use decode::{decode_file, decode_icon, DecodedImage};
pub use gpu::{check_dimensions, Texture};
