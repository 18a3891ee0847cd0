use std::{error::Error, fmt};

use eframe::glow;

#[derive(Debug, Clone, PartialEq)]
pub enum TextureError {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer does not match dimensions: expected {expected} bytes, got {actual}"
            ),
        }
    }
}

impl Error for TextureError {}

/// 2D RGBA8 texture. Pixels are kept on the CPU side; the GL object only
/// exists between `setup_gl` and `destroy_gl`.
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,

    handle: Option<glow::Texture>,
}

impl Texture {
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TextureError> {
        let expected = (width * height * 4) as usize;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
            handle: None,
        })
    }

    /// Uploads the pixels with repeat wrapping and trilinear filtering.
    pub fn setup_gl(&mut self, gl: &glow::Context) {
        if self.handle.is_some() {
            panic!("Trying to setup GL twice");
        }

        unsafe {
            use glow::HasContext as _;

            match gl.create_texture() {
                Ok(tex) => self.handle = Some(tex),
                Err(e) => panic!("{}", e),
            };

            gl.bind_texture(glow::TEXTURE_2D, self.handle);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                self.width as i32,
                self.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&self.pixels),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            use glow::HasContext as _;

            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, self.handle);
        }
    }

    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        unsafe {
            use glow::HasContext as _;

            if let Some(handle) = self.handle {
                gl.delete_texture(handle);
            }
            self.handle = None;
        }
    }
}

/// Procedural checkerboard, `cells` squares per side. Keeps the texturing
/// sketch free of binary assets.
pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Vec<u8> {
    let cell = (size / cells).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            pixels.extend_from_slice(if even { &a } else { &b });
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn pixel(pixels: &[u8], size: u32, x: u32, y: u32) -> &[u8] {
        let at = ((y * size + x) * 4) as usize;
        &pixels[at..at + 4]
    }

    #[test]
    fn from_rgba8_validates_length() {
        assert!(Texture::from_rgba8(2, 2, vec![0; 16]).is_ok());
        let err = Texture::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            TextureError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn checkerboard_alternates() {
        let size = 8;
        let pixels = checkerboard(size, 4, WHITE, BLACK);
        assert_eq!(pixels.len(), (size * size * 4) as usize);

        // 2x2 cells: (0,0) white, one cell over black, diagonal white again.
        assert_eq!(pixel(&pixels, size, 0, 0), WHITE);
        assert_eq!(pixel(&pixels, size, 2, 0), BLACK);
        assert_eq!(pixel(&pixels, size, 0, 2), BLACK);
        assert_eq!(pixel(&pixels, size, 2, 2), WHITE);
    }

    #[test]
    fn checkerboard_survives_degenerate_cell_count() {
        // More cells than pixels clamps the cell size to one pixel.
        let pixels = checkerboard(2, 64, WHITE, BLACK);
        assert_eq!(pixel(&pixels, 2, 0, 0), WHITE);
        assert_eq!(pixel(&pixels, 2, 1, 0), BLACK);
    }
}
