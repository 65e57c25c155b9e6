//! Texture loading
//!
//! CPU-side decoding is separated from the GL upload so the decode path can
//! be exercised without a context.

use glow::HasContext;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("could not decode texture {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },

    #[error("could not create texture object: {0}")]
    Create(String),
}

/// Decode an image file into RGBA pixels, flipped for OpenGL's
/// bottom-left texture origin.
pub fn decode<P: AsRef<Path>>(path: P) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| TextureError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    Ok(image.flipv().to_rgba8())
}

pub struct Texture {
    handle: glow::Texture,
}

impl Texture {
    /// Decode `path` and upload it as a mipmapped 2D texture.
    pub fn load<P: AsRef<Path>>(gl: &glow::Context, path: P) -> Result<Self, TextureError> {
        let image = decode(&path)?;
        let (width, height) = image.dimensions();

        let handle = unsafe {
            let handle = gl.create_texture().map_err(TextureError::Create)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
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
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(image.as_raw().as_slice()),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
            handle
        };

        log::info!(
            "texture {} loaded ({}x{})",
            path.as_ref().display(),
            width,
            height
        );
        Ok(Self { handle })
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.handle));
        }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_texture(self.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_shipped_texture() {
        let image = decode("assets/textures/crate.png").unwrap();
        let (width, height) = image.dimensions();

        assert_eq!((width, height), (64, 64));
        // fully opaque
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode("assets/textures/nope.png");
        assert!(matches!(result, Err(TextureError::Decode { .. })));
    }
}
