//! Off-screen framebuffer with color and depth attachments
//!
//! Every frame is rendered here first and then blitted to the default
//! framebuffer. Resizing reallocates the attachment storage in place.

use glow::HasContext;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FramebufferError {
    #[error("could not create framebuffer object: {0}")]
    Create(String),

    #[error("framebuffer incomplete (status {0:#x})")]
    Incomplete(u32),
}

pub struct Framebuffer {
    handle: glow::Framebuffer,
    color: glow::Texture,
    depth: glow::Renderbuffer,
    width: u32,
    height: u32,
}

impl Framebuffer {
    pub fn new(gl: &glow::Context, width: u32, height: u32) -> Result<Self, FramebufferError> {
        unsafe {
            let handle = gl.create_framebuffer().map_err(FramebufferError::Create)?;
            let color = gl.create_texture().map_err(FramebufferError::Create)?;
            let depth = gl.create_renderbuffer().map_err(FramebufferError::Create)?;

            let framebuffer = Self {
                handle,
                color,
                depth,
                width,
                height,
            };
            framebuffer.allocate_attachments(gl, width, height);

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(handle));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color),
                0,
            );
            gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(depth),
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            if status != glow::FRAMEBUFFER_COMPLETE {
                framebuffer.cleanup(gl);
                return Err(FramebufferError::Incomplete(status));
            }

            Ok(framebuffer)
        }
    }

    /// (Re)allocate attachment storage for the given dimensions.
    fn allocate_attachments(&self, gl: &glow::Context, width: u32, height: u32) {
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.color));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(self.depth));
            gl.renderbuffer_storage(
                glow::RENDERBUFFER,
                glow::DEPTH_COMPONENT24,
                width as i32,
                height as i32,
            );
            gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }
    }

    /// Resize the attachments. Callers guarantee non-zero dimensions.
    pub fn resize(&mut self, gl: &glow::Context, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.allocate_attachments(gl, width, height);
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.handle));
        }
    }

    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Blit the color attachment onto the default framebuffer.
    pub fn draw_to_screen(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(self.handle));
            gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None);
            gl.blit_framebuffer(
                0,
                0,
                self.width as i32,
                self.height as i32,
                0,
                0,
                self.width as i32,
                self.height as i32,
                glow::COLOR_BUFFER_BIT,
                glow::NEAREST,
            );
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    pub fn cleanup(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_renderbuffer(self.depth);
            gl.delete_texture(self.color);
            gl.delete_framebuffer(self.handle);
        }
    }
}
