// src/texture.rs

//! Pixel types and read access to the decoded skin atlas.
//!
//! The pipeline never decodes or encodes image files; it is handed a raw
//! RGBA buffer (row-major, 4 bytes per pixel) by an external collaborator
//! and only validates its dimensions against the two known atlas layouts.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// RGBA color in 32-bit format (8 bits per channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to RGBA byte array.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Rgba::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Standard straight-alpha "over" compositing of `self` onto `dst`:
    /// `outA = srcA + dstA * (1 - srcA)`, channels weighted accordingly.
    ///
    /// A fully transparent source leaves the destination unchanged.
    pub fn blend_over(self, dst: Rgba) -> Rgba {
        if self.a == 0 {
            return dst;
        }
        if self.a == 255 {
            return self;
        }
        let src_a = self.a as f32 / 255.0;
        let dst_a = dst.a as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| -> u8 {
            let c = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}

/// Integer rectangle into the source atlas. Every region handed to the
/// rasterizer lies fully inside the atlas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The two known skin atlas layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinFormat {
    /// 64x32, pre-overlay era. No overlay layer, left limbs mirror right.
    Legacy,
    /// 64x64 with base and overlay layers for every body part.
    Modern,
}

impl SkinFormat {
    /// Detect the atlas layout from its dimensions.
    pub fn detect(width: u32, height: u32) -> Result<SkinFormat, RenderError> {
        match (width, height) {
            (64, 64) => Ok(SkinFormat::Modern),
            (64, 32) => Ok(SkinFormat::Legacy),
            _ => Err(RenderError::UnsupportedTextureLayout { width, height }),
        }
    }

    /// Whether this layout carries a second (overlay) skin layer.
    pub fn has_overlay(self) -> bool {
        matches!(self, SkinFormat::Modern)
    }
}

/// Borrowed view over a decoded RGBA skin atlas.
///
/// Construction validates the dimensions and buffer length; after that all
/// reads are total (callers only index through in-bounds regions).
#[derive(Debug, Clone, Copy)]
pub struct SkinTexture<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    format: SkinFormat,
}

impl<'a> SkinTexture<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self, RenderError> {
        let format = SkinFormat::detect(width, height)?;
        if data.len() != (width * height * 4) as usize {
            return Err(RenderError::UnsupportedTextureLayout { width, height });
        }
        Ok(SkinTexture {
            data,
            width,
            height,
            format,
        })
    }

    pub fn format(&self) -> SkinFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one atlas pixel. Out-of-range coordinates clamp to the edge;
    /// regions from the region table never trigger the clamp.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = ((y * self.width + x) * 4) as usize;
        Rgba::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Nearest-neighbor sample of a region at normalized `(u, v)` in
    /// `[0, 1]`. No filtering: the blocky pixel-art look is the point.
    pub fn sample_region_nearest(&self, region: TextureRegion, u: f32, v: f32) -> Rgba {
        let tex_x = ((u * region.width as f32) as u32).min(region.width - 1);
        let tex_y = ((v * region.height as f32) as u32).min(region.height - 1);
        self.pixel(region.x + tex_x, region.y + tex_y)
    }

    /// True when any pixel of the region has a nonzero alpha byte. Used to
    /// skip fully transparent overlay faces entirely.
    pub fn region_has_visible_pixels(&self, region: TextureRegion) -> bool {
        for row in 0..region.height {
            for col in 0..region.width {
                if self.pixel(region.x + col, region.y + row).a > 0 {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build an atlas buffer filled with one color.
    fn solid_atlas(width: u32, height: u32, color: Rgba) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&color.to_bytes());
        }
        data
    }

    #[test]
    fn test_format_detection() {
        // Contract: exactly two layouts are recognized
        assert_eq!(SkinFormat::detect(64, 64).unwrap(), SkinFormat::Modern);
        assert_eq!(SkinFormat::detect(64, 32).unwrap(), SkinFormat::Legacy);
        assert!(matches!(
            SkinFormat::detect(128, 128),
            Err(RenderError::UnsupportedTextureLayout {
                width: 128,
                height: 128
            })
        ));
    }

    #[test]
    fn test_texture_rejects_short_buffer() {
        // Contract: a buffer that does not match width*height*4 is rejected
        let data = vec![0u8; 64 * 64 * 4 - 1];
        assert!(SkinTexture::new(&data, 64, 64).is_err());
    }

    #[test]
    fn test_pixel_read() {
        let mut data = solid_atlas(64, 32, Rgba::TRANSPARENT);
        let idx = ((3 * 64 + 5) * 4) as usize;
        data[idx..idx + 4].copy_from_slice(&[10, 20, 30, 40]);
        let tex = SkinTexture::new(&data, 64, 32).unwrap();
        assert_eq!(tex.pixel(5, 3), Rgba::new(10, 20, 30, 40));
        assert_eq!(tex.format(), SkinFormat::Legacy);
    }

    #[test]
    fn test_sample_region_nearest_corners() {
        // Contract: u=0,v=0 hits the region's top-left texel, u/v just
        // under 1 hit the bottom-right texel, and exactly 1.0 clamps
        let mut data = solid_atlas(64, 64, Rgba::TRANSPARENT);
        let region = TextureRegion::new(8, 8, 8, 8);
        let tl = ((8 * 64 + 8) * 4) as usize;
        let br = ((15 * 64 + 15) * 4) as usize;
        data[tl..tl + 4].copy_from_slice(&[255, 0, 0, 255]);
        data[br..br + 4].copy_from_slice(&[0, 0, 255, 255]);
        let tex = SkinTexture::new(&data, 64, 64).unwrap();

        assert_eq!(
            tex.sample_region_nearest(region, 0.0, 0.0),
            Rgba::opaque(255, 0, 0)
        );
        assert_eq!(
            tex.sample_region_nearest(region, 0.99, 0.99),
            Rgba::opaque(0, 0, 255)
        );
        assert_eq!(
            tex.sample_region_nearest(region, 1.0, 1.0),
            Rgba::opaque(0, 0, 255)
        );
    }

    #[test]
    fn test_region_visibility_scan() {
        // Contract: a region is visible iff some alpha byte is nonzero
        let mut data = solid_atlas(64, 64, Rgba::TRANSPARENT);
        let tex = SkinTexture::new(&data, 64, 64).unwrap();
        assert!(!tex.region_has_visible_pixels(TextureRegion::new(40, 8, 8, 8)));

        let idx = ((9 * 64 + 42) * 4) as usize;
        data[idx + 3] = 1;
        let tex = SkinTexture::new(&data, 64, 64).unwrap();
        assert!(tex.region_has_visible_pixels(TextureRegion::new(40, 8, 8, 8)));
    }

    #[test]
    fn test_blend_transparent_source_is_identity() {
        // Contract: compositing alpha=0 leaves the destination unchanged
        let dst = Rgba::new(12, 34, 56, 78);
        assert_eq!(Rgba::TRANSPARENT.blend_over(dst), dst);
    }

    #[test]
    fn test_blend_opaque_source_replaces() {
        // Contract: an opaque source fully replaces the destination
        let src = Rgba::opaque(200, 100, 50);
        assert_eq!(src.blend_over(Rgba::new(1, 2, 3, 4)), src);
    }

    #[test]
    fn test_blend_half_alpha_over_opaque() {
        // Contract: 50% source over opaque black averages toward the source
        let src = Rgba::new(200, 100, 50, 128);
        let out = src.blend_over(Rgba::opaque(0, 0, 0));
        assert_eq!(out.a, 255);
        // src_a ~= 0.502: channels land just above half the source value
        assert!((out.r as i32 - 100).abs() <= 1);
        assert!((out.g as i32 - 50).abs() <= 1);
        assert!((out.b as i32 - 25).abs() <= 1);
    }

    #[test]
    fn test_blend_onto_transparent_keeps_source() {
        // Contract: blending onto a fully transparent destination yields
        // the source color and alpha
        let src = Rgba::new(10, 20, 30, 99);
        assert_eq!(src.blend_over(Rgba::TRANSPARENT), src);
    }
}
