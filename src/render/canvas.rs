//! CPU canvas that frames are painted onto
//!
//! The canvas is filled with the background once and never cleared between
//! frames, so every exported image carries the trails of all frames drawn
//! before it. Circles are filled without an outline and alpha-blended
//! source-over.

use image::{Rgba as Pixel, RgbaImage};

use crate::simulation::color::Rgba;
use crate::simulation::snapshot::FrameSnapshot;
use crate::simulation::vector::NVec2;

pub struct Canvas {
    image: RgbaImage,
}

/// Source-over blend of `src` onto `dst`
fn blend(dst: &mut Pixel<u8>, src: Rgba) {
    if src.a == 0 {
        return;
    }
    if src.a == 255 {
        *dst = Pixel(src.to_array());
        return;
    }

    let sa = src.a as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    *dst = Pixel([
        channel(src.r, dst[0]),
        channel(src.g, dst[1]),
        channel(src.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Pixel(background.to_array())),
        }
    }

    /// Canvas sized to the world bounds, one pixel per simulation unit
    pub fn for_world(bounds: NVec2, background: Rgba) -> Self {
        let width = bounds.x.round().max(1.0) as u32;
        let height = bounds.y.round().max(1.0) as u32;
        Self::new(width, height, background)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let Pixel([r, g, b, a]) = *self.image.get_pixel(x, y);
        Rgba::new(r, g, b, a)
    }

    /// Fill every pixel whose center lies within `radius` of `center`
    pub fn fill_circle(&mut self, center: NVec2, radius: f64, color: Rgba) {
        if !(radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }

        let (w, h) = (self.width() as f64, self.height() as f64);
        let x0 = (center.x - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(w);
        let y0 = (center.y - radius).floor().max(0.0);
        let y1 = (center.y + radius).ceil().min(h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let r2 = radius * radius;
        for py in y0 as u32..y1 as u32 {
            let dy = py as f64 + 0.5 - center.y;
            for px in x0 as u32..x1 as u32 {
                let dx = px as f64 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    blend(self.image.get_pixel_mut(px, py), color);
                }
            }
        }
    }

    /// Draw one frame on top of what is already there
    pub fn paint(&mut self, snapshot: &FrameSnapshot) {
        for p in &snapshot.particles {
            self.fill_circle(p.position, p.visual_radius, p.color);
        }
    }
}
