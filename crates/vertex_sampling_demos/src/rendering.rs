//! Minimal point-cloud renderer: projects vertices onto an axis plane and
//! writes them as dots into a PNG.
use std::path::Path;

use anyhow::{Context, Result};
use glam::{DVec2, DVec3};
use image::{ImageBuffer, Rgb, RgbImage};

/// Axis plane the vertices are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    XY,
    XZ,
    YZ,
}

impl Projection {
    fn project(self, p: DVec3) -> DVec2 {
        match self {
            Projection::XY => DVec2::new(p.x, p.y),
            Projection::XZ => DVec2::new(p.x, p.z),
            Projection::YZ => DVec2::new(p.y, p.z),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointStyle {
    pub color: [u8; 3],
    pub radius: u32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: [235, 235, 235],
            radius: 1,
        }
    }
}

/// A set of vertices drawn with one style.
#[derive(Debug, Clone)]
pub struct PointLayer {
    pub points: Vec<DVec3>,
    pub style: PointStyle,
}

impl PointLayer {
    pub fn new(points: Vec<DVec3>, style: PointStyle) -> Self {
        Self { points, style }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World-space centre of the view.
    pub center: DVec2,
    /// World-space width and height covered by the image.
    pub extent: DVec2,
    pub projection: Projection,
    pub background: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), extent: DVec2) -> Self {
        Self {
            image_size,
            center: DVec2::ZERO,
            extent,
            projection: Projection::XY,
            background: [26, 26, 26],
        }
    }

    pub fn with_center(mut self, center: DVec2) -> Self {
        self.center = center;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    fn to_pixel(&self, p: DVec3) -> Option<(i64, i64)> {
        let (w, h) = self.image_size;
        let uv = (self.projection.project(p) - self.center) / self.extent + DVec2::splat(0.5);
        if !(0.0..=1.0).contains(&uv.x) || !(0.0..=1.0).contains(&uv.y) {
            return None;
        }
        // Image rows grow downwards.
        let x = (uv.x * f64::from(w.saturating_sub(1))).round() as i64;
        let y = ((1.0 - uv.y) * f64::from(h.saturating_sub(1))).round() as i64;
        Some((x, y))
    }
}

/// Render the layers in order (later layers on top) and save as PNG.
pub fn render_layers_to_png<P: AsRef<Path>>(
    layers: &[PointLayer],
    config: &RenderConfig,
    path: P,
) -> Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero, got {w}x{h}");
    anyhow::ensure!(
        config.extent.x > 0.0 && config.extent.y > 0.0,
        "view extent must be > 0, got {}",
        config.extent
    );

    let mut image: RgbImage = ImageBuffer::from_pixel(w, h, Rgb(config.background));
    for layer in layers {
        for &p in &layer.points {
            if let Some((x, y)) = config.to_pixel(p) {
                draw_dot(&mut image, x, y, layer.style);
            }
        }
    }

    let path = path.as_ref();
    image
        .save(path)
        .with_context(|| format!("Failed to save image: {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn draw_dot(image: &mut RgbImage, cx: i64, cy: i64, style: PointStyle) {
    let r = i64::from(style.radius);
    let (w, h) = (i64::from(image.width()), i64::from(image.height()));
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if (0..w).contains(&x) && (0..h).contains(&y) {
                image.put_pixel(x as u32, y as u32, Rgb(style.color));
            }
        }
    }
}
