//! Draw kept detections as box outlines on a blank canvas

use anyhow::Context;
use boxnms_core::{Detection, DetectionSet, Label};
use image::{Rgb, RgbImage};
use std::path::Path;

const MARGIN: u32 = 20;
const THICKNESS: u32 = 3;
/// Largest width or height `render` will allocate
pub const MAX_CANVAS: u32 = 8192;
const BACKGROUND: Rgb<u8> = Rgb([24, 24, 24]);

const PALETTE: [(u8, u8, u8); 6] = [
    (230, 57, 70),
    (42, 157, 143),
    (233, 196, 106),
    (69, 123, 157),
    (244, 162, 97),
    (168, 218, 220),
];

/// Outline color for a label, cycling through the palette
pub fn label_color(label: Label) -> Rgb<u8> {
    let (r, g, b) = PALETTE[label.0 as usize % PALETTE.len()];
    Rgb([r, g, b])
}

/// Canvas large enough to hold every box plus a margin
///
/// Fails when the boxes reach past [`MAX_CANVAS`] pixels on either axis.
pub fn render(detections: &DetectionSet) -> anyhow::Result<RgbImage> {
    let extent = |f: fn(&Detection) -> f32| detections.iter().map(f).fold(0.0f32, f32::max).ceil();
    let (max_x, max_y) = (extent(|d| d.x2), extent(|d| d.y2));

    let limit = (MAX_CANVAS - MARGIN) as f32;
    if max_x > limit || max_y > limit {
        anyhow::bail!(
            "Detections extend to ({}, {}), beyond the {}px canvas limit",
            max_x,
            max_y,
            MAX_CANVAS
        );
    }

    let width = max_x as u32 + MARGIN;
    let height = max_y as u32 + MARGIN;

    let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
    for det in detections.iter() {
        draw_outline(&mut canvas, det, label_color(det.label));
    }
    Ok(canvas)
}

fn draw_outline(canvas: &mut RgbImage, det: &Detection, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let clamp = |v: f32, max: u32| (v.max(0.0) as u32).min(max.saturating_sub(1));

    let x1 = clamp(det.x1, width);
    let y1 = clamp(det.y1, height);
    let x2 = clamp(det.x2, width);
    let y2 = clamp(det.y2, height);

    for y in y1..=y2 {
        for x in x1..=x2 {
            let on_edge = x < x1 + THICKNESS
                || x + THICKNESS > x2
                || y < y1 + THICKNESS
                || y + THICKNESS > y2;
            if on_edge {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// Render and save as PNG
pub fn save_png<P: AsRef<Path>>(detections: &DetectionSet, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    render(detections)?
        .save(path)
        .with_context(|| format!("Failed to save visualization: {:?}", path))
}
