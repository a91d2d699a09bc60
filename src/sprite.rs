//! Sprite decoding and half-block rendering.
//!
//! Each terminal cell shows two vertically stacked pixels using `▀` with the
//! top pixel as foreground and the bottom pixel as background.

use image::GenericImageView;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

/// Largest edge kept after decoding; official artwork is downscaled to this.
pub const MAX_SPRITE_EDGE: u32 = 96;
const ALPHA_CUTOFF: u8 = 64;
const UPPER_HALF: &str = "\u{2580}";

/// Decoded RGBA pixels, row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpriteData {
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let rgba = self.pixels.get(idx..idx + 4)?;
        if rgba[3] < ALPHA_CUTOFF {
            return None;
        }
        Some(Color::Rgb(rgba[0], rgba[1], rgba[2]))
    }

    /// Tight bounds of the opaque pixels as `(x, y, width, height)`.
    pub fn opaque_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y).is_some() {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        if min_x == u32::MAX {
            return None;
        }
        Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, String> {
    let image = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let (width, height) = image.dimensions();
    let image = if width > MAX_SPRITE_EDGE || height > MAX_SPRITE_EDGE {
        image.thumbnail(MAX_SPRITE_EDGE, MAX_SPRITE_EDGE)
    } else {
        image
    };
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(SpriteData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Render the opaque part of a sprite into at most `max_cols` x `max_rows`
/// cells, keeping the aspect ratio (one cell = one pixel wide, two tall).
pub fn half_block_lines(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> Vec<Line<'static>> {
    let Some((x0, y0, w, h)) = sprite.opaque_bounds() else {
        return Vec::new();
    };
    if max_cols == 0 || max_rows == 0 {
        return Vec::new();
    }
    let max_w = f32::from(max_cols);
    let max_h = f32::from(max_rows) * 2.0;
    let scale = (max_w / w as f32).min(max_h / h as f32).min(1.0);
    let cols = ((w as f32 * scale).round() as u32).max(1);
    let pixel_rows = ((h as f32 * scale).round() as u32).max(1);

    let sample = |col: u32, row: u32| -> Option<Color> {
        if row >= pixel_rows {
            return None;
        }
        let sx = x0 + (col * w / cols).min(w - 1);
        let sy = y0 + (row * h / pixel_rows).min(h - 1);
        sprite.pixel(sx, sy)
    };

    (0..pixel_rows.div_ceil(2))
        .map(|cell_row| {
            let spans = (0..cols)
                .map(|col| {
                    let top = sample(col, cell_row * 2);
                    let bottom = sample(col, cell_row * 2 + 1);
                    match (top, bottom) {
                        (None, None) => Span::raw(" "),
                        (Some(top), None) => Span::styled(UPPER_HALF, Style::default().fg(top)),
                        (None, Some(bottom)) => {
                            Span::styled("\u{2584}", Style::default().fg(bottom))
                        }
                        (Some(top), Some(bottom)) => {
                            Span::styled(UPPER_HALF, Style::default().fg(top).bg(bottom))
                        }
                    }
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}
