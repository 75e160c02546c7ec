//! Paint bucket.
//!
//! Works on a straight-alpha RGBA8 buffer in device pixels. The fill spreads
//! through pixels close to the seed color, stops at dark opaque "ink", and
//! afterwards absorbs soft anti-aliasing pixels that ended up enclosed by the
//! fill.

use log::debug;

use crate::config::FillConfig;

/// What a fill request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Filled { pixels: usize },
    /// Seed outside the surface
    OutOfBounds,
    /// Seed pixel already looks like the fill color
    AlreadyTargetColor,
    /// Seed landed on a drawn line
    SeedOnInk,
}

impl FillOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled { .. })
    }
}

/// Euclidean RGB distance, ignoring alpha
pub fn color_distance(a: [u8; 4], b: [u8; 3]) -> f32 {
    let dr = a[0] as f32 - b[0] as f32;
    let dg = a[1] as f32 - b[1] as f32;
    let db = a[2] as f32 - b[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

pub fn brightness(px: [u8; 4]) -> f32 {
    (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0
}

struct Canvas<'a> {
    buf: &'a mut [u8],
    width: usize,
    height: usize,
    seed: [u8; 3],
    target: [u8; 3],
    config: &'a FillConfig,
}

impl Canvas<'_> {
    fn rgba(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.buf[i], self.buf[i + 1], self.buf[i + 2], self.buf[i + 3]]
    }

    fn paint(&mut self, x: usize, y: usize) {
        let i = (y * self.width + x) * 4;
        self.buf[i..i + 3].copy_from_slice(&self.target);
        self.buf[i + 3] = 255;
    }

    fn is_ink(&self, px: [u8; 4]) -> bool {
        brightness(px) < self.config.ink_brightness && px[3] > self.config.ink_alpha
    }

    fn is_target(&self, px: [u8; 4]) -> bool {
        color_distance(px, self.target) < self.config.target_match
    }

    fn fillable(&self, x: usize, y: usize) -> bool {
        let px = self.rgba(x, y);
        !self.is_ink(px)
            && !self.is_target(px)
            && color_distance(px, self.seed) <= self.config.tolerance
    }
}

/// Flood fill from a device-pixel seed with `target` RGB.
///
/// Returns without touching `buf` unless the outcome is [`FillOutcome::Filled`].
pub fn flood_fill(
    buf: &mut [u8],
    width: u32,
    height: u32,
    seed: (f32, f32),
    target: [u8; 3],
    config: &FillConfig,
) -> FillOutcome {
    let (w, h) = (width as usize, height as usize);
    let (sx, sy) = seed;
    if !sx.is_finite() || !sy.is_finite() || sx < 0.0 || sy < 0.0 {
        return FillOutcome::OutOfBounds;
    }
    let (sx, sy) = (sx as usize, sy as usize);
    if sx >= w || sy >= h || buf.len() < w * h * 4 {
        return FillOutcome::OutOfBounds;
    }

    let i = (sy * w + sx) * 4;
    let seed_px = [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]];

    let mut canvas = Canvas {
        buf,
        width: w,
        height: h,
        seed: [seed_px[0], seed_px[1], seed_px[2]],
        target,
        config,
    };

    if canvas.is_target(seed_px) {
        return FillOutcome::AlreadyTargetColor;
    }
    if canvas.is_ink(seed_px) {
        return FillOutcome::SeedOnInk;
    }

    let (mut painted, bounds) = scanline_fill(&mut canvas, sx, sy);
    if let Some(bounds) = bounds {
        painted += close_halo(&mut canvas, bounds);
    }

    debug!("Flood fill from ({sx}, {sy}) painted {painted} pixels");
    FillOutcome::Filled { pixels: painted }
}

/// Inclusive pixel bounds (min_x, min_y, max_x, max_y)
type Bounds = (usize, usize, usize, usize);

/// Column-wise scanline fill with a work stack.
///
/// Each popped seed climbs to the top of its fillable run, then paints
/// downward, queueing the left and right neighbour columns once per
/// contiguous run.
fn scanline_fill(canvas: &mut Canvas<'_>, sx: usize, sy: usize) -> (usize, Option<Bounds>) {
    let mut stack = vec![(sx, sy)];
    let mut painted = 0;
    let mut bounds: Option<Bounds> = None;

    while let Some((x, mut y)) = stack.pop() {
        while y > 0 && canvas.fillable(x, y - 1) {
            y -= 1;
        }

        let mut left_reached = false;
        let mut right_reached = false;

        while y < canvas.height && canvas.fillable(x, y) {
            canvas.paint(x, y);
            painted += 1;
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });

            if x > 0 {
                if canvas.fillable(x - 1, y) {
                    if !left_reached {
                        stack.push((x - 1, y));
                        left_reached = true;
                    }
                } else {
                    left_reached = false;
                }
            }

            if x + 1 < canvas.width {
                if canvas.fillable(x + 1, y) {
                    if !right_reached {
                        stack.push((x + 1, y));
                        right_reached = true;
                    }
                } else {
                    right_reached = false;
                }
            }

            y += 1;
        }
    }

    (painted, bounds)
}

/// Recolor mid-brightness pixels mostly surrounded by the fill.
///
/// Candidates are judged against the state left by the main fill, then
/// painted together.
fn close_halo(canvas: &mut Canvas<'_>, (x0, y0, x1, y1): Bounds) -> usize {
    let x0 = x0.saturating_sub(1);
    let y0 = y0.saturating_sub(1);
    let x1 = (x1 + 1).min(canvas.width - 1);
    let y1 = (y1 + 1).min(canvas.height - 1);

    let mut candidates = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let px = canvas.rgba(x, y);
            let b = brightness(px);
            if b <= canvas.config.ink_brightness
                || b >= canvas.config.halo_brightness
                || canvas.is_target(px)
            {
                continue;
            }
            if filled_neighbors(canvas, x, y) >= canvas.config.halo_neighbors {
                candidates.push((x, y));
            }
        }
    }

    for &(x, y) in &candidates {
        canvas.paint(x, y);
    }
    candidates.len()
}

fn filled_neighbors(canvas: &Canvas<'_>, x: usize, y: usize) -> usize {
    let mut count = 0;
    for ny in y.saturating_sub(1)..=(y + 1).min(canvas.height - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(canvas.width - 1) {
            if (nx, ny) != (x, y) && canvas.is_target(canvas.rgba(nx, ny)) {
                count += 1;
            }
        }
    }
    count
}
