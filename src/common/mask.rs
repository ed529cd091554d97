use std::ops::Deref;

use log::trace;

use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> Self {
        assert!(pattern < 8, "Invalid masking pattern: {pattern}");
        Self(pattern)
    }

    /// Whether the module at row `r`, column `c` of the symbol gets flipped.
    pub fn is_masked(self, r: i16, c: i16) -> bool {
        match self.0 {
            0 => (r + c) % 2 == 0,
            1 => r % 2 == 0,
            2 => c % 3 == 0,
            3 => (r + c) % 3 == 0,
            4 => (r / 2 + c / 3) % 2 == 0,
            5 => {
                let p = r as i32 * c as i32;
                p % 2 + p % 3 == 0
            }
            6 => {
                let p = r as i32 * c as i32;
                (p % 2 + p % 3) % 2 == 0
            }
            7 => {
                let p = r as i32 * c as i32;
                ((r + c) as i32 % 2 + p % 3) % 2 == 0
            }
            _ => unreachable!("Invalid masking pattern: {}", self.0),
        }
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Scores every pattern against a fresh copy of the symbol and applies the one
/// with the lowest penalty. Ties go to the lowest pattern index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for m in 0..8 {
        let pattern = MaskPattern(m);
        let mut trial = qr.clone();
        trial.apply_mask(pattern);
        let pen = compute_total_penalty(&trial);
        trace!("Mask {m}: penalty {pen}");
        if pen < best.1 {
            best = (pattern, pen);
        }
    }

    let (best_mask, _) = best;
    qr.apply_mask(best_mask);
    best_mask
}

// Penalties are scored over the full grid, margin included
pub fn compute_total_penalty(qr: &QR) -> u32 {
    let canvas = qr.to_colors();
    let w = qr.full_width();
    let adj_pen = compute_adjacent_penalty(&canvas, w);
    let blk_pen = compute_block_penalty(&canvas, w);
    let fp_pen_h = compute_finder_pattern_penalty(&canvas, w, true);
    let fp_pen_v = compute_finder_pattern_penalty(&canvas, w, false);
    let bal_pen = compute_balance_penalty(&canvas);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Runs of 5 or more same colored modules along a row or column
fn compute_adjacent_penalty(canvas: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for i in 0..w {
        for is_hor in [true, false] {
            let mut last = None;
            let mut run = 0;
            for j in 0..w {
                let clr = if is_hor { canvas[i * w + j] } else { canvas[j * w + i] };
                if last != Some(clr) {
                    last = Some(clr);
                    run = 0;
                }
                run += 1;
                if run == 5 {
                    pen += 3;
                } else if run > 5 {
                    pen += 1;
                }
            }
        }
    }
    pen
}

fn compute_block_penalty(canvas: &[Color], w: usize) -> u32 {
    let mut pen = 0;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = canvas[r * w + c];
            if clr == canvas[r * w + c + 1]
                && clr == canvas[(r + 1) * w + c]
                && clr == canvas[(r + 1) * w + c + 1]
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(canvas: &[Color], w: usize, is_hor: bool) -> u32 {
    use Color::{Dark as D, Light as L};
    static PATTERNS: [[Color; 11]; 2] =
        [[D, L, D, D, D, L, D, L, L, L, L], [L, L, L, L, D, L, D, D, D, L, D]];

    let mut pen = 0;
    for i in 0..w {
        let get = |j: usize| if is_hor { canvas[i * w + j] } else { canvas[j * w + i] };
        for j in 0..w.saturating_sub(10) {
            for pattern in &PATTERNS {
                if pattern.iter().enumerate().all(|(k, &clr)| get(j + k) == clr) {
                    pen += 40;
                }
            }
        }
    }
    pen
}

// 10 points per full 5% step the dark ratio strays from 50%
fn compute_balance_penalty(canvas: &[Color]) -> u32 {
    let dark_cnt = canvas.iter().filter(|&&c| c == Color::Dark).count();
    let percent = dark_cnt * 100 / canvas.len();
    (percent.abs_diff(50) / 5 * 10) as u32
}
