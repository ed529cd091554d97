use super::metadata::Version;

// Zigzag traversal of the symbol for data placement
//------------------------------------------------------------------------------

// Column holding the vertical timing pattern, skipped by the traversal
static VERT_TIMING_COL: i16 = 6;

/// Walks two-module wide column strips from the bottom-right corner, moving up
/// the first strip and alternating direction on each subsequent one. Within a
/// row the right cell of the strip is visited before the left. Yields every
/// symbol coordinate outside the vertical timing column, locked or not.
pub struct EncRegionIter {
    r: i16,
    c: i16,
    width: i16,
    upward: bool,
    // At the right cell of the current strip
    right: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, right: true }
    }

    fn advance(&mut self) {
        if self.right {
            self.c -= 1;
            self.right = false;
            return;
        }

        match self.upward {
            true if self.r > 0 => self.r -= 1,
            false if self.r < self.width - 1 => self.r += 1,
            _ => {
                // Strip exhausted, turn around into the next strip on the left
                self.upward = !self.upward;
                self.c -= 1;
                if self.c == VERT_TIMING_COL {
                    self.c -= 1;
                }
                self.right = true;
                return;
            }
        }
        self.c += 1;
        self.right = true;
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 0 {
            return None;
        }
        let res = (self.r, self.c);
        self.advance();
        Some(res)
    }
}
