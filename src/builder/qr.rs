use std::ops::Deref;

use image::{GrayImage, Luma};

use crate::common::{
    bit_utils::BitStream,
    iter::EncRegionIter,
    mask::MaskPattern,
    metadata::{
        format_info, Color, Version, FORMAT_INFO_BIT_LEN, FORMAT_INFO_COORDS_MAIN,
        FORMAT_INFO_COORDS_SIDE, MARGIN, VERSION_INFO_BIT_LEN, VERSION_INFO_COORDS_BL,
        VERSION_INFO_COORDS_TR,
    },
};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Module {
    Empty,
    Margin,
    Func(Color),
    Version(Color),
    Format(Color),
    Data(Color),
}

impl Deref for Module {
    type Target = Color;
    fn deref(&self) -> &Self::Target {
        match self {
            Module::Empty | Module::Margin => &Color::Light,
            Module::Func(c) => c,
            Module::Version(c) => c,
            Module::Format(c) => c,
            Module::Data(c) => c,
        }
    }
}

impl Module {
    /// Locked modules are never written by the data placer or flipped by a mask.
    pub fn is_locked(self) -> bool {
        !matches!(self, Module::Empty | Module::Data(_))
    }
}

/// Module grid of a symbol, surrounded by a light margin of `MARGIN` modules.
#[derive(Debug, Clone)]
pub struct QR {
    grid: Vec<Module>,
    w: usize,
    ver: Version,
    mask: Option<MaskPattern>,
}

// QR type for builder
//------------------------------------------------------------------------------

impl QR {
    pub fn new(ver: Version) -> Self {
        let w = ver.width();
        let fw = w + 2 * MARGIN;
        let symbol = MARGIN..MARGIN + w;
        let grid = (0..fw * fw)
            .map(|i| match (i / fw, i % fw) {
                (r, c) if symbol.contains(&r) && symbol.contains(&c) => Module::Empty,
                _ => Module::Margin,
            })
            .collect();
        Self { grid, w, ver, mask: None }
    }

    pub fn grid(&self) -> &[Module] {
        &self.grid
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    /// Side of the symbol in modules, margin excluded
    pub fn width(&self) -> usize {
        self.w
    }

    /// Side of the grid in modules, margin included
    pub fn full_width(&self) -> usize {
        self.w + 2 * MARGIN
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&m| matches!(**m, Color::Dark)).count()
    }

    /// Row-major colors of every module, margin included.
    pub fn to_colors(&self) -> Vec<Color> {
        self.grid.iter().map(|m| **m).collect()
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let fw = self.full_width();
        let mut res = String::with_capacity(fw * (fw + 1) + 1);
        res.push('\n');
        for row in self.grid.chunks(fw) {
            for m in row {
                let c = match m {
                    Module::Empty => '.',
                    Module::Margin => '_',
                    Module::Func(Color::Dark) => 'f',
                    Module::Func(Color::Light) => 'F',
                    Module::Version(Color::Dark) => 'v',
                    Module::Version(Color::Light) => 'V',
                    Module::Format(Color::Dark) => 'm',
                    Module::Format(Color::Light) => 'M',
                    Module::Data(Color::Dark) => 'd',
                    Module::Data(Color::Light) => 'D',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }

    // Symbol coordinates, negative values wrap from the far edge
    fn coord_to_index(&self, r: i16, c: i16) -> usize {
        let w = self.w as i16;
        debug_assert!(-w <= r && r < w, "Row out of bounds: {r}");
        debug_assert!(-w <= c && c < w, "Column out of bounds: {c}");

        let r = (if r < 0 { r + w } else { r }) as usize;
        let c = (if c < 0 { c + w } else { c }) as usize;
        (r + MARGIN) * self.full_width() + c + MARGIN
    }

    pub fn get(&self, r: i16, c: i16) -> Module {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn get_mut(&mut self, r: i16, c: i16) -> &mut Module {
        let index = self.coord_to_index(r, c);
        &mut self.grid[index]
    }

    pub fn set(&mut self, r: i16, c: i16, module: Module) {
        *self.get_mut(r, c) = module;
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_finder_patterns(&mut self) {
        let w = self.w as i16;
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(3, w - 4);
        self.draw_finder_pattern_at(w - 4, 3);
    }

    // Draws the 7x7 pattern centred at (r, c) along with its separator, clipped
    // to the symbol
    fn draw_finder_pattern_at(&mut self, r: i16, c: i16) {
        let w = self.w as i16;
        for i in -4..=4 {
            for j in -4..=4 {
                let (y, x) = (r + i, c + j);
                if !(0..w).contains(&y) || !(0..w).contains(&x) {
                    continue;
                }
                let clr = match i.abs().max(j.abs()) {
                    4 | 2 => Color::Light,
                    _ => Color::Dark,
                };
                self.set(y, x, Module::Func(clr));
            }
        }
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_timing_pattern(&mut self) {
        let w = self.w as i16;
        for i in 8..w - 8 {
            let clr = Color::from(i & 1 == 0);
            self.set(6, i, Module::Func(clr));
            self.set(i, 6, Module::Func(clr));
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl QR {
    fn draw_alignment_patterns(&mut self) {
        let w = self.w as i16;
        let poses = self.ver.alignment_pattern();
        for &r in poses {
            for &c in poses {
                // Centres landing in the corner zone of a finder pattern
                if (r < 10 && c < 10) || (r < 10 && c > w - 9) || (r > w - 9 && c < 10) {
                    continue;
                }
                self.draw_alignment_pattern_at(r, c);
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, r: i16, c: i16) {
        for i in -2..=2i16 {
            for j in -2..=2i16 {
                let clr = Color::from(i.abs().max(j.abs()) != 1);
                self.set(r + i, c + j, Module::Func(clr));
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

impl QR {
    // Info areas start dark; stamping the final value only clears bits
    fn reserve_format_area(&mut self) {
        for &(r, c) in FORMAT_INFO_COORDS_MAIN.iter().chain(FORMAT_INFO_COORDS_SIDE.iter()) {
            self.set(r, c, Module::Format(Color::Dark));
        }
        self.set(-8, 8, Module::Func(Color::Dark));
    }

    fn reserve_version_area(&mut self) {
        if self.ver.info().is_none() {
            return;
        }
        for &(r, c) in VERSION_INFO_COORDS_BL.iter().chain(VERSION_INFO_COORDS_TR.iter()) {
            self.set(r, c, Module::Version(Color::Dark));
        }
    }

    pub fn draw_format_info(&mut self, mask: MaskPattern) {
        let info = format_info(*mask) as u32;
        let off = Module::Format(Color::Light);
        self.clear_bits(info, FORMAT_INFO_BIT_LEN, off, &FORMAT_INFO_COORDS_MAIN);
        self.clear_bits(info, FORMAT_INFO_BIT_LEN, off, &FORMAT_INFO_COORDS_SIDE);
    }

    pub fn draw_version_info(&mut self) {
        if let Some(info) = self.ver.info() {
            let off = Module::Version(Color::Light);
            self.clear_bits(info, VERSION_INFO_BIT_LEN, off, &VERSION_INFO_COORDS_BL);
            self.clear_bits(info, VERSION_INFO_BIT_LEN, off, &VERSION_INFO_COORDS_TR);
        }
    }

    // Coordinates are listed most significant bit first
    fn clear_bits(&mut self, number: u32, bit_len: usize, off: Module, coords: &[(i16, i16)]) {
        debug_assert!(coords.len() == bit_len, "Coordinate count doesn't match bit length");
        for (i, &(r, c)) in coords.iter().enumerate() {
            if (number >> (bit_len - 1 - i)) & 1 == 0 {
                self.set(r, c, off);
            }
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl QR {
    /// Stamps every locked region of the symbol. Format and version areas are
    /// reserved dark until the final values are drawn.
    pub fn draw_template(&mut self) {
        self.draw_finder_patterns();
        self.draw_timing_pattern();
        self.draw_alignment_patterns();
        self.reserve_format_area();
        self.reserve_version_area();
    }
}

#[cfg(test)]
mod template_tests {
    use test_case::test_case;

    use crate::builder::{Module, QR};
    use crate::common::metadata::Version;

    #[test]
    fn test_template_2() {
        let mut qr = QR::new(Version::new(2));
        qr.draw_template();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             _________________________________\n\
             _________________________________\n\
             _________________________________\n\
             _________________________________\n\
             ____fffffffFm........Ffffffff____\n\
             ____fFFFFFfFm........FfFFFFFf____\n\
             ____fFfffFfFm........FfFfffFf____\n\
             ____fFfffFfFm........FfFfffFf____\n\
             ____fFfffFfFm........FfFfffFf____\n\
             ____fFFFFFfFm........FfFFFFFf____\n\
             ____fffffffFfFfFfFfFfFfffffff____\n\
             ____FFFFFFFFm........FFFFFFFF____\n\
             ____mmmmmmfmm........mmmmmmmm____\n\
             ____......F..................____\n\
             ____......f..................____\n\
             ____......F..................____\n\
             ____......f..................____\n\
             ____......F..................____\n\
             ____......f..................____\n\
             ____......F..................____\n\
             ____......f.........fffff....____\n\
             ____FFFFFFFFf.......fFFFf....____\n\
             ____fffffffFm.......fFfFf....____\n\
             ____fFFFFFfFm.......fFFFf....____\n\
             ____fFfffFfFm.......fffff....____\n\
             ____fFfffFfFm................____\n\
             ____fFfffFfFm................____\n\
             ____fFFFFFfFm................____\n\
             ____fffffffFm................____\n\
             _________________________________\n\
             _________________________________\n\
             _________________________________\n\
             _________________________________\n"
        );
    }

    #[test]
    fn test_template_7() {
        let mut qr = QR::new(Version::new(7));
        qr.draw_template();
        assert_eq!(
            qr.to_debug_str(),
            "\n\
             _____________________________________________________\n\
             _____________________________________________________\n\
             _____________________________________________________\n\
             _____________________________________________________\n\
             ____fffffffFm.........................vvvFfffffff____\n\
             ____fFFFFFfFm.........................vvvFfFFFFFf____\n\
             ____fFfffFfFm.........................vvvFfFfffFf____\n\
             ____fFfffFfFm.........................vvvFfFfffFf____\n\
             ____fFfffFfFm...........fffff.........vvvFfFfffFf____\n\
             ____fFFFFFfFm...........fFFFf.........vvvFfFFFFFf____\n\
             ____fffffffFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfFfffffff____\n\
             ____FFFFFFFFm...........fFFFf............FFFFFFFF____\n\
             ____mmmmmmfmm...........fffff............mmmmmmmm____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____....fffff...........fffff...........fffff....____\n\
             ____....fFFFf...........fFFFf...........fFFFf....____\n\
             ____....fFfFf...........fFfFf...........fFfFf....____\n\
             ____....fFFFf...........fFFFf...........fFFFf....____\n\
             ____....fffff...........fffff...........fffff....____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____......f......................................____\n\
             ____......F......................................____\n\
             ____vvvvvvf......................................____\n\
             ____vvvvvvF......................................____\n\
             ____vvvvvvf.............fffff...........fffff....____\n\
             ____FFFFFFFFf...........fFFFf...........fFFFf....____\n\
             ____fffffffFm...........fFfFf...........fFfFf....____\n\
             ____fFFFFFfFm...........fFFFf...........fFFFf....____\n\
             ____fFfffFfFm...........fffff...........fffff....____\n\
             ____fFfffFfFm....................................____\n\
             ____fFfffFfFm....................................____\n\
             ____fFFFFFfFm....................................____\n\
             ____fffffffFm....................................____\n\
             _____________________________________________________\n\
             _____________________________________________________\n\
             _____________________________________________________\n\
             _____________________________________________________\n"
        );
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(6)]
    #[test_case(7)]
    #[test_case(13)]
    #[test_case(27)]
    #[test_case(40)]
    fn test_unlocked_matches_codewords(v: usize) {
        let ver = Version::new(v);
        let mut qr = QR::new(ver);
        qr.draw_template();
        let unlocked = qr.grid().iter().filter(|m| matches!(m, Module::Empty)).count();
        assert_eq!(unlocked, ver.total_codewords() * 8 + ver.remainder_bits());
    }
}

// Encoding region
//------------------------------------------------------------------------------

impl QR {
    /// Fills the unlocked modules with the codewords, most significant bit
    /// first, in zigzag order. Modules left over once the codewords run out
    /// are the remainder bits and stay light.
    pub fn draw_codewords(&mut self, codewords: &[u8]) {
        let mut bits = BitStream::from(codewords);
        let mut remainder = 0;
        for (r, c) in EncRegionIter::new(self.ver) {
            if self.get(r, c).is_locked() {
                continue;
            }
            match bits.next() {
                Some(bit) => self.set(r, c, Module::Data(Color::from(bit))),
                None => {
                    self.set(r, c, Module::Data(Color::Light));
                    remainder += 1;
                }
            }
        }

        assert!(bits.next().is_none(), "Codewords overrun the encoding region");
        assert_eq!(remainder, self.ver.remainder_bits(), "Codewords underrun the encoding region");
    }

    /// Flips every data module selected by the mask pattern.
    pub fn apply_mask(&mut self, pattern: MaskPattern) {
        self.mask = Some(pattern);
        let w = self.w as i16;
        for r in 0..w {
            for c in 0..w {
                if let Module::Data(clr) = self.get(r, c) {
                    if pattern.is_masked(r, c) {
                        self.set(r, c, Module::Data(!clr));
                    }
                }
            }
        }
    }
}


// Render
//------------------------------------------------------------------------------

impl QR {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let fw = self.full_width() as u32;
        let total_sz = fw * module_sz;
        GrayImage::from_fn(total_sz, total_sz, |x, y| {
            let m = self.grid[((y / module_sz) * fw + x / module_sz) as usize];
            Luma([m.select(0, 255)])
        })
    }

    // Light modules are drawn as blocks so the symbol scans off a dark terminal
    pub fn to_str(&self, module_sz: usize) -> String {
        let fw = self.full_width();
        let mut canvas = String::with_capacity(fw * module_sz * (fw * module_sz + 1));
        for row in self.grid.chunks(fw) {
            let mut line = String::with_capacity(fw * module_sz + 1);
            for m in row {
                let ch = m.select(' ', '█');
                (0..module_sz).for_each(|_| line.push(ch));
            }
            line.push('\n');
            (0..module_sz).for_each(|_| canvas.push_str(&line));
        }
        canvas
    }
}
