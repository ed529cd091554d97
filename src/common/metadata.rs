use std::ops::{Deref, Not};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn select<T>(self, dark: T, light: T) -> T {
        match self {
            Self::Dark => dark,
            Self::Light => light,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<bool> for Color {
    fn from(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction block geometry
//------------------------------------------------------------------------------

/// Data codeword layout of a version: group A has `a_count` blocks of `a_size`
/// codewords, group B has `b_count` blocks of `b_size`. Every block carries
/// `ec_len` error correction codewords.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockGeometry {
    pub a_size: usize,
    pub a_count: usize,
    pub b_size: usize,
    pub b_count: usize,
    pub ec_len: usize,
}

impl BlockGeometry {
    const fn new(a_size: usize, a_count: usize, b_size: usize, b_count: usize, ec_len: usize) -> Self {
        Self { a_size, a_count, b_size, b_count, ec_len }
    }

    pub fn block_count(&self) -> usize {
        self.a_count + self.b_count
    }

    pub fn data_len(&self) -> usize {
        self.a_size * self.a_count + self.b_size * self.b_count
    }

    pub fn ec_total(&self) -> usize {
        self.block_count() * self.ec_len
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub fn new(v: usize) -> Self {
        assert!((1..=MAX_VERSION).contains(&v), "Invalid version: {v}");
        Self(v)
    }

    /// Smallest version whose byte capacity holds `len` bytes of content.
    pub fn from_content_len(len: usize) -> Option<Self> {
        let i = CAPACITIES.partition_point(|&cap| cap < len);
        if i < MAX_VERSION {
            Some(Self(i + 1))
        } else {
            None
        }
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    /// Max content bytes this version holds in byte mode
    pub fn capacity(self) -> usize {
        CAPACITIES[self.0 - 1]
    }

    pub fn block_geometry(self) -> BlockGeometry {
        BLOCK_GEOMETRIES[self.0 - 1]
    }

    pub fn data_codewords(self) -> usize {
        self.block_geometry().data_len()
    }

    pub fn total_codewords(self) -> usize {
        self.data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.data_modules() & 7
    }

    // Modules left over once function patterns and info areas are reserved
    fn data_modules(self) -> usize {
        let v = self.0;
        let mut res = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            res -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                res -= 36;
            }
        }
        res
    }

    pub fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self) -> usize {
        if self.0 <= 9 {
            8
        } else {
            16
        }
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 - 1]
    }

    pub fn info(self) -> Option<u32> {
        match self.0 {
            7..=MAX_VERSION => Some(VERSION_INFOS[self.0 - 7]),
            _ => None,
        }
    }
}

pub fn format_info(mask: u8) -> u16 {
    FORMAT_INFOS[mask as usize]
}


// Global constants
//------------------------------------------------------------------------------

pub const MAX_VERSION: usize = 40;

pub static MARGIN: usize = 4;

pub static MODE_BYTE: u8 = 0b0100;

pub static PADDING_CODEWORDS: [u8; 2] = [0xEC, 0x11];

pub static FORMAT_INFO_BIT_LEN: usize = 15;

pub static VERSION_INFO_BIT_LEN: usize = 18;

// Byte mode capacity at the fixed error correction parameters, indexed by version - 1
pub static CAPACITIES: [usize; 40] = [
    17, 32, 53, 78, 106, 134, 154, 192, 230, 271, 321, 367, 425, 458, 520, 586, 644, 718, 792, 858,
    929, 1003, 1091, 1171, 1273, 1367, 1465, 1528, 1628, 1732, 1840, 1952, 2068, 2188, 2303, 2431,
    2563, 2699, 2809, 2953,
];

pub static BLOCK_GEOMETRIES: [BlockGeometry; 40] = [
    BlockGeometry::new(0, 0, 19, 1, 7),
    BlockGeometry::new(0, 0, 34, 1, 10),
    BlockGeometry::new(0, 0, 55, 1, 15),
    BlockGeometry::new(0, 0, 80, 1, 20),
    BlockGeometry::new(0, 0, 108, 1, 26),
    BlockGeometry::new(0, 0, 68, 2, 18),
    BlockGeometry::new(0, 0, 78, 2, 20),
    BlockGeometry::new(0, 0, 97, 2, 24),
    BlockGeometry::new(0, 0, 116, 2, 30),
    BlockGeometry::new(68, 2, 69, 2, 18),
    BlockGeometry::new(0, 0, 81, 4, 20),
    BlockGeometry::new(92, 2, 93, 2, 24),
    BlockGeometry::new(0, 0, 107, 4, 26),
    BlockGeometry::new(115, 3, 116, 1, 30),
    BlockGeometry::new(87, 5, 88, 1, 22),
    BlockGeometry::new(98, 5, 99, 1, 24),
    BlockGeometry::new(107, 1, 108, 5, 28),
    BlockGeometry::new(120, 5, 121, 1, 30),
    BlockGeometry::new(113, 3, 114, 4, 28),
    BlockGeometry::new(107, 3, 108, 5, 28),
    BlockGeometry::new(116, 4, 117, 4, 28),
    BlockGeometry::new(111, 2, 112, 7, 28),
    BlockGeometry::new(121, 4, 122, 5, 30),
    BlockGeometry::new(117, 6, 118, 4, 30),
    BlockGeometry::new(106, 8, 107, 4, 26),
    BlockGeometry::new(114, 10, 115, 2, 28),
    BlockGeometry::new(122, 8, 123, 4, 30),
    BlockGeometry::new(117, 3, 118, 10, 30),
    BlockGeometry::new(116, 7, 117, 7, 30),
    BlockGeometry::new(115, 5, 116, 10, 30),
    BlockGeometry::new(115, 13, 116, 3, 30),
    BlockGeometry::new(0, 0, 115, 17, 30),
    BlockGeometry::new(115, 17, 116, 1, 30),
    BlockGeometry::new(115, 13, 116, 6, 30),
    BlockGeometry::new(121, 12, 122, 7, 30),
    BlockGeometry::new(121, 6, 122, 14, 30),
    BlockGeometry::new(122, 17, 123, 4, 30),
    BlockGeometry::new(122, 4, 123, 18, 30),
    BlockGeometry::new(117, 20, 118, 4, 30),
    BlockGeometry::new(118, 19, 119, 6, 30),
];

pub static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Format info for error correction level L, indexed by mask pattern
pub static FORMAT_INFOS: [u16; 8] =
    [0x77c4, 0x72f3, 0x7daa, 0x789d, 0x662f, 0x6318, 0x6c41, 0x6976];

pub static VERSION_INFOS: [u32; 34] = [
    0x07c94, 0x085bc, 0x09a99, 0x0a4d3, 0x0bbf6, 0x0c762, 0x0d847, 0x0e60d, 0x0f928, 0x10b78,
    0x1145d, 0x12a17, 0x13532, 0x149a6, 0x15683, 0x168c9, 0x177ec, 0x18ec4, 0x191e1, 0x1afab,
    0x1b08e, 0x1cc1a, 0x1d33f, 0x1ed75, 0x1f250, 0x209d5, 0x216f0, 0x228ba, 0x2379f, 0x24b0b,
    0x2542e, 0x26a64, 0x27541, 0x28c69,
];

// Format info coords in most significant bit first order. Negative indices wrap
// from the far edge.
pub static FORMAT_INFO_COORDS_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];
