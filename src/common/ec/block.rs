use std::ops::Deref;

use log::trace;

use super::encoder::ecc;
use crate::common::metadata::{BlockGeometry, Version};

// Block
//------------------------------------------------------------------------------

// Data codewords of a block followed by its ecc
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    buf: Vec<u8>,
    dlen: usize,
}

impl Block {
    pub fn new(raw: &[u8], ec_len: usize) -> Self {
        let mut buf = Vec::with_capacity(raw.len() + ec_len);
        buf.extend_from_slice(raw);
        buf.extend(ecc(raw, ec_len));
        Self { buf, dlen: raw.len() }
    }

    pub fn data(&self) -> &[u8] {
        &self.buf[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.buf[self.dlen..]
    }
}

// Splits data codewords into the short group followed by the long group
pub fn blockify(data: &[u8], geometry: BlockGeometry) -> Vec<&[u8]> {
    let BlockGeometry { a_size, a_count, b_size, b_count, .. } = geometry;
    let total_a_size = a_size * a_count;

    debug_assert!(
        geometry.data_len() == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        geometry.data_len()
    );

    let mut blocks = Vec::with_capacity(a_count + b_count);
    if a_count > 0 {
        blocks.extend(data[..total_a_size].chunks(a_size));
    }
    blocks.extend(data[total_a_size..].chunks(b_size));
    blocks
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}

/// Splits the data codewords into blocks, appends the Reed-Solomon ecc of each
/// and returns the final codeword sequence: interleaved data followed by
/// interleaved ecc.
pub fn ecc_and_interleave(data: &[u8], version: Version) -> Vec<u8> {
    let geometry = version.block_geometry();
    let blocks = blockify(data, geometry)
        .into_iter()
        .map(|b| Block::new(b, geometry.ec_len))
        .collect::<Vec<_>>();

    trace!(
        "Blocks: {} x {} + {} x {}, ecc per block {}",
        geometry.a_count,
        geometry.a_size,
        geometry.b_count,
        geometry.b_size,
        geometry.ec_len
    );

    let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

    let mut res = Vec::with_capacity(version.total_codewords());
    res.extend(interleave(&data_blocks));
    res.extend(interleave(&ecc_blocks));
    debug_assert_eq!(res.len(), geometry.data_len() + geometry.ec_total());
    res
}

#[cfg(test)]
mod block_tests {
    use test_case::test_case;

    use super::{blockify, ecc_and_interleave, interleave, Block};
    use crate::common::{bit_utils::BitStream, metadata::Version};

    #[test]
    fn test_block_keeps_data() {
        let raw = [0x40, 0x56, 0x86, 0x56, 0xc6, 0xc6, 0xf0, 0xec, 0x11, 0xec, 0x11, 0xec, 0x11];
        let mut raw = raw.to_vec();
        raw.extend([0xec, 0x11].repeat(3));
        let block = Block::new(&raw, 7);
        assert_eq!(block.data().len() + block.ecc().len(), 26);
        assert_eq!(block.data(), &raw[..]);
        assert_eq!(block.ecc(), &[0x25, 0x19, 0xd0, 0xd2, 0x68, 0x59, 0x39]);
    }

    #[test]
    fn test_blockify_two_groups() {
        let data = (0..274).map(|i| i as u8).collect::<Vec<_>>();
        let blocks = blockify(&data, Version::new(10).block_geometry());
        let sizes = blocks.iter().map(|b| b.len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![68, 68, 69, 69]);
        assert_eq!(blocks[2][0], 136);
    }

    #[test]
    fn test_interleave() {
        let blocks = vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9, 0]];
        let interleaved = interleave(&blocks);
        let exp_interleaved = vec![1, 4, 7, 2, 5, 8, 3, 6, 9, 0];
        assert_eq!(interleaved, exp_interleaved);
    }

    #[test]
    fn test_version_1() {
        let mut data = vec![0x80, 0x56, 0x86, 0x56, 0xc6, 0xc6, 0xf0];
        data.extend([0xec, 0x11].repeat(6));
        let mut expected = data.clone();
        expected.extend([0x90, 0x09, 0xb6, 0xf7, 0x18, 0x36, 0x00]);
        assert_eq!(ecc_and_interleave(&data, Version::new(1)), expected);
    }

    #[test]
    fn test_version_2() {
        let data = [
            0x42, 0x00, 0x00, 0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x90, 0xa0, 0xb0,
            0xc0, 0xd0, 0xe0, 0xf1, 0x01, 0x11, 0x21, 0x31, 0x41, 0x51, 0x61, 0x71, 0x81, 0x91,
            0xa1, 0xb1, 0xc1, 0xd1, 0xe1, 0xf0,
        ];
        let mut expected = data.to_vec();
        expected.extend([0xbb, 0x3b, 0xba, 0x86, 0x1a, 0xb1, 0x98, 0xc1, 0x0a, 0x06]);
        assert_eq!(ecc_and_interleave(&data, Version::new(2)), expected);
    }

    #[test]
    fn test_version_10() {
        // Byte segment of 271 ascii bytes cycling through 0..128
        let mut bs = BitStream::new(274 << 3);
        bs.push_bits(0b0100u8, 4);
        bs.push_bits(271u16, 16);
        (0..271).for_each(|i| bs.push_bits((i % 128) as u8, 8));
        bs.push_bits(0u8, 4);
        let data = bs.data();
        assert_eq!(data.len(), 274);
        assert_eq!(&data[..4], &[0x40, 0x10, 0xf0, 0x00]);

        let expected = [
            0x40, 0x14, 0x50, 0xa4, 0x10, 0x24, 0x60, 0xb4, 0xf0, 0x34, 0x70, 0xc4, 0x00, 0x44,
            0x80, 0xd4, 0x10, 0x54, 0x90, 0xe4, 0x20, 0x64, 0xa0, 0xf5, 0x30, 0x74, 0xb0, 0x05,
            0x40, 0x84, 0xc0, 0x15, 0x50, 0x94, 0xd0, 0x25, 0x60, 0xa4, 0xe0, 0x35, 0x70, 0xb4,
            0xf1, 0x45, 0x80, 0xc4, 0x01, 0x55, 0x90, 0xd4, 0x11, 0x65, 0xa0, 0xe4, 0x21, 0x75,
            0xb0, 0xf5, 0x31, 0x85, 0xc0, 0x05, 0x41, 0x95, 0xd0, 0x15, 0x51, 0xa5, 0xe0, 0x25,
            0x61, 0xb5, 0xf1, 0x35, 0x71, 0xc5, 0x01, 0x45, 0x81, 0xd5, 0x11, 0x55, 0x91, 0xe5,
            0x21, 0x65, 0xa1, 0xf6, 0x31, 0x75, 0xb1, 0x06, 0x41, 0x85, 0xc1, 0x16, 0x51, 0x95,
            0xd1, 0x26, 0x61, 0xa5, 0xe1, 0x36, 0x71, 0xb5, 0xf2, 0x46, 0x81, 0xc5, 0x02, 0x56,
            0x91, 0xd5, 0x12, 0x66, 0xa1, 0xe5, 0x22, 0x76, 0xb1, 0xf6, 0x32, 0x86, 0xc1, 0x06,
            0x42, 0x96, 0xd1, 0x16, 0x52, 0xa6, 0xe1, 0x26, 0x62, 0xb6, 0xf2, 0x36, 0x72, 0xc6,
            0x02, 0x46, 0x82, 0xd6, 0x12, 0x56, 0x92, 0xe6, 0x22, 0x66, 0xa2, 0xf7, 0x32, 0x76,
            0xb2, 0x07, 0x42, 0x86, 0xc2, 0x17, 0x52, 0x96, 0xd2, 0x27, 0x62, 0xa6, 0xe2, 0x37,
            0x72, 0xb6, 0xf3, 0x47, 0x82, 0xc6, 0x03, 0x57, 0x92, 0xd6, 0x13, 0x67, 0xa2, 0xe6,
            0x23, 0x77, 0xb2, 0xf7, 0x33, 0x87, 0xc2, 0x07, 0x43, 0x97, 0xd2, 0x17, 0x53, 0xa7,
            0xe2, 0x27, 0x63, 0xb7, 0xf3, 0x37, 0x73, 0xc7, 0x03, 0x47, 0x83, 0xd7, 0x13, 0x57,
            0x93, 0xe7, 0x23, 0x67, 0xa3, 0xf0, 0x33, 0x77, 0xb3, 0x00, 0x43, 0x87, 0xc3, 0x10,
            0x53, 0x97, 0xd3, 0x20, 0x63, 0xa7, 0xe3, 0x30, 0x73, 0xb7, 0xf4, 0x40, 0x83, 0xc7,
            0x04, 0x50, 0x93, 0xd7, 0x14, 0x60, 0xa3, 0xe7, 0x24, 0x70, 0xb3, 0xf0, 0x34, 0x80,
            0xc3, 0x00, 0x44, 0x90, 0xd3, 0x10, 0x54, 0xa0, 0xe3, 0x20, 0x64, 0xb0, 0xf4, 0x30,
            0x74, 0xc0, 0x04, 0x40, 0x84, 0xd0, 0x94, 0xe0, 0x03, 0x2c, 0xec, 0x7c, 0xf2, 0x77,
            0xed, 0xc1, 0x0d, 0xe2, 0x4c, 0x7e, 0x3f, 0xfb, 0x00, 0x77, 0xba, 0x47, 0xbd, 0xee,
            0xce, 0x6f, 0xe3, 0xfe, 0xa4, 0xb0, 0xf9, 0x0a, 0x67, 0xa8, 0x49, 0xdd, 0xfb, 0x31,
            0x41, 0x80, 0x96, 0xf6, 0x74, 0x80, 0xc2, 0xc9, 0xdf, 0xe5, 0xe6, 0xeb, 0xd2, 0x8e,
            0xa1, 0xa5, 0xfa, 0xc4, 0xf0, 0xbe, 0x64, 0x4e, 0xba, 0xcb, 0x8f, 0x9e, 0xbf, 0x42,
            0xa3, 0x21, 0x03, 0x1e, 0xc0, 0x11, 0xca, 0x5b, 0xbd, 0xd8,
        ];
        assert_eq!(ecc_and_interleave(data, Version::new(10)), expected);
    }

    #[test_case(1)]
    #[test_case(5)]
    #[test_case(9)]
    #[test_case(22)]
    #[test_case(40)]
    fn test_output_len(v: usize) {
        let ver = Version::new(v);
        let data = vec![0xA5; ver.data_codewords()];
        let geometry = ver.block_geometry();
        let res = ecc_and_interleave(&data, ver);
        assert_eq!(res.len(), data.len() + geometry.block_count() * geometry.ec_len);
        assert_eq!(res.len(), ver.total_codewords());
    }
}
