use log::debug;

use super::{
    bit_utils::BitStream,
    error::{QRError, QRResult},
    metadata::{Version, CAPACITIES, MAX_VERSION, MODE_BYTE, PADDING_CODEWORDS},
};

// Utf-16 measurement
//------------------------------------------------------------------------------

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

fn is_surrogate_pair(units: &[u16], i: usize) -> bool {
    is_high_surrogate(units[i]) && units.get(i + 1).is_some_and(|&u| is_low_surrogate(u))
}

// Utf-8 length of the code point starting at units[i], along with the number of
// code units it spans
fn utf8_len(units: &[u16], i: usize) -> (usize, usize) {
    match units[i] {
        0..=0x7F => (1, 1),
        0x80..=0x7FF => (2, 1),
        _ if is_surrogate_pair(units, i) => (4, 2),
        _ => (3, 1),
    }
}

/// Exact byte length of the text once re-encoded as UTF-8.
pub fn measure_utf8(units: &[u16]) -> usize {
    let mut len = 0;
    let mut i = 0;
    while i < units.len() {
        let (bytes, step) = utf8_len(units, i);
        len += bytes;
        i += step;
    }
    len
}

/// Rejects unpaired surrogates, reporting the index of the first offending unit.
pub fn validate_utf16(units: &[u16]) -> QRResult<()> {
    let valid_up_to = encoding_rs::mem::utf16_valid_up_to(units);
    if valid_up_to < units.len() {
        return Err(QRError::InvalidUtf16 { index: valid_up_to });
    }
    Ok(())
}

#[cfg(test)]
mod measure_tests {
    use test_case::test_case;

    use super::{measure_utf8, validate_utf16};
    use crate::common::error::QRError;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test_case("", 0)]
    #[test_case("hello", 5)]
    #[test_case("!", 1)]
    #[test_case("¡", 2)]
    #[test_case("‼", 3)]
    #[test_case("🗣", 4)]
    #[test_case("!¡‼🗣", 10)]
    fn test_measure_utf8(s: &str, len: usize) {
        assert_eq!(measure_utf8(&utf16(s)), len);
        assert_eq!(measure_utf8(&utf16(s)), s.len());
    }

    #[test]
    fn test_measure_lone_high_surrogate() {
        assert_eq!(measure_utf8(&[0xD83D, 0x61]), 4);
    }

    #[test]
    fn test_validate_utf16() {
        assert_eq!(validate_utf16(&utf16("!¡‼🗣")), Ok(()));
        assert_eq!(validate_utf16(&[0x61, 0xD800]), Err(QRError::InvalidUtf16 { index: 1 }));
        assert_eq!(validate_utf16(&[0xDC00, 0x61]), Err(QRError::InvalidUtf16 { index: 0 }));
        assert_eq!(
            validate_utf16(&[0x61, 0x62, 0xD83D, 0x61]),
            Err(QRError::InvalidUtf16 { index: 2 })
        );
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Encodes UTF-16 text as a single byte mode segment, followed by the
/// terminator and pad codewords, in the smallest version that fits.
pub fn encode(units: &[u16]) -> QRResult<(BitStream, Version)> {
    validate_utf16(units)?;

    let len = measure_utf8(units);
    let ver = Version::from_content_len(len)
        .ok_or(QRError::DataTooLong { len, max: CAPACITIES[MAX_VERSION - 1] })?;
    debug!("Content length {len} bytes, selected version {}", *ver);

    let mut bs = BitStream::new(ver.data_codewords() << 3);
    push_header(len, ver, &mut bs);
    push_utf8_data(units, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);

    debug_assert!(bs.len() == bs.capacity(), "Encoded data doesn't fill the data capacity");
    Ok((bs, ver))
}

fn push_header(len: usize, ver: Version, out: &mut BitStream) {
    let len_bits = ver.char_cnt_bits();
    debug_assert!(
        len < (1 << len_bits),
        "Byte count exceeds bit length: Byte count {len}, Byte count bits {len_bits}"
    );
    out.push_bits(MODE_BYTE, ver.mode_bits());
    out.push_bits(len as u16, len_bits);
}

fn push_utf8_data(units: &[u16], out: &mut BitStream) {
    let mut i = 0;
    while i < units.len() {
        let (bytes, step) = utf8_len(units, i);
        let cp = match step {
            2 => 0x10000 + (((units[i] as u32) - 0xD800) << 10) + ((units[i + 1] as u32) - 0xDC00),
            _ => units[i] as u32,
        };
        match bytes {
            1 => out.push_bits(cp as u8, 8),
            2 => {
                out.push_bits((0xC0 | (cp >> 6)) as u8, 8);
                out.push_bits((0x80 | (cp & 0x3F)) as u8, 8);
            }
            3 => {
                out.push_bits((0xE0 | (cp >> 12)) as u8, 8);
                out.push_bits((0x80 | ((cp >> 6) & 0x3F)) as u8, 8);
                out.push_bits((0x80 | (cp & 0x3F)) as u8, 8);
            }
            _ => {
                out.push_bits((0xF0 | (cp >> 18)) as u8, 8);
                out.push_bits((0x80 | ((cp >> 12) & 0x3F)) as u8, 8);
                out.push_bits((0x80 | ((cp >> 6) & 0x3F)) as u8, 8);
                out.push_bits((0x80 | (cp & 0x3F)) as u8, 8);
            }
        }
        i += step;
    }
}

fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0u8, term_len);
    }
}

fn pad_remaining_capacity(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0u8, 8 - offset);
    }

    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc, 8);
    });
}
