use super::galois::{generator_polynomial, EXP_TABLE, LOG_TABLE};

// Reed-Solomon generator
//------------------------------------------------------------------------------

// Polynomial long division of the data polynomial by the generator polynomial.
// `buf` holds `dlen` data bytes followed by `ec_len` zeroed bytes; on return the
// tail holds the remainder, whose coefficients are the ecc. The data prefix is
// clobbered in the process.
pub fn rs_remainder(buf: &mut [u8], dlen: usize, ec_len: usize) {
    debug_assert!(
        buf.len() == dlen + ec_len,
        "Buffer len doesn't match data and ecc: Buffer {}, Data {dlen}, Ecc {ec_len}",
        buf.len()
    );
    debug_assert!(buf[dlen..].iter().all(|&b| b == 0), "Ecc region must start zeroed");

    let gen_poly = generator_polynomial(ec_len);

    for i in 0..dlen {
        let lead_coeff = buf[i] as usize;
        if lead_coeff == 0 {
            continue;
        }

        let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
        for (u, &g) in buf[i..].iter_mut().zip(gen_poly.iter()) {
            *u ^= EXP_TABLE[(g as usize + log_lead_coeff) % 255];
        }
    }
}

/// Computes `ec_len` error correction codewords for a single data block.
pub fn ecc(block: &[u8], ec_len: usize) -> Vec<u8> {
    let dlen = block.len();
    let mut buf = Vec::with_capacity(dlen + ec_len);
    buf.extend_from_slice(block);
    buf.resize(dlen + ec_len, 0);
    rs_remainder(&mut buf, dlen, ec_len);
    buf.split_off(dlen)
}
