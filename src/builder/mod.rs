mod qr;

pub use qr::{Module, QR};

use std::borrow::Cow;

use log::{debug, info};

use crate::common::{
    codec::{encode, measure_utf8},
    ec::ecc_and_interleave,
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
};

pub struct QRBuilder<'a> {
    units: Cow<'a, [u16]>,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(text: &str) -> Self {
        Self { units: Cow::Owned(text.encode_utf16().collect()), mask: None }
    }

    /// Builder over raw UTF-16 code units, which may hold unpaired surrogates.
    pub fn from_utf16(units: &'a [u16]) -> Self {
        Self { units: Cow::Borrowed(units), mask: None }
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let len = measure_utf8(&self.units);
        match self.mask {
            Some(m) => format!("{{ Length: {len} bytes, Mask: {} }}", *m),
            None => format!("{{ Length: {len} bytes, Mask: Auto }}"),
        }
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}...", self.metadata());

        debug!("Encoding data...");
        let (encoded_data, version) = encode(&self.units)?;

        debug!("Constructing payload with ecc & interleaving...");
        let payload = ecc_and_interleave(encoded_data.data(), version);

        debug!("Constructing QR...");
        let mut qr = QR::new(version);
        qr.draw_template();
        qr.draw_codewords(&payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => {
                debug!("Finding best mask...");
                apply_best_mask(&mut qr)
            }
        };

        qr.draw_format_info(mask);
        qr.draw_version_info();

        let total = qr.full_width() * qr.full_width();
        info!(
            "Generated QR: version {}, mask {}, {} of {} modules dark",
            *version,
            *mask,
            qr.count_dark_modules(),
            total
        );

        Ok(qr)
    }
}
