//! # monoqr
//!
//! A Rust library for encoding text into monochrome QR code symbols.
//!
//! Text is encoded as a single UTF-8 byte mode segment in the smallest of the
//! 40 versions that fits it, protected with Reed-Solomon error correction and
//! masked with whichever of the eight standard patterns scores the lowest
//! penalty.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use monoqr::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!").build()?;
//!
//! let img = qr.to_image(4); // 4x scale factor
//! img.save("simple_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Forcing a mask
//!
//! ```rust
//! use monoqr::{MaskPattern, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("Hello, World!")
//!     .mask(MaskPattern::new(3)) // if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! // Row-major dark/light values, 4 module margin included
//! let colors = qr.to_colors();
//! assert_eq!(colors.len(), qr.full_width() * qr.full_width());
//! # Ok(())
//! # }
//! ```
//!
//! ## Capacity
//!
//! Versions 1 through 40 hold between 17 and 2953 bytes of UTF-8 content.
//! Longer content is rejected with [`QRError::DataTooLong`], and UTF-16 input
//! holding an unpaired surrogate with [`QRError::InvalidUtf16`].

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::bit_utils::BitStream;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{BlockGeometry, Color, Version};
