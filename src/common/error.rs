use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    /// Content does not fit even the largest symbol
    #[error("Data too long: {len} bytes, max capacity is {max} bytes")]
    DataTooLong { len: usize, max: usize },

    /// Lone or mismatched UTF-16 surrogate in the input
    #[error("Invalid UTF-16 sequence at code unit {index}")]
    InvalidUtf16 { index: usize },
}

pub type QRResult<T> = Result<T, QRError>;
