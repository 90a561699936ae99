//! Embedding of small decimal numbers in human-readable identifiers.
//!
//! Each decimal digit of the number occupies one hexadecimal digit of the
//! canonical string, right-aligned, so `42` renders as
//! `00000000-0000-0000-0000-000000000042`. Handy for eyeball-recognizable
//! fixture data.

use crate::{Error, Uuid};

impl Uuid {
    /// Creates an identifier whose canonical string spells out `value` in
    /// decimal, right-aligned over zeros.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `value` is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let x = Uuid::from_numeric(42)?;
    /// assert_eq!(x.to_string(), "00000000-0000-0000-0000-000000000042");
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn from_numeric(value: i32) -> Result<Self, Error> {
        if value < 0 {
            return Err(Error::OutOfRange);
        }

        let mut bytes = [0u8; 16];
        let mut rem = value as u32;
        for e in bytes.iter_mut().rev() {
            let lo = (rem % 10) as u8;
            rem /= 10;
            let hi = (rem % 10) as u8;
            rem /= 10;
            *e = (hi << 4) | lo;
        }
        Ok(Self::from(bytes))
    }

    /// Reads back the number embedded by [`from_numeric`](Uuid::from_numeric).
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormatError`] if any hexadecimal digit of the
    /// identifier is not a decimal digit, or [`Error::OutOfRange`] if the
    /// embedded number does not fit an `i32`.
    pub fn to_numeric(&self) -> Result<i32, Error> {
        let mut value = 0i128;
        for e in self.as_bytes() {
            let (hi, lo) = (e >> 4, e & 0x0f);
            if hi > 9 || lo > 9 {
                return Err(Error::FormatError("identifier contains non-decimal digits"));
            }
            value = value * 100 + (hi as i128) * 10 + lo as i128;
        }
        i32::try_from(value).map_err(|_| Error::OutOfRange)
    }
}
