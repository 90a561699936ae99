//! Reversible masking of one identifier with another.
//!
//! XORing two IETF identifiers flips the variant bits of byte 8 from `10x`
//! to `00x`, so the result always lands in the Apollo NCS range and cannot be
//! confused with its operands. XORing that result with either operand
//! restores the other one exactly.

use crate::fields::{layout_name, VARIANT_IETF, VARIANT_MASK};
use crate::{Error, Uuid};

impl Uuid {
    /// Masks this identifier with another by XORing all 128 bits.
    ///
    /// The operation is symmetric and self-inverse:
    /// `a.xor(&b)?.reverse_xor(&a)? == b` and vice versa.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless both operands carry the IETF
    /// variant bits `10` in byte 8.
    pub fn xor(&self, other: &Uuid) -> Result<Uuid, Error> {
        for e in [self, other] {
            if e.as_bytes()[8] & VARIANT_MASK != VARIANT_IETF {
                return Err(Error::LayoutMismatch {
                    expected: "IETF variant operand",
                    found: layout_name(e),
                });
            }
        }

        let masked = xor_bytes(self, other);
        debug_assert_eq!(masked[8] & VARIANT_MASK, 0);
        Ok(Uuid::from(masked))
    }

    /// Recovers one XOR operand from the masked result and the other operand.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless `self` carries the Apollo NCS
    /// variant bits `00` that [`xor`](Uuid::xor) produces and `a_or_b` is an
    /// IETF-variant operand.
    pub fn reverse_xor(&self, a_or_b: &Uuid) -> Result<Uuid, Error> {
        if self.as_bytes()[8] & VARIANT_MASK != 0 {
            return Err(Error::LayoutMismatch {
                expected: "masked identifier in the Apollo NCS range",
                found: layout_name(self),
            });
        }
        if a_or_b.as_bytes()[8] & VARIANT_MASK != VARIANT_IETF {
            return Err(Error::LayoutMismatch {
                expected: "IETF variant operand",
                found: layout_name(a_or_b),
            });
        }

        let recovered = xor_bytes(self, a_or_b);
        debug_assert_eq!(recovered[8] & VARIANT_MASK, VARIANT_IETF);
        Ok(Uuid::from(recovered))
    }
}

fn xor_bytes(a: &Uuid, b: &Uuid) -> [u8; 16] {
    let mut out = *a.as_bytes();
    for (e, x) in out.iter_mut().zip(b.as_bytes()) {
        *e ^= x;
    }
    out
}
