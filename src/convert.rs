//! Lossless bit rearrangement between the paired time-ordered layouts.
//!
//! v1 and v6 hold the same 60-bit Gregorian timestamp with its sub-fields in
//! opposite significance order; v7 and v8-MsSql hold the same 48-bit Unix
//! timestamp at opposite ends of the buffer. Each conversion only moves the
//! storage positions of the decoded fields, never their values, so each is
//! the exact inverse of its partner.

use std::cmp::Ordering;

use crate::fields::{layout_name, VARIANT_MASK};
use crate::{Error, Uuid};

impl Uuid {
    /// Rearranges a v1 identifier into the time-ordered v6 layout.
    ///
    /// The decoded timestamp, clock sequence, and node are unchanged;
    /// [`to_version1`](Uuid::to_version1) restores the original exactly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 1.
    pub fn to_version6(&self) -> Result<Uuid, Error> {
        self.rearranged(1, "IETF version 1", rearrange_v1_to_v6)
    }

    /// Rearranges a v6 identifier back into the v1 layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 6.
    pub fn to_version1(&self) -> Result<Uuid, Error> {
        self.rearranged(6, "IETF version 6", rearrange_v6_to_v1)
    }

    /// Rearranges a v7 identifier into the v8-MsSql layout, which sorts by
    /// creation time under SQL Server's native comparison (see
    /// [`mssql_cmp`](Uuid::mssql_cmp)).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 7.
    pub fn to_version8_mssql(&self) -> Result<Uuid, Error> {
        self.rearranged(7, "IETF version 7", rearrange_v7_to_v8_mssql)
    }

    /// Rearranges a v8-MsSql identifier back into the v7 layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 8.
    pub fn to_version7(&self) -> Result<Uuid, Error> {
        self.rearranged(8, "IETF version 8", rearrange_v8_mssql_to_v7)
    }

    fn rearranged(
        &self,
        source_version: u8,
        expected: &'static str,
        rearrange: fn(&mut [u8; 16]),
    ) -> Result<Uuid, Error> {
        if self.version() != Some(source_version) {
            return Err(Error::LayoutMismatch {
                expected,
                found: layout_name(self),
            });
        }
        let mut bytes = *self.as_bytes();
        rearrange(&mut bytes);
        Ok(Uuid::from(bytes))
    }

    /// Compares two identifiers the way SQL Server's GUID type does: the
    /// trailing six bytes weigh most, then bytes 8-9, then the remaining
    /// ten bytes in its legacy little-endian group order.
    pub fn mssql_cmp(&self, other: &Uuid) -> Ordering {
        const SQL_BYTE_ORDER: [usize; 16] = [10, 11, 12, 13, 14, 15, 8, 9, 7, 6, 5, 4, 3, 2, 1, 0];

        for i in SQL_BYTE_ORDER {
            match self.as_bytes()[i].cmp(&other.as_bytes()[i]) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

/// Moves the v1 time-low/time-mid/time-hi sub-fields into the v6
/// most-significant-first arrangement. Nibble-aligned, so each destination
/// byte is assembled from two captured source nibbles.
pub(crate) fn rearrange_v1_to_v6(b: &mut [u8; 16]) {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
    const NEW_VER: u8 = 6;

    b[0] = (b6 & 0x0f) << 4 | (b7 & 0xf0) >> 4;
    b[1] = (b7 & 0x0f) << 4 | (b4 & 0xf0) >> 4;
    b[2] = (b4 & 0x0f) << 4 | (b5 & 0xf0) >> 4;
    b[3] = (b5 & 0x0f) << 4 | (b0 & 0xf0) >> 4;
    b[4] = (b0 & 0x0f) << 4 | (b1 & 0xf0) >> 4;
    b[5] = (b1 & 0x0f) << 4 | (b2 & 0xf0) >> 4;
    b[6] = NEW_VER << 4 | (b2 & 0x0f);
    b[7] = b3;
}

/// Mirror image of [`rearrange_v1_to_v6`].
pub(crate) fn rearrange_v6_to_v1(b: &mut [u8; 16]) {
    let [b0, b1, b2, b3, b4, b5, b6, b7] = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
    const NEW_VER: u8 = 1;

    b[6] = NEW_VER << 4 | (b0 & 0xf0) >> 4;
    b[7] = (b0 & 0x0f) << 4 | (b1 & 0xf0) >> 4;
    b[4] = (b1 & 0x0f) << 4 | (b2 & 0xf0) >> 4;
    b[5] = (b2 & 0x0f) << 4 | (b3 & 0xf0) >> 4;
    b[0] = (b3 & 0x0f) << 4 | (b4 & 0xf0) >> 4;
    b[1] = (b4 & 0x0f) << 4 | (b5 & 0xf0) >> 4;
    b[2] = (b5 & 0x0f) << 4 | (b6 & 0x0f);
    b[3] = b7;
}

/// Swaps the 48-bit timestamp to the trailing bytes and shuffles the RandA
/// and counter bits within bytes 6-9, leaving the variant bits of byte 8 in
/// place.
pub(crate) fn rearrange_v7_to_v8_mssql(b: &mut [u8; 16]) {
    for i in 0..6 {
        b.swap(i, i + 10);
    }

    let [b6, b7, b8, b9] = [b[6], b[7], b[8], b[9]];
    const NEW_VER: u8 = 8;

    b[8] = b8 & VARIANT_MASK | (b6 << 2) & 0b0011_1100 | (b7 >> 6) & 0b0000_0011;
    b[9] = (b7 << 2) & 0b1111_1100 | (b8 >> 4) & 0b0000_0011;
    b[7] = (b8 << 4) & 0b1111_0000 | (b9 >> 4) & 0b0000_1111;
    b[6] = NEW_VER << 4 | b9 & 0b0000_1111;
}

/// Mirror image of [`rearrange_v7_to_v8_mssql`] (the shuffle of bytes 6-9 is
/// its own algebraic inverse once the version nibbles are swapped).
pub(crate) fn rearrange_v8_mssql_to_v7(b: &mut [u8; 16]) {
    for i in 0..6 {
        b.swap(i, i + 10);
    }

    let [b6, b7, b8, b9] = [b[6], b[7], b[8], b[9]];
    const NEW_VER: u8 = 7;

    b[6] = NEW_VER << 4 | (b8 >> 2) & 0b0000_1111;
    b[7] = (b8 << 6) & 0b1100_0000 | (b9 >> 2) & 0b0011_1111;
    b[8] = b8 & VARIANT_MASK | (b9 << 4) & 0b0011_0000 | (b7 >> 4) & 0b0000_1111;
    b[9] = (b7 << 4) & 0b1111_0000 | b6 & 0b0000_1111;
}
