//! Version-specific field codecs over raw identifier buffers.
//!
//! The two layout anchors shared by every path in this module are the
//! version nibble in the high nibble of byte 6 and the two variant bits in
//! the top of byte 8; everything else moves with the version.

use crate::{convert, Error, Uuid, Variant};

/// Bit mask selecting the two variant bits of byte 8.
pub(crate) const VARIANT_MASK: u8 = 0b1100_0000;

/// The `10` variant tag carried by every IETF identifier.
pub(crate) const VARIANT_IETF: u8 = 0b1000_0000;

/// Mask selecting the low nibble of byte 6, shared by the timestamp (v1),
/// RandA (v7), and counter (v7/v8-MsSql) fields.
const LOW_NIBBLE: u8 = 0b0000_1111;

/// Highest value the 26-bit monotonic counter may hold; past this the
/// generator advances the pinned timestamp instead.
pub(crate) const COUNTER_MAX: u32 = (1 << 26) - 1;

/// Counter bit cleared when seeding from random filler, leaving rollover
/// headroom of half the counter range.
const V7_COUNTER_GUARD: u8 = 0b0000_1000;
const V8_COUNTER_GUARD: u8 = 0b0010_0000;

/// 100-nanosecond ticks between the Gregorian epoch (1582-10-15) and the
/// Unix epoch (1970-01-01).
const GREGORIAN_TO_UNIX_TICKS: i64 = 0x01b2_1dd2_1381_4000;

/// Decoded fields of a v1 or v6 identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GregorianFields {
    /// 60-bit count of 100-nanosecond intervals since 1582-10-15T00:00:00Z.
    pub timestamp: u64,
    /// 14-bit anti-collision sequence, randomized or incremented when the
    /// clock regresses or the node identity changes.
    pub clock_seq: u16,
    /// 48-bit node identity, conventionally a MAC address.
    pub node: [u8; 6],
}

impl GregorianFields {
    /// Converts the Gregorian timestamp to Unix milliseconds, discarding the
    /// sub-millisecond fraction. Negative for pre-1970 timestamps.
    pub fn unix_ts_ms(&self) -> i64 {
        (self.timestamp as i64 - GREGORIAN_TO_UNIX_TICKS) / 10_000
    }
}

/// Decoded fields of a v7 or v8-MsSql identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct UnixFields {
    /// 48-bit count of milliseconds since the Unix epoch.
    pub unix_ts_ms: i64,
    /// The 12-bit field next to the version nibble; random data,
    /// sub-millisecond fraction, or the upper bits of a monotonic counter.
    pub rand_a: u16,
    /// The trailing 62 bits of random payload, not used for ordering.
    pub rand_b: u64,
}

impl Uuid {
    /// Decodes the timestamp, clock sequence, and node fields of a v1 or v6
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 1 or 6.
    pub fn gregorian_fields(&self) -> Result<GregorianFields, Error> {
        let b = match self.version() {
            Some(6) => *self.as_bytes(),
            Some(1) => {
                // read through the v6 arrangement, where the 60-bit
                // timestamp is a contiguous big-endian field
                let mut b = *self.as_bytes();
                convert::rearrange_v1_to_v6(&mut b);
                b
            }
            _ => {
                return Err(Error::LayoutMismatch {
                    expected: "IETF version 1 or 6",
                    found: layout_name(self),
                })
            }
        };

        Ok(GregorianFields {
            timestamp: (b[0] as u64) << 52
                | (b[1] as u64) << 44
                | (b[2] as u64) << 36
                | (b[3] as u64) << 28
                | (b[4] as u64) << 20
                | (b[5] as u64) << 12
                | ((b[6] & LOW_NIBBLE) as u64) << 8
                | b[7] as u64,
            clock_seq: ((b[8] & !VARIANT_MASK) as u16) << 8 | b[9] as u16,
            node: [b[10], b[11], b[12], b[13], b[14], b[15]],
        })
    }

    /// Decodes the timestamp and random payload fields of a v7 identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 7.
    pub fn unix_fields(&self) -> Result<UnixFields, Error> {
        match self.version() {
            Some(7) => Ok(read_unix_fields(self.as_bytes())),
            _ => Err(Error::LayoutMismatch {
                expected: "IETF version 7",
                found: layout_name(self),
            }),
        }
    }

    /// Decodes the timestamp and random payload fields of a v8 identifier
    /// carrying the MsSql layout.
    ///
    /// The MsSql bit arrangement is this crate's own convention (v8 payloads
    /// are not standardized); the caller asserts the layout by choosing this
    /// method over [`unix_fields`](Uuid::unix_fields).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutMismatch`] unless the identifier is an IETF
    /// version 8.
    pub fn unix_fields_mssql(&self) -> Result<UnixFields, Error> {
        match self.version() {
            Some(8) => {
                let mut b = *self.as_bytes();
                convert::rearrange_v8_mssql_to_v7(&mut b);
                Ok(read_unix_fields(&b))
            }
            _ => Err(Error::LayoutMismatch {
                expected: "IETF version 8",
                found: layout_name(self),
            }),
        }
    }
}

/// Reads the v7 field positions out of a buffer already in the v7
/// arrangement.
fn read_unix_fields(b: &[u8; 16]) -> UnixFields {
    UnixFields {
        unix_ts_ms: (b[0] as i64) << 40
            | (b[1] as i64) << 32
            | (b[2] as i64) << 24
            | (b[3] as i64) << 16
            | (b[4] as i64) << 8
            | b[5] as i64,
        rand_a: ((b[6] & LOW_NIBBLE) as u16) << 8 | b[7] as u16,
        rand_b: ((b[8] & !VARIANT_MASK) as u64) << 56
            | (b[9] as u64) << 48
            | (b[10] as u64) << 40
            | (b[11] as u64) << 32
            | (b[12] as u64) << 24
            | (b[13] as u64) << 16
            | (b[14] as u64) << 8
            | b[15] as u64,
    }
}

/// Stamps the v7 timestamp, version nibble, and counter over a buffer that
/// already carries IETF variant bits and random filler elsewhere.
///
/// With `write_counter` set, `counter` is packed into bits 25-22 of the low
/// nibble of byte 6, byte 7, the low 6 bits of byte 8, and byte 9. Otherwise
/// the counter guard bit is cleared and `counter` is re-seeded from the
/// random filler occupying those positions.
pub(crate) fn stamp_v7(
    bytes: &mut [u8; 16],
    unix_ts_ms: i64,
    counter: &mut u32,
    write_counter: bool,
) -> Result<(), Error> {
    if unix_ts_ms < 0 || unix_ts_ms >= 1 << 48 {
        return Err(Error::TimestampRange);
    }
    if bytes[8] & VARIANT_MASK != VARIANT_IETF {
        return Err(Error::LayoutMismatch {
            expected: "a buffer tagged with the IETF variant",
            found: layout_name(&Uuid::from(*bytes)),
        });
    }

    bytes[0] = (unix_ts_ms >> 40) as u8;
    bytes[1] = (unix_ts_ms >> 32) as u8;
    bytes[2] = (unix_ts_ms >> 24) as u8;
    bytes[3] = (unix_ts_ms >> 16) as u8;
    bytes[4] = (unix_ts_ms >> 8) as u8;
    bytes[5] = unix_ts_ms as u8;

    bytes[6] = 7 << 4 | (bytes[6] & LOW_NIBBLE);

    if write_counter {
        if *counter > COUNTER_MAX {
            return Err(Error::OutOfRange);
        }
        bytes[6] = (bytes[6] & !LOW_NIBBLE) | (*counter >> 22) as u8 & LOW_NIBBLE;
        bytes[7] = (*counter >> 14) as u8;
        bytes[8] = (bytes[8] & VARIANT_MASK) | (*counter >> 8) as u8 & !VARIANT_MASK;
        bytes[9] = *counter as u8;
    } else {
        bytes[6] &= !V7_COUNTER_GUARD;
        *counter = ((bytes[6] & LOW_NIBBLE) as u32) << 22
            | (bytes[7] as u32) << 14
            | ((bytes[8] & !VARIANT_MASK) as u32) << 8
            | bytes[9] as u32;
    }

    Ok(())
}

/// Stamps the v8-MsSql timestamp, version nibble, and counter, mirroring
/// [`stamp_v7`] with the vendor bit positions.
///
/// The timestamp goes to bytes 10-15 and the counter to bits 25-20 of byte 8,
/// byte 9, byte 7, and the low nibble of byte 6, so that SQL Server's
/// trailing-bytes-first comparison sorts by creation time.
pub(crate) fn stamp_v8_mssql(
    bytes: &mut [u8; 16],
    unix_ts_ms: i64,
    counter: &mut u32,
    write_counter: bool,
) -> Result<(), Error> {
    if unix_ts_ms < 0 || unix_ts_ms >= 1 << 48 {
        return Err(Error::TimestampRange);
    }
    if bytes[8] & VARIANT_MASK != VARIANT_IETF {
        return Err(Error::LayoutMismatch {
            expected: "a buffer tagged with the IETF variant",
            found: layout_name(&Uuid::from(*bytes)),
        });
    }

    bytes[10] = (unix_ts_ms >> 40) as u8;
    bytes[11] = (unix_ts_ms >> 32) as u8;
    bytes[12] = (unix_ts_ms >> 24) as u8;
    bytes[13] = (unix_ts_ms >> 16) as u8;
    bytes[14] = (unix_ts_ms >> 8) as u8;
    bytes[15] = unix_ts_ms as u8;

    bytes[6] = 8 << 4 | (bytes[6] & LOW_NIBBLE);

    if write_counter {
        if *counter > COUNTER_MAX {
            return Err(Error::OutOfRange);
        }
        bytes[8] = (bytes[8] & VARIANT_MASK) | (*counter >> 20) as u8 & !VARIANT_MASK;
        bytes[9] = (*counter >> 12) as u8;
        bytes[7] = (*counter >> 4) as u8;
        bytes[6] = (bytes[6] & !LOW_NIBBLE) | *counter as u8 & LOW_NIBBLE;
    } else {
        bytes[8] &= !V8_COUNTER_GUARD;
        *counter = ((bytes[8] & !VARIANT_MASK) as u32) << 20
            | (bytes[9] as u32) << 12
            | (bytes[7] as u32) << 4
            | (bytes[6] & LOW_NIBBLE) as u32;
    }

    Ok(())
}

/// Describes an identifier's layout for error reporting.
pub(crate) fn layout_name(uuid: &Uuid) -> &'static str {
    match uuid.version() {
        Some(1) => "IETF version 1",
        Some(2) => "IETF version 2",
        Some(3) => "IETF version 3",
        Some(4) => "IETF version 4",
        Some(5) => "IETF version 5",
        Some(6) => "IETF version 6",
        Some(7) => "IETF version 7",
        Some(8) => "IETF version 8",
        Some(_) => "an IETF identifier with an undefined version",
        None => match uuid.variant() {
            Variant::ApolloNcs => "an Apollo NCS identifier",
            Variant::Microsoft => "a Microsoft identifier",
            Variant::Reserved => "a reserved-variant identifier",
            Variant::Ietf => "an IETF identifier",
        },
    }
}
