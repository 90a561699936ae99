//! A toolkit for 128-bit universally unique identifiers: time-ordered
//! generation, layout conversions, and field access
//!
//! ```rust
//! use uuidkit::uuid7;
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! The [`uuid7()`] entry point produces identifiers with the following bit
//! layout, which sort by creation time under plain byte comparison:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |        counter        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|    counter    |                   rand                    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in
//!   milliseconds.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 26-bit `counter` field accommodates the sequence counter that ensures
//!   the monotonic order of IDs generated within the same millisecond. The
//!   counter is incremented by a small random step for each new ID generated
//!   within the same timestamp and is randomly initialized whenever the
//!   `unix_ts_ms` changes.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 48 `rand` bits are filled with a cryptographically strong
//!   random number.
//!
//! [`uuid8_mssql()`] produces identifiers holding the same fields arranged
//! for SQL Server, whose GUID comparison weighs the trailing six bytes most:
//! the timestamp occupies bytes 10-15 and the counter is packed into bytes
//! 6-9 around the version and variant bits, so identifiers sort by creation
//! time under [`Uuid::mssql_cmp`] rather than under plain byte order.
//! [`Uuid::to_version8_mssql`] and [`Uuid::to_version7`] rearrange
//! identifiers losslessly between the two layouts, as
//! [`Uuid::to_version6`] and [`Uuid::to_version1`] do for the Gregorian
//! timestamp pair.
//!
//! In the very rare circumstances where the `counter` field reaches the
//! maximum value and can no more be incremented within the same timestamp,
//! this library increments the `unix_ts_ms` and reinitializes the counter;
//! therefore, the `unix_ts_ms` may have a larger value than that of the
//! real-time clock until the clock catches up.
//!
//! # Other features
//!
//! This library also generates random UUIDv4 and the name-based versions:
//!
//! ```rust
//! use uuidkit::{uuid4, uuid5, Uuid};
//!
//! println!("{}", uuid4()); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let ns: Uuid = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse().unwrap();
//! println!("{}", uuid5(ns, "www.example.com"));
//! ```
//!
//! Plus a handful of utilities on [`Uuid`] itself: decoded field access
//! ([`gregorian_fields`](Uuid::gregorian_fields),
//! [`unix_fields`](Uuid::unix_fields)), reversible masking
//! ([`xor`](Uuid::xor), [`reverse_xor`](Uuid::reverse_xor)), decimal
//! embedding ([`from_numeric`](Uuid::from_numeric),
//! [`to_numeric`](Uuid::to_numeric)), and trailing-byte arithmetic
//! ([`increment`](Uuid::increment),
//! [`recover_increment`](Uuid::recover_increment)).
//!
//! # Crate features
//!
//! Optional features:
//!
//! - `serde` enables the serialization and deserialization of [`Uuid`]
//!   objects.
//! - `uuid` enables the conversions between [`Uuid`] and the [`uuid`]
//!   crate's type.

mod convert;
mod error;
mod fields;
mod increment;
mod numeric;
mod uuid;
mod xor;

pub use error::Error;
pub use fields::{GregorianFields, UnixFields};
pub use uuid::{Uuid, Variant};

mod gen;
pub use gen::{OrderedGenerator, OrderedLayout};

mod global_gen;
pub use global_gen::{uuid4, uuid7, uuid8_mssql};

mod name;
pub use name::{name_based_uuid, uuid3, uuid5, uuid8_sha256, uuid8_sha512};
