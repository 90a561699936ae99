//! Crate-wide error type.

/// The error reported when an operation is handed a structurally unsuitable
/// identifier or field value.
///
/// Every variant is a synchronous contract violation on the caller's side;
/// none of them is transient, so there is nothing to retry.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The buffer's variant bits or version nibble do not match what the
    /// requested operation expects.
    #[error("layout mismatch: expected {expected}, found {found}")]
    LayoutMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A timestamp outside the representable range (e.g. before the Unix
    /// epoch) was supplied.
    #[error("timestamp out of representable range")]
    TimestampRange,

    /// A counter, sequence, or numeric value does not fit the target field.
    #[error("value out of field range")]
    OutOfRange,

    /// Malformed textual or numeric-embedded input.
    #[error("invalid representation: {0}")]
    FormatError(&'static str),

    /// Increment-recovery operands do not share a common 12-byte base.
    #[error("identifiers do not share a common base")]
    ArgumentMismatch,

    /// The injected digest algorithm produces fewer than 16 output bytes.
    #[error("digest output shorter than 16 bytes")]
    UnsupportedDigest,
}
