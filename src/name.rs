//! Name-based identifiers derived from a namespace and a name through a hash
//! function.

use digest::Digest;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::fields::{VARIANT_IETF, VARIANT_MASK};
use crate::{Error, Uuid};

/// Derives a name-based identifier by hashing the namespace bytes followed by
/// the name bytes with the digest algorithm `D`.
///
/// The first sixteen digest bytes become the identifier, with the version
/// nibble and IETF variant bits stamped over the hash output. The same
/// namespace, name, version, and algorithm always produce the same
/// identifier.
///
/// `version` selects the nibble written to the output: `3` and `5` are the
/// standard MD5 and SHA-1 versions, and `8` is for any other algorithm. The
/// function does not check that the algorithm matches the conventional one
/// for the version; [`uuid3`], [`uuid5`], [`uuid8_sha256`], and
/// [`uuid8_sha512`] package up the usual pairings.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] if `version` is not 3, 5, or 8, or
/// [`Error::UnsupportedDigest`] if `D` produces fewer than 16 output bytes.
///
/// # Examples
///
/// ```rust
/// use uuidkit::{name_based_uuid, Uuid};
///
/// let ns: Uuid = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse().unwrap();
/// let e = name_based_uuid::<sha1::Sha1>(ns, "www.example.com".as_bytes(), 5).unwrap();
/// assert_eq!(e.version(), Some(5));
/// ```
pub fn name_based_uuid<D: Digest>(namespace: Uuid, name: &[u8], version: u8) -> Result<Uuid, Error> {
    if !matches!(version, 3 | 5 | 8) {
        return Err(Error::OutOfRange);
    }
    if <D as Digest>::output_size() < 16 {
        return Err(Error::UnsupportedDigest);
    }

    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest.as_ref()[..16]);
    bytes[6] = (version << 4) | (bytes[6] & 0x0f);
    bytes[8] = (bytes[8] & !VARIANT_MASK) | VARIANT_IETF;
    Ok(Uuid::from(bytes))
}

/// Generates a UUIDv3 object from the namespace and name using MD5.
pub fn uuid3(namespace: Uuid, name: &str) -> Uuid {
    name_based_uuid::<Md5>(namespace, name.as_bytes(), 3)
        .expect("MD5 digest is at least 16 bytes")
}

/// Generates a UUIDv5 object from the namespace and name using SHA-1.
pub fn uuid5(namespace: Uuid, name: &str) -> Uuid {
    name_based_uuid::<Sha1>(namespace, name.as_bytes(), 5)
        .expect("SHA-1 digest is at least 16 bytes")
}

/// Generates a UUIDv8 object from the namespace and name using SHA-256.
pub fn uuid8_sha256(namespace: Uuid, name: &str) -> Uuid {
    name_based_uuid::<Sha256>(namespace, name.as_bytes(), 8)
        .expect("SHA-256 digest is at least 16 bytes")
}

/// Generates a UUIDv8 object from the namespace and name using SHA-512.
pub fn uuid8_sha512(namespace: Uuid, name: &str) -> Uuid {
    name_based_uuid::<Sha512>(namespace, name.as_bytes(), 8)
        .expect("SHA-512 digest is at least 16 bytes")
}
