//! Arithmetic on the trailing four bytes of an identifier.
//!
//! The last four bytes are treated as a big-endian 32-bit counter that wraps
//! on overflow, leaving the first twelve bytes untouched. Useful for deriving
//! families of related identifiers from a common base and for recovering the
//! distance between two members of such a family.

use crate::{Error, Uuid};

fn tail(uuid: &Uuid) -> u32 {
    let b = uuid.as_bytes();
    u32::from_be_bytes([b[12], b[13], b[14], b[15]])
}

impl Uuid {
    /// Adds `delta` to the trailing four bytes, wrapping on overflow.
    ///
    /// Negative deltas subtract; `x.increment(d).increment(-d)` always
    /// restores `x` when `d > i32::MIN`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuidkit::Uuid;
    ///
    /// let base: Uuid = "01918d8d-60a7-7b77-af4a-98d3df112d66".parse()?;
    /// let next = base.increment(1);
    /// assert_eq!(next.to_string(), "01918d8d-60a7-7b77-af4a-98d3df112d67");
    /// assert_eq!(next.recover_increment(&base), Ok(1));
    /// # Ok::<(), uuidkit::Error>(())
    /// ```
    pub fn increment(&self, delta: i32) -> Uuid {
        let mut bytes = *self.as_bytes();
        let tail = tail(self).wrapping_add(delta as u32);
        bytes[12..].copy_from_slice(&tail.to_be_bytes());
        Uuid::from(bytes)
    }

    /// Recovers the delta that [`increment`](Uuid::increment) applied to
    /// `base` to produce `self`, interpreting the wrapped distance as a
    /// signed offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`] if the two identifiers differ in
    /// their first twelve bytes.
    pub fn recover_increment(&self, base: &Uuid) -> Result<i32, Error> {
        if self.as_bytes()[..12] != base.as_bytes()[..12] {
            return Err(Error::ArgumentMismatch);
        }
        Ok(tail(self).wrapping_sub(tail(base)) as i32)
    }
}

#[cfg(test)]
mod tests {
    use crate::{uuid4, Error, Uuid};

    /// Recovers the applied delta for any base
    #[test]
    fn recovers_the_applied_delta_for_any_base() {
        for base in [uuid4(), uuid4(), Uuid::NIL, Uuid::MAX] {
            for delta in [i32::MIN, -420_000, -1, 0, 1, 42, i32::MAX] {
                let derived = base.increment(delta);
                assert_eq!(derived.as_bytes()[..12], base.as_bytes()[..12]);
                assert_eq!(derived.recover_increment(&base), Ok(delta));
            }
        }
    }

    /// Restores the base when the delta is applied in reverse
    #[test]
    fn restores_the_base_when_the_delta_is_applied_in_reverse() {
        let base = uuid4();
        for delta in [-420_000, -1, 0, 1, 42, i32::MAX] {
            assert_eq!(base.increment(delta).increment(-delta), base);
        }
    }

    /// Wraps the trailing bytes on overflow
    #[test]
    fn wraps_the_trailing_bytes_on_overflow() {
        let x = Uuid::MAX.increment(1);
        assert_eq!(x.as_bytes()[12..], [0, 0, 0, 0]);
        assert_eq!(x.as_bytes()[..12], [0xff; 12]);
        assert_eq!(x.increment(-1), Uuid::MAX);
    }

    /// Rejects recovery from identifiers with different bases
    #[test]
    fn rejects_recovery_from_identifiers_with_different_bases() {
        let a = uuid4();
        let b = uuid4();
        assert_eq!(a.recover_increment(&b), Err(Error::ArgumentMismatch));
        assert_eq!(
            Uuid::NIL.recover_increment(&Uuid::MAX),
            Err(Error::ArgumentMismatch)
        );
    }
}
