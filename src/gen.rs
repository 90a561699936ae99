//! Monotonic generator for time-ordered identifiers.

use rand::RngCore;

use crate::fields::{self, COUNTER_MAX};
use crate::{Error, Uuid};

/// Selects which time-ordered bit layout [`OrderedGenerator`] stamps.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OrderedLayout {
    /// Version 7: timestamp in bytes 0-5, so identifiers sort by creation
    /// time under plain byte comparison.
    V7,
    /// Version 8 with the vendor layout for SQL Server: timestamp in bytes
    /// 10-15, so identifiers sort by creation time under the engine's
    /// trailing-bytes-first comparison ([`Uuid::mssql_cmp`]).
    V8MsSql,
}

impl OrderedLayout {
    /// Index of the first byte the timestamp stamp overwrites.
    const fn timestamp_offset(self) -> usize {
        match self {
            Self::V7 => 0,
            Self::V8MsSql => 10,
        }
    }
}

/// Counter step used when the sampled random byte is zero, to guarantee
/// forward progress.
const FALLBACK_STEP: u32 = 42;

/// Represents a generator of time-ordered identifiers that encapsulates a
/// counter and guarantees their strictly increasing order even when the
/// system clock does not advance between calls.
///
/// This type provides the interface to customize the random number generator
/// and system clock of a generator. It also helps control the scope of the
/// guaranteed order of the generated identifiers. The following example
/// guarantees the process-wide (cross-thread) monotonicity using Rust's
/// standard synchronization mechanism (the [`uuid7()`](crate::uuid7) and
/// [`uuid8_mssql()`](crate::uuid8_mssql) entry points package this up).
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuidkit::{OrderedGenerator, OrderedLayout};
///
/// let g = sync::Arc::new(sync::Mutex::new(OrderedGenerator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 let e = g.lock().unwrap().generate(OrderedLayout::V7);
///                 println!("{} by thread {}", e, i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Clock handling
///
/// The generator keeps the timestamp and counter of the identifier it issued
/// last. When the clock reading does not exceed that timestamp (stalled or
/// rewound clock), the previous timestamp is reused and the counter is
/// bumped by a random positive step, so ordering never breaks; when the
/// counter would overflow its 26-bit field, the pinned timestamp is advanced
/// by one millisecond instead and the counter is reseeded. Either way the
/// recorded timestamp may run ahead of the real-time clock until the clock
/// catches up.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct OrderedGenerator<R> {
    prev_ts: Option<i64>,
    counter: u32,

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> OrderedGenerator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self {
            prev_ts: None,
            counter: 0,
            rng,
        }
    }

    /// Generates a new identifier in the given layout from the current
    /// system time.
    pub fn generate(&mut self, layout: OrderedLayout) -> Uuid {
        use std::time;
        let unix_ts_ms = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as i64;
        self.generate_core(layout, unix_ts_ms)
            .expect("fresh buffer satisfies the layout preconditions")
    }

    /// Generates a new identifier in the given layout from the `unix_ts_ms`
    /// passed.
    ///
    /// The returned identifier compares strictly greater than every earlier
    /// one from this generator, in canonical byte order for
    /// [`V7`](OrderedLayout::V7) and under [`Uuid::mssql_cmp`] for
    /// [`V8MsSql`](OrderedLayout::V8MsSql), regardless of the timestamps
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimestampRange`] if `unix_ts_ms` is negative or does
    /// not fit the 48-bit timestamp field.
    pub fn generate_core(&mut self, layout: OrderedLayout, unix_ts_ms: i64) -> Result<Uuid, Error> {
        if unix_ts_ms < 0 || unix_ts_ms >= 1 << 48 {
            return Err(Error::TimestampRange);
        }

        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[8] = 0x80 | (bytes[8] >> 2);

        // work on copies so a failed stamp leaves the generator state intact
        let mut now = unix_ts_ms;
        let mut counter = self.counter;
        let mut write_counter = false;
        match self.prev_ts {
            Some(prev) if unix_ts_ms <= prev => {
                now = prev;

                // spend one of the random bytes the timestamp stamp is about
                // to overwrite as the counter step
                let step = bytes[layout.timestamp_offset()] as u32;
                counter += if step == 0 { FALLBACK_STEP } else { step };

                if counter > COUNTER_MAX {
                    // advance the pinned timestamp and let the stamp reseed
                    // the counter from the random filler
                    now += 1;
                    if now >= 1 << 48 {
                        return Err(Error::TimestampRange);
                    }
                    log::debug!("counter overflow; pinned timestamp advanced to {}", now);
                } else {
                    write_counter = true;
                }
            }
            _ => {}
        }

        match layout {
            OrderedLayout::V7 => fields::stamp_v7(&mut bytes, now, &mut counter, write_counter)?,
            OrderedLayout::V8MsSql => {
                fields::stamp_v8_mssql(&mut bytes, now, &mut counter, write_counter)?
            }
        }

        self.prev_ts = Some(now);
        self.counter = counter;
        Ok(Uuid::from(bytes))
    }

    /// Generates a new UUIDv4 object utilizing the random number generator
    /// inside.
    pub(crate) fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] >> 4);
        bytes[8] = 0x80 | (bytes[8] >> 2);
        Uuid::from(bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{OrderedGenerator, OrderedLayout};
    use crate::fields::COUNTER_MAX;
    use crate::Error;

    type ThreadGen = OrderedGenerator<rand::rngs::ThreadRng>;

    /// Generates increasing v7 identifiers even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_v7_identifiers_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89abi64;
        let mut g: ThreadGen = Default::default();
        let mut prev = g.generate_core(OrderedLayout::V7, ts).unwrap();
        assert_eq!(prev.as_bytes()[..6], ts.to_be_bytes()[2..]);
        for i in 0..100_000i64 {
            let curr = g.generate_core(OrderedLayout::V7, ts - i.min(4_000)).unwrap();
            assert!(prev < curr);
            prev = curr;
        }
        assert!(prev.as_bytes()[..6] >= ts.to_be_bytes()[2..]);
    }

    /// Generates increasing v8-MsSql identifiers even with decreasing or constant timestamp
    #[test]
    fn generates_increasing_v8_mssql_identifiers_even_with_decreasing_or_constant_timestamp() {
        let ts = 0x0123_4567_89abi64;
        let mut g: ThreadGen = Default::default();
        let mut prev = g.generate_core(OrderedLayout::V8MsSql, ts).unwrap();
        assert_eq!(prev.as_bytes()[10..], ts.to_be_bytes()[2..]);
        for i in 0..100_000i64 {
            let curr = g
                .generate_core(OrderedLayout::V8MsSql, ts - i.min(4_000))
                .unwrap();
            assert_eq!(prev.mssql_cmp(&curr), Ordering::Less);
            assert!(prev.to_version7().unwrap() < curr.to_version7().unwrap());
            prev = curr;
        }
        assert!(prev.as_bytes()[10..] >= ts.to_be_bytes()[2..]);
    }

    /// Keeps strict order when interleaving both layouts
    #[test]
    fn keeps_strict_order_when_interleaving_both_layouts() {
        let ts = 0x0123_4567_89abi64;
        let mut g: ThreadGen = Default::default();
        let mut prev = g.generate_core(OrderedLayout::V7, ts).unwrap();
        for i in 1..10_000i64 {
            let curr = if i % 2 == 0 {
                g.generate_core(OrderedLayout::V7, ts).unwrap()
            } else {
                let v8 = g.generate_core(OrderedLayout::V8MsSql, ts).unwrap();
                v8.to_version7().unwrap()
            };
            assert!(prev < curr);
            prev = curr;
        }
    }

    /// Advances the pinned timestamp at counter overflow
    #[test]
    fn advances_the_pinned_timestamp_at_counter_overflow() {
        let ts = 0x0123_4567_89abi64;
        let mut g: ThreadGen = Default::default();
        let prev = g.generate_core(OrderedLayout::V7, ts).unwrap();
        g.counter = COUNTER_MAX;

        let curr = g.generate_core(OrderedLayout::V7, ts).unwrap();
        assert!(prev < curr);
        assert_eq!(curr.as_bytes()[..6], (ts + 1).to_be_bytes()[2..]);
        assert_eq!(g.prev_ts, Some(ts + 1));
        assert!(g.counter <= COUNTER_MAX);
    }

    /// Uses the fixed fallback step when the sampled byte is zero
    #[test]
    fn uses_the_fixed_fallback_step_when_the_sampled_byte_is_zero() {
        // an all-zero rng pins the sampled step byte at zero
        struct ZeroRng;
        impl rand::RngCore for ZeroRng {
            fn next_u32(&mut self) -> u32 {
                0
            }
            fn next_u64(&mut self) -> u64 {
                0
            }
            fn fill_bytes(&mut self, dest: &mut [u8]) {
                dest.fill(0);
            }
            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
                dest.fill(0);
                Ok(())
            }
        }

        let ts = 42i64;
        let mut g = OrderedGenerator::new(ZeroRng);
        g.generate_core(OrderedLayout::V7, ts).unwrap();
        assert_eq!(g.counter, 0);

        let e = g.generate_core(OrderedLayout::V7, ts).unwrap();
        assert_eq!(g.counter, super::FALLBACK_STEP);
        assert_eq!(e.unix_fields().unwrap().unix_ts_ms, ts);
    }

    /// Keeps its state intact when overflow would push the pinned timestamp past the 48-bit field
    #[test]
    fn keeps_its_state_intact_when_overflow_would_push_the_pinned_timestamp_past_the_48_bit_field() {
        let ceiling = (1i64 << 48) - 1;
        let mut g: ThreadGen = Default::default();
        g.generate_core(OrderedLayout::V7, ceiling).unwrap();
        assert_eq!(g.prev_ts, Some(ceiling));

        // the advanced timestamp would not fit the field, so the call must
        // fail without recording it
        g.counter = COUNTER_MAX;
        for _ in 0..3 {
            assert_eq!(
                g.generate_core(OrderedLayout::V7, ceiling),
                Err(Error::TimestampRange)
            );
            assert_eq!(g.prev_ts, Some(ceiling));
            assert_eq!(g.counter, COUNTER_MAX);
        }
    }

    /// Rejects timestamps outside the 48-bit field
    #[test]
    fn rejects_timestamps_outside_the_48_bit_field() {
        let mut g: ThreadGen = Default::default();
        assert_eq!(
            g.generate_core(OrderedLayout::V7, -1),
            Err(Error::TimestampRange)
        );
        assert_eq!(
            g.generate_core(OrderedLayout::V8MsSql, 1 << 48),
            Err(Error::TimestampRange)
        );
        assert_eq!(g.prev_ts, None);
    }

    /// Stamps correct variant and version bits for both layouts
    #[test]
    fn stamps_correct_variant_and_version_bits_for_both_layouts() {
        let mut g: ThreadGen = Default::default();
        for _ in 0..1_000 {
            let v7 = g.generate(OrderedLayout::V7);
            assert_eq!(v7.variant(), crate::Variant::Ietf);
            assert_eq!(v7.version(), Some(7));

            let v8 = g.generate(OrderedLayout::V8MsSql);
            assert_eq!(v8.variant(), crate::Variant::Ietf);
            assert_eq!(v8.version(), Some(8));
        }
    }
}
