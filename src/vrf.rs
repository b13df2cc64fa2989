//! Randomness handling for raffle draws.
//!
//! The randomness itself comes from an external oracle as a 256-bit number
//! plus an opaque commitment hash. The ledger performs no proof
//! verification; it reduces the number to a ticket index and records the
//! hash for audit. After a draw commits, the full proof record may be
//! published to a public message log; that step is best-effort and never
//! unwinds the draw.

use std::thread;
use std::time::Duration;

use borsh::{BorshDeserialize, BorshSerialize};
use log::{error, info, warn};

use crate::constants::{MAX_PUBLISH_ATTEMPTS, PUBLISH_RETRY_DELAY_MS};
use crate::state::{RandomSeed, UnixTimestamp, VrfHash};

/// Reduce a 256-bit big-endian random number modulo `total_tickets`.
///
/// The reduction runs over the full width so every sold ticket keeps an
/// equal probability even when the random number far exceeds `u64`.
pub fn winning_ticket(random: &RandomSeed, total_tickets: u64) -> u64 {
    if total_tickets == 0 {
        return 0;
    }
    let modulus = total_tickets as u128;
    let mut rem: u128 = 0;
    for byte in random {
        rem = (rem << 8 | *byte as u128) % modulus;
    }
    rem as u64
}

/// Widen a small random number into the oracle's 256-bit representation.
pub fn seed_from_u64(value: u64) -> RandomSeed {
    let mut seed = [0u8; 32];
    seed[24..].copy_from_slice(&value.to_be_bytes());
    seed
}

/// The oracle's full proof record, published for external auditability.
///
/// Mirrors what the oracle committed to: the entropy-source block hash, the
/// per-raffle nonce, the combined random number, and the commitment stored
/// by the ledger at draw time.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VrfProofRecord {
    pub raffle_id: u64,
    pub timestamp: UnixTimestamp,
    pub block_hash: [u8; 32],
    pub nonce: String,
    pub random_number: RandomSeed,
    pub commitment: VrfHash,
}

/// Transport to the public, content-addressed audit log.
pub trait ProofPublisher {
    /// Returns the content address of the published record.
    fn publish(&mut self, record: &VrfProofRecord) -> Result<String, String>;
}

/// Publish a proof record with bounded retries and fixed backoff.
///
/// Call after the draw has committed. On exhaustion the failure is logged
/// and dropped; the draw's correctness does not depend on publication.
pub fn publish_proof(publisher: &mut dyn ProofPublisher, record: &VrfProofRecord) -> Option<String> {
    for attempt in 1..=MAX_PUBLISH_ATTEMPTS {
        match publisher.publish(record) {
            Ok(address) => {
                info!(
                    "vrf proof for raffle {} published at {} (attempt {})",
                    record.raffle_id, address, attempt
                );
                return Some(address);
            }
            Err(err) => {
                warn!(
                    "vrf proof publish failed for raffle {} (attempt {}/{}): {}",
                    record.raffle_id, attempt, MAX_PUBLISH_ATTEMPTS, err
                );
                if attempt < MAX_PUBLISH_ATTEMPTS {
                    thread::sleep(Duration::from_millis(PUBLISH_RETRY_DELAY_MS));
                }
            }
        }
    }
    error!(
        "all {} vrf proof publish attempts failed for raffle {}",
        MAX_PUBLISH_ATTEMPTS, record.raffle_id
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_reduce_directly() {
        assert_eq!(winning_ticket(&seed_from_u64(7), 10), 7);
        assert_eq!(winning_ticket(&seed_from_u64(42), 10), 2);
        assert_eq!(winning_ticket(&seed_from_u64(999), 1), 0);
    }

    #[test]
    fn zero_tickets_is_guarded() {
        assert_eq!(winning_ticket(&seed_from_u64(123), 0), 0);
    }

    #[test]
    fn full_width_reduction_matches_max_u256() {
        // 2^256 - 1 mod 10 == 5
        let max = [0xffu8; 32];
        assert_eq!(winning_ticket(&max, 10), 5);
        // and mod 1 is always 0
        assert_eq!(winning_ticket(&max, 1), 0);
    }

    #[test]
    fn high_bytes_change_the_outcome() {
        let mut seed = seed_from_u64(7);
        seed[0] = 1; // 2^248 + 7
        assert_ne!(winning_ticket(&seed, 10), winning_ticket(&seed_from_u64(7), 10));
        // 2^248 mod 10 = 6, so 2^248 + 7 mod 10 = 3
        assert_eq!(winning_ticket(&seed, 10), 3);
    }

    struct FlakyPublisher {
        failures_left: u32,
        calls: u32,
    }

    impl ProofPublisher for FlakyPublisher {
        fn publish(&mut self, _record: &VrfProofRecord) -> Result<String, String> {
            self.calls += 1;
            if self.failures_left > 0 {
                self.failures_left -= 1;
                Err("connection reset".into())
            } else {
                Ok(format!("addr-{}", self.calls))
            }
        }
    }

    fn record() -> VrfProofRecord {
        VrfProofRecord {
            raffle_id: 0,
            timestamp: 1_700_000_000,
            block_hash: [9u8; 32],
            nonce: "raffle-0-1700000000".into(),
            random_number: seed_from_u64(7),
            commitment: [1u8; 32],
        }
    }

    #[test]
    fn publish_retries_then_succeeds() {
        let mut publisher = FlakyPublisher {
            failures_left: 2,
            calls: 0,
        };
        let address = publish_proof(&mut publisher, &record());
        assert_eq!(address.as_deref(), Some("addr-3"));
        assert_eq!(publisher.calls, 3);
    }

    #[test]
    fn publish_gives_up_after_bounded_attempts() {
        let mut publisher = FlakyPublisher {
            failures_left: 10,
            calls: 0,
        };
        assert_eq!(publish_proof(&mut publisher, &record()), None);
        assert_eq!(publisher.calls, MAX_PUBLISH_ATTEMPTS);
    }
}
