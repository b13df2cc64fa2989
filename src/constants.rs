//! Economic and timing constants for the raffle ledger.

/// Denominator for basis-point fee math (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Default platform fee: 3%.
pub const DEFAULT_PLATFORM_FEE_BPS: u16 = 300;

/// Default organizer fee: 2%.
pub const DEFAULT_ORGANIZER_FEE_BPS: u16 = 200;

/// Hard ceiling on combined platform + organizer fees: 10%.
pub const MAX_TOTAL_FEE_BPS: u16 = 1_000;

/// Per-transaction ticket purchase cap (anti-spam).
pub const MAX_TICKETS_PER_TX: u64 = 100;

/// Extra time after `end_time` during which only the organizer/owner may
/// still draw; afterwards anyone may force-expire the raffle.
pub const GRACE_PERIOD_SECS: i64 = 7 * 86_400;

/// Mandatory delay between queuing and executing an admin change.
pub const TIMELOCK_DELAY_SECS: i64 = 2 * 86_400;

/// Bounded retries when publishing a VRF proof record to the audit log.
pub const MAX_PUBLISH_ATTEMPTS: u32 = 3;

/// Fixed backoff between publish attempts.
pub const PUBLISH_RETRY_DELAY_MS: u64 = 1_000;
