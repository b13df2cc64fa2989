use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use borsh::{BorshDeserialize, BorshSerialize};

/// Seconds since the Unix epoch.
pub type UnixTimestamp = i64;

/// The oracle's 256-bit random number, big-endian.
pub type RandomSeed = [u8; 32];

/// Opaque 32-byte commitment over the oracle's proof record.
pub type VrfHash = [u8; 32];

/// 32-byte opaque account identity (caller, token, treasury).
///
/// The ledger never interprets the bytes; it only compares and maps them.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// The null identity; rejected wherever a real account is required.
    pub const ZERO: AccountId = AccountId([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        AccountId(bytes)
    }

    /// A process-unique identity, for tests and examples.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        AccountId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Whitelist entry for a payment token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TokenInfo {
    /// Whether the token is currently accepted for stakes and raffles
    pub allowed: bool,
    /// Declared decimal precision; the stake bond is 10^decimals
    pub decimals: u8,
}

/// A single raffle round.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Raffle {
    /// Sequential id, assigned at creation (0-indexed)
    pub id: u64,
    /// Identity that created the raffle; may cancel while ticketless and draw
    pub organizer: AccountId,
    /// Fungible token accepted for this raffle, fixed at creation
    pub payment_token: AccountId,
    /// Price per ticket in the token's smallest unit
    pub ticket_price: u128,
    /// Cap on tickets sellable
    pub max_tickets: u64,
    /// Tickets sold so far
    pub total_tickets: u64,
    /// Creation timestamp
    pub start_time: UnixTimestamp,
    /// Creation timestamp plus duration
    pub end_time: UnixTimestamp,
    pub is_active: bool,
    pub is_drawn: bool,
    pub is_cancelled: bool,
    /// Winning identity, populated by a successful draw
    pub winner: Option<AccountId>,
    /// Winning ticket index, populated by a successful draw
    pub winning_ticket: Option<u64>,
    /// Pooled ticket proceeds, `ticket_price * total_tickets` while active
    pub total_prize: u128,
    /// Dense owner-per-index vector; `ticket_owners[i]` bought ticket `i`
    pub ticket_owners: Vec<AccountId>,
    /// Per-buyer ticket counts; zeroed individually by refunds
    pub participant_tickets: BTreeMap<AccountId, u64>,
}

impl Raffle {
    /// Drawn or cancelled. Terminal raffles never transition again.
    pub fn is_terminal(&self) -> bool {
        self.is_drawn || self.is_cancelled
    }

    pub fn is_sold_out(&self) -> bool {
        self.total_tickets == self.max_tickets
    }

    /// Token amount still refundable to ticket holders on this raffle.
    /// Nonzero only between cancellation and the last refund.
    pub fn refundable(&self) -> u128 {
        let tickets: u64 = self.participant_tickets.values().sum();
        self.ticket_price * tickets as u128
    }
}

/// The mutation a queued admin change will apply once its timelock expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ChangeAction {
    SetFees {
        platform_fee_bps: u16,
        organizer_fee_bps: u16,
    },
    SetTreasury {
        treasury: AccountId,
    },
}

/// A pending timelocked admin change, deleted on execution or cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PendingChange {
    pub action: ChangeAction,
    pub queued_at: UnixTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_is_hex() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0xab;
        let id = AccountId::new(bytes);
        assert_eq!(id.to_string().len(), 64);
        assert!(id.to_string().ends_with("ab"));
    }

    #[test]
    fn unique_ids_differ() {
        assert_ne!(AccountId::new_unique(), AccountId::new_unique());
    }
}
