use borsh::{BorshDeserialize, BorshSerialize};

use crate::state::{AccountId, UnixTimestamp, VrfHash};

/// Lifecycle events appended by the ledger and drained by the wrapping
/// layer, which relays them to clients or an off-chain worker.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum RaffleEvent {
    OrganizerRegistered {
        organizer: AccountId,
        token: AccountId,
        stake: u128,
    },
    OrganizerUnregistered {
        organizer: AccountId,
        token: AccountId,
        stake: u128,
    },
    OrganizerSlashed {
        organizer: AccountId,
        token: AccountId,
        amount: u128,
        reason: String,
    },
    RaffleCreated {
        raffle_id: u64,
        organizer: AccountId,
        token: AccountId,
        ticket_price: u128,
        max_tickets: u64,
        start_time: UnixTimestamp,
        end_time: UnixTimestamp,
    },
    TicketsPurchased {
        raffle_id: u64,
        buyer: AccountId,
        count: u64,
        total_tickets: u64,
    },
    RaffleCancelled {
        raffle_id: u64,
        by: AccountId,
        reason: String,
    },
    RaffleForceExpired {
        raffle_id: u64,
        by: AccountId,
    },
    WinnerDrawn {
        raffle_id: u64,
        winner: AccountId,
        winning_ticket: u64,
        winner_amount: u128,
        platform_fee: u128,
        organizer_fee: u128,
        vrf_hash: VrfHash,
    },
    RefundIssued {
        raffle_id: u64,
        to: AccountId,
        amount: u128,
    },
    TokenListed {
        token: AccountId,
        allowed: bool,
        decimals: u8,
    },
    ChangeQueued {
        change_id: u64,
        queued_at: UnixTimestamp,
    },
    ChangeExecuted {
        change_id: u64,
    },
    ChangeCancelled {
        change_id: u64,
    },
    AgentPauseSet {
        paused: bool,
    },
    EmergencyWithdrawal {
        token: AccountId,
        amount: u128,
    },
}
