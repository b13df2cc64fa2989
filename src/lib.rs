// Agent Raffle: escrowed token raffle platform
// Organizers stake a bond to create raffles, participants buy numbered
// tickets with a whitelisted fungible token, and an externally supplied
// verifiable-random number settles each pool in a single draw.

// Core modules
pub mod constants;
pub mod error;
pub mod events;
pub mod ledger;
pub mod state;
pub mod token;

// VRF module for randomness
pub mod vrf;

pub use error::{RaffleError, RaffleResult, TokenError};
pub use events::RaffleEvent;
pub use ledger::{DrawOutcome, Ledger};
pub use state::{AccountId, ChangeAction, PendingChange, Raffle, TokenInfo, UnixTimestamp};
pub use token::{InMemoryTokens, TokenTransfer};
