use thiserror::Error;

/// Errors returned by the token port when a pull or push cannot complete.
///
/// Any token failure aborts the whole enclosing ledger operation with no
/// partial state change.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Account balance is too small for the transfer
    #[error("Insufficient token balance")]
    InsufficientBalance,

    /// The ledger was not approved for this amount
    #[error("Insufficient token allowance")]
    InsufficientAllowance,
}

/// Errors that may be returned by the raffle ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// Treasury must be a real account
    #[error("Invalid treasury")]
    InvalidTreasury,

    /// Token is not on the whitelist
    #[error("Token not allowed")]
    TokenNotAllowed,

    /// Caller already holds a stake for this token
    #[error("Already staked for this token")]
    AlreadyStaked,

    /// No stake entry exists to withdraw or slash
    #[error("No stake for this token")]
    NoStake,

    /// Caller still has non-terminal raffles in this token
    #[error("Cannot unregister with active raffles for this token")]
    ActiveRafflesForToken,

    /// Caller never registered a stake
    #[error("Not an allowed organizer")]
    NotAllowedOrganizer,

    /// Creation requires a live stake in the raffle's token
    #[error("Must stake in this token first")]
    MustStakeFirst,

    /// Raffle creation is paused
    #[error("Agent is paused")]
    AgentPaused,

    #[error("Price must be > 0")]
    InvalidTicketPrice,

    #[error("Max tickets must be > 0")]
    InvalidMaxTickets,

    #[error("Duration must be > 0")]
    InvalidDuration,

    /// No raffle with this id
    #[error("Raffle does not exist")]
    RaffleNotFound,

    /// Raffle is drawn or cancelled
    #[error("Raffle not active")]
    RaffleNotActive,

    /// Past the raffle's end time
    #[error("Raffle ended")]
    RaffleEnded,

    #[error("Must buy > 0 tickets")]
    ZeroTicketCount,

    #[error("Max 100 tickets per tx")]
    TicketCountTooLarge,

    /// Purchase would exceed the raffle's ticket cap
    #[error("Exceeds max tickets")]
    ExceedsMaxTickets,

    /// Caller is neither the raffle's organizer nor the owner
    #[error("Not authorized")]
    NotAuthorized,

    /// Organizers may only cancel while the raffle is ticketless
    #[error("Cannot cancel: tickets already sold")]
    TicketsAlreadySold,

    /// Force-expiry only opens after end_time + grace period
    #[error("Grace period not over")]
    GracePeriodNotOver,

    /// Refunds require a cancelled raffle
    #[error("Not cancelled")]
    NotCancelled,

    /// Caller holds no tickets for this raffle
    #[error("No tickets")]
    NoTickets,

    /// Draws require at least one sold ticket
    #[error("No tickets sold")]
    NoTicketsSold,

    /// Neither sold out nor past end_time
    #[error("Not ended yet")]
    NotEndedYet,

    /// Ticket index outside [0, total_tickets)
    #[error("Invalid ticket index")]
    InvalidTicketIndex,

    /// Combined fees above the hard ceiling
    #[error("Fees exceed 10% cap")]
    FeesExceedCap,

    /// Change cannot execute before its delay elapses
    #[error("Timelock not expired")]
    TimelockNotExpired,

    /// Change id was never queued, or was already executed/cancelled
    #[error("Change does not exist")]
    ChangeNotFound,

    /// Withdrawal would dip into escrowed prize pools or stakes
    #[error("Amount exceeds withdrawable balance")]
    ExceedsWithdrawableBalance,

    #[error("Arithmetic overflow")]
    Overflow,

    /// A token pull or push failed; the operation was fully rolled back
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type RaffleResult<T> = Result<T, RaffleError>;
