use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};
use log::{info, warn};

use crate::constants::{
    BPS_DENOMINATOR, DEFAULT_ORGANIZER_FEE_BPS, DEFAULT_PLATFORM_FEE_BPS, GRACE_PERIOD_SECS,
    MAX_TICKETS_PER_TX, MAX_TOTAL_FEE_BPS, TIMELOCK_DELAY_SECS,
};
use crate::error::{RaffleError, RaffleResult};
use crate::events::RaffleEvent;
use crate::state::{
    AccountId, ChangeAction, PendingChange, Raffle, RandomSeed, TokenInfo, UnixTimestamp, VrfHash,
};
use crate::token::TokenTransfer;
use crate::vrf;

/// Settlement summary returned by a successful draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub winner: AccountId,
    pub winning_ticket: u64,
    pub winner_amount: u128,
    pub platform_fee: u128,
    pub organizer_fee: u128,
}

/// The raffle ledger: one aggregate owning every raffle record, organizer
/// stake, pending admin change, and the custody obligations behind them.
///
/// The ledger is passive. Every operation takes the caller's identity (and,
/// where time matters, `now`) explicitly; authorization is a predicate over
/// those arguments, never ambient context. Fund movement goes through the
/// injected [`TokenTransfer`] port and happens before the corresponding
/// state mutation, so a failed transfer leaves the ledger untouched.
#[derive(Debug, BorshSerialize, BorshDeserialize)]
pub struct Ledger {
    /// Deploying identity: emergency cancel, slashing, timelocked changes
    owner: AccountId,
    /// Recipient of platform fees and slashed stakes
    treasury: AccountId,
    platform_fee_bps: u16,
    organizer_fee_bps: u16,
    /// Kill switch for raffle creation only
    paused: bool,
    /// Raffle id == index; ids are sequential and never reused
    raffles: Vec<Raffle>,
    allowed_tokens: BTreeMap<AccountId, TokenInfo>,
    /// One-way admission gate; never cleared by unregistration
    allowed_organizers: BTreeSet<AccountId>,
    /// Escrowed bond per (organizer, token)
    organizer_stakes: BTreeMap<(AccountId, AccountId), u128>,
    pending_changes: BTreeMap<u64, PendingChange>,
    change_counter: u64,
    /// Commitment hash per drawn raffle, kept permanently for audit
    vrf_hashes: BTreeMap<u64, VrfHash>,
    events: Vec<RaffleEvent>,
}

impl Ledger {
    pub fn new(owner: AccountId, treasury: AccountId) -> RaffleResult<Self> {
        if treasury == AccountId::ZERO {
            return Err(RaffleError::InvalidTreasury);
        }
        let mut allowed_organizers = BTreeSet::new();
        allowed_organizers.insert(owner);
        Ok(Ledger {
            owner,
            treasury,
            platform_fee_bps: DEFAULT_PLATFORM_FEE_BPS,
            organizer_fee_bps: DEFAULT_ORGANIZER_FEE_BPS,
            paused: false,
            raffles: Vec::new(),
            allowed_tokens: BTreeMap::new(),
            allowed_organizers,
            organizer_stakes: BTreeMap::new(),
            pending_changes: BTreeMap::new(),
            change_counter: 0,
            vrf_hashes: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    // ---- organizer registry & staking ----

    /// Whitelist (or delist) a payment token. Owner-only and immediate;
    /// `decimals` fixes the stake bond at one whole token.
    pub fn set_allowed_token(
        &mut self,
        caller: &AccountId,
        token: &AccountId,
        allowed: bool,
        decimals: u8,
    ) -> RaffleResult<()> {
        self.ensure_owner(caller)?;
        self.allowed_tokens
            .insert(*token, TokenInfo { allowed, decimals });
        self.events.push(RaffleEvent::TokenListed {
            token: *token,
            allowed,
            decimals,
        });
        Ok(())
    }

    /// Stake one whole token as a bond and gain the right to create raffles
    /// denominated in it. The allowed-organizer flag this sets is permanent.
    pub fn register_as_organizer(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        token: &AccountId,
    ) -> RaffleResult<u128> {
        let token_info = self
            .allowed_tokens
            .get(token)
            .filter(|info| info.allowed)
            .ok_or(RaffleError::TokenNotAllowed)?;
        if self.organizer_stakes.contains_key(&(*caller, *token)) {
            return Err(RaffleError::AlreadyStaked);
        }

        let stake = 10u128
            .checked_pow(token_info.decimals as u32)
            .ok_or(RaffleError::Overflow)?;
        tokens.pull(token, caller, stake)?;

        self.organizer_stakes.insert((*caller, *token), stake);
        self.allowed_organizers.insert(*caller);
        self.events.push(RaffleEvent::OrganizerRegistered {
            organizer: *caller,
            token: *token,
            stake,
        });
        info!("organizer {caller} registered for token {token} with stake {stake}");
        Ok(stake)
    }

    /// Return the full bond, permitted only once every raffle the caller
    /// created in this token has reached a terminal state.
    pub fn unregister_as_organizer(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        token: &AccountId,
    ) -> RaffleResult<u128> {
        let stake = *self
            .organizer_stakes
            .get(&(*caller, *token))
            .ok_or(RaffleError::NoStake)?;
        let has_open_raffles = self
            .raffles
            .iter()
            .any(|r| r.organizer == *caller && r.payment_token == *token && !r.is_terminal());
        if has_open_raffles {
            return Err(RaffleError::ActiveRafflesForToken);
        }

        tokens.push(token, caller, stake)?;
        self.organizer_stakes.remove(&(*caller, *token));
        self.events.push(RaffleEvent::OrganizerUnregistered {
            organizer: *caller,
            token: *token,
            stake,
        });
        info!("organizer {caller} unregistered for token {token}, stake {stake} returned");
        Ok(stake)
    }

    // ---- raffle lifecycle & ticketing ----

    /// Create a raffle. Requires the permanent organizer flag, a live stake
    /// in the payment token, and the creation pipeline not being paused.
    pub fn create_raffle(
        &mut self,
        caller: &AccountId,
        token: &AccountId,
        ticket_price: u128,
        max_tickets: u64,
        duration_secs: u64,
        now: UnixTimestamp,
    ) -> RaffleResult<u64> {
        if self.paused {
            return Err(RaffleError::AgentPaused);
        }
        if !self.allowed_organizers.contains(caller) {
            return Err(RaffleError::NotAllowedOrganizer);
        }
        if !self.organizer_stakes.contains_key(&(*caller, *token)) {
            return Err(RaffleError::MustStakeFirst);
        }
        if ticket_price == 0 {
            return Err(RaffleError::InvalidTicketPrice);
        }
        if max_tickets == 0 {
            return Err(RaffleError::InvalidMaxTickets);
        }
        if duration_secs == 0 {
            return Err(RaffleError::InvalidDuration);
        }

        let duration = i64::try_from(duration_secs).map_err(|_| RaffleError::Overflow)?;
        let end_time = now.checked_add(duration).ok_or(RaffleError::Overflow)?;

        let id = self.raffles.len() as u64;
        self.raffles.push(Raffle {
            id,
            organizer: *caller,
            payment_token: *token,
            ticket_price,
            max_tickets,
            total_tickets: 0,
            start_time: now,
            end_time,
            is_active: true,
            is_drawn: false,
            is_cancelled: false,
            winner: None,
            winning_ticket: None,
            total_prize: 0,
            ticket_owners: Vec::new(),
            participant_tickets: BTreeMap::new(),
        });
        self.events.push(RaffleEvent::RaffleCreated {
            raffle_id: id,
            organizer: *caller,
            token: *token,
            ticket_price,
            max_tickets,
            start_time: now,
            end_time,
        });
        info!("raffle {id} created by {caller}: {max_tickets} tickets at {ticket_price}, ends {end_time}");
        Ok(id)
    }

    /// Buy `count` tickets, pulling `ticket_price * count` from the buyer.
    /// Tickets occupy the next contiguous index range in purchase order.
    pub fn purchase_tickets(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        raffle_id: u64,
        count: u64,
        now: UnixTimestamp,
    ) -> RaffleResult<()> {
        let raffle = self
            .raffles
            .get(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)?;
        if !raffle.is_active {
            return Err(RaffleError::RaffleNotActive);
        }
        if now >= raffle.end_time {
            return Err(RaffleError::RaffleEnded);
        }
        if count == 0 {
            return Err(RaffleError::ZeroTicketCount);
        }
        if count > MAX_TICKETS_PER_TX {
            return Err(RaffleError::TicketCountTooLarge);
        }
        let new_total = raffle
            .total_tickets
            .checked_add(count)
            .ok_or(RaffleError::Overflow)?;
        if new_total > raffle.max_tickets {
            return Err(RaffleError::ExceedsMaxTickets);
        }
        let cost = raffle
            .ticket_price
            .checked_mul(count as u128)
            .ok_or(RaffleError::Overflow)?;
        let new_prize = raffle
            .total_prize
            .checked_add(cost)
            .ok_or(RaffleError::Overflow)?;

        // Pull first: a failed transfer must not touch ticket accounting.
        tokens.pull(&raffle.payment_token, caller, cost)?;

        let raffle = &mut self.raffles[raffle_id as usize];
        raffle
            .ticket_owners
            .extend(std::iter::repeat(*caller).take(count as usize));
        raffle.total_tickets = new_total;
        raffle.total_prize = new_prize;
        *raffle.participant_tickets.entry(*caller).or_default() += count;

        self.events.push(RaffleEvent::TicketsPurchased {
            raffle_id,
            buyer: *caller,
            count,
            total_tickets: new_total,
        });
        info!("raffle {raffle_id}: {caller} bought {count} tickets ({new_total} total, pool {cost} richer)");
        Ok(())
    }

    /// Cancel a raffle. Organizers may cancel only while no tickets are
    /// sold; the owner may cancel unconditionally before a draw.
    pub fn cancel_raffle(
        &mut self,
        caller: &AccountId,
        raffle_id: u64,
        reason: &str,
    ) -> RaffleResult<()> {
        let raffle = self
            .raffles
            .get_mut(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)?;
        if !raffle.is_active {
            return Err(RaffleError::RaffleNotActive);
        }
        let is_owner = *caller == self.owner;
        if !is_owner && *caller != raffle.organizer {
            return Err(RaffleError::NotAuthorized);
        }
        if !is_owner && raffle.total_tickets > 0 {
            return Err(RaffleError::TicketsAlreadySold);
        }

        raffle.is_cancelled = true;
        raffle.is_active = false;
        self.events.push(RaffleEvent::RaffleCancelled {
            raffle_id,
            by: *caller,
            reason: reason.to_string(),
        });
        warn!("raffle {raffle_id} cancelled by {caller}: {reason}");
        Ok(())
    }

    /// Permissionless fallback when an organizer abandons a raffle: anyone
    /// may cancel once the grace period past `end_time` has elapsed, which
    /// opens the refund path and keeps funds from being locked forever.
    pub fn force_expire_raffle(
        &mut self,
        caller: &AccountId,
        raffle_id: u64,
        now: UnixTimestamp,
    ) -> RaffleResult<()> {
        let raffle = self
            .raffles
            .get_mut(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)?;
        if !raffle.is_active {
            return Err(RaffleError::RaffleNotActive);
        }
        let deadline = raffle
            .end_time
            .checked_add(GRACE_PERIOD_SECS)
            .ok_or(RaffleError::Overflow)?;
        if now < deadline {
            return Err(RaffleError::GracePeriodNotOver);
        }

        raffle.is_cancelled = true;
        raffle.is_active = false;
        self.events.push(RaffleEvent::RaffleForceExpired {
            raffle_id,
            by: *caller,
        });
        warn!("raffle {raffle_id} force-expired by {caller}");
        Ok(())
    }

    /// Refund the caller's tickets at face value on a cancelled raffle.
    /// The fee split never applies on the cancellation path.
    pub fn emergency_refund(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        raffle_id: u64,
    ) -> RaffleResult<u128> {
        let raffle = self
            .raffles
            .get(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)?;
        if !raffle.is_cancelled {
            return Err(RaffleError::NotCancelled);
        }
        let held = raffle
            .participant_tickets
            .get(caller)
            .copied()
            .unwrap_or(0);
        if held == 0 {
            return Err(RaffleError::NoTickets);
        }
        let amount = raffle
            .ticket_price
            .checked_mul(held as u128)
            .ok_or(RaffleError::Overflow)?;

        tokens.push(&raffle.payment_token, caller, amount)?;

        // Zeroing the count is what makes a second refund fail.
        self.raffles[raffle_id as usize]
            .participant_tickets
            .remove(caller);
        self.events.push(RaffleEvent::RefundIssued {
            raffle_id,
            to: *caller,
            amount,
        });
        info!("raffle {raffle_id}: refunded {held} tickets ({amount}) to {caller}");
        Ok(amount)
    }

    // ---- draw & payout ----

    /// Select the winning ticket from the oracle's randomness and settle
    /// the pool in one step: platform fee to treasury, organizer fee to the
    /// raffle's organizer, remainder to the winner. There is no claim step.
    ///
    /// A sold-out raffle may draw before its end time; otherwise the timer
    /// must have elapsed.
    pub fn draw_winner(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        raffle_id: u64,
        random: &RandomSeed,
        vrf_hash: VrfHash,
        now: UnixTimestamp,
    ) -> RaffleResult<DrawOutcome> {
        let raffle = self
            .raffles
            .get(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)?;
        if !raffle.is_active {
            return Err(RaffleError::RaffleNotActive);
        }
        if *caller != raffle.organizer && *caller != self.owner {
            return Err(RaffleError::NotAuthorized);
        }
        if raffle.total_tickets == 0 {
            return Err(RaffleError::NoTicketsSold);
        }
        if !raffle.is_sold_out() && now < raffle.end_time {
            return Err(RaffleError::NotEndedYet);
        }

        let winning_ticket = vrf::winning_ticket(random, raffle.total_tickets);
        let winner = raffle.ticket_owners[winning_ticket as usize];

        let total_prize = raffle.total_prize;
        let platform_fee = total_prize
            .checked_mul(self.platform_fee_bps as u128)
            .ok_or(RaffleError::Overflow)?
            / BPS_DENOMINATOR;
        let organizer_fee = total_prize
            .checked_mul(self.organizer_fee_bps as u128)
            .ok_or(RaffleError::Overflow)?
            / BPS_DENOMINATOR;
        // Remainder-based: truncation residue stays with the winner, so the
        // three payouts always sum to the pool exactly.
        let winner_amount = total_prize - platform_fee - organizer_fee;

        let token = raffle.payment_token;
        let organizer = raffle.organizer;
        if platform_fee > 0 {
            tokens.push(&token, &self.treasury, platform_fee)?;
        }
        if organizer_fee > 0 {
            tokens.push(&token, &organizer, organizer_fee)?;
        }
        tokens.push(&token, &winner, winner_amount)?;

        let raffle = &mut self.raffles[raffle_id as usize];
        raffle.is_drawn = true;
        raffle.is_active = false;
        raffle.winner = Some(winner);
        raffle.winning_ticket = Some(winning_ticket);
        self.vrf_hashes.insert(raffle_id, vrf_hash);

        self.events.push(RaffleEvent::WinnerDrawn {
            raffle_id,
            winner,
            winning_ticket,
            winner_amount,
            platform_fee,
            organizer_fee,
            vrf_hash,
        });
        info!(
            "raffle {raffle_id} drawn at {now}: ticket {winning_ticket} wins {winner_amount} \
             (platform {platform_fee}, organizer {organizer_fee})"
        );
        Ok(DrawOutcome {
            winner,
            winning_ticket,
            winner_amount,
            platform_fee,
            organizer_fee,
        })
    }

    // ---- timelocked administration & slashing ----

    /// Queue a fee update behind the timelock. Combined fees are capped at
    /// 10%; the split between the two shares is deliberately unconstrained.
    pub fn queue_set_fees(
        &mut self,
        caller: &AccountId,
        platform_fee_bps: u16,
        organizer_fee_bps: u16,
        now: UnixTimestamp,
    ) -> RaffleResult<u64> {
        self.ensure_owner(caller)?;
        if platform_fee_bps as u32 + organizer_fee_bps as u32 > MAX_TOTAL_FEE_BPS as u32 {
            return Err(RaffleError::FeesExceedCap);
        }
        Ok(self.queue_change(
            ChangeAction::SetFees {
                platform_fee_bps,
                organizer_fee_bps,
            },
            now,
        ))
    }

    /// Queue a treasury update behind the timelock.
    pub fn queue_set_treasury(
        &mut self,
        caller: &AccountId,
        treasury: AccountId,
        now: UnixTimestamp,
    ) -> RaffleResult<u64> {
        self.ensure_owner(caller)?;
        if treasury == AccountId::ZERO {
            return Err(RaffleError::InvalidTreasury);
        }
        Ok(self.queue_change(ChangeAction::SetTreasury { treasury }, now))
    }

    fn queue_change(&mut self, action: ChangeAction, now: UnixTimestamp) -> u64 {
        let change_id = self.change_counter;
        self.change_counter += 1;
        self.pending_changes.insert(
            change_id,
            PendingChange {
                action,
                queued_at: now,
            },
        );
        self.events.push(RaffleEvent::ChangeQueued {
            change_id,
            queued_at: now,
        });
        info!("admin change {change_id} queued at {now}: {action:?}");
        change_id
    }

    /// Apply a queued change once its delay has elapsed. The record is
    /// consumed, so a second execution fails with "Change does not exist".
    pub fn execute_change(
        &mut self,
        caller: &AccountId,
        change_id: u64,
        now: UnixTimestamp,
    ) -> RaffleResult<()> {
        self.ensure_owner(caller)?;
        let pending = self
            .pending_changes
            .get(&change_id)
            .copied()
            .ok_or(RaffleError::ChangeNotFound)?;
        let executable_at = pending
            .queued_at
            .checked_add(TIMELOCK_DELAY_SECS)
            .ok_or(RaffleError::Overflow)?;
        if now < executable_at {
            return Err(RaffleError::TimelockNotExpired);
        }

        match pending.action {
            ChangeAction::SetFees {
                platform_fee_bps,
                organizer_fee_bps,
            } => {
                self.platform_fee_bps = platform_fee_bps;
                self.organizer_fee_bps = organizer_fee_bps;
            }
            ChangeAction::SetTreasury { treasury } => {
                self.treasury = treasury;
            }
        }
        self.pending_changes.remove(&change_id);
        self.events.push(RaffleEvent::ChangeExecuted { change_id });
        info!("admin change {change_id} executed: {:?}", pending.action);
        Ok(())
    }

    /// Drop a pending change before it executes.
    pub fn cancel_change(&mut self, caller: &AccountId, change_id: u64) -> RaffleResult<()> {
        self.ensure_owner(caller)?;
        self.pending_changes
            .remove(&change_id)
            .ok_or(RaffleError::ChangeNotFound)?;
        self.events.push(RaffleEvent::ChangeCancelled { change_id });
        info!("admin change {change_id} cancelled");
        Ok(())
    }

    /// Seize an organizer's bond for a token and send it to the treasury.
    /// Punitive and manual: the allowed-organizer flag and any existing
    /// raffles are untouched.
    pub fn slash_organizer(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        organizer: &AccountId,
        token: &AccountId,
        reason: &str,
    ) -> RaffleResult<u128> {
        self.ensure_owner(caller)?;
        let stake = *self
            .organizer_stakes
            .get(&(*organizer, *token))
            .ok_or(RaffleError::NoStake)?;

        tokens.push(token, &self.treasury, stake)?;
        self.organizer_stakes.remove(&(*organizer, *token));
        self.events.push(RaffleEvent::OrganizerSlashed {
            organizer: *organizer,
            token: *token,
            amount: stake,
            reason: reason.to_string(),
        });
        warn!("organizer {organizer} slashed {stake} of token {token}: {reason}");
        Ok(stake)
    }

    /// Pause or resume raffle creation. Purchases, draws, cancellations and
    /// refunds on existing raffles are unaffected.
    pub fn set_agent_paused(&mut self, caller: &AccountId, paused: bool) -> RaffleResult<()> {
        self.ensure_owner(caller)?;
        self.paused = paused;
        self.events.push(RaffleEvent::AgentPauseSet { paused });
        info!("agent paused = {paused}");
        Ok(())
    }

    /// Recover tokens that were sent to the ledger outside any raffle flow.
    /// Only the excess over every outstanding obligation (undrawn prize
    /// pools, unrefunded cancelled pools, organizer stakes) may leave.
    pub fn emergency_withdraw(
        &mut self,
        tokens: &mut dyn TokenTransfer,
        caller: &AccountId,
        token: &AccountId,
        amount: u128,
    ) -> RaffleResult<()> {
        self.ensure_owner(caller)?;
        let withdrawable = tokens
            .ledger_balance(token)
            .saturating_sub(self.obligated_balance(token));
        if amount > withdrawable {
            return Err(RaffleError::ExceedsWithdrawableBalance);
        }

        tokens.push(token, caller, amount)?;
        self.events.push(RaffleEvent::EmergencyWithdrawal {
            token: *token,
            amount,
        });
        warn!("emergency withdrawal of {amount} of token {token}");
        Ok(())
    }

    /// Sum of all funds the ledger owes against this token: live prize
    /// pools, refunds still claimable on cancelled raffles, and stakes.
    fn obligated_balance(&self, token: &AccountId) -> u128 {
        let raffle_funds: u128 = self
            .raffles
            .iter()
            .filter(|r| r.payment_token == *token)
            .map(|r| {
                if r.is_cancelled {
                    r.refundable()
                } else if r.is_drawn {
                    0
                } else {
                    r.total_prize
                }
            })
            .sum();
        let stakes: u128 = self
            .organizer_stakes
            .iter()
            .filter(|((_, t), _)| t == token)
            .map(|(_, stake)| *stake)
            .sum();
        raffle_funds + stakes
    }

    // ---- queries ----

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    pub fn treasury(&self) -> &AccountId {
        &self.treasury
    }

    pub fn platform_fee_bps(&self) -> u16 {
        self.platform_fee_bps
    }

    pub fn organizer_fee_bps(&self) -> u16 {
        self.organizer_fee_bps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of raffles ever created; the next raffle id.
    pub fn raffle_count(&self) -> u64 {
        self.raffles.len() as u64
    }

    pub fn get_raffle(&self, raffle_id: u64) -> RaffleResult<&Raffle> {
        self.raffles
            .get(raffle_id as usize)
            .ok_or(RaffleError::RaffleNotFound)
    }

    /// Ticket count a participant currently holds on a raffle (zeroed by a
    /// refund).
    pub fn get_participant_tickets(&self, raffle_id: u64, participant: &AccountId) -> u64 {
        self.raffles
            .get(raffle_id as usize)
            .and_then(|r| r.participant_tickets.get(participant))
            .copied()
            .unwrap_or(0)
    }

    /// Owner of a specific ticket index.
    pub fn get_ticket_owner(&self, raffle_id: u64, ticket: u64) -> RaffleResult<AccountId> {
        let raffle = self.get_raffle(raffle_id)?;
        raffle
            .ticket_owners
            .get(ticket as usize)
            .copied()
            .ok_or(RaffleError::InvalidTicketIndex)
    }

    /// Ids of all raffles still active, ascending.
    pub fn get_active_raffles(&self) -> Vec<u64> {
        self.raffles
            .iter()
            .filter(|r| r.is_active)
            .map(|r| r.id)
            .collect()
    }

    /// Ids of all raffles a given organizer created, ascending.
    pub fn get_raffles_by_organizer(&self, organizer: &AccountId) -> Vec<u64> {
        self.raffles
            .iter()
            .filter(|r| r.organizer == *organizer)
            .map(|r| r.id)
            .collect()
    }

    pub fn get_vrf_hash(&self, raffle_id: u64) -> Option<VrfHash> {
        self.vrf_hashes.get(&raffle_id).copied()
    }

    pub fn organizer_stake(&self, organizer: &AccountId, token: &AccountId) -> u128 {
        self.organizer_stakes
            .get(&(*organizer, *token))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_allowed_organizer(&self, account: &AccountId) -> bool {
        self.allowed_organizers.contains(account)
    }

    pub fn pending_change(&self, change_id: u64) -> Option<&PendingChange> {
        self.pending_changes.get(&change_id)
    }

    /// Hand the buffered lifecycle events to the wrapping layer.
    pub fn drain_events(&mut self) -> Vec<RaffleEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_owner(&self, caller: &AccountId) -> RaffleResult<()> {
        if *caller != self.owner {
            return Err(RaffleError::NotAuthorized);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::InMemoryTokens;

    #[test]
    fn ledger_snapshot_round_trips_through_borsh() {
        let owner = AccountId::new_unique();
        let treasury = AccountId::new_unique();
        let organizer = AccountId::new_unique();
        let token = AccountId::new_unique();

        let mut ledger = Ledger::new(owner, treasury).unwrap();
        ledger.set_allowed_token(&owner, &token, true, 6).unwrap();

        let mut tokens = InMemoryTokens::new();
        tokens.mint(&token, &organizer, 10_000_000);
        tokens.approve(&token, &organizer, u128::MAX);
        ledger
            .register_as_organizer(&mut tokens, &organizer, &token)
            .unwrap();
        ledger
            .create_raffle(&organizer, &token, 1_000, 5, 600, 1_700_000_000)
            .unwrap();

        let bytes = borsh::to_vec(&ledger).unwrap();
        let restored: Ledger = borsh::from_slice(&bytes).unwrap();

        assert_eq!(restored.owner(), ledger.owner());
        assert_eq!(restored.treasury(), ledger.treasury());
        assert_eq!(restored.raffle_count(), 1);
        assert_eq!(restored.get_raffle(0).unwrap(), ledger.get_raffle(0).unwrap());
        assert_eq!(restored.organizer_stake(&organizer, &token), 1_000_000);
        assert!(restored.is_allowed_organizer(&organizer));
    }
}
