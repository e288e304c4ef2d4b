use anchor_lang::prelude::*;

use crate::{
    constants::{
        DRAW_TIMEOUT_SECONDS, MAX_CALLBACK_GAS_LIMIT, MAX_PLAYERS, NUM_WORDS,
        REQUEST_CONFIRMATIONS,
    },
    error::LotteryError,
    randomness::{
        winner_index, DrawSettlement, FulfillmentOutcome, RandomnessFulfillment, RandomnessRequest,
        UpkeepStatus,
    },
};

// Space calculation:
// 8 (discriminator) +
// 32 (authority) +
// 32 (vrf_coordinator) +
// 32 (pool) +
// 8 (entrance_fee) +
// 32 (gas_lane) +
// 8 (subscription_id) +
// 4 (callback_gas_limit) +
// 8 (interval) +
// 1 (lottery_state) +
// 4 + 32 * MAX_PLAYERS (players) +
// 8 (pool_balance) +
// 33 (recent_winner: Option<Pubkey>) +
// 8 (last_timestamp) +
// 8 (request_counter) +
// 17 (pending_draw: Option<PendingDraw>) +
// 1 (bump)
pub const LOTTERY_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 32 + 8 + 32 + 8 + 4 + 8 + 1 + (4 + 32 * MAX_PLAYERS) + 8 + 33 + 8 + 8 + 17 + 1;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LotteryState {
    Open = 0,
    Calculating = 1,
}

/// The randomness request currently awaiting a callback.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingDraw {
    pub request_id: u64,
    pub requested_at: i64,
}

/// Configuration supplied once when the lottery is created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeLotteryParams {
    /// Minimum lamports accepted per entry
    pub entrance_fee: u64,
    /// Key hash selecting the coordinator's randomness lane
    pub gas_lane: [u8; 32],
    pub subscription_id: u64,
    /// Compute budget the coordinator reserves for the callback
    pub callback_gas_limit: u32,
    /// Minimum seconds between draws
    pub interval: i64,
}

impl InitializeLotteryParams {
    /// `min_entrance_fee` is the rent-exempt minimum of an empty account, so a
    /// prize can always fund a winner wallet that was drained to zero.
    pub fn validate(&self, min_entrance_fee: u64) -> Result<()> {
        require!(
            self.entrance_fee > 0 && self.entrance_fee >= min_entrance_fee,
            LotteryError::EntranceFeeTooLow
        );
        require!(self.interval > 0, LotteryError::InvalidInterval);
        require!(
            self.callback_gas_limit > 0 && self.callback_gas_limit <= MAX_CALLBACK_GAS_LIMIT,
            LotteryError::InvalidCallbackGasLimit
        );
        Ok(())
    }
}

#[account]
#[derive(Debug, PartialEq)]
pub struct Lottery {
    pub authority: Pubkey,
    pub vrf_coordinator: Pubkey,
    pub pool: Pubkey,
    pub entrance_fee: u64,
    pub gas_lane: [u8; 32],
    pub subscription_id: u64,
    pub callback_gas_limit: u32,
    pub interval: i64,
    pub lottery_state: LotteryState,
    pub players: Vec<Pubkey>,
    pub pool_balance: u64,
    pub recent_winner: Option<Pubkey>,
    pub last_timestamp: i64,
    pub request_counter: u64,
    pub pending_draw: Option<PendingDraw>,
    pub bump: u8,
}

impl Lottery {
    pub fn new(
        authority: Pubkey,
        vrf_coordinator: Pubkey,
        pool: Pubkey,
        params: &InitializeLotteryParams,
        bump: u8,
        now: i64,
    ) -> Self {
        Self {
            authority,
            vrf_coordinator,
            pool,
            entrance_fee: params.entrance_fee,
            gas_lane: params.gas_lane,
            subscription_id: params.subscription_id,
            callback_gas_limit: params.callback_gas_limit,
            interval: params.interval,
            lottery_state: LotteryState::Open,
            players: Vec::new(),
            pool_balance: 0,
            recent_winner: None,
            last_timestamp: now,
            request_counter: 0,
            pending_draw: None,
            bump,
        }
    }

    pub fn number_of_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or(LotteryError::PlayerIndexOutOfRange.into())
    }

    pub fn upkeep_status(&self, now: i64) -> UpkeepStatus {
        UpkeepStatus {
            state: self.lottery_state,
            elapsed: now.saturating_sub(self.last_timestamp),
            interval: self.interval,
            players: self.number_of_players(),
            balance: self.pool_balance,
        }
    }

    /// Records a paid entry. Checks run before any field changes, so a
    /// rejected entry leaves the lottery untouched.
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(amount >= self.entrance_fee, LotteryError::NotEnoughFunds);
        require!(
            self.lottery_state == LotteryState::Open,
            LotteryError::LotteryClosed
        );
        require!(self.players.len() < MAX_PLAYERS, LotteryError::LotteryFull);

        let pool_balance = self
            .pool_balance
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;

        self.players.push(player);
        self.pool_balance = pool_balance;
        Ok(())
    }

    /// Re-evaluates upkeep against `now` and, if due, closes entries and
    /// returns the request to hand to the coordinator.
    pub fn begin_draw(&mut self, now: i64) -> Result<RandomnessRequest> {
        let status = self.upkeep_status(now);
        if !status.upkeep_needed() {
            msg!(
                "Upkeep not needed: balance={} players={} state={:?} elapsed={}s interval={}s",
                status.balance,
                status.players,
                status.state,
                status.elapsed,
                status.interval
            );
            return err!(LotteryError::UpkeepNotNeeded);
        }

        let request_id = self
            .request_counter
            .checked_add(1)
            .ok_or(LotteryError::Overflow)?;

        self.request_counter = request_id;
        self.lottery_state = LotteryState::Calculating;
        self.pending_draw = Some(PendingDraw {
            request_id,
            requested_at: now,
        });

        Ok(RandomnessRequest {
            request_id,
            gas_lane: self.gas_lane,
            subscription_id: self.subscription_id,
            request_confirmations: REQUEST_CONFIRMATIONS,
            callback_gas_limit: self.callback_gas_limit,
            num_words: NUM_WORDS,
        })
    }

    /// Resolves a coordinator callback without touching state.
    pub fn evaluate_fulfillment(&self, fulfillment: &RandomnessFulfillment) -> FulfillmentOutcome {
        let pending = match self.pending_draw {
            Some(pending)
                if self.lottery_state == LotteryState::Calculating
                    && pending.request_id == fulfillment.request_id =>
            {
                pending
            }
            _ => return FulfillmentOutcome::Rejected(LotteryError::UnknownRequest),
        };

        let word = match fulfillment.random_words.first() {
            Some(word) => word,
            None => return FulfillmentOutcome::Rejected(LotteryError::MissingRandomWords),
        };

        let index = match winner_index(word, self.number_of_players()) {
            Ok(index) => index,
            Err(_) => return FulfillmentOutcome::Rejected(LotteryError::NoPlayers),
        };

        // index < players.len(), which fits in usize
        let winner = self.players[index as usize];

        FulfillmentOutcome::Accepted(DrawSettlement {
            request_id: pending.request_id,
            winner_index: index,
            winner,
            prize: self.pool_balance,
        })
    }

    /// Commits a settlement once the prize has left the pool.
    pub fn finalize_draw(&mut self, settlement: &DrawSettlement, now: i64) {
        self.recent_winner = Some(settlement.winner);
        self.players.clear();
        self.pool_balance = 0;
        self.last_timestamp = now;
        self.lottery_state = LotteryState::Open;
        self.pending_draw = None;
    }

    /// Abandons a draw the coordinator never answered. Players and pool
    /// carry over to the next request. Returns the abandoned request id.
    ///
    /// Restricted to the authority: a reopen discards a word that may still be
    /// in flight, so an entrant who saw it must not be able to force a re-roll.
    pub fn reopen_stale_draw(&mut self, caller: &Pubkey, now: i64) -> Result<u64> {
        require_keys_eq!(*caller, self.authority, LotteryError::NotAuthority);

        let pending = match self.pending_draw {
            Some(pending) if self.lottery_state == LotteryState::Calculating => pending,
            _ => return err!(LotteryError::DrawNotPending),
        };

        let waited = now.saturating_sub(pending.requested_at);
        if waited < DRAW_TIMEOUT_SECONDS {
            msg!(
                "Request {} pending for {}s, timeout is {}s",
                pending.request_id,
                waited,
                DRAW_TIMEOUT_SECONDS
            );
            return err!(LotteryError::DrawNotStale);
        }

        self.lottery_state = LotteryState::Open;
        self.pending_draw = None;
        Ok(pending.request_id)
    }
}
