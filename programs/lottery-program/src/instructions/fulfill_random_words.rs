use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, POOL_SEED},
    error::LotteryError,
    helpers::settle_draw,
    randomness::{RandomWord, RandomnessFulfillment},
    state::{Lottery, Pool},
};

/// Event emitted when a draw is settled
#[event]
pub struct WinnerPicked {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// Lamports paid to the winner
    pub prize: u64,
    /// The request this draw answered
    pub request_id: u64,
}

/// Coordinator callback delivering random words for the pending draw.
///
/// Execution requirements:
/// 1. Signed by the coordinator stored in the lottery
/// 2. `request_id` matches the pending draw
/// 3. At least one random word is supplied
/// 4. `winner` is the player selected by the first word
///
/// The winner index is the first word (a 256-bit big-endian integer) modulo the
/// number of players. Entries are refused while Calculating, so the player list
/// is the one frozen at `perform_upkeep`.
///
/// Settlement is computed first, then the prize is moved, and only then is the
/// round reset. Any failure reverts the whole instruction and leaves the draw
/// pending, so the coordinator can retry with the same request id.
///
/// # Errors
/// - `OnlyCoordinatorCanFulfill` if the signer is not the configured coordinator
/// - `UnknownRequest` if no draw is pending under `request_id`
/// - `MissingRandomWords` if `random_words` is empty
/// - `WinnerAccountMismatch` if `winner` is not the drawn player
/// - `PayoutFailed` if the prize cannot be moved to the winner
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<RandomWord>,
) -> Result<()> {
    let fulfillment = RandomnessFulfillment {
        request_id,
        random_words,
    };

    let coordinator = ctx.accounts.vrf_coordinator.key();
    let pool = ctx.accounts.pool.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();
    let clock = Clock::get()?;

    let settlement = settle_draw(
        &mut ctx.accounts.lottery,
        &coordinator,
        &fulfillment,
        &pool,
        &winner,
        clock.unix_timestamp,
    )?;

    emit!(WinnerPicked {
        lottery: ctx.accounts.lottery.key(),
        winner: settlement.winner,
        prize: settlement.prize,
        request_id: settlement.request_id,
    });

    Ok(())
}

/// Accounts required for the fulfill_random_words instruction
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    pub vrf_coordinator: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
        has_one = vrf_coordinator @ LotteryError::OnlyCoordinatorCanFulfill,
        has_one = pool @ LotteryError::InvalidPool,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Escrow paying out the prize
    #[account(
        mut,
        seeds = [POOL_SEED, lottery.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    /// The drawn player; the coordinator derives it from the same word
    /// CHECK: Compared against the settled winner in the handler.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}
