use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, randomness::RandomnessRequest, state::Lottery};

/// Event emitted when a draw starts. The coordinator watches for it and
/// answers with `fulfill_random_words` carrying the same request id.
#[event]
pub struct DrawRequested {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// Full request parameters for the coordinator
    pub request: RandomnessRequest,
}

/// Starts a draw: closes entries and issues a randomness request.
///
/// Upkeep conditions are re-evaluated here against the current clock rather
/// than trusted from a prior `check_upkeep`, so anyone may call this.
///
/// After execution:
/// - The lottery state is Calculating
/// - The request is recorded as the pending draw
/// - Players and pool are untouched until fulfillment
///
/// # Errors
/// - `UpkeepNotNeeded` if any upkeep condition fails; the observed values are logged
/// - `Overflow` if the request counter is exhausted
pub fn perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let lottery = &mut ctx.accounts.lottery;

    let request = lottery.begin_draw(clock.unix_timestamp)?;

    msg!(
        "Requested {} random word(s), request id {}",
        request.num_words,
        request.request_id
    );

    emit!(DrawRequested {
        lottery: lottery.key(),
        request,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}
