use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, state::Lottery};

/// Event emitted when an unanswered draw is abandoned
#[event]
pub struct DrawReopened {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The request that will no longer be honored
    pub request_id: u64,
    pub reopened_at: i64,
}

/// Instruction to recover a lottery whose randomness request was never answered
///
/// # Security Considerations
/// 1. Only the lottery authority may reopen; an entrant could otherwise discard
///    a draw whose outcome it already knows and force a re-roll
/// 2. Only a Calculating lottery with a pending draw can be reopened
/// 3. The draw must have been pending for at least `DRAW_TIMEOUT_SECONDS`
///
/// # Implementation Notes
/// - No winner is picked and nothing is paid out
/// - Players and pool carry over, so upkeep is due again right away
/// - A late fulfillment for the abandoned request fails with `UnknownRequest`
pub fn reopen_stale_draw(ctx: Context<ReopenStaleDraw>) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.authority.key();
    let request_id = ctx
        .accounts
        .lottery
        .reopen_stale_draw(&authority, clock.unix_timestamp)?;

    msg!("Abandoned request {}", request_id);

    emit!(DrawReopened {
        lottery: ctx.accounts.lottery.key(),
        request_id,
        reopened_at: clock.unix_timestamp,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ReopenStaleDraw<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
        has_one = authority @ LotteryError::NotAuthority,
    )]
    pub lottery: Account<'info, Lottery>,

    pub authority: Signer<'info>,
}
