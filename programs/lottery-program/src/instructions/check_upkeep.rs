use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, state::Lottery};

/// Answer to an automation keeper's poll.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepResponse {
    pub upkeep_needed: bool,
    /// Reserved for routing data; always empty.
    pub perform_data: Vec<u8>,
}

/// Read-only view telling the keeper whether a draw is due.
/// Keepers simulate this and only send `perform_upkeep` on `true`.
///
/// A draw is due when all of the following hold:
/// 1. The lottery is Open
/// 2. At least `interval` seconds have passed since the last draw
/// 3. There is at least one player
/// 4. The pool holds a non-zero balance
pub fn check_upkeep(ctx: Context<CheckUpkeep>, _check_data: Vec<u8>) -> Result<UpkeepResponse> {
    let clock = Clock::get()?;
    let status = ctx.accounts.lottery.upkeep_status(clock.unix_timestamp);

    Ok(UpkeepResponse {
        upkeep_needed: status.upkeep_needed(),
        perform_data: Vec::new(),
    })
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}
