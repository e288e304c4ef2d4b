use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, state::Lottery};

/// View returning the player at `index` in the current round.
pub fn get_player(ctx: Context<GetPlayer>, index: u64) -> Result<Pubkey> {
    ctx.accounts.lottery.player(index)
}

#[derive(Accounts)]
pub struct GetPlayer<'info> {
    #[account(
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}
