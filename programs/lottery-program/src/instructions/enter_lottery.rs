use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, POOL_SEED},
    error::LotteryError,
    helpers::transfer_entry_fee,
    state::{Lottery, Pool},
};

/// Event emitted when an entry is accepted
#[event]
pub struct EntryAccepted {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The entrant's address
    pub player: Pubkey,
    /// Lamports paid for this entry
    pub amount: u64,
}

/// Instruction to enter the current round of a lottery
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports to pay; anything at or above the entrance fee is accepted
///
/// # Security Considerations
/// 1. `amount` must cover the entrance fee
/// 2. The lottery must be Open; entries are refused while a draw is calculating
/// 3. The pool account must be the one bound to this lottery
/// 4. The full amount must arrive in the pool
///
/// # Implementation Notes
/// - Updates lottery state before performing the transfer
/// - The whole amount is added to the prize, including any excess over the fee
pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.lottery.record_entry(player, amount)?;

    transfer_entry_fee(
        &ctx.accounts.player,
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.system_program,
        amount,
    )?;

    emit!(EntryAccepted {
        lottery: ctx.accounts.lottery.key(),
        player,
        amount,
    });

    Ok(())
}

/// Accounts required for the enter_lottery instruction
#[derive(Accounts)]
pub struct EnterLottery<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.authority.as_ref()],
        bump = lottery.bump,
        has_one = pool @ LotteryError::InvalidPool,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Escrow receiving the entry payment
    /// PDA with seeds ["pool", lottery_key]
    #[account(
        mut,
        seeds = [POOL_SEED, lottery.key().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}
