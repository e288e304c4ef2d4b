use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, POOL_SEED},
    state::{InitializeLotteryParams, Lottery, Pool, LOTTERY_ACCOUNT_SIZE, POOL_ACCOUNT_SIZE},
};

/// Event emitted when a lottery is created
#[event]
pub struct LotteryInitialized {
    /// The pubkey of the created lottery
    pub lottery: Pubkey,
    /// The coordinator allowed to fulfill randomness
    pub vrf_coordinator: Pubkey,
    /// Minimum lamports per entry
    pub entrance_fee: u64,
    /// Minimum seconds between draws
    pub interval: i64,
    /// When the lottery was created
    pub creation_time: i64,
}

/// Instruction to create a lottery and its pool escrow.
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `params` - Entrance fee, randomness lane, subscription, callback budget and interval
///
/// # Security Considerations
/// 1. Rejects a zero interval, and an entrance fee below the rent-exempt minimum
///    of an empty account (a prize must be able to fund a drained winner wallet)
/// 2. Caps the callback gas limit at `MAX_CALLBACK_GAS_LIMIT`
/// 3. Binds the coordinator key; nothing else may fulfill draws afterwards
/// 4. Pool is a PDA with seeds ["pool", lottery_key]
///
/// # Implementation Notes
/// - Configuration is immutable once written
/// - The draw interval is measured from the creation time
pub fn initialize_lottery(
    ctx: Context<InitializeLottery>,
    params: InitializeLotteryParams,
) -> Result<()> {
    params.validate(Rent::get()?.minimum_balance(0))?;

    let current_time = Clock::get()?.unix_timestamp;
    let lottery_key = ctx.accounts.lottery.key();

    ctx.accounts.lottery.set_inner(Lottery::new(
        ctx.accounts.authority.key(),
        ctx.accounts.vrf_coordinator.key(),
        ctx.accounts.pool.key(),
        &params,
        ctx.bumps.lottery,
        current_time,
    ));
    ctx.accounts.pool.lottery = lottery_key;
    ctx.accounts.pool.bump = ctx.bumps.pool;

    msg!(
        "Lottery {} initialized, fee {} lamports, interval {}s",
        lottery_key,
        params.entrance_fee,
        params.interval
    );

    emit!(LotteryInitialized {
        lottery: lottery_key,
        vrf_coordinator: ctx.accounts.vrf_coordinator.key(),
        entrance_fee: params.entrance_fee,
        interval: params.interval,
        creation_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = authority,
        space = LOTTERY_ACCOUNT_SIZE,
        seeds = [LOTTERY_SEED, authority.key().as_ref()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = authority,
        space = POOL_ACCOUNT_SIZE,
        seeds = [POOL_SEED, lottery.key().as_ref()],
        bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// The randomness coordinator that will sign fulfillments
    /// CHECK: Only the key is stored; it is compared against the fulfillment signer.
    pub vrf_coordinator: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
