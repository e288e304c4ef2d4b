use anchor_lang::prelude::*;

// 8 discriminator, 32 lottery pubkey, 1 bump
pub const POOL_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Escrow PDA holding the entry fees of one lottery.
#[account]
pub struct Pool {
    pub lottery: Pubkey,
    pub bump: u8,
}
