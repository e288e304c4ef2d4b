use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod error;
pub mod helpers;
pub mod instructions;
pub mod randomness;
pub mod state;

use state::InitializeLotteryParams;

declare_id!("LoTTc8x5k3VfQm1WqGZ2sA9rNbHd7uEYpJ4tK6oiXvC");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        params: InitializeLotteryParams,
    ) -> Result<()> {
        instructions::initialize_lottery::initialize_lottery(ctx, params)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        instructions::enter_lottery::enter_lottery(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>, check_data: Vec<u8>) -> Result<UpkeepResponse> {
        instructions::check_upkeep::check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn reopen_stale_draw(ctx: Context<ReopenStaleDraw>) -> Result<()> {
        instructions::reopen_stale_draw::reopen_stale_draw(ctx)
    }

    pub fn get_player(ctx: Context<GetPlayer>, index: u64) -> Result<Pubkey> {
        instructions::get_player::get_player(ctx, index)
    }
}
