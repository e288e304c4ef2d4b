use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    error::LotteryError,
    randomness::{DrawSettlement, FulfillmentOutcome, RandomnessFulfillment},
    state::Lottery,
};

/// Moves an entry payment from the player into the pool through the system program,
/// then checks the pool actually received it.
pub fn transfer_entry_fee<'info>(
    player: &Signer<'info>,
    pool: &AccountInfo<'info>,
    system_program: &Program<'info, System>,
    amount: u64,
) -> Result<()> {
    let pre_transfer_balance = pool.lamports();

    system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            system_program::Transfer {
                from: player.to_account_info(),
                to: pool.clone(),
            },
        ),
        amount,
    )?;

    verify_pool_credit(pre_transfer_balance, pool.lamports(), amount)
}

/// The pool must have grown by exactly `amount`.
pub fn verify_pool_credit(
    pre_transfer_balance: u64,
    post_transfer_balance: u64,
    amount: u64,
) -> Result<()> {
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    Ok(())
}

/// Pays the prize out of the pool PDA by moving lamports directly.
/// Only valid because the pool is owned by this program.
/// Every failure surfaces as `PayoutFailed`.
pub fn transfer_prize(pool: &AccountInfo, winner: &AccountInfo, prize: u64) -> Result<()> {
    require!(winner.is_writable, LotteryError::PayoutFailed);

    let pool_lamports = pool
        .lamports()
        .checked_sub(prize)
        .ok_or(LotteryError::PayoutFailed)?;
    let winner_lamports = winner
        .lamports()
        .checked_add(prize)
        .ok_or(LotteryError::PayoutFailed)?;

    **pool
        .try_borrow_mut_lamports()
        .map_err(|_| error!(LotteryError::PayoutFailed))? = pool_lamports;
    **winner
        .try_borrow_mut_lamports()
        .map_err(|_| error!(LotteryError::PayoutFailed))? = winner_lamports;

    Ok(())
}

/// Settles a fulfillment against the lottery and pays the prize.
///
/// Order matters: every check and the payout run before `finalize_draw`, so an
/// error leaves the lottery exactly as it was and the draw stays pending.
pub fn settle_draw(
    lottery: &mut Lottery,
    coordinator: &Pubkey,
    fulfillment: &RandomnessFulfillment,
    pool: &AccountInfo,
    winner: &AccountInfo,
    now: i64,
) -> Result<DrawSettlement> {
    require_keys_eq!(
        *coordinator,
        lottery.vrf_coordinator,
        LotteryError::OnlyCoordinatorCanFulfill
    );
    require_keys_eq!(*pool.key, lottery.pool, LotteryError::InvalidPool);

    let settlement = match lottery.evaluate_fulfillment(fulfillment) {
        FulfillmentOutcome::Accepted(settlement) => settlement,
        FulfillmentOutcome::Rejected(reason) => {
            msg!("Fulfillment for request {} rejected", fulfillment.request_id);
            return Err(reason.into());
        }
    };

    msg!(
        "Winner index {} of {}: {}",
        settlement.winner_index,
        lottery.number_of_players(),
        settlement.winner
    );

    settlement.verify_winner(winner.key)?;
    transfer_prize(pool, winner, settlement.prize)?;
    lottery.finalize_draw(&settlement, now);

    Ok(settlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    struct TestAccount {
        key: Pubkey,
        owner: Pubkey,
        lamports: u64,
        data: Vec<u8>,
    }

    impl TestAccount {
        fn new(lamports: u64) -> Self {
            Self {
                key: Pubkey::new_unique(),
                owner: Pubkey::new_unique(),
                lamports,
                data: vec![],
            }
        }

        fn info(&mut self, is_writable: bool) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                is_writable,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    #[test]
    fn prize_moves_from_pool_to_winner() {
        let mut pool = TestAccount::new(1_500);
        let mut winner = TestAccount::new(10);
        {
            let pool_info = pool.info(true);
            let winner_info = winner.info(true);
            transfer_prize(&pool_info, &winner_info, 1_000).unwrap();
        }
        assert_eq!(pool.lamports, 500);
        assert_eq!(winner.lamports, 1_010);
    }

    #[test]
    fn read_only_winner_fails_without_moving_funds() {
        let mut pool = TestAccount::new(1_500);
        let mut winner = TestAccount::new(10);
        {
            let pool_info = pool.info(true);
            let winner_info = winner.info(false);
            assert_eq!(
                transfer_prize(&pool_info, &winner_info, 1_000).unwrap_err(),
                Error::from(LotteryError::PayoutFailed)
            );
        }
        assert_eq!(pool.lamports, 1_500);
        assert_eq!(winner.lamports, 10);
    }

    #[test]
    fn underfunded_pool_fails_without_moving_funds() {
        let mut pool = TestAccount::new(999);
        let mut winner = TestAccount::new(10);
        {
            let pool_info = pool.info(true);
            let winner_info = winner.info(true);
            assert_eq!(
                transfer_prize(&pool_info, &winner_info, 1_000).unwrap_err(),
                Error::from(LotteryError::PayoutFailed)
            );
        }
        assert_eq!(pool.lamports, 999);
        assert_eq!(winner.lamports, 10);
    }

    #[test]
    fn pool_credit_must_match_amount() {
        assert!(verify_pool_credit(1_000, 1_250, 250).is_ok());
        assert_eq!(
            verify_pool_credit(1_000, 1_249, 250).unwrap_err(),
            Error::from(LotteryError::TransferFailed)
        );
        assert_eq!(
            verify_pool_credit(1_000, 1_000, 250).unwrap_err(),
            Error::from(LotteryError::TransferFailed)
        );
        assert_eq!(
            verify_pool_credit(u64::MAX, u64::MAX, 1).unwrap_err(),
            Error::from(LotteryError::Overflow)
        );
    }

    #[test]
    fn winner_overflow_fails() {
        let mut pool = TestAccount::new(1_000);
        let mut winner = TestAccount::new(u64::MAX);
        let pool_info = pool.info(true);
        let winner_info = winner.info(true);
        assert_eq!(
            transfer_prize(&pool_info, &winner_info, 1).unwrap_err(),
            Error::from(LotteryError::PayoutFailed)
        );
    }
}
