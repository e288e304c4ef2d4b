use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::{error::LotteryError, state::LotteryState};

/// A single random word delivered by the coordinator: a big-endian 256-bit integer.
pub type RandomWord = [u8; 32];

/// Parameters of a randomness request, as the coordinator reads them from `DrawRequested`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RandomnessRequest {
    pub request_id: u64,
    pub gas_lane: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

/// Inbound callback from the coordinator.
#[derive(Clone, Debug)]
pub struct RandomnessFulfillment {
    pub request_id: u64,
    pub random_words: Vec<RandomWord>,
}

/// What a fulfillment resolves to, computed before anything is mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawSettlement {
    pub request_id: u64,
    pub winner_index: u64,
    pub winner: Pubkey,
    pub prize: u64,
}

impl DrawSettlement {
    /// The account supplied to receive the prize must be the drawn player.
    pub fn verify_winner(&self, winner: &Pubkey) -> Result<()> {
        require_keys_eq!(*winner, self.winner, LotteryError::WinnerAccountMismatch);
        Ok(())
    }
}

#[derive(Debug)]
pub enum FulfillmentOutcome {
    Accepted(DrawSettlement),
    Rejected(LotteryError),
}

/// Snapshot of the four upkeep conditions and the values behind them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub state: LotteryState,
    pub elapsed: i64,
    pub interval: i64,
    pub players: u64,
    pub balance: u64,
}

impl UpkeepStatus {
    pub fn is_open(&self) -> bool {
        self.state == LotteryState::Open
    }

    pub fn time_passed(&self) -> bool {
        self.elapsed >= self.interval
    }

    pub fn has_players(&self) -> bool {
        self.players > 0
    }

    pub fn has_balance(&self) -> bool {
        self.balance > 0
    }

    pub fn upkeep_needed(&self) -> bool {
        self.is_open() && self.time_passed() && self.has_players() && self.has_balance()
    }
}

/// Reduces a 256-bit word modulo `player_count`, limb by limb, so no precision is lost.
pub fn winner_index(word: &RandomWord, player_count: u64) -> Result<u64> {
    require!(player_count > 0, LotteryError::NoPlayers);

    let limbs = [
        array_ref![word, 0, 8],
        array_ref![word, 8, 8],
        array_ref![word, 16, 8],
        array_ref![word, 24, 8],
    ];
    let modulus = player_count as u128;
    let index = limbs.iter().fold(0u128, |acc, limb| {
        // acc < modulus <= 2^64, so the shift cannot overflow
        ((acc << 64) | u64::from_be_bytes(**limb) as u128) % modulus
    });

    Ok(index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> RandomWord {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        word
    }

    #[test]
    fn small_words_match_plain_modulo() {
        assert_eq!(winner_index(&word(7), 1).unwrap(), 0);
        assert_eq!(winner_index(&word(42), 4).unwrap(), 2);
        assert_eq!(winner_index(&word(u64::MAX), 10).unwrap(), u64::MAX % 10);
    }

    #[test]
    fn high_limbs_take_part_in_the_reduction() {
        // 2^192 mod 3 == 1, 2^192 mod 5 == 1 (2^4 == 1 mod 5)
        let mut top = [0u8; 32];
        top[7] = 1;
        assert_eq!(winner_index(&top, 3).unwrap(), 1);
        assert_eq!(winner_index(&top, 5).unwrap(), 1);

        // 2^256 - 1 is divisible by 3 and 5
        let all_ones = [0xffu8; 32];
        assert_eq!(winner_index(&all_ones, 3).unwrap(), 0);
        assert_eq!(winner_index(&all_ones, 5).unwrap(), 0);
    }

    #[test]
    fn zero_players_is_rejected() {
        assert_eq!(
            winner_index(&word(1), 0).unwrap_err(),
            anchor_lang::error::Error::from(LotteryError::NoPlayers)
        );
    }

    #[test]
    fn settlement_accepts_only_the_drawn_player() {
        let settlement = DrawSettlement {
            request_id: 1,
            winner_index: 0,
            winner: Pubkey::new_unique(),
            prize: 100,
        };
        assert!(settlement.verify_winner(&settlement.winner.clone()).is_ok());
        assert_eq!(
            settlement.verify_winner(&Pubkey::new_unique()).unwrap_err(),
            anchor_lang::error::Error::from(LotteryError::WinnerAccountMismatch)
        );
    }

    #[test]
    fn upkeep_requires_every_condition() {
        let ready = UpkeepStatus {
            state: LotteryState::Open,
            elapsed: 30,
            interval: 30,
            players: 1,
            balance: 100,
        };
        assert!(ready.upkeep_needed());
        assert!(!UpkeepStatus { state: LotteryState::Calculating, ..ready }.upkeep_needed());
        assert!(!UpkeepStatus { elapsed: 29, ..ready }.upkeep_needed());
        assert!(!UpkeepStatus { players: 0, ..ready }.upkeep_needed());
        assert!(!UpkeepStatus { balance: 0, ..ready }.upkeep_needed());
    }
}
