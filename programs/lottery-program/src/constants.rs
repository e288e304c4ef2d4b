/// PDA seed for a lottery account: ["lottery", authority].
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// PDA seed for the escrow holding entry fees: ["pool", lottery].
pub const POOL_SEED: &[u8] = b"pool";

/// Random words requested per draw. One winner needs one word.
pub const NUM_WORDS: u32 = 1;

/// Confirmations the coordinator waits before answering a request.
pub const REQUEST_CONFIRMATIONS: u16 = 3;

/// Upper bound on entries per draw; the player list lives in a fixed-size account.
pub const MAX_PLAYERS: usize = 200;

pub const MAX_CALLBACK_GAS_LIMIT: u32 = 2_500_000;

/// A draw still pending after this long can be reopened without a winner.
pub const DRAW_TIMEOUT_SECONDS: i64 = 24 * 60 * 60; // 1 day
