use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    NoPlayers,
    InvalidPool,
    #[msg("Not enough lamports sent to cover the entrance fee")]
    NotEnoughFunds,
    #[msg("Lottery is not open for entries")]
    LotteryClosed,
    #[msg("Lottery has reached the maximum number of players")]
    LotteryFull,
    #[msg("Upkeep conditions are not met")]
    UpkeepNotNeeded,
    #[msg("Request id does not match the pending draw")]
    UnknownRequest,
    #[msg("Fulfillment carried no random words")]
    MissingRandomWords,
    #[msg("Only the configured coordinator can fulfill randomness")]
    OnlyCoordinatorCanFulfill,
    #[msg("Winner account does not match the drawn player")]
    WinnerAccountMismatch,
    #[msg("Prize transfer to the winner failed")]
    PayoutFailed,
    #[msg("Pool transfer failed")]
    TransferFailed,
    #[msg("Only the lottery authority can do this")]
    NotAuthority,
    #[msg("No draw is pending")]
    DrawNotPending,
    #[msg("Pending draw has not timed out yet")]
    DrawNotStale,
    #[msg("Player index is out of range")]
    PlayerIndexOutOfRange,
    #[msg("Entrance fee must cover the rent-exempt minimum of an account")]
    EntranceFeeTooLow,
    #[msg("Interval must be greater than zero")]
    InvalidInterval,
    #[msg("Callback gas limit is zero or above the maximum allowed")]
    InvalidCallbackGasLimit,
}
