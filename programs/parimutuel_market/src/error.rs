use anchor_lang::prelude::*;

#[error_code]
pub enum MarketError {
    // not found
    #[msg("Market not found or not initialized")]
    MarketNotFound,

    // invalid argument
    #[msg("Invalid oracle address")]
    InvalidOracle,
    #[msg("Cannot create markets that close in the past")]
    ClosingTimeInPast,
    #[msg("Market needs at least 2 outcomes")]
    NotEnoughOutcomes,
    #[msg("Market has too many outcomes")]
    TooManyOutcomes,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Outcome index out of range")]
    InvalidOutcome,
    #[msg("Invalid sender")]
    InvalidSender,
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // state conflict
    #[msg("Market is not open")]
    MarketNotOpen,
    #[msg("Only ended markets can be resolved")]
    MarketNotEnded,
    #[msg("Market is not resolved")]
    MarketNotResolved,
    #[msg("Dispute window has elapsed")]
    DisputeWindowClosed,
    #[msg("Market not in dispute")]
    MarketNotDisputed,
    #[msg("Market must be closed")]
    MarketNotClosed,
    #[msg("Market must be canceled")]
    MarketNotCancelled,
    #[msg("Market already canceled")]
    AlreadyCancelled,
    #[msg("Resolved markets cannot be canceled without dispute")]
    CannotCancelResolved,
    #[msg("Closed markets can't be canceled anymore")]
    CannotCancelClosed,
    #[msg("Outcome is not the resolved outcome")]
    NotWinningOutcome,

    // unauthorized
    #[msg("Sender not oracle")]
    NotOracle,
    #[msg("Must be market creator")]
    NotCreator,
    #[msg("Only creator or oracle can cancel an open market")]
    NotCreatorOrOracle,
    #[msg("No stake for dispute")]
    NoStakeForDispute,
    #[msg("Stake position belongs to another account")]
    NotStakeOwner,

    // insufficient balance
    #[msg("Amount exceeds current stake")]
    ExceedsStake,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,
    #[msg("No fees to collect")]
    NoFeesToCollect,
}

/// Coarse failure class a client can branch on without matching every variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    StateConflict,
    Unauthorized,
    InsufficientBalance,
}

impl MarketError {
    pub fn kind(&self) -> ErrorKind {
        use MarketError::*;

        match self {
            MarketNotFound => ErrorKind::NotFound,
            InvalidOracle | ClosingTimeInPast | NotEnoughOutcomes | TooManyOutcomes
            | ZeroAmount | InvalidOutcome | InvalidSender | MathOverflow => {
                ErrorKind::InvalidArgument
            }
            MarketNotOpen | MarketNotEnded | MarketNotResolved | DisputeWindowClosed
            | MarketNotDisputed | MarketNotClosed | MarketNotCancelled | AlreadyCancelled
            | CannotCancelResolved | CannotCancelClosed | NotWinningOutcome => {
                ErrorKind::StateConflict
            }
            NotOracle | NotCreator | NotCreatorOrOracle | NoStakeForDispute | NotStakeOwner => {
                ErrorKind::Unauthorized
            }
            ExceedsStake | NothingToWithdraw | NoFeesToCollect => ErrorKind::InsufficientBalance,
        }
    }
}
