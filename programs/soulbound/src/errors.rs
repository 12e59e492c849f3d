use anchor_lang::prelude::*;

#[error_code]
pub enum SoulboundError {
    // === Authorization ===
    #[msg("Unauthorized: caller is not the authority of this component")]
    Unauthorized,

    #[msg("Invalid authority: cannot transfer authority to the zero address")]
    InvalidAuthority,

    // === Identity Registry ===
    #[msg("Zero address is not allowed")]
    InvalidAddress,

    #[msg("Address has been already used")]
    AddressAlreadyUsed,

    #[msg("Soul does not exist")]
    SoulNotFound,

    #[msg("Address is not assigned to any soul")]
    NotAssigned,

    #[msg("Cannot revoke soul's primary address")]
    CannotRevokePrimary,

    #[msg("Address is not assigned to specified soul")]
    AddressNotMember,

    #[msg("Addresses per soul limit exceeded")]
    LimitExceeded,

    #[msg("Invalid limit: max addresses per soul is out of range")]
    InvalidLimit,

    // === Feature Registry ===
    #[msg("Feature already exists")]
    AlreadyExists,

    #[msg("Specified address is not a contract")]
    NotAContract,

    #[msg("Feature is incompatible")]
    Incompatible,

    #[msg("Feature is not active")]
    NotActive,

    #[msg("Feature is not paused")]
    NotPaused,

    #[msg("Feature does not exist or is paused")]
    FeatureUnavailable,

    #[msg("Soul attribute will not change")]
    NoChange,

    #[msg("Token is already bound to soul")]
    AlreadyBound,

    // === Reward Engine ===
    #[msg("Reward interval starts in future")]
    FutureInterval,

    #[msg("Nothing to withhold")]
    NothingToWithhold,

    #[msg("Sender is not present in souls registry")]
    NotASoul,

    #[msg("Soul is not verified")]
    NotVerified,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("Reward payout cannot be completed")]
    PayoutFailed,

    #[msg("Reward engine is paused")]
    EnginePaused,

    #[msg("Reward engine is not paused")]
    EngineNotPaused,

    #[msg("Reward tiers must be non-empty, ascending and rates must not exceed 100%")]
    InvalidRewardTiers,

    #[msg("Amount attribute does not fit into 128 bits")]
    AmountOutOfRange,

    #[msg("Arithmetic overflow")]
    MathOverflow,

    // === Retro Drop ===
    #[msg("Drop has not been started yet")]
    DropNotStarted,

    // === Accounts ===
    #[msg("Account does not match the expected address")]
    AccountMismatch,
}
