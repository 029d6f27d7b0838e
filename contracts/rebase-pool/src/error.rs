use soroban_sdk::contracterror;

/// Every failure the pool can report. Codes are grouped by hundreds so a
/// caller can branch on the category without a lookup table.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Authorization
    MissingAdminRole = 100,
    MissingAuthorityRole = 101,

    // Pause state
    ContractPaused = 200,
    ContractNotPaused = 201,
    NotLaunched = 202,

    // Validation
    NotInitialized = 300,
    EmptyItemList = 301,
    ArrayLengthMismatch = 302,
    InvalidAmount = 303,
    NotItemOwner = 304,
    ItemAlreadyDeposited = 305,
    NotDepositor = 306,
    UnknownRoot = 307,
    InvalidProof = 308,
    IndexOutOfBounds = 309,
    ScheduleIndexOutOfRange = 310,
    UnknownItem = 311,

    // Replay
    AlreadyInitialized = 400,
    AlreadyLaunched = 401,
    AlreadyClaimed = 402,
    /// A newer reward root carries the unclaimed amount forward.
    RootSuperseded = 403,
}

/// Coarse failure category.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Missing role; not retriable without a grant.
    Authorization,
    /// Pause precondition violated; await or trigger the right state.
    PausedState,
    /// Malformed input; not retriable without corrected input.
    Validation,
    /// Already done; safe to treat as success.
    Replay,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match *self as u32 / 100 {
            1 => ErrorKind::Authorization,
            2 => ErrorKind::PausedState,
            4 => ErrorKind::Replay,
            _ => ErrorKind::Validation,
        }
    }
}
