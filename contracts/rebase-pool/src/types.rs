use soroban_sdk::{contracttype, Address, BytesN, Vec};

/// Length of one accrual period in seconds (30 days).
pub const ACCRUAL_PERIOD: u64 = 2_592_000;
/// Accrual periods that make up one year of continuous custody.
pub const PERIODS_PER_YEAR: u32 = 12;
/// Per-second power of a freshly deposited item.
pub const BASE_POWER: u128 = 50_000;
/// Power added per completed accrual period before factor scaling.
pub const BASE_POWER_INCREASE: u128 = 40_909;
/// Denominator for every schedule factor (basis points).
pub const BASE_POINTS: u32 = 10_000;

/// Storage keys for the contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Role holders and asset addresses (instance storage).
    Config,
    /// Set once by `initialize` (instance storage).
    Initialized,
    /// Set once by `launch` (instance storage).
    Launched,
    /// Circuit breaker flag (instance storage).
    Paused,
    /// Current cycle id (instance storage).
    CycleId,
    /// Start timestamp of a cycle, keyed by cycle id (persistent storage).
    CycleStart(u32),
    /// Id the next published root will be stored under (instance storage).
    NextRootId,
    /// Id of the latest root published for the reward asset (instance storage).
    LastRewardRootId,
    /// Levelling schedule versions, oldest first (instance storage).
    Schedule,
    /// Item position record, keyed by item id (persistent storage).
    Position(u32),
    /// Number of accounts holding at least one deposited item.
    DepositorCount,
    /// Depositor at a registry slot.
    DepositorAt(u32),
    /// Registry slot of a depositor.
    DepositorIndex(Address),
    /// Number of items held by an account.
    HeldCount(Address),
    /// Item held by an account at a slot.
    HeldAt(Address, u32),
    /// Slot of an item inside its depositor's held list.
    HeldIndex(u32),
    /// Published Merkle root, keyed by (asset, root id).
    Root(Address, u64),
    /// Latest root id published for an asset while it was the reward asset.
    RewardRoot(Address),
    /// Replay guard, keyed by (account, root hash).
    Claimed(Address, BytesN<32>),
    /// Number of finished custody sessions of an item.
    CustodyCount(u32),
    /// Finished custody session of an item, keyed by (item id, sequence).
    Custody(u32, u32),
}

/// Role holders and asset addresses set at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub authority: Address,
    /// Contract issuing the items that are escrowed for power.
    pub collection: Address,
    /// Distinguished fungible asset whose root publication advances the cycle.
    pub reward_asset: Address,
    pub treasury: Address,
}

/// Custody and power bookkeeping for a single item.
///
/// Created on the first deposit and never removed. `depositor` is `None`
/// while the item is at rest.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub depositor: Option<Address>,
    pub last_deposit_time: u64,
    /// Timestamp the stored accrual state was last advanced to.
    pub last_accrual_time: u64,
    /// Power accrued in the current custody session up to `last_accrual_time`.
    pub accumulated_power: u128,
    /// Power accrued over all finished custody sessions.
    pub cumulative_power: u128,
    /// Seconds left until the current accrual period completes.
    pub remaining_duration: u64,
    /// Stored per-second rate.
    pub power: u128,
    /// One plus the number of completed accrual periods.
    pub level: u32,
}

/// One version of the levelling schedule.
///
/// An accrual period that completes at time `t` levels up under the latest
/// version whose `effective_from` is before `t`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleEpoch {
    pub effective_from: u64,
    /// Per-year increase factors in basis points.
    pub increase: Vec<u32>,
    /// Per-year re-base factors in basis points.
    pub base: Vec<u32>,
}

/// A finished custody session: the item was escrowed over `[from, to)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Custody {
    pub from: u64,
    pub to: u64,
}

/// Read view returned by `token_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenInfo {
    pub accumulated_power: u128,
    pub current_power: u128,
    pub depositor: Option<Address>,
}

/// Asset class of a reward claim.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardKind {
    Fungible = 0,
    NonFungible = 1,
    SemiFungible = 2,
}
