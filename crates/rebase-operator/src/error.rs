use std::path::PathBuf;

use crate::xdr;

/// Errors from building, loading or checking claim trees.
#[derive(Debug, thiserror::Error)]
pub enum OperatorError {
    #[error("invalid address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: xdr::Error,
    },
    #[error("xdr encoding failed: {0}")]
    Xdr(#[from] xdr::Error),
    #[error("claim {index} is malformed: {reason}")]
    MalformedClaim { index: usize, reason: &'static str },
    #[error("claim tree has no leaves")]
    EmptyTree,
    #[error("leaf index {index} out of range for {len} leaves")]
    LeafOutOfRange { index: usize, len: usize },
    #[error("pool amount {0} is negative")]
    NegativePool(i128),
    #[error("carried amount {amount} for {account} is negative")]
    NegativeCarry { account: String, amount: i128 },
    #[error("account {account} appears more than once under one root")]
    DuplicateAccount { account: String },
    #[error("total weight is zero")]
    ZeroWeight,
    #[error("share computation overflowed")]
    Overflow,
    #[error("invalid hash {0:?}")]
    InvalidHash(String),
    #[error("proof for claim {index} does not verify")]
    ProofMismatch { index: usize },
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
