//! Off-chain tooling for the rebase pool contract.
//!
//! The pool only checks Merkle proofs against roots an authority publishes.
//! This crate builds those roots: it splits a reward pool by power, encodes
//! each entitlement as a leaf byte-for-byte identical to the contract's
//! encoding, and emits the root together with one proof per claim.

pub mod claim;
pub mod distribution;
pub mod error;
pub mod manifest;
pub mod tree;

pub use stellar_xdr::curr as xdr;

pub use claim::{Claim, ClaimKind};
pub use error::OperatorError;
pub use manifest::{ClaimManifest, RootBundle, WeightManifest};
pub use tree::ClaimTree;
