//! Sorted-pair Merkle tree over claim leaves.
//!
//! Interior nodes hash the smaller child first, so proofs are plain sibling
//! lists. A node without a sibling is promoted to the next level unchanged.

use sha2::{Digest, Sha256};

use crate::claim::Claim;
use crate::error::OperatorError;

pub type Node = [u8; 32];

pub fn hash_pair(a: &Node, b: &Node) -> Node {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(low);
    hasher.update(high);
    hasher.finalize().into()
}

/// Fold `proof` over `leaf` and compare against `root`.
pub fn verify(proof: &[Node], root: &Node, leaf: Node) -> bool {
    proof.iter().fold(leaf, |node, sibling| hash_pair(&node, sibling)) == *root
}

#[derive(Clone, Debug)]
pub struct ClaimTree {
    /// `levels[0]` holds the leaves, the last level holds only the root.
    levels: Vec<Vec<Node>>,
    root: Node,
}

impl ClaimTree {
    pub fn from_leaves(leaves: Vec<Node>) -> Result<Self, OperatorError> {
        let Some(&first) = leaves.first() else {
            return Err(OperatorError::EmptyTree);
        };
        let mut root = first;
        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Node> = level
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hash_pair(a, b),
                    _ => pair[0],
                })
                .collect();
            root = next[0];
            levels.push(next);
        }
        Ok(Self { levels, root })
    }

    /// Validate every claim and build the tree of their leaves under
    /// `root_id`, in input order.
    pub fn build(claims: &[Claim], root_id: u64) -> Result<Self, OperatorError> {
        let leaves = claims
            .iter()
            .enumerate()
            .map(|(index, claim)| {
                claim
                    .check_shape()
                    .map_err(|reason| OperatorError::MalformedClaim { index, reason })?;
                claim.leaf(root_id)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tree = Self::from_leaves(leaves)?;
        tracing::debug!(
            claims = claims.len(),
            depth = tree.levels.len(),
            root_id,
            "built claim tree"
        );
        Ok(tree)
    }

    pub fn root(&self) -> Node {
        self.root
    }

    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn leaf(&self, index: usize) -> Option<Node> {
        self.levels[0].get(index).copied()
    }

    /// Sibling path from leaf `index` to the root.
    pub fn proof(&self, index: usize) -> Result<Vec<Node>, OperatorError> {
        if index >= self.len() {
            return Err(OperatorError::LeafOutOfRange {
                index,
                len: self.len(),
            });
        }
        let mut proof = Vec::with_capacity(self.levels.len());
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(position ^ 1) {
                proof.push(*sibling);
            }
            position /= 2;
        }
        Ok(proof)
    }
}
