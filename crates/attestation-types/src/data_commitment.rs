use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{Buf32, Nonce};

/// Commitment to the data roots of a contiguous range of blocks.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshSerialize, BorshDeserialize, Deserialize, Serialize,
)]
pub struct DataCommitment {
    nonce: Nonce,
    /// First block covered, inclusive.
    begin_block: u64,
    /// Last block covered, exclusive.
    end_block: u64,
    /// Root over the data roots of the covered blocks.
    data_root: Buf32,
    /// Block time the commitment was created at, in unix seconds.
    time: u64,
}

impl DataCommitment {
    pub fn new(nonce: Nonce, begin_block: u64, end_block: u64, data_root: Buf32, time: u64) -> Self {
        Self {
            nonce,
            begin_block,
            end_block,
            data_root,
            time,
        }
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn begin_block(&self) -> u64 {
        self.begin_block
    }

    pub fn end_block(&self) -> u64 {
        self.end_block
    }

    pub fn data_root(&self) -> Buf32 {
        self.data_root
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Number of blocks covered by the commitment.
    pub fn window_len(&self) -> u64 {
        self.end_block.saturating_sub(self.begin_block)
    }
}
