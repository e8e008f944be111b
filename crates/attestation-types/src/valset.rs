use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{EvmAddress, Nonce};

/// A validator as seen by the bridge contract: its voting power and the
/// address it signs attestations with.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Arbitrary, BorshSerialize, BorshDeserialize, Deserialize, Serialize,
)]
pub struct BridgeValidator {
    power: u64,
    evm_address: EvmAddress,
}

impl BridgeValidator {
    pub fn new(power: u64, evm_address: EvmAddress) -> Self {
        Self { power, evm_address }
    }

    pub fn power(&self) -> u64 {
        self.power
    }

    pub fn evm_address(&self) -> EvmAddress {
        self.evm_address
    }
}

/// Validator set update request.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshSerialize, BorshDeserialize, Deserialize, Serialize,
)]
pub struct Valset {
    nonce: Nonce,
    members: Vec<BridgeValidator>,
    /// Chain height the set was taken at.
    height: u64,
    /// Block time the set was taken at, in unix seconds.
    time: u64,
}

impl Valset {
    pub fn new(nonce: Nonce, members: Vec<BridgeValidator>, height: u64, time: u64) -> Self {
        Self {
            nonce,
            members,
            height,
            time,
        }
    }

    pub fn nonce(&self) -> Nonce {
        self.nonce
    }

    pub fn members(&self) -> &[BridgeValidator] {
        &self.members
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    /// Sum of the members' powers, saturating.
    pub fn total_power(&self) -> u64 {
        self.members
            .iter()
            .fold(0u64, |acc, m| acc.saturating_add(m.power))
    }
}
