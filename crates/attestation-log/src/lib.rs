//! The attestation nonce log.
//!
//! Attestation requests are appended with strictly increasing, gap-free
//! nonces starting at 1, stored once and never rewritten, and eventually
//! pruned from the front once orchestrators no longer need them. The stored
//! nonces always form the window `[last_pruned + 1, latest]`.
//!
//! Mutations only ever run inside a block transition (see [`execute_block`]).
//! Ordering violations there are [`InvariantViolation`]s: the block is aborted
//! and none of its writes reach the committed store. Everything external
//! callers can do goes through [`AttestationQuery`].

mod errors;
mod events;
mod keys;
mod log;
mod pruning;
mod query;
mod transition;

#[cfg(test)]
mod suite;

pub use errors::{InvariantViolation, LogError, LogResult};
pub use events::AttestationEvent;
pub use keys::Counter;
pub use log::AttestationLog;
pub use pruning::{AttestationPruner, PruneOutcome};
pub use query::AttestationQuery;
pub use transition::{execute_block, execute_block_with_codec, BlockOutput, TransitionError};
