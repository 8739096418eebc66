pub use web3::types::U256;

mod api;
pub use api::*;

mod bounty;
pub use bounty::*;

mod member;
pub use member::*;

mod transaction;
pub use transaction::*;

/// Opaque account handle, an SS58 encoded address as far as the core is concerned.
pub type AccountId = String;

/// Number of blocks a bounty period lasts.
pub type BlockCount = u32;

pub type BountyId = u64;

pub type MemberId = u64;

pub type TokenAmount = U256;
