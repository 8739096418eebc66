/// Lowest cherry a bounty can be created with.
pub const MIN_CHERRY_LIMIT: &str = "minCherryLimit";

/// Lowest funding target of a bounty.
pub const MIN_FUNDING_LIMIT: &str = "minFundingLimit";

/// Largest whitelist of a closed contract.
pub const CLOSED_CONTRACT_SIZE_LIMIT: &str = "closedContractSizeLimit";

/// Lowest stake a work entrant can lock.
pub const MIN_WORK_ENTRANT_STAKE: &str = "minWorkEntrantStake";
