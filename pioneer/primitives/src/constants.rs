/// Separator between the section and the method of an API path.
pub const API_PATH_SEPARATOR: char = '.';

/// Pallet section of the bounty extrinsics and constants.
pub const BOUNTY_SECTION: &str = "bounty";

/// Name of the extrinsic creating a new bounty.
pub const CREATE_BOUNTY_METHOD: &str = "createBounty";
