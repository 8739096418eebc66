use serde::Serializer;
use web3::types::U256;

/// Serialize an amount as a decimal string.
pub fn u256_to_str<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_str(&value.to_string())
}

