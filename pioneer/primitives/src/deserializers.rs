use serde::{
	de::Error,
	Deserialize,
	Deserializer,
};
use serde_json::Value;
use web3::types::U256;

/// Parse an amount from a JSON value.
///
/// Chain nodes report balances either as JSON numbers, as decimal strings or as `0x` prefixed hex
/// strings depending on their magnitude.
pub fn u256_from_value(value: &Value) -> Option<U256> {
	match value {
		Value::Number(n) => n.as_u64().map(U256::from),
		Value::String(s) =>
			if let Some(hex) = s.strip_prefix("0x") {
				U256::from_str_radix(hex, 16).ok()
			} else {
				U256::from_dec_str(s).ok()
			},
		_ => None,
	}
}

pub fn u256_from_str<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Value::deserialize(deserializer)?;
	u256_from_value(&value).ok_or_else(|| D::Error::custom("Invalid U256"))
}
