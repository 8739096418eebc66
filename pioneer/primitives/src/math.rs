use rug::{
	integer::Order,
	Integer,
};

use crate::types::TokenAmount;

/// Lift a 256 bit amount into an arbitrary precision integer.
fn to_integer(value: TokenAmount) -> Integer {
	let mut bytes = [0u8; 32];
	value.to_big_endian(&mut bytes);
	Integer::from_digits(&bytes[..], Order::MsfBe)
}

/// Bring an arbitrary precision integer back, saturating at the 256 bit maximum.
fn from_integer(value: Integer) -> TokenAmount {
	let bytes = value.to_digits::<u8>(Order::MsfBe);
	if bytes.len() > 32 {
		return TokenAmount::max_value()
	}
	TokenAmount::from_big_endian(&bytes)
}

/// Share of the bounty cherry refunded to a contributor withdrawing `amount` out of
/// `total_funding`.
///
/// Computed as `cherry * amount / total_funding` without intermediate rounding. A bounty with no
/// funding refunds nothing.
pub fn proportional_cherry(
	cherry: TokenAmount,
	amount: TokenAmount,
	total_funding: TokenAmount,
) -> TokenAmount {
	if total_funding.is_zero() {
		return TokenAmount::zero()
	}

	let product = to_integer(cherry) * to_integer(amount);
	from_integer(product / to_integer(total_funding))
}
