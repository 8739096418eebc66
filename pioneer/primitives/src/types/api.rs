use std::{
	fmt,
	str::FromStr,
};

use serde::{
	de::Error as DeError,
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};
use thiserror::Error;
use ulid::Ulid;

use crate::constants::API_PATH_SEPARATOR;

/// Errors produced while parsing API identifiers.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ApiIdentifierError {
	#[error("Unknown API kind: `{0}`")]
	UnknownKind(String),
	#[error("Invalid API path: `{0}`")]
	InvalidPath(String),
	#[error("Invalid correlation id: `{0}`")]
	InvalidCorrelationId(String),
}

/// The chain API surface a call targets.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKind {
	Derive,
	Query,
	Rpc,
	Tx,
}

impl ApiKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ApiKind::Derive => "derive",
			ApiKind::Query => "query",
			ApiKind::Rpc => "rpc",
			ApiKind::Tx => "tx",
		}
	}
}

impl fmt::Display for ApiKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ApiKind {
	type Err = ApiIdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"derive" => Ok(ApiKind::Derive),
			"query" => Ok(ApiKind::Query),
			"rpc" => Ok(ApiKind::Rpc),
			"tx" => Ok(ApiKind::Tx),
			_ => Err(ApiIdentifierError::UnknownKind(s.to_owned())),
		}
	}
}

/// A `section.method` pair naming a chain API entry, e.g. `bounty.createBounty`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ApiPath {
	pub section: String,
	pub method: String,
}

impl ApiPath {
	pub fn new(section: impl Into<String>, method: impl Into<String>) -> Self {
		Self { section: section.into(), method: method.into() }
	}
}

impl fmt::Display for ApiPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.section, API_PATH_SEPARATOR, self.method)
	}
}

impl FromStr for ApiPath {
	type Err = ApiIdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s.split(API_PATH_SEPARATOR);
		match (parts.next(), parts.next(), parts.next()) {
			(Some(section), Some(method), None) if !section.is_empty() && !method.is_empty() =>
				Ok(Self::new(section, method)),
			_ => Err(ApiIdentifierError::InvalidPath(s.to_owned())),
		}
	}
}

impl Serialize for ApiPath {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

impl<'de> Deserialize<'de> for ApiPath {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(D::Error::custom)
	}
}

/// Opaque token pairing a request with its response.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CorrelationId(Ulid);

impl CorrelationId {
	pub fn new() -> Self {
		Self(Ulid::new())
	}
}

impl Default for CorrelationId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for CorrelationId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for CorrelationId {
	type Err = ApiIdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ulid::from_string(s)
			.map(Self)
			.map_err(|_| ApiIdentifierError::InvalidCorrelationId(s.to_owned()))
	}
}

impl Serialize for CorrelationId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.0.to_string())
	}
}

impl<'de> Deserialize<'de> for CorrelationId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(D::Error::custom)
	}
}
