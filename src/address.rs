use core::fmt::{self, Debug, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ADDRESS_LEN: usize = 20;

/// An account address. Rendered and parsed as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LEN]);

#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("address is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid length: expected: {}, got: {}", ADDRESS_LEN, .0)]
    InvalidLength(usize),
}

impl Address {
    pub fn from_bytes(data: &[u8]) -> Result<Self, AddressError> {
        let bytes: &[u8; ADDRESS_LEN] = data
            .try_into()
            .map_err(|_| AddressError::InvalidLength(data.len()))?;
        Ok(Self(*bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(val: [u8; ADDRESS_LEN]) -> Self {
        Self(val)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        Self::from_bytes(&hex::decode(s)?)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the first four bytes are enough to tell accounts apart in logs
        write!(f, "A{}", hex::encode(&self.0[..4]))
    }
}
