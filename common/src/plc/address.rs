//! # Device Address
//!
//! A controller is addressed by a strict dotted-quad IPv4 string.
//!
//! Parsing is stricter than [`std::net::Ipv4Addr`]'s: the input
//! must be exactly four dot-separated decimal groups of one to three digits,
//! each in `0..=255`, with nothing before or after.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TagError;

/// A validated controller address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    text: String,
    ip: Ipv4Addr,
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }
}

/// Validates `candidate` and returns it unchanged as an [`Address`].
pub fn validate(candidate: &str) -> Result<Address, TagError> {
    let invalid = || TagError::InvalidAddressFormat(candidate.to_string());

    let groups: Vec<&str> = candidate.split('.').collect();
    if groups.len() != 4 {
        return Err(invalid());
    }

    let mut octets = [0u8; 4];
    for (slot, group) in octets.iter_mut().zip(&groups) {
        *slot = parse_octet(group).ok_or_else(invalid)?;
    }

    Ok(Address {
        text: candidate.to_string(),
        ip: Ipv4Addr::from(octets),
    })
}

fn parse_octet(group: &str) -> Option<u8> {
    if group.is_empty() || group.len() > 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse::<u8>().ok()
}

impl FromStr for Address {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.text
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses_are_returned_unchanged() {
        for candidate in ["0.0.0.0", "191.191.191.9", "255.255.255.255", "10.0.0.1", "192.168.001.010"] {
            let address = validate(candidate).unwrap();
            assert_eq!(address.as_str(), candidate);
        }
        assert_eq!(validate("10.0.0.1").unwrap().ip(), Ipv4Addr::new(10, 0, 0, 1));
    }

    #[test]
    fn wrong_octet_count_is_rejected() {
        for candidate in ["", "10", "10.0.0", "10.0.0.1.5", "10..0.1", "10.0.0."] {
            assert!(
                matches!(validate(candidate), Err(TagError::InvalidAddressFormat(_))),
                "{candidate:?} should be rejected"
            );
        }
    }

    #[test]
    fn out_of_range_octets_are_rejected() {
        for candidate in ["256.0.0.1", "10.0.0.300", "1.2.3.1000", "999.999.999.999"] {
            assert!(matches!(validate(candidate), Err(TagError::InvalidAddressFormat(_))));
        }
    }

    #[test]
    fn non_numeric_and_padded_input_is_rejected() {
        for candidate in ["a.b.c.d", "10.0.0.1a", " 10.0.0.1", "10.0.0.1 ", "10.0.-1.1", "10.0.+1.1", "::1"] {
            assert!(matches!(validate(candidate), Err(TagError::InvalidAddressFormat(_))));
        }
    }

    #[test]
    fn from_str_matches_validate() {
        assert!("172.16.4.20".parse::<Address>().is_ok());
        assert!("172.16.4".parse::<Address>().is_err());
    }
}
