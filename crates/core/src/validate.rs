//! Validated command-line inputs: PMC identifiers and contact addresses.
//!
//! Both types can only be built through `parse`, so holding one means the
//! value has already been checked and no network call happens with bad input.

use crate::{CoreError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// A PubMed Central article identifier such as `PMC1312717`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PmcId(String);

impl PmcId {
    pub const PREFIX: &'static str = "PMC";

    pub fn parse(raw: &str) -> Result<Self> {
        let digits = raw.strip_prefix(Self::PREFIX).ok_or_else(|| {
            CoreError::validation("pmc_id", raw, "expected the form PMC<digits>, e.g. PMC1312717")
        })?;

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::validation(
                "pmc_id",
                raw,
                "expected only digits after the PMC prefix",
            ));
        }

        debug!("PMC ID is valid: {}", raw);
        Ok(Self(raw.to_string()))
    }

    /// The digits after the prefix, as Entrez expects them.
    pub fn numeric(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PmcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PmcId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Contact address sent to NCBI with every E-utilities request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self> {
        if !email_regex().is_match(raw) {
            return Err(CoreError::validation(
                "email",
                raw,
                "expected an address of the form name@domain.tld",
            ));
        }
        debug!("Email is valid: {}", raw);
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
