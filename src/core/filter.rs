//! Selecting which records an aggregation covers.
//!
//! | Filter | Covers |
//! |--------|--------|
//! | [`SenderFilter::Overall`] | Every record; notices only add to the total count |
//! | [`SenderFilter::Sender`] | Records whose sender equals the name exactly |
//!
//! # Examples
//!
//! ```
//! use chatlens::core::filter::SenderFilter;
//!
//! let overall: SenderFilter = "overall".parse().unwrap();
//! assert!(overall.is_overall());
//!
//! let alice: SenderFilter = "Alice".parse().unwrap();
//! assert_eq!(alice.sender_name(), Some("Alice"));
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-sensitive and exact
//! - The text `Overall` (any casing) always means the overall view, so a
//!   participant literally named "Overall" can only be selected with
//!   [`SenderFilter::sender`]

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Text form of the overall view.
pub const OVERALL: &str = "Overall";

/// The scope of one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SenderFilter {
    /// All senders
    #[default]
    Overall,
    /// One sender, matched exactly
    Sender(String),
}

impl SenderFilter {
    /// Creates a filter for one sender without interpreting the sentinel.
    pub fn sender(name: impl Into<String>) -> Self {
        SenderFilter::Sender(name.into())
    }

    /// Returns `true` for the overall view.
    pub fn is_overall(&self) -> bool {
        matches!(self, SenderFilter::Overall)
    }

    /// Returns the selected sender name, if any.
    pub fn sender_name(&self) -> Option<&str> {
        match self {
            SenderFilter::Overall => None,
            SenderFilter::Sender(name) => Some(name),
        }
    }

    /// Returns `true` if `msg` belongs to this scope.
    ///
    /// The overall view accepts notices too; the aggregation engine decides
    /// what they contribute.
    pub fn matches(&self, msg: &Message) -> bool {
        match self {
            SenderFilter::Overall => true,
            SenderFilter::Sender(name) => msg.sender() == Some(name.as_str()),
        }
    }
}

impl FromStr for SenderFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(OVERALL) {
            Ok(SenderFilter::Overall)
        } else {
            Ok(SenderFilter::Sender(s.to_string()))
        }
    }
}

impl From<String> for SenderFilter {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case(OVERALL) {
            SenderFilter::Overall
        } else {
            SenderFilter::Sender(s)
        }
    }
}

impl From<&str> for SenderFilter {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<SenderFilter> for String {
    fn from(filter: SenderFilter) -> Self {
        match filter {
            SenderFilter::Overall => OVERALL.to_string(),
            SenderFilter::Sender(name) => name,
        }
    }
}

impl fmt::Display for SenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderFilter::Overall => f.write_str(OVERALL),
            SenderFilter::Sender(name) => f.write_str(name),
        }
    }
}
