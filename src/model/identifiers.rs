//! Core identifier newtypes with smart constructors.
//!
//! All identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.
//!
//! Identifiers are opaque: a `MessageId` is whatever stable id the host
//! surfaces for a rendered message node, and is not guaranteed to resolve
//! to a live record by the time an export happens.

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Opaque identifier for a message surfaced by the host.
///
/// Not guaranteed to correspond to a record the host can still look up;
/// export paths must tolerate a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidMessageId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidMessageId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MessageId::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Identifier for the channel a selection session applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidChannelId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidChannelId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ChannelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ChannelId::new(raw).map_err(serde::de::Error::custom)
    }
}

// ===== Error Types =====

/// Rejected `MessageId` construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidMessageId {
    /// Message ids cannot be empty strings.
    #[error("Message ID cannot be empty")]
    Empty,
}

/// Rejected `ChannelId` construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidChannelId {
    /// Channel ids cannot be empty strings.
    #[error("Channel ID cannot be empty")]
    Empty,
}

// ===== Tests =====
