//! Chat room addressing.
//!
//! A room identifier is both the storage key of a message and the input to
//! read authorization:
//!
//! ```text
//! dm:<userA>:<userB>     direct messages between two users
//! group:<groupId>        a group room
//! ```
//!
//! Anything else is an unscoped room that nobody can read.

use std::fmt;

use crate::shared::error::AppError;

const DIRECT_PREFIX: &str = "dm:";
const GROUP_PREFIX: &str = "group:";

/// Parsed room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomId {
    /// Direct room between two users, in the order they appear in the id
    Direct(i64, i64),
    /// Room of a group
    Group(i64),
    /// Unknown addressing scheme, kept verbatim
    Unscoped(String),
}

impl RoomId {
    /// Parse a raw room identifier.
    ///
    /// Known prefixes with malformed numeric parts are rejected with
    /// `INVALID_ARGUMENT`; unknown prefixes parse as `Unscoped`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if let Some(rest) = raw.strip_prefix(DIRECT_PREFIX) {
            let mut parts = rest.split(':');
            let (a, b) = match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) => (parse_id(a, raw)?, parse_id(b, raw)?),
                _ => {
                    return Err(AppError::InvalidArgument(format!(
                        "Malformed direct room id '{}'",
                        raw
                    )))
                }
            };
            return Ok(Self::Direct(a, b));
        }

        if let Some(rest) = raw.strip_prefix(GROUP_PREFIX) {
            return Ok(Self::Group(parse_id(rest, raw)?));
        }

        Ok(Self::Unscoped(raw.to_string()))
    }

    /// Canonical direct room for a pair: the smaller id comes first.
    pub fn direct(a: i64, b: i64) -> Self {
        Self::Direct(a.min(b), a.max(b))
    }

    pub fn group(group_id: i64) -> Self {
        Self::Group(group_id)
    }

    /// Whether `user_id` is one of the two sides of a direct room.
    pub fn is_direct_participant(&self, user_id: i64) -> bool {
        matches!(self, Self::Direct(a, b) if *a == user_id || *b == user_id)
    }
}

fn parse_id(part: &str, raw: &str) -> Result<i64, AppError> {
    part.parse::<i64>()
        .map_err(|_| AppError::InvalidArgument(format!("Malformed room id '{}'", raw)))
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(a, b) => write!(f, "{}{}:{}", DIRECT_PREFIX, a, b),
            Self::Group(id) => write!(f, "{}{}", GROUP_PREFIX, id),
            Self::Unscoped(raw) => f.write_str(raw),
        }
    }
}
