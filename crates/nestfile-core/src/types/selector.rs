//! Caller-supplied entity references.
//!
//! External identifiers arrive as path segments that are either the
//! literal `default` sentinel or a public UUID. Parsing them into a
//! selector once, at the boundary, keeps the sentinel handling out of
//! every handler and service method signature.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use crate::types::id::{FolderId, UserId};

/// The sentinel token that resolves to the caller's own entity.
pub const DEFAULT_SENTINEL: &str = "default";

/// Reference to a folder: the caller's root, or an explicit public id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderSelector {
    /// The caller's root folder.
    Default,
    /// A folder addressed by public id.
    Id(FolderId),
}

impl FromStr for FolderSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DEFAULT_SENTINEL {
            return Ok(Self::Default);
        }
        s.parse::<FolderId>()
            .map(Self::Id)
            .map_err(|_| AppError::validation(format!("Malformed folder identifier '{s}'")))
    }
}

impl fmt::Display for FolderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "{DEFAULT_SENTINEL}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<FolderId> for FolderSelector {
    fn from(id: FolderId) -> Self {
        Self::Id(id)
    }
}

/// Reference to a user: the caller themselves, or an explicit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSelector {
    /// The authenticated caller.
    Default,
    /// A user addressed by key.
    Id(UserId),
}

impl FromStr for UserSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == DEFAULT_SENTINEL {
            return Ok(Self::Default);
        }
        s.parse::<UserId>()
            .map(Self::Id)
            .map_err(|_| AppError::validation(format!("Malformed user identifier '{s}'")))
    }
}

impl fmt::Display for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "{DEFAULT_SENTINEL}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}
