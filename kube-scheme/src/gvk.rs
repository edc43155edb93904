//! Type information structs identifying registered kinds.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reserved version under which internal representations are registered.
pub const INTERNAL_VERSION: &str = "__internal";

/// An `apiVersion` string that is not `group/version` or a bare version
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid apiVersion {0:?}")]
pub struct ParseGroupVersionError(pub String);

/// A kind within an API group, independent of version
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKind {
    /// API group, empty for the core group
    pub group: String,
    /// Kind name
    pub kind: String,
}

impl GroupKind {
    /// Build from a group and a kind
    pub fn gk(group: &str, kind: &str) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Pin this kind to `version`
    pub fn with_version(&self, version: &str) -> GroupVersionKind {
        GroupVersionKind::gvk(&self.group, version, &self.kind)
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.group.as_str() {
            "" => f.write_str(&self.kind),
            group => write!(f, "{}.{group}", self.kind),
        }
    }
}

/// A registered kind: group, version and kind name
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupVersionKind {
    /// API group, empty for the core group
    pub group: String,
    /// Version within the group
    pub version: String,
    /// Kind name
    pub kind: String,
}

impl GroupVersionKind {
    /// Build from a group, a version and a kind
    pub fn gvk(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Resolve an `apiVersion` string and a kind name
    pub fn from_api_version(api_version: &str, kind: &str) -> Result<Self, ParseGroupVersionError> {
        Ok(api_version.parse::<GroupVersion>()?.with_kind(kind))
    }

    /// The group and version of this kind
    pub fn group_version(&self) -> GroupVersion {
        GroupVersion::gv(&self.group, &self.version)
    }

    /// The `apiVersion` written into encoded objects of this kind
    pub fn api_version(&self) -> String {
        self.group_version().api_version()
    }

    /// The group and kind, dropping the version
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::gk(&self.group, &self.kind)
    }

    /// The same kind addressed under the internal version
    pub fn internal(&self) -> Self {
        self.group_kind().with_version(INTERNAL_VERSION)
    }

    /// Whether this identifies an internal representation
    pub fn is_internal(&self) -> bool {
        self.version == INTERNAL_VERSION
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// A version of an API group
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersion {
    /// API group, empty for the core group
    pub group: String,
    /// Version within the group
    pub version: String,
}

impl GroupVersion {
    /// Build from a group and a version
    pub fn gv(group: &str, version: &str) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
        }
    }

    /// Name a kind of this group version
    pub fn with_kind(self, kind: &str) -> GroupVersionKind {
        GroupVersionKind {
            group: self.group,
            version: self.version,
            kind: kind.into(),
        }
    }

    /// `group/version`, or the bare version for the core group
    pub fn api_version(&self) -> String {
        match self.group.as_str() {
            "" => self.version.clone(),
            group => format!("{group}/{}", self.version),
        }
    }
}

impl FromStr for GroupVersion {
    type Err = ParseGroupVersionError;

    fn from_str(api_version: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseGroupVersionError(api_version.into());
        match api_version.split_once('/') {
            // core group
            None if !api_version.is_empty() => Ok(Self::gv("", api_version)),
            Some((group, version)) if !group.is_empty() && !version.is_empty() && !version.contains('/') => {
                Ok(Self::gv(group, version))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_version())
    }
}
