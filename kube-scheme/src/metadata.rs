//! Metadata structs shared by every registered kind.
use std::collections::BTreeMap;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use serde::{Deserialize, Serialize};

use crate::gvk::{GroupVersionKind, ParseGroupVersionError};

/// Type information that is flattened into every encoded object
#[derive(Deserialize, Serialize, Clone, Default, Debug, Eq, PartialEq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// The version of the API
    pub api_version: String,

    /// The name of the API
    pub kind: String,
}

impl TypeMeta {
    /// Type information for a registered kind
    pub fn from_gvk(gvk: &GroupVersionKind) -> Self {
        Self {
            api_version: gvk.api_version(),
            kind: gvk.kind.clone(),
        }
    }

    /// Resolve the kind this type information names
    pub fn gvk(&self) -> Result<GroupVersionKind, ParseGroupVersionError> {
        GroupVersionKind::from_api_version(&self.api_version, &self.kind)
    }
}

/// Labels of an object, treating an absent map as empty
pub(crate) fn labels(meta: &ObjectMeta) -> Option<&BTreeMap<String, String>> {
    meta.labels.as_ref().filter(|labels| !labels.is_empty())
}
