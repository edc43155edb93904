//! The `extensions` API group.
//!
//! Types at the root of this module are the internal representations controllers consume.
//! They carry no outstanding defaults: counts are plain integers and update strategies are
//! tagged enums. User-facing versions live in submodules.
use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use crate::labels::Selector;

mod types;
pub use types::*;

pub mod v1beta1;

/// Name of the API group
pub const GROUP_NAME: &str = "extensions";

/// Whether `selector` selects an object carrying `labels`.
///
/// An absent selector selects nothing; an empty one selects everything.
pub fn selects(selector: Option<&LabelSelector>, labels: &BTreeMap<String, String>) -> bool {
    selector.is_some_and(|selector| Selector::from(selector).matches(labels))
}
