//! Built-in API groups.
use crate::{Result, Scheme};

pub mod extensions;

/// Register every built-in kind with `scheme`
pub fn install(scheme: &mut Scheme) -> Result<()> {
    extensions::v1beta1::add_to_scheme(scheme)
}
