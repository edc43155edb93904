//! Version `v1beta1` of the `extensions` group.
//!
//! These are the user-facing representations: almost every field is optional, and
//! [`Scheme::apply_defaults`](crate::Scheme::apply_defaults) fills in the omitted ones
//! before an object is converted to its internal form.
use crate::{GroupVersion, Result, Scheme};

mod conversion;
pub use conversion::{DaemonSetConverter, DeploymentConverter, JobConverter, ReplicaSetConverter};

mod defaults;
pub use defaults::{DaemonSetDefaults, DeploymentDefaults, JobDefaults, ReplicaSetDefaults};

mod types;
pub use types::*;

/// Name of this version
pub const VERSION: &str = "v1beta1";

/// Label key used by daemon sets that name none
pub const DEFAULT_DAEMON_SET_UNIQUE_LABEL_KEY: &str = "daemonset.kubernetes.io/podTemplateHash";
/// Label key used by deployments that name none
pub const DEFAULT_DEPLOYMENT_UNIQUE_LABEL_KEY: &str = "pod-template-hash";

/// Strategy type replacing pods incrementally
pub const ROLLING_UPDATE_STRATEGY: &str = "RollingUpdate";
/// Deployment strategy type killing all pods before creating new ones
pub const RECREATE_STRATEGY: &str = "Recreate";
/// Daemon set strategy type replacing pods only once they are deleted
pub const ON_DELETE_STRATEGY: &str = "OnDelete";

/// The group and version of every kind in this module
pub fn group_version() -> GroupVersion {
    GroupVersion::gv(super::GROUP_NAME, VERSION)
}

/// Register every kind of this version with `scheme`
pub fn add_to_scheme(scheme: &mut Scheme) -> Result<()> {
    let gvk = |kind: &str| group_version().with_kind(kind);
    scheme.register(gvk("DaemonSet"), DaemonSetDefaults, DaemonSetConverter)?;
    scheme.register(gvk("Deployment"), DeploymentDefaults, DeploymentConverter)?;
    scheme.register(gvk("Job"), JobDefaults, JobConverter)?;
    scheme.register(gvk("ReplicaSet"), ReplicaSetDefaults, ReplicaSetConverter)?;
    Ok(())
}
