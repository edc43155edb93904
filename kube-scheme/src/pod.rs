//! The pod-template defaulting collaborator.
//!
//! Kind defaulters never reach into the embedded pod spec themselves; once a kind's own
//! defaults have been applied, the [`Scheme`](crate::Scheme) hands the kind's template to a
//! [`PodTemplateDefaulter`] and treats its result as final.
use k8s_openapi::{
    api::core::v1::{Container, PodSecurityContext, PodTemplateSpec},
    apimachinery::pkg::api::resource::Quantity,
};
use serde::{Deserialize, Serialize};

/// Default DNS policy for pods
pub const DNS_CLUSTER_FIRST: &str = "ClusterFirst";
/// Default restart policy for pods
pub const RESTART_POLICY_ALWAYS: &str = "Always";
/// Default termination grace period for pods, in seconds
pub const DEFAULT_TERMINATION_GRACE_PERIOD_SECONDS: i64 = 30;

/// Defaults the pod-level fields of an embedded template.
///
/// Implementations must be idempotent: defaulting an already defaulted template is a no-op.
pub trait PodTemplateDefaulter: Send + Sync {
    /// Fill in omitted pod-level fields of `template` in place
    fn default_pod_template(&self, template: &mut PodTemplateSpec);
}

/// The stock pod defaults.
///
/// Sets the DNS policy, restart policy, an empty security context and the termination grace
/// period when they are absent. Container resources are left alone: requests are never
/// derived from limits.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PodDefaults {
    /// DNS policy applied when the pod spec names none
    pub dns_policy: String,
    /// Restart policy applied when the pod spec names none
    pub restart_policy: String,
    /// Grace period applied when the pod spec names none
    pub termination_grace_period_seconds: i64,
}

impl Default for PodDefaults {
    fn default() -> Self {
        Self {
            dns_policy: DNS_CLUSTER_FIRST.into(),
            restart_policy: RESTART_POLICY_ALWAYS.into(),
            termination_grace_period_seconds: DEFAULT_TERMINATION_GRACE_PERIOD_SECONDS,
        }
    }
}

impl PodTemplateDefaulter for PodDefaults {
    fn default_pod_template(&self, template: &mut PodTemplateSpec) {
        let spec = template.spec.get_or_insert_with(Default::default);
        spec.dns_policy.get_or_insert_with(|| self.dns_policy.clone());
        spec.restart_policy
            .get_or_insert_with(|| self.restart_policy.clone());
        spec.security_context
            .get_or_insert_with(PodSecurityContext::default);
        spec.termination_grace_period_seconds
            .get_or_insert(self.termination_grace_period_seconds);
    }
}

/// The request a container makes for `resource`, reading an absent entry as zero.
pub fn requested(container: &Container, resource: &str) -> Quantity {
    container
        .resources
        .as_ref()
        .and_then(|r| r.requests.as_ref())
        .and_then(|requests| requests.get(resource))
        .cloned()
        .unwrap_or_else(|| Quantity("0".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{PodSpec, ResourceRequirements};

    #[test]
    fn fills_missing_pod_fields() {
        let mut template = PodTemplateSpec::default();
        PodDefaults::default().default_pod_template(&mut template);
        let spec = template.spec.unwrap();
        assert_eq!(spec.dns_policy.as_deref(), Some("ClusterFirst"));
        assert_eq!(spec.restart_policy.as_deref(), Some("Always"));
        assert_eq!(spec.security_context, Some(PodSecurityContext::default()));
        assert_eq!(spec.termination_grace_period_seconds, Some(30));
    }

    #[test]
    fn keeps_explicit_pod_fields() {
        let mut template = PodTemplateSpec {
            spec: Some(PodSpec {
                dns_policy: Some("Default".into()),
                restart_policy: Some("Never".into()),
                termination_grace_period_seconds: Some(0),
                ..PodSpec::default()
            }),
            ..PodTemplateSpec::default()
        };
        let defaults = PodDefaults::default();
        defaults.default_pod_template(&mut template);
        let once = template.clone();
        defaults.default_pod_template(&mut template);
        assert_eq!(template, once);
        let spec = template.spec.unwrap();
        assert_eq!(spec.dns_policy.as_deref(), Some("Default"));
        assert_eq!(spec.restart_policy.as_deref(), Some("Never"));
        assert_eq!(spec.termination_grace_period_seconds, Some(0));
    }

    #[test]
    fn requests_are_not_copied_from_limits() {
        let mut template = PodTemplateSpec {
            spec: Some(PodSpec {
                containers: vec![Container {
                    name: "app".into(),
                    resources: Some(ResourceRequirements {
                        limits: Some([("cpu".to_string(), Quantity("100m".into()))].into()),
                        ..ResourceRequirements::default()
                    }),
                    ..Container::default()
                }],
                ..PodSpec::default()
            }),
            ..PodTemplateSpec::default()
        };
        PodDefaults::default().default_pod_template(&mut template);
        let container = &template.spec.unwrap().containers[0];
        assert!(container.resources.as_ref().unwrap().requests.is_none());
        assert_eq!(requested(container, "cpu"), Quantity("0".into()));
    }
}
