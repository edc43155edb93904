//! Field mappings between extensions/v1beta1 and the internal representations
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::{types as v1beta1, ON_DELETE_STRATEGY, RECREATE_STRATEGY, ROLLING_UPDATE_STRATEGY};
use crate::{apis::extensions as internal, conversion::Converter, error::ConversionError};

/// An absent rolling update parameter reads as zero
fn param(value: Option<&IntOrString>) -> IntOrString {
    value.cloned().unwrap_or(IntOrString::Int(0))
}

fn unset_strategy(field: &str) -> ConversionError {
    ConversionError::new(field, "strategy type is not set")
}

fn unused_deployment_params(
    rolling: Option<&v1beta1::RollingUpdateDeployment>,
) -> Option<internal::UnusedRollingUpdate> {
    rolling.map(|r| internal::UnusedRollingUpdate {
        max_unavailable: r.max_unavailable.clone(),
        max_surge: r.max_surge.clone(),
    })
}

fn unused_daemon_set_params(
    rolling: Option<&v1beta1::RollingUpdateDaemonSet>,
) -> Option<internal::UnusedRollingUpdate> {
    rolling.map(|r| internal::UnusedRollingUpdate {
        max_unavailable: r.max_unavailable.clone(),
        max_surge: None,
    })
}

fn deployment_params(unused: &internal::UnusedRollingUpdate) -> v1beta1::RollingUpdateDeployment {
    v1beta1::RollingUpdateDeployment {
        max_unavailable: unused.max_unavailable.clone(),
        max_surge: unused.max_surge.clone(),
    }
}

fn daemon_set_params(unused: &internal::UnusedRollingUpdate) -> v1beta1::RollingUpdateDaemonSet {
    v1beta1::RollingUpdateDaemonSet {
        max_unavailable: unused.max_unavailable.clone(),
    }
}

/// Converts [`v1beta1::DaemonSet`] from and to [`internal::DaemonSet`]
#[derive(Clone, Copy, Debug, Default)]
pub struct DaemonSetConverter;

impl Converter for DaemonSetConverter {
    type External = v1beta1::DaemonSet;
    type Internal = internal::DaemonSet;

    fn to_internal(&self, ds: &v1beta1::DaemonSet) -> Result<internal::DaemonSet, ConversionError> {
        let strategy = &ds.spec.update_strategy;
        let update_strategy = match strategy.type_.as_deref() {
            Some(ROLLING_UPDATE_STRATEGY) => {
                let rolling = strategy.rolling_update.as_ref();
                internal::DaemonSetUpdateStrategy::RollingUpdate(internal::RollingUpdateDaemonSet {
                    max_unavailable: param(rolling.and_then(|r| r.max_unavailable.as_ref())),
                })
            }
            Some(ON_DELETE_STRATEGY) => internal::DaemonSetUpdateStrategy::OnDelete {
                rolling_update: unused_daemon_set_params(strategy.rolling_update.as_ref()),
            },
            None | Some("") => return Err(unset_strategy("spec.updateStrategy.type")),
            Some(other) => internal::DaemonSetUpdateStrategy::Other {
                name: other.to_string(),
                rolling_update: unused_daemon_set_params(strategy.rolling_update.as_ref()),
            },
        };
        Ok(internal::DaemonSet {
            metadata: ds.metadata.clone(),
            spec: internal::DaemonSetSpec {
                selector: ds.spec.selector.clone(),
                template: ds.spec.template.clone(),
                update_strategy,
                unique_label_key: ds.spec.unique_label_key.clone(),
            },
            status: ds.status.as_ref().map(|s| internal::DaemonSetStatus {
                current_number_scheduled: s.current_number_scheduled,
                number_misscheduled: s.number_misscheduled,
                desired_number_scheduled: s.desired_number_scheduled,
            }),
        })
    }

    fn to_external(&self, ds: &internal::DaemonSet) -> Result<v1beta1::DaemonSet, ConversionError> {
        let update_strategy = match &ds.spec.update_strategy {
            internal::DaemonSetUpdateStrategy::RollingUpdate(rolling) => v1beta1::DaemonSetUpdateStrategy {
                type_: Some(ROLLING_UPDATE_STRATEGY.into()),
                rolling_update: Some(v1beta1::RollingUpdateDaemonSet {
                    max_unavailable: Some(rolling.max_unavailable.clone()),
                }),
            },
            internal::DaemonSetUpdateStrategy::OnDelete { rolling_update } => {
                v1beta1::DaemonSetUpdateStrategy {
                    type_: Some(ON_DELETE_STRATEGY.into()),
                    rolling_update: rolling_update.as_ref().map(daemon_set_params),
                }
            }
            internal::DaemonSetUpdateStrategy::Other { name, rolling_update } => {
                v1beta1::DaemonSetUpdateStrategy {
                    type_: Some(name.clone()),
                    rolling_update: rolling_update.as_ref().map(daemon_set_params),
                }
            }
        };
        Ok(v1beta1::DaemonSet {
            metadata: ds.metadata.clone(),
            spec: v1beta1::DaemonSetSpec {
                selector: ds.spec.selector.clone(),
                template: ds.spec.template.clone(),
                update_strategy,
                unique_label_key: ds.spec.unique_label_key.clone(),
            },
            status: ds.status.as_ref().map(|s| v1beta1::DaemonSetStatus {
                current_number_scheduled: s.current_number_scheduled,
                number_misscheduled: s.number_misscheduled,
                desired_number_scheduled: s.desired_number_scheduled,
            }),
        })
    }
}

/// Converts [`v1beta1::Deployment`] from and to [`internal::Deployment`]
#[derive(Clone, Copy, Debug, Default)]
pub struct DeploymentConverter;

impl Converter for DeploymentConverter {
    type External = v1beta1::Deployment;
    type Internal = internal::Deployment;

    fn to_internal(&self, d: &v1beta1::Deployment) -> Result<internal::Deployment, ConversionError> {
        let strategy = &d.spec.strategy;
        let strategy = match strategy.type_.as_deref() {
            Some(ROLLING_UPDATE_STRATEGY) => {
                let rolling = strategy.rolling_update.as_ref();
                internal::DeploymentStrategy::RollingUpdate(internal::RollingUpdateDeployment {
                    max_unavailable: param(rolling.and_then(|r| r.max_unavailable.as_ref())),
                    max_surge: param(rolling.and_then(|r| r.max_surge.as_ref())),
                })
            }
            Some(RECREATE_STRATEGY) => internal::DeploymentStrategy::Recreate {
                rolling_update: unused_deployment_params(strategy.rolling_update.as_ref()),
            },
            None | Some("") => return Err(unset_strategy("spec.strategy.type")),
            Some(other) => internal::DeploymentStrategy::Other {
                name: other.to_string(),
                rolling_update: unused_deployment_params(strategy.rolling_update.as_ref()),
            },
        };
        Ok(internal::Deployment {
            metadata: d.metadata.clone(),
            spec: internal::DeploymentSpec {
                replicas: d.spec.replicas.unwrap_or_default(),
                selector: d.spec.selector.clone(),
                template: d.spec.template.clone(),
                strategy,
                min_ready_seconds: d.spec.min_ready_seconds,
                revision_history_limit: d.spec.revision_history_limit,
                paused: d.spec.paused,
                rollback_to: d.spec.rollback_to.as_ref().map(|r| internal::RollbackConfig {
                    revision: r.revision,
                }),
                unique_label_key: d.spec.unique_label_key.clone(),
            },
            status: d.status.as_ref().map(|s| internal::DeploymentStatus {
                observed_generation: s.observed_generation,
                replicas: s.replicas,
                updated_replicas: s.updated_replicas,
                available_replicas: s.available_replicas,
                unavailable_replicas: s.unavailable_replicas,
            }),
        })
    }

    fn to_external(&self, d: &internal::Deployment) -> Result<v1beta1::Deployment, ConversionError> {
        let strategy = match &d.spec.strategy {
            internal::DeploymentStrategy::Recreate { rolling_update } => v1beta1::DeploymentStrategy {
                type_: Some(RECREATE_STRATEGY.into()),
                rolling_update: rolling_update.as_ref().map(deployment_params),
            },
            internal::DeploymentStrategy::Other { name, rolling_update } => v1beta1::DeploymentStrategy {
                type_: Some(name.clone()),
                rolling_update: rolling_update.as_ref().map(deployment_params),
            },
            internal::DeploymentStrategy::RollingUpdate(rolling) => v1beta1::DeploymentStrategy {
                type_: Some(ROLLING_UPDATE_STRATEGY.into()),
                rolling_update: Some(v1beta1::RollingUpdateDeployment {
                    max_unavailable: Some(rolling.max_unavailable.clone()),
                    max_surge: Some(rolling.max_surge.clone()),
                }),
            },
        };
        Ok(v1beta1::Deployment {
            metadata: d.metadata.clone(),
            spec: v1beta1::DeploymentSpec {
                replicas: Some(d.spec.replicas),
                selector: d.spec.selector.clone(),
                template: d.spec.template.clone(),
                strategy,
                min_ready_seconds: d.spec.min_ready_seconds,
                revision_history_limit: d.spec.revision_history_limit,
                paused: d.spec.paused,
                rollback_to: d.spec.rollback_to.as_ref().map(|r| v1beta1::RollbackConfig {
                    revision: r.revision,
                }),
                unique_label_key: d.spec.unique_label_key.clone(),
            },
            status: d.status.as_ref().map(|s| v1beta1::DeploymentStatus {
                observed_generation: s.observed_generation,
                replicas: s.replicas,
                updated_replicas: s.updated_replicas,
                available_replicas: s.available_replicas,
                unavailable_replicas: s.unavailable_replicas,
            }),
        })
    }
}

/// Converts [`v1beta1::Job`] from and to [`internal::Job`]
#[derive(Clone, Copy, Debug, Default)]
pub struct JobConverter;

impl Converter for JobConverter {
    type External = v1beta1::Job;
    type Internal = internal::Job;

    fn to_internal(&self, job: &v1beta1::Job) -> Result<internal::Job, ConversionError> {
        Ok(internal::Job {
            metadata: job.metadata.clone(),
            spec: internal::JobSpec {
                parallelism: job.spec.parallelism.unwrap_or_default(),
                completions: job.spec.completions.unwrap_or_default(),
                active_deadline_seconds: job.spec.active_deadline_seconds,
                selector: job.spec.selector.clone(),
                template: job.spec.template.clone(),
            },
            status: job.status.as_ref().map(|s| internal::JobStatus {
                conditions: s
                    .conditions
                    .iter()
                    .map(|c| internal::JobCondition {
                        type_: c.type_.clone(),
                        status: c.status.clone(),
                        last_probe_time: c.last_probe_time.clone(),
                        last_transition_time: c.last_transition_time.clone(),
                        reason: c.reason.clone(),
                        message: c.message.clone(),
                    })
                    .collect(),
                start_time: s.start_time.clone(),
                completion_time: s.completion_time.clone(),
                active: s.active,
                succeeded: s.succeeded,
                failed: s.failed,
            }),
        })
    }

    fn to_external(&self, job: &internal::Job) -> Result<v1beta1::Job, ConversionError> {
        Ok(v1beta1::Job {
            metadata: job.metadata.clone(),
            spec: v1beta1::JobSpec {
                parallelism: Some(job.spec.parallelism),
                completions: Some(job.spec.completions),
                active_deadline_seconds: job.spec.active_deadline_seconds,
                selector: job.spec.selector.clone(),
                template: job.spec.template.clone(),
            },
            status: job.status.as_ref().map(|s| v1beta1::JobStatus {
                conditions: s
                    .conditions
                    .iter()
                    .map(|c| v1beta1::JobCondition {
                        type_: c.type_.clone(),
                        status: c.status.clone(),
                        last_probe_time: c.last_probe_time.clone(),
                        last_transition_time: c.last_transition_time.clone(),
                        reason: c.reason.clone(),
                        message: c.message.clone(),
                    })
                    .collect(),
                start_time: s.start_time.clone(),
                completion_time: s.completion_time.clone(),
                active: s.active,
                succeeded: s.succeeded,
                failed: s.failed,
            }),
        })
    }
}

/// Converts [`v1beta1::ReplicaSet`] from and to [`internal::ReplicaSet`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplicaSetConverter;

impl Converter for ReplicaSetConverter {
    type External = v1beta1::ReplicaSet;
    type Internal = internal::ReplicaSet;

    fn to_internal(&self, rs: &v1beta1::ReplicaSet) -> Result<internal::ReplicaSet, ConversionError> {
        Ok(internal::ReplicaSet {
            metadata: rs.metadata.clone(),
            spec: internal::ReplicaSetSpec {
                replicas: rs.spec.replicas.unwrap_or_default(),
                selector: rs.spec.selector.clone(),
                template: rs.spec.template.clone(),
            },
            status: rs.status.as_ref().map(|s| internal::ReplicaSetStatus {
                replicas: s.replicas,
                fully_labeled_replicas: s.fully_labeled_replicas,
                observed_generation: s.observed_generation,
            }),
        })
    }

    fn to_external(&self, rs: &internal::ReplicaSet) -> Result<v1beta1::ReplicaSet, ConversionError> {
        Ok(v1beta1::ReplicaSet {
            metadata: rs.metadata.clone(),
            spec: v1beta1::ReplicaSetSpec {
                replicas: Some(rs.spec.replicas),
                selector: rs.spec.selector.clone(),
                template: rs.spec.template.clone(),
            },
            status: rs.status.as_ref().map(|s| v1beta1::ReplicaSetStatus {
                replicas: s.replicas,
                fully_labeled_replicas: s.fully_labeled_replicas,
                observed_generation: s.observed_generation,
            }),
        })
    }
}
