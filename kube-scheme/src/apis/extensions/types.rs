//! Internal representations shared by every extensions version
use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::PodTemplateSpec,
    apimachinery::pkg::{
        apis::meta::v1::{LabelSelector, ObjectMeta, Time},
        util::intstr::IntOrString,
    },
};
use serde::{Deserialize, Serialize};

use super::selects;

/// DaemonSet runs one copy of a pod on every eligible node
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSet {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: DaemonSetSpec,
    /// Most recently observed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DaemonSetStatus>,
}

/// Desired behaviour of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetSpec {
    /// Query over the pods the daemon set manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template to run on each node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    /// How existing pods are replaced
    pub update_strategy: DaemonSetUpdateStrategy,
    /// Label key distinguishing pods of different template revisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_label_key: Option<String>,
}

impl DaemonSetSpec {
    /// Whether this daemon set manages a pod labelled `labels`
    pub fn selects(&self, labels: &BTreeMap<String, String>) -> bool {
        selects(self.selector.as_ref(), labels)
    }
}

/// Replacement strategy of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonSetUpdateStrategy {
    /// Replace old pods incrementally
    RollingUpdate(RollingUpdateDaemonSet),
    /// Replace old pods only once they are deleted
    OnDelete {
        /// Rolling update parameters written next to this strategy
        #[serde(default, rename = "rollingUpdate", skip_serializing_if = "Option::is_none")]
        rolling_update: Option<UnusedRollingUpdate>,
    },
    /// A strategy type without built-in behaviour, carried as written
    Other {
        /// The strategy type
        name: String,
        /// Rolling update parameters written next to this strategy
        #[serde(default, rename = "rollingUpdate", skip_serializing_if = "Option::is_none")]
        rolling_update: Option<UnusedRollingUpdate>,
    },
}

/// Parameters of a rolling daemon set update
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateDaemonSet {
    /// Pods that may be unavailable during the update, absolute or a percentage
    pub max_unavailable: IntOrString,
}

/// Observed state of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetStatus {
    /// Nodes running at least one daemon pod that should run it
    pub current_number_scheduled: i32,
    /// Nodes running a daemon pod that should not run it
    pub number_misscheduled: i32,
    /// Nodes that should run the daemon pod
    pub desired_number_scheduled: i32,
}

/// Deployment declares updates for pods and replica sets
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: DeploymentSpec,
    /// Most recently observed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
}

/// Desired behaviour of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Number of desired pods
    pub replicas: i32,
    /// Query over the pods the deployment manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    pub template: PodTemplateSpec,
    /// How existing pods are replaced
    pub strategy: DeploymentStrategy,
    /// Seconds a new pod must be ready before it counts as available
    pub min_ready_seconds: i32,
    /// Old replica sets to retain for rollback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    /// Whether the deployment is paused
    pub paused: bool,
    /// A requested rollback, cleared once it is performed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback_to: Option<RollbackConfig>,
    /// Label key distinguishing pods of different template revisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_label_key: Option<String>,
}

impl DeploymentSpec {
    /// Whether this deployment manages a pod labelled `labels`
    pub fn selects(&self, labels: &BTreeMap<String, String>) -> bool {
        selects(self.selector.as_ref(), labels)
    }
}

/// Replacement strategy of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum DeploymentStrategy {
    /// Kill all existing pods before creating new ones
    Recreate {
        /// Rolling update parameters written next to this strategy
        #[serde(default, rename = "rollingUpdate", skip_serializing_if = "Option::is_none")]
        rolling_update: Option<UnusedRollingUpdate>,
    },
    /// Replace old pods incrementally
    RollingUpdate(RollingUpdateDeployment),
    /// A strategy type without built-in behaviour, carried as written
    Other {
        /// The strategy type
        name: String,
        /// Rolling update parameters written next to this strategy
        #[serde(default, rename = "rollingUpdate", skip_serializing_if = "Option::is_none")]
        rolling_update: Option<UnusedRollingUpdate>,
    },
}

/// Parameters of a rolling deployment update
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RollingUpdateDeployment {
    /// Pods that may be unavailable during the update, absolute or a percentage
    pub max_unavailable: IntOrString,
    /// Pods that may be created above the desired count, absolute or a percentage
    pub max_surge: IntOrString,
}

/// Rolling update parameters kept verbatim for a strategy that does not read them
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UnusedRollingUpdate {
    /// Pods that may be unavailable during an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
    /// Pods that may be created above the desired count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
}

/// Revision to roll a [`Deployment`] back to
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RollbackConfig {
    /// The revision; 0 means the last one
    pub revision: i64,
}

/// Observed state of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    /// Generation observed by the controller
    pub observed_generation: i64,
    /// Pods targeted by the deployment
    pub replicas: i32,
    /// Pods running the latest template
    pub updated_replicas: i32,
    /// Pods available for at least `minReadySeconds`
    pub available_replicas: i32,
    /// Pods still needed for full capacity
    pub unavailable_replicas: i32,
}

/// Job runs pods to completion
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: JobSpec,
    /// Most recently observed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Desired behaviour of a [`Job`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Pods running at any instant
    pub parallelism: i32,
    /// Successful pods needed to finish the job
    pub completions: i32,
    /// Seconds the job may stay active before it is terminated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
    /// Query over the pods the job manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    pub template: PodTemplateSpec,
}

impl JobSpec {
    /// Whether this job manages a pod labelled `labels`
    pub fn selects(&self, labels: &BTreeMap<String, String>) -> bool {
        selects(self.selector.as_ref(), labels)
    }
}

/// Observed state of a [`Job`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Latest observations of the job's state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<JobCondition>,
    /// When the job was acknowledged by the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Time>,
    /// When the job finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,
    /// Pods actively running
    pub active: i32,
    /// Pods that reached phase Succeeded
    pub succeeded: i32,
    /// Pods that reached phase Failed
    pub failed: i32,
}

/// One observation of a [`Job`]'s state
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobCondition {
    /// Condition type, `Complete` or `Failed`
    #[serde(rename = "type")]
    pub type_: String,
    /// `True`, `False` or `Unknown`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// When the condition was last probed
    pub last_probe_time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// When the condition last changed status
    pub last_transition_time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Machine-readable reason for the last transition
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Human-readable details of the last transition
    pub message: Option<String>,
}

/// ReplicaSet keeps a number of identical pods running
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSet {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: ReplicaSetSpec,
    /// Most recently observed status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReplicaSetStatus>,
}

/// Desired behaviour of a [`ReplicaSet`]
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetSpec {
    /// Number of desired pods
    pub replicas: i32,
    /// Query over the pods the replica set manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

impl ReplicaSetSpec {
    /// Whether this replica set manages a pod labelled `labels`
    pub fn selects(&self, labels: &BTreeMap<String, String>) -> bool {
        selects(self.selector.as_ref(), labels)
    }
}

/// Observed state of a [`ReplicaSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetStatus {
    /// Most recently observed number of pods
    pub replicas: i32,
    /// Pods whose labels match the template labels
    pub fully_labeled_replicas: i32,
    /// Generation observed by the controller
    pub observed_generation: i64,
}
