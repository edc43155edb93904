//! extensions/v1beta1 wire types, every field optional as written by users
use k8s_openapi::{
    api::core::v1::PodTemplateSpec,
    apimachinery::pkg::{
        apis::meta::v1::{LabelSelector, ObjectMeta, Time},
        util::intstr::IntOrString,
    },
};
use serde::{Deserialize, Serialize};

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// DaemonSet represents the configuration of a daemon set
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSet {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: DaemonSetSpec,
    /// Most recently observed status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DaemonSetStatus>,
}

/// Desired behaviour of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSetSpec {
    /// Query over the pods the daemon set manages; defaulted from the template labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template to run on each node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    /// How existing pods are replaced
    pub update_strategy: DaemonSetUpdateStrategy,
    /// Label key distinguishing pods of different template revisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_label_key: Option<String>,
}

/// Replacement strategy of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSetUpdateStrategy {
    /// `RollingUpdate` or `OnDelete`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Parameters of a `RollingUpdate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdateDaemonSet>,
}

/// Parameters of a rolling daemon set update
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RollingUpdateDaemonSet {
    /// Pods that may be unavailable during the update, absolute or a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
}

/// Observed state of a [`DaemonSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSetStatus {
    /// Nodes running at least one daemon pod that should run it
    pub current_number_scheduled: i32,
    /// Nodes running a daemon pod that should not run it
    pub number_misscheduled: i32,
    /// Nodes that should run the daemon pod
    pub desired_number_scheduled: i32,
}

/// Deployment enables declarative updates for pods and replica sets
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Deployment {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: DeploymentSpec,
    /// Most recently observed status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
}

/// Desired behaviour of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentSpec {
    /// Number of desired pods; defaults to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Query over the pods the deployment manages; defaulted from the template labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    pub template: PodTemplateSpec,
    /// How existing pods are replaced
    pub strategy: DeploymentStrategy,
    /// Seconds a new pod must be ready before it counts as available
    #[serde(skip_serializing_if = "is_zero")]
    pub min_ready_seconds: i32,
    /// Old replica sets to retain for rollback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    /// Whether the deployment is paused
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub paused: bool,
    /// A requested rollback, cleared once it is performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_to: Option<RollbackConfig>,
    /// Label key distinguishing pods of different template revisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_label_key: Option<String>,
}

/// Replacement strategy of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentStrategy {
    /// `Recreate` or `RollingUpdate`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Parameters of a `RollingUpdate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_update: Option<RollingUpdateDeployment>,
}

/// Parameters of a rolling deployment update
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RollingUpdateDeployment {
    /// Pods that may be unavailable during the update, absolute or a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_unavailable: Option<IntOrString>,
    /// Pods that may be created above the desired count, absolute or a percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_surge: Option<IntOrString>,
}

/// Revision to roll a [`Deployment`] back to
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RollbackConfig {
    /// The revision; 0 means the last one
    pub revision: i64,
}

/// Observed state of a [`Deployment`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
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

/// Job represents the configuration of a single job
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: JobSpec,
    /// Most recently observed status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Desired behaviour of a [`Job`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSpec {
    /// Pods running at any instant; defaults to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i32>,
    /// Successful pods needed to finish the job; defaults to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completions: Option<i32>,
    /// Seconds the job may stay active before it is terminated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_deadline_seconds: Option<i64>,
    /// Query over the pods the job manages; defaulted from the template labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    pub template: PodTemplateSpec,
}

/// Observed state of a [`Job`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatus {
    /// Latest observations of the job's state
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<JobCondition>,
    /// When the job was acknowledged by the controller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Time>,
    /// When the job finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,
    /// Pods actively running
    pub active: i32,
    /// Pods that reached phase Succeeded
    pub succeeded: i32,
    /// Pods that reached phase Failed
    pub failed: i32,
}

/// One observation of a [`Job`]'s state
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct JobCondition {
    /// Condition type, `Complete` or `Failed`
    #[serde(rename = "type")]
    pub type_: String,
    /// `True`, `False` or `Unknown`
    pub status: String,
    /// When the condition was last probed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_probe_time: Option<Time>,
    /// When the condition last changed status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,
    /// Machine-readable reason for the last transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable details of the last transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// ReplicaSet represents the configuration of a replica set
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaSet {
    /// Standard object metadata
    pub metadata: ObjectMeta,
    /// Desired behaviour
    pub spec: ReplicaSetSpec,
    /// Most recently observed status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReplicaSetStatus>,
}

/// Desired behaviour of a [`ReplicaSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaSetSpec {
    /// Number of desired pods; defaults to 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Query over the pods the replica set manages; defaulted from the template labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Pod template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

/// Observed state of a [`ReplicaSet`]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaSetStatus {
    /// Most recently observed number of pods
    pub replicas: i32,
    /// Pods whose labels match the template labels
    pub fully_labeled_replicas: i32,
    /// Generation observed by the controller
    pub observed_generation: i64,
}
