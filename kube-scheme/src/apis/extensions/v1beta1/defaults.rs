//! extensions/v1beta1 defaulting policies
use std::collections::BTreeMap;

use k8s_openapi::{
    api::core::v1::PodTemplateSpec,
    apimachinery::pkg::{
        apis::meta::v1::{LabelSelector, ObjectMeta},
        util::intstr::IntOrString,
    },
};

use super::{
    DaemonSet, Deployment, Job, ReplicaSet, DEFAULT_DAEMON_SET_UNIQUE_LABEL_KEY,
    DEFAULT_DEPLOYMENT_UNIQUE_LABEL_KEY, ROLLING_UPDATE_STRATEGY,
};
use crate::{defaulting::Defaulter, metadata};

/// Labels of a template, if it has any
fn template_labels(template: Option<&PodTemplateSpec>) -> Option<BTreeMap<String, String>> {
    template
        .and_then(|t| t.metadata.as_ref())
        .and_then(metadata::labels)
        .cloned()
}

fn default_selector(selector: &mut Option<LabelSelector>, labels: &BTreeMap<String, String>) {
    selector.get_or_insert_with(|| LabelSelector {
        match_labels: Some(labels.clone()),
        ..LabelSelector::default()
    });
}

fn default_labels(meta: &mut ObjectMeta, labels: &BTreeMap<String, String>) {
    if metadata::labels(meta).is_none() {
        meta.labels = Some(labels.clone());
    }
}

/// An unset strategy type, including the empty string
fn unset(type_: Option<&str>) -> bool {
    type_.map_or(true, str::is_empty)
}

/// Defaults for [`DaemonSet`]
#[derive(Clone, Copy, Debug, Default)]
pub struct DaemonSetDefaults;

impl Defaulter<DaemonSet> for DaemonSetDefaults {
    fn set_defaults(&self, obj: &mut DaemonSet) {
        let spec = &mut obj.spec;
        if let Some(labels) = template_labels(spec.template.as_ref()) {
            default_selector(&mut spec.selector, &labels);
            default_labels(&mut obj.metadata, &labels);
        }

        let strategy = &mut spec.update_strategy;
        if unset(strategy.type_.as_deref()) {
            strategy.type_ = Some(ROLLING_UPDATE_STRATEGY.into());
        }
        if strategy.type_.as_deref() == Some(ROLLING_UPDATE_STRATEGY) {
            strategy
                .rolling_update
                .get_or_insert_with(Default::default)
                .max_unavailable
                .get_or_insert(IntOrString::Int(1));
        }

        spec.unique_label_key
            .get_or_insert_with(|| DEFAULT_DAEMON_SET_UNIQUE_LABEL_KEY.into());
    }

    fn pod_template<'a>(&self, obj: &'a mut DaemonSet) -> Option<&'a mut PodTemplateSpec> {
        obj.spec.template.as_mut()
    }
}

/// Defaults for [`Deployment`]
#[derive(Clone, Copy, Debug, Default)]
pub struct DeploymentDefaults;

impl Defaulter<Deployment> for DeploymentDefaults {
    fn set_defaults(&self, obj: &mut Deployment) {
        let spec = &mut obj.spec;
        if let Some(labels) = template_labels(Some(&spec.template)) {
            default_selector(&mut spec.selector, &labels);
            default_labels(&mut obj.metadata, &labels);
        }
        spec.replicas.get_or_insert(1);

        let strategy = &mut spec.strategy;
        if unset(strategy.type_.as_deref()) {
            strategy.type_ = Some(ROLLING_UPDATE_STRATEGY.into());
        }
        // other strategies never grow a rolling update block
        if strategy.type_.as_deref() == Some(ROLLING_UPDATE_STRATEGY) {
            let rolling = strategy.rolling_update.get_or_insert_with(Default::default);
            rolling.max_unavailable.get_or_insert(IntOrString::Int(1));
            rolling.max_surge.get_or_insert(IntOrString::Int(1));
        }

        spec.unique_label_key
            .get_or_insert_with(|| DEFAULT_DEPLOYMENT_UNIQUE_LABEL_KEY.into());
    }

    fn pod_template<'a>(&self, obj: &'a mut Deployment) -> Option<&'a mut PodTemplateSpec> {
        Some(&mut obj.spec.template)
    }
}

/// Defaults for [`Job`]
#[derive(Clone, Copy, Debug, Default)]
pub struct JobDefaults;

impl Defaulter<Job> for JobDefaults {
    fn set_defaults(&self, obj: &mut Job) {
        let spec = &mut obj.spec;
        if let Some(labels) = template_labels(Some(&spec.template)) {
            default_selector(&mut spec.selector, &labels);
            default_labels(&mut obj.metadata, &labels);
        }
        spec.completions.get_or_insert(1);
        spec.parallelism.get_or_insert(1);
    }

    fn pod_template<'a>(&self, obj: &'a mut Job) -> Option<&'a mut PodTemplateSpec> {
        Some(&mut obj.spec.template)
    }
}

/// Defaults for [`ReplicaSet`]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReplicaSetDefaults;

impl Defaulter<ReplicaSet> for ReplicaSetDefaults {
    fn set_defaults(&self, obj: &mut ReplicaSet) {
        let spec = &mut obj.spec;
        // labels and selector are derived independently of each other
        if let Some(labels) = template_labels(spec.template.as_ref()) {
            default_labels(&mut obj.metadata, &labels);
            default_selector(&mut spec.selector, &labels);
        }
        spec.replicas.get_or_insert(1);
    }

    fn pod_template<'a>(&self, obj: &'a mut ReplicaSet) -> Option<&'a mut PodTemplateSpec> {
        obj.spec.template.as_mut()
    }
}
