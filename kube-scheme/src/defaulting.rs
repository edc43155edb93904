//! Applying registered defaults to versioned objects.
use std::any::{type_name, Any};

use k8s_openapi::api::core::v1::PodTemplateSpec;

use crate::{scheme::Object, Error, Result, Scheme};

/// Defaulting rules for one versioned kind.
///
/// `set_defaults` runs exactly once per defaulting pass and must be idempotent. Kinds that
/// embed a pod template expose it through `pod_template`; the scheme hands it to its
/// [`PodTemplateDefaulter`](crate::pod::PodTemplateDefaulter) after `set_defaults` returns.
pub trait Defaulter<K>: Send + Sync + 'static {
    /// Fill in the omitted fields of `obj`
    fn set_defaults(&self, obj: &mut K);

    /// The embedded pod template of `obj`, when the kind has one and it is present
    fn pod_template<'a>(&self, _obj: &'a mut K) -> Option<&'a mut PodTemplateSpec> {
        None
    }
}

impl Scheme {
    /// Default a versioned object in place.
    ///
    /// Fails with [`Error::InvalidArgument`] when `T` is not a registered versioned type, in
    /// which case `obj` is untouched.
    pub fn apply_defaults<T: Any + Send + Sync>(&self, obj: &mut T) -> Result<()> {
        let gvk = self.kind_for::<T>().ok_or_else(|| {
            Error::InvalidArgument(format!("{} is not a registered versioned type", type_name::<T>()))
        })?;
        let kind = self.versioned_kind(gvk)?;
        kind.apply_defaults(obj, self.pod_defaulter.as_ref())?;
        tracing::trace!(%gvk, "applied defaults");
        Ok(())
    }

    /// Default a type-erased versioned object in place.
    ///
    /// Fails with [`Error::InvalidArgument`] when the object is an internal representation or
    /// its payload is not the type registered for its kind, and with [`Error::UnknownKind`]
    /// when its kind is not registered. A failing call leaves the object untouched.
    pub fn apply_defaults_object(&self, obj: &mut Object) -> Result<()> {
        let kind = self.versioned_kind(&obj.gvk)?;
        kind.apply_defaults(obj.value.as_mut(), self.pod_defaulter.as_ref())?;
        tracing::trace!(gvk = %obj.gvk, "applied defaults");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        apis::extensions::{self, v1beta1},
        scheme, GroupVersionKind, PodTemplateDefaulter,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn defaults_typed_objects() {
        let mut job = v1beta1::Job::default();
        scheme().apply_defaults(&mut job).unwrap();
        assert_eq!(job.spec.completions, Some(1));
        assert_eq!(job.spec.parallelism, Some(1));
    }

    #[test]
    fn rejects_unregistered_types() {
        let mut value = String::from("x");
        let err = scheme().apply_defaults(&mut value).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(value, "x");
    }

    #[test]
    fn rejects_internal_objects() {
        let mut internal = scheme()
            .wrap(extensions::ReplicaSet {
                metadata: Default::default(),
                spec: extensions::ReplicaSetSpec {
                    replicas: 2,
                    selector: None,
                    template: None,
                },
                status: None,
            })
            .unwrap();
        let err = scheme().apply_defaults_object(&mut internal).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn rejects_mismatched_payload_without_mutation() {
        let gvk = GroupVersionKind::gvk("extensions", "v1beta1", "Deployment");
        let mut obj = Object::new(gvk, v1beta1::Job::default());
        let err = scheme().apply_defaults_object(&mut obj).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(obj.downcast_ref::<v1beta1::Job>(), Some(&v1beta1::Job::default()));
    }

    #[test]
    fn unknown_object_kind_is_reported() {
        let gvk = GroupVersionKind::gvk("extensions", "v1beta2", "Job");
        let mut obj = Object::new(gvk, v1beta1::Job::default());
        let err = scheme().apply_defaults_object(&mut obj).unwrap_err();
        assert!(matches!(err, Error::UnknownKind(_)));
    }

    struct Counting(AtomicUsize);

    impl PodTemplateDefaulter for Counting {
        fn default_pod_template(&self, _template: &mut PodTemplateSpec) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn pod_template_is_handed_to_collaborator_once() {
        use std::sync::Arc;

        struct Shared(Arc<Counting>);
        impl PodTemplateDefaulter for Shared {
            fn default_pod_template(&self, template: &mut PodTemplateSpec) {
                self.0.default_pod_template(template)
            }
        }

        let counter = Arc::new(Counting(AtomicUsize::new(0)));
        let mut scheme = Scheme::new().with_pod_defaulter(Shared(counter.clone()));
        crate::apis::install(&mut scheme).unwrap();

        let mut deployment = v1beta1::Deployment::default();
        scheme.apply_defaults(&mut deployment).unwrap();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);

        // absent daemon set templates are not materialized
        let mut ds = v1beta1::DaemonSet::default();
        scheme.apply_defaults(&mut ds).unwrap();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(ds.spec.template.is_none());
    }
}
