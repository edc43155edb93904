//! Converting objects between their versioned and internal representations.
//!
//! Every registered kind has one [`Converter`] mapping its versioned type to the internal
//! type shared by all versions of the kind. Versioned to versioned conversion goes through
//! the internal representation, so each version only knows about the hub.
use std::any::{type_name, Any};

use crate::{
    error::ConversionError,
    scheme::{AnyObject, Object, SchemeType, Versioned},
    Error, Result, Scheme,
};

/// Field-by-field mapping between a versioned type and its internal representation.
///
/// Both directions build fresh values: the result never shares maps or sequences with the
/// input. Conversion does not apply defaults.
/// # Errors
/// Conversion fails only when a value has no mapping rule, which points at drift between
/// the two schemas rather than at a bad object.
pub trait Converter: Send + Sync + 'static {
    /// The versioned (external) type
    type External: Versioned;
    /// The internal type
    type Internal: SchemeType;

    /// Map a versioned object to the internal representation
    fn to_internal(&self, external: &Self::External) -> Result<Self::Internal, ConversionError>;

    /// Map an internal object to the versioned representation
    fn to_external(&self, internal: &Self::Internal) -> Result<Self::External, ConversionError>;
}

impl Scheme {
    /// Convert a versioned object to its kind's internal representation
    pub fn to_internal(&self, obj: &Object) -> Result<Object> {
        let kind = self.versioned_kind(&obj.gvk)?;
        let value = kind.to_internal(obj.value.as_ref())?;
        tracing::trace!(gvk = %obj.gvk, "converted to internal");
        Ok(Object {
            gvk: obj.gvk.internal(),
            value,
        })
    }

    /// Convert an internal object to `version` of its kind
    pub fn to_external(&self, obj: &Object, version: &str) -> Result<Object> {
        if !obj.gvk.is_internal() {
            return Err(Error::InvalidArgument(format!("{} is not an internal object", obj.gvk)));
        }
        let target = obj.gvk.group_kind().with_version(version);
        let kind = self.versioned_kind(&target)?;
        let value = kind.to_external(obj.value.as_ref())?;
        tracing::trace!(gvk = %target, "converted to external");
        Ok(Object { gvk: target, value })
    }

    /// Convert between any two registered representations of the same kind.
    ///
    /// The direction is taken from the registered kinds of `T` and `U`.
    pub fn convert<T, U>(&self, obj: &T) -> Result<U>
    where
        T: Any + Send + Sync,
        U: Any + Send + Sync,
    {
        let from = self.registered_kind::<T>()?;
        let to = self.registered_kind::<U>()?;
        if from.group_kind() != to.group_kind() {
            return Err(Error::InvalidArgument(format!("cannot convert {from} to {to}")));
        }
        let value: AnyObject = match (from.is_internal(), to.is_internal()) {
            (false, true) => self.versioned_kind(from)?.to_internal(obj)?,
            (true, false) => self.versioned_kind(to)?.to_external(obj)?,
            (false, false) => {
                let hub = self.versioned_kind(from)?.to_internal(obj)?;
                self.versioned_kind(to)?.to_external(hub.as_ref())?
            }
            (true, true) => {
                return Err(Error::InvalidArgument(format!(
                    "{} is already internal",
                    type_name::<T>()
                )))
            }
        };
        tracing::trace!(%from, %to, "converted");
        value
            .downcast::<U>()
            .map(|value| *value)
            .map_err(|_| Error::InvalidArgument(format!("{to} does not produce a {}", type_name::<U>())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        apis::extensions::{self, v1beta1},
        scheme,
    };
    use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

    fn defaulted_deployment() -> v1beta1::Deployment {
        let mut deployment = v1beta1::Deployment::default();
        scheme().apply_defaults(&mut deployment).unwrap();
        deployment
    }

    #[test]
    fn typed_conversion_picks_direction() {
        let deployment = defaulted_deployment();
        let internal: extensions::Deployment = scheme().convert(&deployment).unwrap();
        assert_eq!(internal.spec.replicas, 1);
        assert_eq!(
            internal.spec.strategy,
            extensions::DeploymentStrategy::RollingUpdate(extensions::RollingUpdateDeployment {
                max_unavailable: IntOrString::Int(1),
                max_surge: IntOrString::Int(1),
            })
        );
        let back: v1beta1::Deployment = scheme().convert(&internal).unwrap();
        assert_eq!(back, deployment);
    }

    #[test]
    fn erased_conversion_retags_objects() {
        let obj = scheme().wrap(defaulted_deployment()).unwrap();
        let internal = scheme().to_internal(&obj).unwrap();
        assert!(internal.gvk().is_internal());
        assert!(internal.is::<extensions::Deployment>());
        let back = scheme().to_external(&internal, "v1beta1").unwrap();
        assert_eq!(back.gvk(), obj.gvk());
        assert_eq!(back.downcast_ref::<v1beta1::Deployment>(), obj.downcast_ref());
    }

    #[test]
    fn to_external_requires_internal_input() {
        let obj = scheme().wrap(defaulted_deployment()).unwrap();
        assert!(matches!(scheme().to_external(&obj, "v1beta1"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn to_external_requires_registered_version() {
        let obj = scheme().wrap(defaulted_deployment()).unwrap();
        let internal = scheme().to_internal(&obj).unwrap();
        assert!(matches!(scheme().to_external(&internal, "v2"), Err(Error::UnknownKind(_))));
    }

    #[test]
    fn conversion_across_kinds_is_rejected() {
        let deployment = defaulted_deployment();
        let res: Result<extensions::Job> = scheme().convert(&deployment);
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn undefaulted_strategy_has_no_mapping() {
        let deployment = v1beta1::Deployment::default();
        let res: Result<extensions::Deployment> = scheme().convert(&deployment);
        match res {
            Err(Error::Conversion(err)) => assert_eq!(err.field, "spec.strategy.type"),
            other => panic!("expected conversion error, got {other:?}"),
        }
    }
}
