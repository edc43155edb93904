//! The type registry binding kinds to Rust types, defaulters and converters.
//!
//! A [`Scheme`] has a two-phase lifecycle. It is populated through `&mut Scheme` (see
//! [`Scheme::register`]) while it is still exclusively owned, typically at process start.
//! Once it is shared, only `&Scheme` methods are available: lookups, encoding, decoding,
//! defaulting and conversion never mutate the registry and need no locking. The
//! process-wide instance returned by [`scheme()`] is built once on first access.
use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::LazyLock,
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    apis,
    config::SchemeConfig,
    conversion::Converter,
    defaulting::Defaulter,
    error::{ConversionError, Error},
    gvk::GroupVersionKind,
    pod::{PodDefaults, PodTemplateDefaulter},
    Result,
};

pub(crate) type AnyObject = Box<dyn Any + Send + Sync>;

/// Bounds every registered representation satisfies.
pub trait SchemeType: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {}

impl<T> SchemeType for T where T: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {}

/// Additional bounds on versioned (external) representations.
///
/// `Default` gives the registry an empty object to check conversions with, `Clone` and
/// `PartialEq` let it compare the result.
pub trait Versioned: SchemeType + Clone + Default + PartialEq {}

impl<T> Versioned for T where T: SchemeType + Clone + Default + PartialEq {}

/// A registered object of any kind, tagged with the kind it was registered under.
pub struct Object {
    pub(crate) gvk: GroupVersionKind,
    pub(crate) value: AnyObject,
}

impl Object {
    /// Tag a value with a kind.
    ///
    /// Nothing checks that `value` is the type registered for `gvk` until the object is used;
    /// operations on a mismatched object fail with [`Error::InvalidArgument`].
    pub fn new<T: Any + Send + Sync>(gvk: GroupVersionKind, value: T) -> Self {
        Self {
            gvk,
            value: Box::new(value),
        }
    }

    /// The kind this object is tagged with
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    /// Whether the payload is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the payload as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Mutably borrow the payload as a `T`
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut()
    }

    /// Take the payload out as a `T`
    pub fn into_inner<T: Any>(self) -> Result<T> {
        let gvk = self.gvk;
        self.value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::InvalidArgument(format!("{gvk} does not hold a {}", type_name::<T>())))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object").field("gvk", &self.gvk).finish_non_exhaustive()
    }
}

/// Describes a registered kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindInfo {
    /// The versioned kind
    pub gvk: GroupVersionKind,
    /// The kind of the internal representation it converts to
    pub internal: GroupVersionKind,
    /// Rust type of the versioned representation
    pub external_type: &'static str,
    /// Rust type of the internal representation
    pub internal_type: &'static str,
}

fn mismatch<T>() -> Error {
    Error::InvalidArgument(format!("object does not hold a {}", type_name::<T>()))
}

/// Serialization of one registered type, erased.
pub(crate) trait ErasedType: Send + Sync {
    fn value_type(&self) -> TypeId;
    fn from_value(&self, value: serde_json::Value) -> Result<AnyObject, serde_json::Error>;
    fn to_value(&self, value: &(dyn Any + Send + Sync)) -> Result<serde_json::Value>;
}

struct TypeEntry<T>(PhantomData<fn() -> T>);

impl<T: SchemeType> ErasedType for TypeEntry<T> {
    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn from_value(&self, value: serde_json::Value) -> Result<AnyObject, serde_json::Error> {
        let obj: T = serde_json::from_value(value)?;
        Ok(Box::new(obj))
    }

    fn to_value(&self, value: &(dyn Any + Send + Sync)) -> Result<serde_json::Value> {
        let obj = value.downcast_ref::<T>().ok_or_else(mismatch::<T>)?;
        serde_json::to_value(obj).map_err(|err| crate::error::EncodeError::Serialize(err).into())
    }
}

/// Defaulting and conversion of one versioned kind, erased.
pub(crate) trait ErasedKind: Send + Sync {
    fn info(&self) -> KindInfo;
    fn apply_defaults(&self, value: &mut (dyn Any + Send + Sync), pods: &dyn PodTemplateDefaulter) -> Result<()>;
    fn to_internal(&self, value: &(dyn Any + Send + Sync)) -> Result<AnyObject>;
    fn to_external(&self, value: &(dyn Any + Send + Sync)) -> Result<AnyObject>;
    fn check_round_trip(&self, pods: &dyn PodTemplateDefaulter) -> Result<(), ConversionError>;
}

struct KindEntry<D, C> {
    gvk: GroupVersionKind,
    defaulter: D,
    converter: C,
}

impl<D, C> KindEntry<D, C>
where
    C: Converter,
    D: Defaulter<C::External>,
{
    fn default_typed(&self, obj: &mut C::External, pods: &dyn PodTemplateDefaulter) {
        self.defaulter.set_defaults(obj);
        if let Some(template) = self.defaulter.pod_template(obj) {
            pods.default_pod_template(template);
        }
    }
}

impl<D, C> ErasedKind for KindEntry<D, C>
where
    C: Converter,
    D: Defaulter<C::External>,
{
    fn info(&self) -> KindInfo {
        KindInfo {
            gvk: self.gvk.clone(),
            internal: self.gvk.internal(),
            external_type: type_name::<C::External>(),
            internal_type: type_name::<C::Internal>(),
        }
    }

    fn apply_defaults(&self, value: &mut (dyn Any + Send + Sync), pods: &dyn PodTemplateDefaulter) -> Result<()> {
        let obj = value
            .downcast_mut::<C::External>()
            .ok_or_else(mismatch::<C::External>)?;
        self.default_typed(obj, pods);
        Ok(())
    }

    fn to_internal(&self, value: &(dyn Any + Send + Sync)) -> Result<AnyObject> {
        let external = value
            .downcast_ref::<C::External>()
            .ok_or_else(mismatch::<C::External>)?;
        Ok(Box::new(self.converter.to_internal(external)?))
    }

    fn to_external(&self, value: &(dyn Any + Send + Sync)) -> Result<AnyObject> {
        let internal = value
            .downcast_ref::<C::Internal>()
            .ok_or_else(mismatch::<C::Internal>)?;
        Ok(Box::new(self.converter.to_external(internal)?))
    }

    fn check_round_trip(&self, pods: &dyn PodTemplateDefaulter) -> Result<(), ConversionError> {
        let mut draft = C::External::default();
        self.default_typed(&mut draft, pods);
        let internal = self.converter.to_internal(&draft)?;
        let back = self.converter.to_external(&internal)?;
        if back != draft {
            return Err(ConversionError::new(
                self.gvk.kind.clone(),
                format!(
                    "defaulted {} does not survive a round trip through {}",
                    type_name::<C::External>(),
                    type_name::<C::Internal>()
                ),
            ));
        }
        Ok(())
    }
}

/// Registry of kinds with their defaulting and conversion rules.
pub struct Scheme {
    pub(crate) kinds: HashMap<GroupVersionKind, Box<dyn ErasedKind>>,
    pub(crate) types: HashMap<GroupVersionKind, Box<dyn ErasedType>>,
    pub(crate) gvks: HashMap<TypeId, GroupVersionKind>,
    pub(crate) pod_defaulter: Box<dyn PodTemplateDefaulter>,
}

impl Default for Scheme {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = self.kinds.keys().collect::<Vec<_>>();
        kinds.sort();
        f.debug_struct("Scheme").field("kinds", &kinds).finish_non_exhaustive()
    }
}

impl Scheme {
    /// An empty scheme using the stock [`PodDefaults`]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            types: HashMap::new(),
            gvks: HashMap::new(),
            pod_defaulter: Box::new(PodDefaults::default()),
        }
    }

    /// Replace the collaborator that defaults embedded pod templates
    #[must_use]
    pub fn with_pod_defaulter<P: PodTemplateDefaulter + 'static>(mut self, pods: P) -> Self {
        self.pod_defaulter = Box::new(pods);
        self
    }

    /// A scheme with every built-in kind installed, configured by `config`
    pub fn from_config(config: &SchemeConfig) -> Result<Self> {
        let mut scheme = Scheme::new().with_pod_defaulter(config.pod_defaults.clone());
        apis::install(&mut scheme)?;
        if config.validate {
            scheme.validate()?;
        }
        Ok(scheme)
    }

    /// Bind `gvk` to the converter's versioned type, and its internal counterpart to the
    /// converter's internal type.
    ///
    /// Several versions of one kind may share an internal type. Fails with
    /// [`Error::DuplicateKind`] when the kind is already bound, when the versioned type is
    /// already bound to another kind, or when the internal slot holds a different type.
    /// Nothing is registered when registration fails.
    pub fn register<D, C>(&mut self, gvk: GroupVersionKind, defaulter: D, converter: C) -> Result<()>
    where
        C: Converter,
        D: Defaulter<C::External>,
    {
        if gvk.is_internal() {
            return Err(Error::InvalidArgument(format!(
                "{gvk} names the internal version; register a versioned kind instead"
            )));
        }
        if self.kinds.contains_key(&gvk) || self.types.contains_key(&gvk) {
            return Err(Error::DuplicateKind(gvk));
        }
        let external = TypeId::of::<C::External>();
        if let Some(existing) = self.gvks.get(&external) {
            return Err(Error::DuplicateKind(existing.clone()));
        }
        let internal_gvk = gvk.internal();
        let internal = TypeId::of::<C::Internal>();
        match self.types.get(&internal_gvk) {
            Some(entry) if entry.value_type() != internal => return Err(Error::DuplicateKind(internal_gvk)),
            Some(_) => {}
            None => {
                if let Some(existing) = self.gvks.get(&internal) {
                    return Err(Error::DuplicateKind(existing.clone()));
                }
            }
        }

        tracing::debug!(
            %gvk,
            external = type_name::<C::External>(),
            internal = type_name::<C::Internal>(),
            "registering kind"
        );
        self.types
            .entry(internal_gvk.clone())
            .or_insert_with(|| Box::new(TypeEntry::<C::Internal>(PhantomData)));
        self.gvks.entry(internal).or_insert(internal_gvk);
        self.types
            .insert(gvk.clone(), Box::new(TypeEntry::<C::External>(PhantomData)));
        self.gvks.insert(external, gvk.clone());
        self.kinds.insert(gvk.clone(), Box::new(KindEntry {
            gvk,
            defaulter,
            converter,
        }));
        Ok(())
    }

    /// Describe a registered versioned kind
    pub fn lookup(&self, gvk: &GroupVersionKind) -> Result<KindInfo> {
        self.kinds
            .get(gvk)
            .map(|kind| kind.info())
            .ok_or_else(|| Error::UnknownKind(gvk.clone()))
    }

    /// Whether `gvk` names a registered representation, versioned or internal
    pub fn recognizes(&self, gvk: &GroupVersionKind) -> bool {
        self.types.contains_key(gvk)
    }

    /// The kind `T` is registered under, if any
    pub fn kind_for<T: Any>(&self) -> Option<&GroupVersionKind> {
        self.gvks.get(&TypeId::of::<T>())
    }

    /// All registered versioned kinds, sorted
    pub fn kinds(&self) -> Vec<&GroupVersionKind> {
        let mut kinds = self.kinds.keys().collect::<Vec<_>>();
        kinds.sort();
        kinds
    }

    /// Tag `value` with the kind its type is registered under
    pub fn wrap<T: Any + Send + Sync>(&self, value: T) -> Result<Object> {
        let gvk = self.registered_kind::<T>()?;
        Ok(Object::new(gvk.clone(), value))
    }

    /// Check that every registered kind converts a defaulted empty object to its internal
    /// representation and back without loss.
    ///
    /// A failure means a converter lost track of a field; it is meant to be fatal at startup.
    pub fn validate(&self) -> Result<()> {
        for gvk in self.kinds() {
            tracing::debug!(%gvk, "validating conversions");
            self.kinds[gvk].check_round_trip(self.pod_defaulter.as_ref())?;
        }
        Ok(())
    }

    pub(crate) fn registered_kind<T: Any>(&self) -> Result<&GroupVersionKind> {
        self.kind_for::<T>()
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not a registered type", type_name::<T>())))
    }

    pub(crate) fn versioned_kind(&self, gvk: &GroupVersionKind) -> Result<&dyn ErasedKind> {
        match self.kinds.get(gvk) {
            Some(kind) => Ok(kind.as_ref()),
            None if gvk.is_internal() && self.types.contains_key(gvk) => Err(Error::InvalidArgument(format!(
                "{gvk} is an internal representation"
            ))),
            None => Err(Error::UnknownKind(gvk.clone())),
        }
    }
}

static SCHEME: LazyLock<Scheme> = LazyLock::new(|| {
    Scheme::from_config(&SchemeConfig::default()).expect("built-in kinds must register and validate")
});

/// The process-wide scheme with every built-in kind installed.
///
/// Built on first access and read-only afterwards.
pub fn scheme() -> &'static Scheme {
    &SCHEME
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::extensions::{self, v1beta1};

    fn job_gvk() -> GroupVersionKind {
        GroupVersionKind::gvk("extensions", "v1beta1", "Job")
    }

    #[test]
    fn lookup_describes_registered_kinds() {
        let info = scheme().lookup(&job_gvk()).unwrap();
        assert_eq!(info.internal, GroupVersionKind::gvk("extensions", "__internal", "Job"));
        assert!(info.external_type.ends_with("v1beta1::types::Job"));
        assert!(info.internal_type.ends_with("extensions::types::Job"));
        assert_eq!(scheme().kinds().len(), 4);
    }

    #[test]
    fn lookup_of_unknown_kind_fails() {
        let gvk = GroupVersionKind::gvk("apps", "v1", "StatefulSet");
        assert!(matches!(scheme().lookup(&gvk), Err(Error::UnknownKind(k)) if k == gvk));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut scheme = Scheme::new();
        scheme
            .register(job_gvk(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap();
        let err = scheme
            .register(job_gvk(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKind(gvk) if gvk == job_gvk()));
    }

    #[test]
    fn versioned_type_binds_to_one_kind() {
        let mut scheme = Scheme::new();
        scheme
            .register(job_gvk(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap();
        let alias = GroupVersionKind::gvk("batch", "v1", "Job");
        let err = scheme
            .register(alias.clone(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKind(gvk) if gvk == job_gvk()));
        assert!(!scheme.recognizes(&alias));
        assert!(scheme.lookup(&alias).is_err());
    }

    #[test]
    fn internal_version_cannot_be_registered_directly() {
        let mut scheme = Scheme::new();
        let err = scheme
            .register(job_gvk().internal(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn registration_binds_internal_type() {
        let mut scheme = Scheme::new();
        scheme
            .register(job_gvk(), v1beta1::JobDefaults, v1beta1::JobConverter)
            .unwrap();
        assert_eq!(scheme.kind_for::<v1beta1::Job>(), Some(&job_gvk()));
        assert_eq!(scheme.kind_for::<extensions::Job>(), Some(&job_gvk().internal()));
        assert!(scheme.recognizes(&job_gvk().internal()));
    }

    #[test]
    fn built_in_kinds_validate() {
        scheme().validate().unwrap();
    }

    #[test]
    fn wrap_requires_registered_type() {
        let obj = scheme().wrap(v1beta1::ReplicaSet::default()).unwrap();
        assert_eq!(obj.gvk().kind, "ReplicaSet");
        assert!(obj.is::<v1beta1::ReplicaSet>());
        assert!(matches!(scheme().wrap(42u8), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn into_inner_rejects_other_types() {
        let obj = Object::new(job_gvk(), v1beta1::Job::default());
        assert!(matches!(obj.into_inner::<v1beta1::Deployment>(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn shared_scheme_serves_concurrent_lookups() {
        let scheme = scheme();
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for gvk in scheme.kinds() {
                        assert_eq!(&scheme.lookup(gvk).unwrap().gvk, gvk);
                    }
                });
            }
        });
    }
}
