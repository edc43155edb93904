//! Self-describing JSON encoding of registered objects.
//!
//! Encoded objects carry `apiVersion` and `kind` next to their fields, so decoding needs no
//! type hint from the caller. Maps are written in sorted key order, which makes the encoding
//! of a value deterministic.
use std::any::{type_name, Any};

use serde::{de::Error as _, Deserialize};

use crate::{
    error::{DecodeError, EncodeError},
    metadata::TypeMeta,
    scheme::Object,
    Error, GroupVersionKind, Result, Scheme,
};

/// Read the type information embedded in encoded bytes without decoding the object
pub fn type_meta(data: &[u8]) -> Result<TypeMeta, DecodeError> {
    let value: serde_json::Value = serde_json::from_slice(data).map_err(DecodeError::Malformed)?;
    type_meta_of(&value)
}

fn type_meta_of(value: &serde_json::Value) -> Result<TypeMeta, DecodeError> {
    if !value.is_object() {
        return Err(DecodeError::Malformed(serde_json::Error::custom(
            "expected an object at the top level",
        )));
    }
    TypeMeta::deserialize(value).map_err(DecodeError::MissingTypeMeta)
}

impl Scheme {
    /// Encode a registered value, versioned or internal.
    ///
    /// Fails with [`Error::Encode`] when `T` is not registered.
    pub fn encode<T: Any + Send + Sync>(&self, obj: &T) -> Result<Vec<u8>> {
        let gvk = self
            .kind_for::<T>()
            .ok_or_else(|| EncodeError::Unregistered(type_name::<T>()))?;
        self.encode_erased(gvk, obj)
    }

    /// Encode a type-erased object under the kind it is tagged with
    pub fn encode_object(&self, obj: &Object) -> Result<Vec<u8>> {
        self.encode_erased(&obj.gvk, obj.value.as_ref())
    }

    fn encode_erased(&self, gvk: &GroupVersionKind, obj: &(dyn Any + Send + Sync)) -> Result<Vec<u8>> {
        let entry = self.types.get(gvk).ok_or_else(|| Error::UnknownKind(gvk.clone()))?;
        let mut value = entry.to_value(obj)?;
        let fields = value
            .as_object_mut()
            .ok_or_else(|| EncodeError::NotAnObject(gvk.clone()))?;
        let types = TypeMeta::from_gvk(gvk);
        fields.insert("apiVersion".into(), types.api_version.into());
        fields.insert("kind".into(), types.kind.into());
        let data = serde_json::to_vec(&value).map_err(EncodeError::Serialize)?;
        tracing::trace!(%gvk, bytes = data.len(), "encoded object");
        Ok(data)
    }

    /// Decode bytes into the type registered for their embedded kind.
    ///
    /// Decoding never applies defaults, so the result is exactly what was transmitted.
    pub fn decode(&self, data: &[u8]) -> Result<Object> {
        let value: serde_json::Value = serde_json::from_slice(data).map_err(DecodeError::Malformed)?;
        let gvk = type_meta_of(&value)?.gvk().map_err(DecodeError::from)?;
        let entry = self.types.get(&gvk).ok_or_else(|| Error::UnknownKind(gvk.clone()))?;
        let obj = entry.from_value(value).map_err(DecodeError::Malformed)?;
        tracing::trace!(%gvk, bytes = data.len(), "decoded object");
        Ok(Object { gvk, value: obj })
    }

    /// Decode bytes that must hold a `T`
    pub fn decode_as<T: Any + Send + Sync>(&self, data: &[u8]) -> Result<T> {
        let obj = self.decode(data)?;
        if !obj.is::<T>() {
            return Err(DecodeError::UnexpectedKind {
                expected: type_name::<T>(),
                found: obj.gvk,
            }
            .into());
        }
        obj.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        apis::extensions::{self, v1beta1},
        scheme,
    };
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn encoding_embeds_type_information() {
        let data = scheme().encode(&v1beta1::Job::default()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert_json_eq!(
            value,
            json!({
                "apiVersion": "extensions/v1beta1",
                "kind": "Job",
                "metadata": {},
                "spec": { "template": {} }
            })
        );
        let types = type_meta(&data).unwrap();
        assert_eq!(types.kind, "Job");
    }

    #[test]
    fn decode_does_not_default() {
        let data = json!({
            "apiVersion": "extensions/v1beta1",
            "kind": "ReplicaSet",
            "spec": { "template": { "metadata": { "labels": { "foo": "bar" } } } }
        });
        let obj = scheme().decode(&serde_json::to_vec(&data).unwrap()).unwrap();
        let rs = obj.downcast_ref::<v1beta1::ReplicaSet>().unwrap();
        assert!(rs.spec.replicas.is_none());
        assert!(rs.spec.selector.is_none());
        assert!(rs.metadata.labels.is_none());
    }

    #[test]
    fn unknown_kind_fails_decode() {
        let data = br#"{"apiVersion":"extensions/v1beta1","kind":"PodSecurityPolicy"}"#;
        let err = scheme().decode(data).unwrap_err();
        assert!(
            matches!(err, Error::UnknownKind(gvk) if gvk == GroupVersionKind::gvk("extensions", "v1beta1", "PodSecurityPolicy"))
        );
    }

    #[test]
    fn malformed_input_fails_decode() {
        let cases: [&[u8]; 5] = [
            b"{not json",
            b"[]",
            b"42",
            br#"{"kind":"Job"}"#,
            br#"{"apiVersion":"/","kind":"Job"}"#,
        ];
        for data in cases {
            let err = scheme().decode(data).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "{err}");
        }
    }

    #[test]
    fn mistyped_fields_fail_decode() {
        let data = br#"{"apiVersion":"extensions/v1beta1","kind":"Job","spec":{"parallelism":"many"}}"#;
        assert!(matches!(
            scheme().decode(data),
            Err(Error::Decode(DecodeError::Malformed(_)))
        ));
    }

    #[test]
    fn decode_as_checks_kind() {
        let data = scheme().encode(&v1beta1::Job::default()).unwrap();
        let job: v1beta1::Job = scheme().decode_as(&data).unwrap();
        assert_eq!(job, v1beta1::Job::default());
        let err = scheme().decode_as::<v1beta1::Deployment>(&data).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::UnexpectedKind { .. })));
    }

    #[test]
    fn unregistered_types_fail_encode() {
        let err = scheme().encode(&json!({"kind": "Job"})).unwrap_err();
        assert!(matches!(err, Error::Encode(EncodeError::Unregistered(_))));
    }

    #[test]
    fn mismatched_objects_fail_encode() {
        let obj = Object::new(GroupVersionKind::gvk("extensions", "v1beta1", "Job"), 7u32);
        assert!(matches!(scheme().encode_object(&obj), Err(Error::InvalidArgument(_))));
        let obj = Object::new(GroupVersionKind::gvk("extensions", "v1", "Job"), 7u32);
        assert!(matches!(scheme().encode_object(&obj), Err(Error::UnknownKind(_))));
    }

    #[test]
    fn internal_objects_round_trip() {
        let mut job = v1beta1::Job::default();
        scheme().apply_defaults(&mut job).unwrap();
        let internal: extensions::Job = scheme().convert(&job).unwrap();
        let data = scheme().encode(&internal).unwrap();
        assert_eq!(type_meta(&data).unwrap().api_version, "extensions/__internal");
        let decoded: extensions::Job = scheme().decode_as(&data).unwrap();
        assert_eq!(decoded, internal);
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut rs = v1beta1::ReplicaSet::default();
        rs.metadata.labels = Some((0..32).map(|i| (format!("k{i}"), format!("v{i}"))).collect());
        scheme().apply_defaults(&mut rs).unwrap();
        let first = scheme().encode(&rs).unwrap();
        let again: v1beta1::ReplicaSet = scheme().decode_as(&first).unwrap();
        assert_eq!(scheme().encode(&again).unwrap(), first);
    }
}
