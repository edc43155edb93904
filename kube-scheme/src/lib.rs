//! Type registry, defaulting and conversion for versioned Kubernetes objects
//!
//! A [`Scheme`] binds each kind (group, version, kind) to a versioned Rust type and to the
//! internal representation shared by all versions of that kind. On top of the registry it
//! offers the four operations the API machinery needs for a single object:
//!
//! - [`Scheme::decode`] / [`Scheme::encode`]: self-describing JSON, no type hint required
//! - [`Scheme::apply_defaults`]: kind-specific defaulting of omitted fields
//! - [`Scheme::to_internal`] / [`Scheme::to_external`] (or [`Scheme::convert`]): conversion
//!   between the user-facing and the internal representation
//!
//! ```
//! use kube_scheme::{apis::extensions::{self, v1beta1}, scheme};
//!
//! let data = br#"{"apiVersion":"extensions/v1beta1","kind":"Deployment","spec":{}}"#;
//! let mut deployment: v1beta1::Deployment = scheme().decode_as(data)?;
//! scheme().apply_defaults(&mut deployment)?;
//! let internal: extensions::Deployment = scheme().convert(&deployment)?;
//! assert_eq!(internal.spec.replicas, 1);
//! # Ok::<(), kube_scheme::Error>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod apis;

pub mod codec;

pub mod config;
pub use config::SchemeConfig;

pub mod conversion;
pub use conversion::Converter;

pub mod defaulting;
pub use defaulting::Defaulter;

pub mod gvk;
pub use gvk::{GroupKind, GroupVersion, GroupVersionKind};

pub mod labels;

pub mod metadata;
pub use metadata::TypeMeta;

pub mod pod;
pub use pod::{PodDefaults, PodTemplateDefaulter};

mod scheme;
pub use scheme::{scheme, KindInfo, Object, Scheme, SchemeType, Versioned};

mod error;
pub use error::{ConversionError, DecodeError, EncodeError, Error};

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;
