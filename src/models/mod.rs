//! kube-applier data models
//!
//! Serde mirrors of the JSON served by the kube-applier status API. The
//! dashboard never mutates these; they are replaced wholesale on every fetch.

mod snapshot;
mod waybill;

pub use snapshot::{NamespaceStatus, Scope, Snapshot, StatusList};
pub use waybill::{
    ObjectMeta, SecretReference, Waybill, WaybillSpec, WaybillStatus, WaybillStatusRun,
};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
///
/// Go encodes nil slices as `null`, so list fields need this in addition to
/// `#[serde(default)]` (which only covers absent keys).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
