//! Status API envelopes and the normalized snapshot

use super::Waybill;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a fetch asks for: every Waybill, or the one in a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    All,
    Namespace(String),
}

impl Scope {
    /// Scope for an optional namespace; empty strings mean all namespaces
    pub fn from_namespace(namespace: Option<&str>) -> Self {
        match namespace.map(str::trim) {
            Some(ns) if !ns.is_empty() => Scope::Namespace(ns.to_string()),
            _ => Scope::All,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Namespace(ns) => Some(ns),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Namespace(ns) => write!(f, "{}", ns),
        }
    }
}

/// Body of `GET /api/v1/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusList {
    #[serde(
        rename = "Waybills",
        default,
        deserialize_with = "crate::models::null_as_default"
    )]
    pub waybills: Vec<Waybill>,
    #[serde(rename = "DiffURLFormat", default)]
    pub diff_url_format: String,
}

/// Body of `GET /api/v1/status/{namespace}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamespaceStatus {
    /// `null` when the namespace has no Waybill
    #[serde(rename = "Waybill", default)]
    pub waybill: Option<Waybill>,
    #[serde(rename = "DiffURLFormat", default)]
    pub diff_url_format: String,
}

/// The latest fetched state, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub scope: Scope,
    pub waybills: Vec<Waybill>,
    pub diff_url_format: String,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Snapshot of every Waybill
    pub fn from_list(list: StatusList, fetched_at: DateTime<Utc>) -> Self {
        Self {
            scope: Scope::All,
            waybills: list.waybills,
            diff_url_format: list.diff_url_format,
            fetched_at,
        }
    }

    /// Snapshot holding exactly one Waybill
    pub fn single(
        namespace: impl Into<String>,
        waybill: Waybill,
        diff_url_format: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            scope: Scope::Namespace(namespace.into()),
            waybills: vec![waybill],
            diff_url_format: diff_url_format.into(),
            fetched_at,
        }
    }

    pub fn len(&self) -> usize {
        self.waybills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waybills.is_empty()
    }

    /// Find the Waybill managing `namespace`
    pub fn get(&self, namespace: &str) -> Option<&Waybill> {
        self.waybills.iter().find(|wb| wb.namespace() == namespace)
    }
}
