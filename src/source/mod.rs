//! Status sources
//!
//! Provides sources for the Waybill status snapshot:
//! - the kube-applier HTTP status API (the normal case)
//! - local JSON files (offline inspection and testing)
//! - in-memory snapshots (tests and demos)

mod error;
mod file;
mod http;
mod memory;

pub use error::FetchError;
pub use file::FileStatusSource;
pub use http::{HttpStatusSource, parse_duration};
pub use memory::MemoryStatusSource;

use crate::models::{NamespaceStatus, Scope, Snapshot, StatusList};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of Waybill status snapshots
///
/// Implementations are stateless: every call returns a complete, freshly
/// decoded snapshot or a [`FetchError`]. Loading/ready/failed bookkeeping
/// belongs to the dashboard controller.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current snapshot for `scope`
    async fn fetch(&self, scope: &Scope) -> Result<Snapshot, FetchError>;

    /// Source type name (e.g. "http", "file")
    fn source_type(&self) -> &'static str;

    /// Human-readable location shown in the header
    fn describe(&self) -> String;
}

/// Decode a status API body for `scope`
pub fn decode_snapshot(
    scope: &Scope,
    body: &[u8],
    fetched_at: DateTime<Utc>,
) -> Result<Snapshot, FetchError> {
    match scope {
        Scope::All => {
            let list: StatusList = serde_json::from_slice(body).map_err(FetchError::parse)?;
            Ok(Snapshot::from_list(list, fetched_at))
        }
        Scope::Namespace(namespace) => {
            let status: NamespaceStatus =
                serde_json::from_slice(body).map_err(FetchError::parse)?;
            match status.waybill {
                Some(waybill) => Ok(Snapshot::single(
                    namespace.clone(),
                    waybill,
                    status.diff_url_format,
                    fetched_at,
                )),
                None => Err(FetchError::not_found(namespace.clone())),
            }
        }
    }
}

/// Narrow a full list to one namespace
///
/// Used by sources that only hold the list envelope.
pub(crate) fn select_scope(
    list: StatusList,
    scope: &Scope,
    fetched_at: DateTime<Utc>,
) -> Result<Snapshot, FetchError> {
    match scope {
        Scope::All => Ok(Snapshot::from_list(list, fetched_at)),
        Scope::Namespace(namespace) => {
            let StatusList {
                waybills,
                diff_url_format,
            } = list;
            waybills
                .into_iter()
                .find(|wb| wb.namespace() == namespace)
                .map(|wb| Snapshot::single(namespace.clone(), wb, diff_url_format, fetched_at))
                .ok_or_else(|| FetchError::not_found(namespace.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list() {
        let body = br#"{
            "Waybills": [
                {"metadata": {"namespace": "payments"}, "status": {"lastRun": {"success": true}}},
                {"metadata": {"namespace": "billing"}, "status": {}}
            ],
            "DiffURLFormat": "https://github.com/org/repo/commit/%s"
        }"#;
        let snapshot = decode_snapshot(&Scope::All, body, Utc::now()).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.waybills[0].namespace(), "payments");
        assert!(snapshot.get("billing").unwrap().last_run().is_none());
        assert_eq!(
            snapshot.diff_url_format,
            "https://github.com/org/repo/commit/%s"
        );
    }

    #[test]
    fn test_decode_namespace_null_is_not_found() {
        let scope = Scope::Namespace("ghost".to_string());
        let body = br#"{"Waybill": null, "DiffURLFormat": ""}"#;
        let err = decode_snapshot(&scope, body, Utc::now()).unwrap_err();
        assert_eq!(err, FetchError::not_found("ghost"));
    }

    #[test]
    fn test_decode_malformed_is_parse_error() {
        let err = decode_snapshot(&Scope::All, b"<html>", Utc::now()).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));

        let err = decode_snapshot(&Scope::All, br#"{"Waybills": 7}"#, Utc::now()).unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }

    #[test]
    fn test_select_scope() {
        let list: StatusList = serde_json::from_str(
            r#"{"Waybills": [{"metadata": {"namespace": "a"}}, {"metadata": {"namespace": "b"}}]}"#,
        )
        .unwrap();

        let snapshot =
            select_scope(list.clone(), &Scope::Namespace("b".to_string()), Utc::now()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.waybills[0].namespace(), "b");

        let err = select_scope(list, &Scope::Namespace("c".to_string()), Utc::now()).unwrap_err();
        assert_eq!(err, FetchError::not_found("c"));
    }
}
