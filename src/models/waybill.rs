//! Waybill resource model
//!
//! A Waybill is the kube-applier CRD that describes how one namespace is
//! applied from git. Only the fields the dashboard displays are modelled;
//! unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A kube-applier Waybill as returned by the status API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waybill {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: WaybillSpec,
    #[serde(default)]
    pub status: WaybillStatus,
}

impl Waybill {
    /// Namespace the Waybill manages (unique within a snapshot)
    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    /// The most recent run, if the Waybill has ever been applied
    pub fn last_run(&self) -> Option<&WaybillStatusRun> {
        self.status.last_run.as_ref()
    }
}

/// Identity of a Waybill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub generate_name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

/// Declarative apply configuration of a Waybill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaybillSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_cluster_resources: Option<bool>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub prune_blacklist: Vec<String>,
    #[serde(default)]
    pub repository_path: String,
    /// Seconds between scheduled runs. The server sends a number, older
    /// clients a string; both are kept as the literal text.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub run_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_timeout: Option<i64>,
    #[serde(default)]
    pub server_side_apply: bool,
    #[serde(
        rename = "gitSSHSecretRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub git_ssh_secret_ref: Option<SecretReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strongbox_keyring_secret_ref: Option<SecretReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate_service_account_secret_ref: Option<SecretReference>,
}

/// Reference to a Secret. Opaque to the dashboard: shown, never resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSecretReference")]
pub struct SecretReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSecretReference {
    Name(String),
    Object {
        #[serde(default)]
        name: String,
        #[serde(default)]
        namespace: Option<String>,
    },
}

impl From<RawSecretReference> for SecretReference {
    fn from(raw: RawSecretReference) -> Self {
        match raw {
            RawSecretReference::Name(name) => Self {
                name,
                namespace: None,
            },
            RawSecretReference::Object { name, namespace } => Self {
                name,
                namespace: namespace.filter(|ns| !ns.is_empty()),
            },
        }
    }
}

/// Observed state of a Waybill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaybillStatus {
    /// `None` means the Waybill has never been run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<WaybillStatusRun>,
}

/// Record of the most recent apply run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaybillStatusRun {
    #[serde(rename = "type", default)]
    pub run_type: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub commit: String,
    #[serde(default)]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub success: bool,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_interval_accepts_number_and_string() {
        let spec: WaybillSpec = serde_json::from_str(r#"{"runInterval": 3600}"#).unwrap();
        assert_eq!(spec.run_interval.as_deref(), Some("3600"));

        let spec: WaybillSpec = serde_json::from_str(r#"{"runInterval": "300"}"#).unwrap();
        assert_eq!(spec.run_interval.as_deref(), Some("300"));

        let spec: WaybillSpec = serde_json::from_str(r#"{"runInterval": null}"#).unwrap();
        assert_eq!(spec.run_interval, None);
    }

    #[test]
    fn test_secret_reference_forms() {
        let spec: WaybillSpec = serde_json::from_str(
            r#"{
                "gitSSHSecretRef": {"name": "git-ssh", "namespace": "sys"},
                "delegateServiceAccountSecretRef": "delegate-token"
            }"#,
        )
        .unwrap();

        let git = spec.git_ssh_secret_ref.unwrap();
        assert_eq!(git.name, "git-ssh");
        assert_eq!(git.namespace.as_deref(), Some("sys"));

        let delegate = spec.delegate_service_account_secret_ref.unwrap();
        assert_eq!(delegate.name, "delegate-token");
        assert!(delegate.namespace.is_none());
        assert!(spec.strongbox_keyring_secret_ref.is_none());
    }

    #[test]
    fn test_null_prune_blacklist() {
        let spec: WaybillSpec = serde_json::from_str(r#"{"pruneBlacklist": null}"#).unwrap();
        assert!(spec.prune_blacklist.is_empty());
    }

    #[test]
    fn test_missing_last_run_is_none() {
        let waybill: Waybill =
            serde_json::from_str(r#"{"metadata": {"namespace": "billing"}, "status": {}}"#)
                .unwrap();
        assert_eq!(waybill.namespace(), "billing");
        assert!(waybill.last_run().is_none());
    }
}
