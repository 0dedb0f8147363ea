//! In-memory status source

use super::{FetchError, StatusSource, select_scope};
use crate::models::{Scope, Snapshot, StatusList, Waybill};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};

/// Serves a fixed status list from memory
///
/// The list can be swapped with [`MemoryStatusSource::replace`] to simulate
/// the server changing between fetches.
#[derive(Clone, Default)]
pub struct MemoryStatusSource {
    list: Arc<RwLock<StatusList>>,
}

impl MemoryStatusSource {
    pub fn new(waybills: Vec<Waybill>, diff_url_format: impl Into<String>) -> Self {
        Self {
            list: Arc::new(RwLock::new(StatusList {
                waybills,
                diff_url_format: diff_url_format.into(),
            })),
        }
    }

    /// Replace the served list
    pub fn replace(&self, waybills: Vec<Waybill>) {
        if let Ok(mut list) = self.list.write() {
            list.waybills = waybills;
        }
    }
}

#[async_trait]
impl StatusSource for MemoryStatusSource {
    async fn fetch(&self, scope: &Scope) -> Result<Snapshot, FetchError> {
        let list = self
            .list
            .read()
            .map_err(|_| FetchError::network("in-memory status list is poisoned"))?
            .clone();
        select_scope(list, scope, Utc::now())
    }

    fn source_type(&self) -> &'static str {
        "memory"
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
