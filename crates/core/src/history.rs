//! Request history
//!
//! Keeps the most recent HTTP requests in a bounded FIFO buffer.

use chrono::Utc;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use tokio::sync::RwLock;

pub const DEFAULT_MAX_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub method: String,
    pub endpoint: String,
    pub status_code: Option<u16>,
    pub response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_requests: usize,
    pub by_method: BTreeMap<String, usize>,
    pub by_status: BTreeMap<u16, usize>,
    pub by_endpoint: BTreeMap<String, usize>,
}

pub struct HistoryService {
    entries: RwLock<VecDeque<HistoryEntry>>,
    max_entries: usize,
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl HistoryService {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            max_entries,
        }
    }

    /// Record a request, dropping the oldest entry once full
    pub async fn add_request(
        &self,
        method: impl Into<String>,
        endpoint: impl Into<String>,
        status_code: Option<u16>,
        response_time_ms: Option<f64>,
    ) {
        let entry = HistoryEntry {
            timestamp: Utc::now().to_rfc3339(),
            method: method.into(),
            endpoint: endpoint.into(),
            status_code,
            response_time_ms,
        };

        let mut entries = self.entries.write().await;
        entries.push_back(entry);
        while entries.len() > self.max_entries {
            entries.pop_front();
        }
    }

    /// Entries, newest first
    pub async fn get_history(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.iter().rev().cloned().collect()
    }

    pub async fn clear_history(&self) {
        self.entries.write().await.clear();
    }

    pub async fn get_stats(&self) -> HistoryStats {
        let entries = self.entries.read().await;
        let mut stats = HistoryStats {
            total_requests: entries.len(),
            ..HistoryStats::default()
        };

        for entry in entries.iter() {
            *stats.by_method.entry(entry.method.clone()).or_default() += 1;
            if let Some(status) = entry.status_code {
                *stats.by_status.entry(status).or_default() += 1;
            }
            *stats.by_endpoint.entry(entry.endpoint.clone()).or_default() += 1;
        }

        stats
    }
}
