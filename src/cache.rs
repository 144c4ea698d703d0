use crate::config::Config;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Cache key for one logical backend resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Workbooks,
    Vagas { only_active: bool },
    OpenVagas,
    Vaga(i64),
    Workbook(String),
    MatchProspects(String),
    WorkbooksSummary,
    SemanticPerformance,
}

#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub stale_after: Duration,
    pub refetch_on_focus: bool,
    pub refresh_interval: Option<Duration>,
}

/// Staleness windows per key class. Lists and details use short windows;
/// the analytics payload is expensive server-side and gets a long window
/// plus a periodic background refresh.
#[derive(Debug, Clone, Copy)]
pub struct CacheWindows {
    pub list: Duration,
    pub prospects: Duration,
    pub analytics: Duration,
    pub analytics_refresh: Duration,
}

impl CacheWindows {
    pub fn from_config(config: &Config) -> Self {
        Self {
            list: Duration::from_secs(config.list_stale_secs),
            prospects: Duration::from_secs(config.prospects_stale_secs),
            analytics: Duration::from_secs(config.analytics_stale_secs),
            analytics_refresh: Duration::from_secs(config.analytics_refresh_secs),
        }
    }
}

#[derive(Debug, Clone)]
enum EntryState {
    Success(JsonValue),
    Error(String),
}

#[derive(Debug)]
struct Entry {
    state: EntryState,
    fetched_at: Instant,
    stale: bool,
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    // One async lock per key enforces the single-in-flight-fetch rule;
    // waiters re-check the entry after acquiring.
    locks: Mutex<HashMap<QueryKey, Arc<tokio::sync::Mutex<()>>>>,
    windows: CacheWindows,
}

/// Process-wide query cache, passed explicitly to every service that needs
/// it. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl QueryCache {
    pub fn new(config: &Config) -> Self {
        Self::with_windows(CacheWindows::from_config(config))
    }

    pub fn with_windows(windows: CacheWindows) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                locks: Mutex::new(HashMap::new()),
                windows,
            }),
        }
    }

    pub fn policy(&self, key: &QueryKey) -> CachePolicy {
        let w = &self.inner.windows;
        match key {
            QueryKey::Workbooks
            | QueryKey::Vagas { .. }
            | QueryKey::OpenVagas
            | QueryKey::WorkbooksSummary
            | QueryKey::Vaga(_)
            | QueryKey::Workbook(_) => CachePolicy {
                stale_after: w.list,
                refetch_on_focus: true,
                refresh_interval: None,
            },
            QueryKey::MatchProspects(_) => CachePolicy {
                stale_after: w.prospects,
                refetch_on_focus: true,
                refresh_interval: None,
            },
            QueryKey::SemanticPerformance => CachePolicy {
                stale_after: w.analytics,
                refetch_on_focus: false,
                refresh_interval: Some(w.analytics_refresh),
            },
        }
    }

    /// Serve `key` from cache while fresh, otherwise run `fetcher` and store
    /// the result. Fetch errors are retried once before being surfaced; the
    /// client itself never retries. Concurrent callers for the same key wait
    /// on the in-flight fetch instead of issuing their own.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.fresh_value(&key)? {
            return Ok(value);
        }

        let lock = self.fetch_lock(&key);
        let _guard = lock.lock().await;

        // Another requester may have filled the entry while we waited.
        if let Some(value) = self.fresh_value(&key)? {
            return Ok(value);
        }

        let outcome = match fetcher().await {
            Ok(value) => Ok(value),
            Err(first) => {
                tracing::warn!(key = ?key, error = %first, "fetch failed, retrying once");
                fetcher().await
            }
        };

        match outcome {
            Ok(value) => {
                let raw = serde_json::to_value(&value)?;
                self.store(&key, EntryState::Success(raw));
                Ok(value)
            }
            Err(err) => {
                tracing::error!(key = ?key, error = %err, "fetch failed after retry");
                self.store(&key, EntryState::Error(err.to_string()));
                Err(err)
            }
        }
    }

    /// Mark one key stale; the next access refetches instead of serving the
    /// cached value. Part of the mutation protocol: every state-changing
    /// operation invalidates the keys whose data it affects.
    pub fn invalidate(&self, key: &QueryKey) {
        let mut entries = self.inner.entries.lock().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            entry.stale = true;
        }
    }

    pub fn invalidate_where(&self, pred: impl Fn(&QueryKey) -> bool) {
        let mut entries = self.inner.entries.lock().unwrap();
        for (key, entry) in entries.iter_mut() {
            if pred(key) {
                entry.stale = true;
            }
        }
    }

    /// Drop the entry entirely (used when the server-side value itself was
    /// discarded, e.g. the analytics cache clear).
    pub fn remove(&self, key: &QueryKey) {
        self.inner.entries.lock().unwrap().remove(key);
    }

    /// Foreground-visibility trigger: focus-sensitive entries are marked
    /// stale so the next access refetches.
    pub fn notify_focus(&self) {
        let mut entries = self.inner.entries.lock().unwrap();
        for (key, entry) in entries.iter_mut() {
            if self.policy(key).refetch_on_focus {
                entry.stale = true;
            }
        }
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.fresh_raw(key).is_some()
    }

    pub fn last_error(&self, key: &QueryKey) -> Option<String> {
        let entries = self.inner.entries.lock().unwrap();
        match entries.get(key) {
            Some(Entry {
                state: EntryState::Error(msg),
                ..
            }) => Some(msg.clone()),
            _ => None,
        }
    }

    fn fresh_value<T: DeserializeOwned>(&self, key: &QueryKey) -> Result<Option<T>> {
        match self.fresh_raw(key) {
            Some(raw) => Ok(Some(serde_json::from_value(raw)?)),
            None => Ok(None),
        }
    }

    fn fresh_raw(&self, key: &QueryKey) -> Option<JsonValue> {
        let policy = self.policy(key);
        let entries = self.inner.entries.lock().unwrap();
        let entry = entries.get(key)?;
        if entry.stale || entry.fetched_at.elapsed() >= policy.stale_after {
            return None;
        }
        match &entry.state {
            EntryState::Success(raw) => Some(raw.clone()),
            EntryState::Error(_) => None,
        }
    }

    fn store(&self, key: &QueryKey, state: EntryState) {
        let mut entries = self.inner.entries.lock().unwrap();
        entries.insert(
            key.clone(),
            Entry {
                state,
                fetched_at: Instant::now(),
                stale: false,
            },
        );
    }

    fn fetch_lock(&self, key: &QueryKey) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.locks.lock().unwrap();
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
