use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Shared TTL cache used by the upstream clients. Clones share storage.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    data: Arc<Mutex<HashMap<String, (T, Instant)>>>,
    ttl: Duration,
}

impl<T: Clone> Cache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        let data = self.data.lock().await;
        if let Some((value, timestamp)) = data.get(key) {
            if timestamp.elapsed() < self.ttl {
                return Some(value.clone());
            }
        }
        None
    }

    pub async fn set(&self, key: String, value: T) {
        let mut data = self.data.lock().await;
        // Drop expired entries on write
        let ttl = self.ttl;
        data.retain(|_, (_, timestamp)| timestamp.elapsed() < ttl);
        data.insert(key, (value, Instant::now()));
    }

    pub async fn len(&self) -> usize {
        self.data.lock().await.len()
    }
}
