//! Subscriber Registry - Read-Only Snapshots
//!
//! Subscriber management lives outside this service; the workers only need
//! a point-in-time snapshot per cycle. The file-backed registry re-reads on
//! every call so external edits show up without a restart.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use super::types::Subscriber;

pub trait SubscriberRegistry: Send + Sync {
    /// Point-in-time snapshot of all subscribers.
    fn list_subscribers(&self) -> Vec<Subscriber>;
}

// ============================================================================
// JSON FILE REGISTRY
// ============================================================================

pub struct JsonFileRegistry {
    path: PathBuf,
}

impl JsonFileRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SubscriberRegistry for JsonFileRegistry {
    fn list_subscribers(&self) -> Vec<Subscriber> {
        if !self.path.exists() {
            return Vec::new();
        }
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("Subscriber file open failed: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_reader(BufReader::new(file)) {
            Ok(subscribers) => subscribers,
            Err(e) => {
                log::warn!("Subscriber file parse failed: {}", e);
                Vec::new()
            }
        }
    }
}

// ============================================================================
// IN-MEMORY REGISTRY
// ============================================================================

#[derive(Default)]
pub struct InMemoryRegistry {
    subscribers: Vec<Subscriber>,
}

impl InMemoryRegistry {
    pub fn new(subscribers: Vec<Subscriber>) -> Self {
        Self { subscribers }
    }
}

impl SubscriberRegistry for InMemoryRegistry {
    fn list_subscribers(&self) -> Vec<Subscriber> {
        self.subscribers.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_empty_snapshot() {
        let registry = JsonFileRegistry::new(PathBuf::from("/nonexistent/subscribers.json"));
        assert!(registry.list_subscribers().is_empty());
    }

    #[test]
    fn test_file_registry_reads_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscribers.json");
        let subscribers = vec![Subscriber::register("+905551234567", 41.0, 29.0).unwrap()];
        std::fs::write(&path, serde_json::to_string(&subscribers).unwrap()).unwrap();

        let registry = JsonFileRegistry::new(path);
        let snapshot = registry.list_subscribers();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].phone, "+905551234567");
    }

    #[test]
    fn test_corrupt_file_yields_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subscribers.json");
        std::fs::write(&path, "nonsense").unwrap();

        let registry = JsonFileRegistry::new(path);
        assert!(registry.list_subscribers().is_empty());
    }
}
