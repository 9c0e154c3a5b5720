//! Bird taunt quotes with JSON persistence and background generation
//!
//! The bird's dialogue lines live in per-event pools persisted to a JSON
//! file. Taking a line consumes it and queues a background replacement
//! request; generation runs off-thread and its failures are logged, never
//! blocking a simulation tick.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

/// Fallback line when a pool runs dry
pub const DEFAULT_TAUNT: &str = "You're just a slimy worm!";

/// The situations the bird comments on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteEvent {
    /// The bird flies in
    Appeared,
    /// The bird takes a bomb hit
    Damaged,
    /// The bird is shot down
    Dying,
    /// The bird bites the worm
    Nibble,
}

impl QuoteEvent {
    pub const ALL: [QuoteEvent; 4] = [
        QuoteEvent::Appeared,
        QuoteEvent::Damaged,
        QuoteEvent::Dying,
        QuoteEvent::Nibble,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuoteEvent::Appeared => "appeared",
            QuoteEvent::Damaged => "damaged",
            QuoteEvent::Dying => "dying",
            QuoteEvent::Nibble => "nibble",
        }
    }
}

/// Persisted quote pools, one per event kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteStore {
    pub pools: HashMap<QuoteEvent, Vec<String>>,
}

impl QuoteStore {
    /// Load pools from disk. A missing or unreadable file yields empty pools;
    /// the game runs fine on the fallback line alone.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(store) => store,
                Err(err) => {
                    log::warn!("ignoring malformed quote file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no quote file at {}, starting empty", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("could not read quote file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write pools to disk; failures are logged and otherwise ignored
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("could not serialize quotes: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(path, json) {
            log::warn!("could not write quote file {}: {err}", path.display());
        }
    }

    /// Remove and return one line from the event's pool
    pub fn take(&mut self, event: QuoteEvent) -> Option<String> {
        self.pools.get_mut(&event).and_then(|pool| pool.pop())
    }

    pub fn add(&mut self, event: QuoteEvent, line: String) {
        self.pools.entry(event).or_default().push(line);
    }

    pub fn pool_len(&self, event: QuoteEvent) -> usize {
        self.pools.get(&event).map_or(0, |pool| pool.len())
    }
}

/// A source of fresh taunt lines, typically a remote text model.
/// `generate` runs on a background thread and may block.
pub trait QuoteGenerator: Send + Sync + 'static {
    fn generate(
        &self,
        event: QuoteEvent,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Front end the game talks to: synchronous, non-blocking takes backed by
/// the persisted store, with replacement lines arriving from worker threads
pub struct Quotes {
    store: QuoteStore,
    path: PathBuf,
    generator: Option<Arc<dyn QuoteGenerator>>,
    incoming: Arc<Mutex<VecDeque<(QuoteEvent, String)>>>,
}

impl Quotes {
    pub fn open(path: PathBuf, generator: Option<Arc<dyn QuoteGenerator>>) -> Self {
        Self {
            store: QuoteStore::load(&path),
            path,
            generator,
            incoming: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Take a line for the event, falling back to [`DEFAULT_TAUNT`], and
    /// queue a background replacement. Never blocks.
    pub fn take(&mut self, event: QuoteEvent) -> String {
        self.drain_incoming();
        let line = self
            .store
            .take(event)
            .unwrap_or_else(|| DEFAULT_TAUNT.to_string());
        self.request_more(event);
        line
    }

    /// Ask the generator for one replacement line on a background thread
    pub fn request_more(&self, event: QuoteEvent) {
        let Some(generator) = &self.generator else {
            return;
        };
        let generator = Arc::clone(generator);
        let incoming = Arc::clone(&self.incoming);
        thread::spawn(move || match generator.generate(event) {
            Ok(line) => {
                if let Ok(mut queue) = incoming.lock() {
                    queue.push_back((event, line));
                }
            }
            Err(err) => {
                log::warn!("quote generation failed for {}: {err}", event.as_str());
            }
        });
    }

    /// Move finished background lines into the store and persist them.
    /// Uses `try_lock` so a busy worker never stalls the tick loop.
    fn drain_incoming(&mut self) {
        let drained: Vec<(QuoteEvent, String)> = match self.incoming.try_lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return,
        };
        if drained.is_empty() {
            return;
        }
        for (event, line) in drained {
            self.store.add(event, line);
        }
        self.store.save(&self.path);
    }

    pub fn save(&self) {
        self.store.save(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("drift_worm_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_yields_empty_pools() {
        let store = QuoteStore::load(Path::new("/nonexistent/quotes.json"));
        for event in QuoteEvent::ALL {
            assert_eq!(store.pool_len(event), 0);
        }
    }

    #[test]
    fn test_store_round_trip() {
        let path = temp_path("round_trip");
        let mut store = QuoteStore::default();
        store.add(QuoteEvent::Nibble, "tasty".to_string());
        store.add(QuoteEvent::Nibble, "delicious".to_string());
        store.add(QuoteEvent::Dying, "urk".to_string());
        store.save(&path);

        let loaded = QuoteStore::load(&path);
        assert_eq!(loaded.pool_len(QuoteEvent::Nibble), 2);
        assert_eq!(loaded.pool_len(QuoteEvent::Dying), 1);
        assert_eq!(loaded.pool_len(QuoteEvent::Appeared), 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_take_falls_back_to_default() {
        let mut quotes = Quotes::open(temp_path("fallback"), None);
        assert_eq!(quotes.take(QuoteEvent::Appeared), DEFAULT_TAUNT);
    }

    #[test]
    fn test_take_consumes_pool() {
        let mut quotes = Quotes::open(temp_path("consume"), None);
        quotes.store.add(QuoteEvent::Damaged, "ow".to_string());
        assert_eq!(quotes.take(QuoteEvent::Damaged), "ow");
        assert_eq!(quotes.take(QuoteEvent::Damaged), DEFAULT_TAUNT);
    }

    struct Canned;

    impl QuoteGenerator for Canned {
        fn generate(
            &self,
            event: QuoteEvent,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok(format!("canned {}", event.as_str()))
        }
    }

    #[test]
    fn test_background_generation_refills_pool() {
        let path = temp_path("background");
        let mut quotes = Quotes::open(path.clone(), Some(Arc::new(Canned)));
        quotes.request_more(QuoteEvent::Appeared);

        // The worker runs off-thread; poll for its result
        let mut refilled = false;
        for _ in 0..100 {
            quotes.drain_incoming();
            if quotes.store.pool_len(QuoteEvent::Appeared) > 0 {
                refilled = true;
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(refilled);
        assert_eq!(quotes.take(QuoteEvent::Appeared), "canned appeared");
        let _ = fs::remove_file(&path);
    }

    struct Failing;

    impl QuoteGenerator for Failing {
        fn generate(
            &self,
            _event: QuoteEvent,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("service unavailable".into())
        }
    }

    #[test]
    fn test_failed_generation_is_not_persisted() {
        let path = temp_path("failing");
        let mut quotes = Quotes::open(path.clone(), Some(Arc::new(Failing)));
        quotes.request_more(QuoteEvent::Dying);
        thread::sleep(Duration::from_millis(100));
        quotes.drain_incoming();
        assert_eq!(quotes.store.pool_len(QuoteEvent::Dying), 0);
        assert!(!path.exists());
        let _ = fs::remove_file(&path);
    }
}
