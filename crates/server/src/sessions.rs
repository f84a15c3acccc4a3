use std::sync::Arc;

use dashmap::DashMap;
use pixy_core::DialogueEngine;
use tokio::sync::Mutex;
use uuid::Uuid;

/// In-memory session registry. Each engine sits behind its own mutex so a
/// message for one session never blocks another; `try_lock` gives the widget
/// its drop-concurrent-input semantics (input arriving while a reply is
/// being computed is discarded, not queued).
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<Mutex<DialogueEngine>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> (Uuid, Arc<Mutex<DialogueEngine>>) {
        let session_id = Uuid::new_v4();
        let engine = Arc::new(Mutex::new(DialogueEngine::new()));
        self.sessions.insert(session_id, engine.clone());
        (session_id, engine)
    }

    pub fn get(&self, session_id: &Uuid) -> Option<Arc<Mutex<DialogueEngine>>> {
        self.sessions.get(session_id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, session_id: &Uuid) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::sessions::SessionRegistry;

    #[tokio::test]
    async fn create_get_and_remove_round_trip() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let (session_id, _engine) = registry.create();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&session_id).is_some());

        assert!(registry.remove(&session_id));
        assert!(registry.get(&session_id).is_none());
        assert!(!registry.remove(&session_id));
    }

    #[tokio::test]
    async fn held_lock_makes_try_lock_fail_for_concurrent_input() {
        let registry = SessionRegistry::new();
        let (session_id, engine) = registry.create();

        let guard = engine.try_lock().expect("first lock succeeds");
        let second = registry.get(&session_id).expect("session exists");
        assert!(second.try_lock().is_err(), "concurrent input must be rejected");
        drop(guard);
        assert!(second.try_lock().is_ok());
    }
}
