//! Registry of live sessions keyed by id.

use super::{GameSession, Player, SessionError, SessionHandle};
use crate::config::RulesSettings;
use crate::oracle::OracleClient;
use std::collections::HashMap;
use std::sync::Arc;
use strictly_chain::GameMode;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Owns every session created through it.
///
/// All sessions share one oracle client and one set of rules.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    oracle: OracleClient,
    rules: RulesSettings,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[instrument(skip_all)]
    pub fn new(oracle: OracleClient, rules: RulesSettings) -> Self {
        info!("Creating session registry");
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            oracle,
            rules,
        }
    }

    /// Rules applied to new sessions.
    pub fn rules(&self) -> &RulesSettings {
        &self.rules
    }

    /// Starts a session and registers it.
    #[instrument(skip(self, players))]
    pub async fn create(&self, mode: GameMode, players: [Player; 2]) -> SessionHandle {
        let session = GameSession::new(mode, players, &self.rules);
        let handle = SessionHandle::new(session, self.oracle.clone());
        self.sessions
            .write()
            .await
            .insert(handle.id(), handle.clone());
        info!(session_id = %handle.id(), "Session registered");
        handle
    }

    /// Looks a session up.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| {
                warn!(session_id = %id, "Session not found");
                SessionError::SessionNotFound(id)
            })
    }

    /// Drops a session from the registry. Outstanding handles stay usable.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: Uuid) -> Result<SessionHandle, SessionError> {
        let removed = self.sessions.write().await.remove(&id);
        match removed {
            Some(handle) => {
                info!(session_id = %id, "Session removed");
                Ok(handle)
            }
            None => Err(SessionError::SessionNotFound(id)),
        }
    }

    /// Ids of all registered sessions.
    pub async fn list(&self) -> Vec<Uuid> {
        self.sessions.read().await.keys().copied().collect()
    }

    /// Number of registered sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Removes every finished session, returning how many were dropped.
    #[instrument(skip(self))]
    pub async fn prune_finished(&self) -> usize {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();
        let mut finished = Vec::new();
        for handle in handles {
            if !handle.is_in_progress().await {
                finished.push(handle.id());
            }
        }

        let mut sessions = self.sessions.write().await;
        for id in &finished {
            sessions.remove(id);
        }
        info!(pruned = finished.len(), "Finished sessions pruned");
        finished.len()
    }
}
