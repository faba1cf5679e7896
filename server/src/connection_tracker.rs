use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct TrackerState {
    next_id: u64,
    connections: HashMap<u64, SocketAddr>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    state: Arc<Mutex<TrackerState>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a connection id that is never reused for the lifetime of the tracker.
    pub async fn add_connection(&self, addr: SocketAddr) -> u64 {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        state.connections.insert(id, addr);
        id
    }

    pub async fn remove_connection(&self, id: u64) -> Option<SocketAddr> {
        self.state.lock().await.connections.remove(&id)
    }

    pub async fn active_count(&self) -> usize {
        self.state.lock().await.connections.len()
    }
}
