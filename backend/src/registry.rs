//! Concurrency-safe registry of live connections and game audiences.

use dashmap::DashMap;
use shared::{GameId, ServerEvent};
use tokio::sync::mpsc;

/// Writable half of one client connection.
///
/// An unbounded sender never blocks a broadcast; a send only fails once
/// the receiving side is gone, which is exactly the liveness signal used
/// for pruning.
pub type EventSink = mpsc::UnboundedSender<ServerEvent>;

struct Connection {
    game_id: GameId,
    sink: EventSink,
}

/// Maps each participant identity to its live connection and audience.
///
/// One entry per identity: registering again replaces the previous
/// connection, so a reconnect silently orphans the old channel. The map is
/// sharded ([`DashMap`]), so traffic on unrelated games never serializes
/// here. Instances are constructor-injected by the coordinator; there is
/// no process-wide registry.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<String, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `username` to `game_id`'s audience, replacing any previous
    /// connection for that identity.
    pub fn register(&self, username: &str, game_id: GameId, sink: EventSink) {
        self.connections
            .insert(username.to_string(), Connection { game_id, sink });
    }

    pub fn remove(&self, username: &str) {
        self.connections.remove(username);
    }

    pub fn contains(&self, username: &str) -> bool {
        self.connections.contains_key(username)
    }

    /// The game this identity is currently attached to, if any.
    pub fn game_of(&self, username: &str) -> Option<GameId> {
        self.connections.get(username).map(|c| c.game_id)
    }

    /// Deliver one event to one identity, pruning it on a dead channel.
    pub fn send_to(&self, username: &str, event: ServerEvent) {
        let dead = match self.connections.get(username) {
            Some(conn) => conn.sink.send(event).is_err(),
            None => false,
        };
        if dead {
            tracing::debug!(%username, "pruning dead connection");
            self.connections.remove(username);
        }
    }

    /// Deliver an event to every member of a game's audience except the
    /// identities in `exclude`.
    ///
    /// Connections whose channel is closed are pruned in the same pass;
    /// one dead recipient never stalls delivery to the others.
    pub fn broadcast(&self, game_id: GameId, event: &ServerEvent, exclude: &[&str]) {
        let mut dead = Vec::new();
        for entry in self.connections.iter() {
            let (username, conn) = entry.pair();
            if conn.game_id != game_id || exclude.contains(&username.as_str()) {
                continue;
            }
            if conn.sink.send(event.clone()).is_err() {
                dead.push(username.clone());
            }
        }
        // Removal outside the iteration: dashmap shard locks are held
        // while iterating.
        for username in dead {
            tracing::debug!(%username, game_id, "pruning dead connection");
            self.connections.remove(&username);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink() -> (EventSink, mpsc::UnboundedReceiver<ServerEvent>) {
        mpsc::unbounded_channel()
    }

    fn note(text: &str) -> ServerEvent {
        ServerEvent::Notification {
            message: text.to_string(),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_broadcast_respects_game_and_exclusion() {
        let registry = ConnectionRegistry::new();
        let (a, mut a_rx) = sink();
        let (b, mut b_rx) = sink();
        let (c, mut c_rx) = sink();
        registry.register("alice", 1, a);
        registry.register("bob", 1, b);
        registry.register("carol", 2, c);

        registry.broadcast(1, &note("hello"), &["alice"]);

        assert!(drain(&mut a_rx).is_empty(), "excluded sender gets nothing");
        assert_eq!(drain(&mut b_rx).len(), 1);
        assert!(drain(&mut c_rx).is_empty(), "other game's audience gets nothing");
    }

    #[test]
    fn test_register_replaces_previous_connection() {
        let registry = ConnectionRegistry::new();
        let (old, mut old_rx) = sink();
        let (new, mut new_rx) = sink();
        registry.register("alice", 1, old);
        registry.register("alice", 1, new);

        registry.broadcast(1, &note("ping"), &[]);
        assert!(drain(&mut old_rx).is_empty(), "orphaned channel is silent");
        assert_eq!(drain(&mut new_rx).len(), 1);
    }

    #[test]
    fn test_dead_connection_pruned_during_broadcast() {
        let registry = ConnectionRegistry::new();
        let (a, a_rx) = sink();
        let (b, mut b_rx) = sink();
        registry.register("alice", 1, a);
        registry.register("bob", 1, b);
        drop(a_rx);

        registry.broadcast(1, &note("ping"), &[]);

        assert!(!registry.contains("alice"), "dead connection must be pruned");
        assert!(registry.contains("bob"));
        assert_eq!(drain(&mut b_rx).len(), 1, "live recipient still delivered");
    }

    #[test]
    fn test_send_to_prunes_dead_channel() {
        let registry = ConnectionRegistry::new();
        let (a, a_rx) = sink();
        registry.register("alice", 1, a);
        drop(a_rx);
        registry.send_to("alice", note("ping"));
        assert!(!registry.contains("alice"));
    }

    #[test]
    fn test_game_of() {
        let registry = ConnectionRegistry::new();
        let (a, _a_rx) = sink();
        registry.register("alice", 3, a);
        assert_eq!(registry.game_of("alice"), Some(3));
        assert_eq!(registry.game_of("bob"), None);
    }
}
