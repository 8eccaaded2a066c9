use std::sync::Arc;

use tokio::sync::watch;

/// Read-only view of the external authentication service
pub trait AuthStatusProvider: Send + Sync {
    /// Current state, read at call time
    fn is_authenticated(&self) -> bool;

    /// Stream of state changes, one receiver per subscriber
    fn subscribe(&self) -> watch::Receiver<bool>;
}

/// In-process auth state backed by a watch channel
#[derive(Clone)]
pub struct AuthStatus {
    tx: Arc<watch::Sender<bool>>,
}

impl AuthStatus {
    pub fn new(authenticated: bool) -> Self {
        let (tx, _rx) = watch::channel(authenticated);
        Self { tx: Arc::new(tx) }
    }

    /// Publish a new state. Subscribers are only woken on an actual change.
    pub fn set(&self, authenticated: bool) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == authenticated {
                false
            } else {
                *current = authenticated;
                true
            }
        });

        if changed {
            tracing::info!("Auth state changed: authenticated={}", authenticated);
        }
        changed
    }
}

impl AuthStatusProvider for AuthStatus {
    fn is_authenticated(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_see_changes_only() {
        let auth = AuthStatus::new(false);
        let mut rx = auth.subscribe();

        assert!(!auth.set(false));
        assert!(!rx.has_changed().unwrap());

        assert!(auth.set(true));
        rx.changed().await.unwrap();
        assert!(*rx.borrow_and_update());
        assert!(auth.is_authenticated());
    }
}
