use futures::future::select_all;
use std::sync::Arc;
use tokio::sync::watch::{self, Receiver, Sender};

/// The sending side of a cancellable scope.
///
/// Cloning the handle shares the same scope. A scope can have child scopes, see
/// [ShutdownHandle::child_scope], which are cancelled whenever this scope is cancelled.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Arc<Sender<bool>>,
    ancestors: Vec<Receiver<bool>>,
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self {
            sender: Arc::new(watch::channel(false).0),
            ancestors: Vec::new(),
        }
    }

    fn with_ancestors(ancestors: Vec<Receiver<bool>>) -> Self {
        Self {
            sender: Arc::new(watch::channel(false).0),
            ancestors,
        }
    }

    /// Cancel this scope and every scope derived from it.
    pub fn shutdown(&self) {
        if !self.sender.send_replace(true) {
            log::debug!("Shutdown signal sent");
        }
    }

    /// Whether this scope, or any scope it was derived from, has been cancelled.
    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow() || self.ancestors.iter().any(|rx| *rx.borrow())
    }

    pub fn new_listener(&self) -> DelegatedShutdownListener {
        let mut receivers = Vec::with_capacity(self.ancestors.len() + 1);
        receivers.push(self.sender.subscribe());
        receivers.extend(self.ancestors.iter().cloned());

        DelegatedShutdownListener::new(receivers)
    }

    /// Derive a nested scope which is released when the returned guard is dropped.
    pub fn child_scope(&self) -> ShutdownScope {
        self.new_listener().child_scope()
    }
}

/// The receiving side of a cancellable scope.
///
/// A listener observes its own scope and all of the scopes that its scope was derived from.
#[derive(Clone, Debug)]
pub struct DelegatedShutdownListener {
    receivers: Vec<Receiver<bool>>,
}

impl DelegatedShutdownListener {
    pub(crate) fn new(receivers: Vec<Receiver<bool>>) -> Self {
        Self { receivers }
    }

    /// Point in time check if the shutdown signal has been received. If this returns true then work
    /// should be stopped so that the ramp can shut down.
    pub fn should_shutdown(&self) -> bool {
        self.receivers
            .iter()
            // A closed channel means nobody is left to cancel this scope, so it is treated as
            // cancelled. There is nothing left to do the work for.
            .any(|rx| *rx.borrow() || rx.has_changed().is_err())
    }

    /// Wait for the shutdown signal to be received. It is safe to race this with another future so
    /// that the shutdown signal can be used to cancel other work in progress.
    pub async fn wait_for_shutdown(&self) {
        let waits = self.receivers.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                // An error means the sender is gone, which counts as a shutdown.
                let _ = rx.wait_for(|cancelled| *cancelled).await;
            })
        });

        select_all(waits).await;
    }

    /// Derive a nested scope from this one.
    ///
    /// The nested scope is cancelled when this scope is cancelled, or when the returned guard is
    /// dropped. Cancelling the nested scope does not affect this scope.
    pub fn child_scope(&self) -> ShutdownScope {
        ShutdownScope {
            handle: ShutdownHandle::with_ancestors(self.receivers.clone()),
        }
    }
}

/// A cancellable scope that is released when it goes out of scope.
#[derive(Debug)]
pub struct ShutdownScope {
    handle: ShutdownHandle,
}

impl ShutdownScope {
    pub fn handle(&self) -> &ShutdownHandle {
        &self.handle
    }

    pub fn listener(&self) -> DelegatedShutdownListener {
        self.handle.new_listener()
    }
}

impl Drop for ShutdownScope {
    fn drop(&mut self) {
        self.handle.sender.send_replace(true);
    }
}

#[derive(derive_more::Error, derive_more::Display, Debug)]
pub struct ShutdownSignalError {
    msg: String,
}

impl Default for ShutdownSignalError {
    fn default() -> Self {
        Self {
            msg: "Execution cancelled by shutdown signal".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn new_scope_is_not_shutdown() {
        let handle = ShutdownHandle::new();
        let listener = handle.new_listener();

        assert!(!handle.is_shutdown());
        assert!(!listener.should_shutdown());
    }

    #[test]
    fn shutdown_is_seen_by_existing_and_new_listeners() {
        let handle = ShutdownHandle::new();
        let before = handle.new_listener();

        handle.shutdown();

        assert!(handle.is_shutdown());
        assert!(before.should_shutdown());
        assert!(handle.new_listener().should_shutdown());
    }

    #[test]
    fn parent_shutdown_cancels_child() {
        let parent = ShutdownHandle::new();
        let child = parent.child_scope();
        let grandchild = child.listener().child_scope();

        parent.shutdown();

        assert!(child.listener().should_shutdown());
        assert!(grandchild.listener().should_shutdown());
        assert!(child.handle().is_shutdown());
    }

    #[test]
    fn child_shutdown_does_not_cancel_parent() {
        let parent = ShutdownHandle::new();
        let child = parent.child_scope();

        child.handle().shutdown();

        assert!(child.listener().should_shutdown());
        assert!(!parent.new_listener().should_shutdown());
    }

    #[test]
    fn dropping_scope_releases_it() {
        let parent = ShutdownHandle::new();
        let scope = parent.child_scope();
        let listener = scope.listener();
        assert!(!listener.should_shutdown());

        drop(scope);

        assert!(listener.should_shutdown());
        assert!(!parent.is_shutdown());
    }

    #[test]
    fn dropped_handle_counts_as_shutdown() {
        let handle = ShutdownHandle::new();
        let listener = handle.new_listener();

        drop(handle);

        assert!(listener.should_shutdown());
    }

    #[tokio::test]
    async fn wait_for_shutdown_returns_once_ancestor_cancelled() {
        let parent = ShutdownHandle::new();
        let scope = parent.child_scope();
        let listener = scope.listener();

        let waiter = tokio::spawn(async move { listener.wait_for_shutdown().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        parent.shutdown();

        tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("listener did not observe shutdown")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_for_shutdown_returns_immediately_if_already_cancelled() {
        let handle = ShutdownHandle::new();
        handle.shutdown();

        tokio::time::timeout(
            Duration::from_secs(5),
            handle.new_listener().wait_for_shutdown(),
        )
        .await
        .expect("listener did not observe earlier shutdown");
    }
}
