//! Mount points - where the UI end of the boundary is attached

use crate::port::UiPort;
use tokio::sync::oneshot;

/// Attach point for the UI runtime
///
/// `embed` is called at most once per successful load, never before.
pub trait Mount: Send {
    /// Name used in diagnostics
    fn name(&self) -> &str {
        "mount"
    }

    /// Hand the UI its end of the boundary
    fn embed(&mut self, ui: UiPort);
}

impl<F> Mount for F
where
    F: FnMut(UiPort) + Send,
{
    fn embed(&mut self, ui: UiPort) {
        self(ui)
    }
}

/// Mount that forwards the UI port to an awaiting [`MountHandle`]
#[derive(Debug)]
pub struct ChannelMount {
    name: String,
    tx: Option<oneshot::Sender<UiPort>>,
}

impl ChannelMount {
    /// Create a mount and the handle the UI side waits on
    pub fn new(name: impl Into<String>) -> (Self, MountHandle) {
        let (tx, rx) = oneshot::channel();
        let mount = Self {
            name: name.into(),
            tx: Some(tx),
        };
        (mount, MountHandle { rx })
    }
}

impl Mount for ChannelMount {
    fn name(&self) -> &str {
        &self.name
    }

    fn embed(&mut self, ui: UiPort) {
        match self.tx.take() {
            Some(tx) => {
                if tx.send(ui).is_err() {
                    tracing::warn!(mount = %self.name, "Mount handle dropped before attach");
                }
            }
            None => tracing::warn!(mount = %self.name, "Mount already embedded; ignoring"),
        }
    }
}

/// State of a [`MountHandle`] when polled without waiting
#[derive(Debug)]
pub enum TryAttach {
    /// The UI has been embedded
    Attached(UiPort),
    /// Still waiting on a load
    Pending,
    /// The mount was dropped without embedding, e.g. after a failed load
    Abandoned,
}

/// UI-side handle of a [`ChannelMount`]
#[derive(Debug)]
pub struct MountHandle {
    rx: oneshot::Receiver<UiPort>,
}

impl MountHandle {
    /// Wait for the bridge to embed the UI; `None` if it never will
    pub async fn attached(self) -> Option<UiPort> {
        self.rx.await.ok()
    }

    /// Check without waiting
    ///
    /// After this returns `Attached`, the handle is spent.
    pub fn try_attached(&mut self) -> TryAttach {
        match self.rx.try_recv() {
            Ok(ui) => TryAttach::Attached(ui),
            Err(oneshot::error::TryRecvError::Empty) => TryAttach::Pending,
            Err(oneshot::error::TryRecvError::Closed) => TryAttach::Abandoned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port;

    #[tokio::test]
    async fn test_channel_mount_delivers_port() {
        let (mut mount, handle) = ChannelMount::new("my-app");
        let (_bridge, ui) = port::channel(4);

        mount.embed(ui);
        assert!(handle.attached().await.is_some());
    }

    #[tokio::test]
    async fn test_handle_pending_then_abandoned() {
        let (mount, mut handle) = ChannelMount::new("my-app");
        assert!(matches!(handle.try_attached(), TryAttach::Pending));

        drop(mount);
        assert!(matches!(handle.try_attached(), TryAttach::Abandoned));
    }

    #[tokio::test]
    async fn test_attached_none_when_mount_dropped() {
        let (mount, handle) = ChannelMount::new("my-app");
        drop(mount);
        assert!(handle.attached().await.is_none());
    }

    #[test]
    fn test_second_embed_ignored() {
        let (mut mount, mut handle) = ChannelMount::new("my-app");
        let (_b1, first) = port::channel(4);
        let (_b2, second) = port::channel(4);

        mount.embed(first);
        mount.embed(second);
        assert!(matches!(handle.try_attached(), TryAttach::Attached(_)));
    }

    #[test]
    fn test_closure_mount() {
        let mut embedded = 0;
        {
            let mut mount = |_ui: UiPort| embedded += 1;
            let (_bridge, ui) = port::channel(4);
            Mount::embed(&mut mount, ui);
            assert_eq!(Mount::name(&mount), "mount");
        }
        assert_eq!(embedded, 1);
    }

    #[test]
    fn test_channel_mount_name() {
        let (mount, _handle) = ChannelMount::new("my-app");
        assert_eq!(mount.name(), "my-app");
    }
}
