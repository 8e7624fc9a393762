//! Cooperative shutdown signal shared by the worker loops.

use tokio::sync::watch;

/// Fires the shutdown signal. Held by the processor.
#[derive(Debug)]
pub(crate) struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

/// Observes the shutdown signal. Each worker owns a clone.
#[derive(Clone, Debug)]
pub(crate) struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownTrigger {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Idempotent; later calls are no-ops.
    pub(crate) fn fire(&self) {
        self.tx.send_replace(true);
    }

    pub(crate) fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }
}

impl ShutdownSignal {
    /// Resolves once shutdown has been requested, or the trigger is gone.
    pub(crate) async fn fired(&mut self) {
        // A dropped trigger can never fire again; treat it as shutdown.
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_clone_observes_the_trigger() {
        let trigger = ShutdownTrigger::new();
        let signal = trigger.signal();
        let mut a = signal.clone();
        let mut b = trigger.signal();
        assert!(!*signal.rx.borrow());

        trigger.fire();
        trigger.fire();

        a.fired().await;
        b.fired().await;
        assert!(*signal.rx.borrow());
    }

    #[tokio::test]
    async fn dropped_trigger_releases_waiters() {
        let trigger = ShutdownTrigger::new();
        let mut signal = trigger.signal();
        drop(trigger);
        signal.fired().await;
    }
}
