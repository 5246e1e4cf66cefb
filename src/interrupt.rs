//! Ctrl+C handling outside the interactive prompt.
//!
//! The prompt reports Ctrl+C itself. When the signal arrives at any other
//! time it is recorded here. While the session waits for piped input the
//! wait is cut short; while a request is in flight the interrupt is honored
//! the next time the session waits for input.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// A shared flag raised by the Ctrl+C handler.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl InterruptFlag {
    /// Installs the process-wide Ctrl+C handler and returns its flag.
    ///
    /// Can only be called once per process.
    pub fn install() -> Result<Self> {
        let flag = Self::default();
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || handler_flag.raise())
            .context("Failed to install Ctrl+C handler")?;
        Ok(flag)
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Returns whether an interrupt is pending and clears it.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }

    /// Completes once the flag is raised. Does not clear it.
    pub async fn raised(&self) {
        while !self.raised.load(Ordering::SeqCst) {
            self.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flag_starts_clear() {
        assert!(!InterruptFlag::default().take());
    }

    #[test]
    fn test_take_clears_flag() {
        let flag = InterruptFlag::default();
        flag.raise();
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = InterruptFlag::default();
        let handler = flag.clone();
        handler.raise();
        assert!(flag.take());
    }

    #[tokio::test]
    async fn test_raised_completes_when_raised_from_another_thread() {
        let flag = InterruptFlag::default();
        let handler = flag.clone();

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            handler.raise();
        });

        tokio::time::timeout(Duration::from_secs(5), flag.raised())
            .await
            .unwrap_or_else(|_| panic!("interrupt was not observed"));
        assert!(flag.take());
    }

    #[tokio::test]
    async fn test_raised_returns_immediately_when_already_raised() {
        let flag = InterruptFlag::default();
        flag.raise();

        tokio::time::timeout(Duration::from_secs(1), flag.raised())
            .await
            .unwrap_or_else(|_| panic!("pending interrupt was not observed"));
    }
}
