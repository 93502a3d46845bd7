use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;

use crate::timer::clock::Countdown;

type Callback = Arc<dyn Fn() + Send + Sync + 'static>;

/// A pausable, single-fire countdown.
///
/// The callback runs at most once, after the timer has been running for its
/// whole delay. Time spent stopped does not count. Timers must be created and
/// started inside a tokio runtime.
pub struct Timer {
    callback: Callback,
    /// `None` when created with a negative delay: never armed.
    countdown: Option<Countdown>,
    fired: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    /// Create a timer and arm it for `delay_ms` milliseconds of running time.
    ///
    /// A negative delay yields a timer that never fires.
    pub fn new<F>(callback: F, delay_ms: i64) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let countdown = u64::try_from(delay_ms)
            .ok()
            .map(|ms| Countdown::new(Duration::from_millis(ms)));

        let mut timer = Self {
            callback: Arc::new(callback),
            countdown,
            fired: Arc::new(AtomicBool::new(false)),
            handle: None,
        };
        timer.start();
        timer
    }

    /// Arm the timer for what is left of its delay. No-op when already running.
    pub fn start(&mut self) {
        if self.is_fired() || self.handle.is_some() {
            return;
        }
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        let deadline = countdown.arm();
        let fired = self.fired.clone();
        let callback = self.callback.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if !fired.swap(true, Ordering::AcqRel) {
                callback();
            }
        }));
    }

    /// Pause the timer, keeping the remaining delay. No-op when already stopped.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        handle.abort();
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.disarm();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.is_fired() && self.handle.is_some()
    }

    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Running time left before the callback fires.
    ///
    /// `None` for timers that were never armed.
    pub fn remaining(&self) -> Option<Duration> {
        if self.is_fired() {
            return Some(Duration::ZERO);
        }
        self.countdown.as_ref().map(Countdown::remaining)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("running", &self.is_running())
            .field("fired", &self.is_fired())
            .field("remaining", &self.remaining())
            .field("armed", &self.countdown.as_ref().map(Countdown::is_armed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::{task::yield_now, time::advance};

    fn counting_timer(delay_ms: i64) -> (Timer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let timer = Timer::new(
            move || {
                hits.fetch_add(1, Ordering::SeqCst);
            },
            delay_ms,
        );
        (timer, count)
    }

    async fn elapse(ms: u64) {
        advance(Duration::from_millis(ms)).await;
        yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_once_after_delay() {
        let (timer, count) = counting_timer(100);
        assert!(timer.is_running());

        elapse(99).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        elapse(1).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(timer.is_fired());
        assert!(!timer.is_running());

        elapse(1_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_stop_keeps_remaining_time() {
        let (mut timer, count) = counting_timer(100);

        elapse(40).await;
        timer.stop();
        assert_eq!(timer.remaining(), Some(Duration::from_millis(60)));

        elapse(1_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        timer.start();
        elapse(59).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        elapse(1).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_start_and_stop_are_idempotent() {
        let (mut timer, count) = counting_timer(50);

        timer.start();
        elapse(20).await;
        timer.start();
        assert_eq!(timer.remaining(), Some(Duration::from_millis(30)));

        timer.stop();
        timer.stop();
        assert_eq!(timer.remaining(), Some(Duration::from_millis(30)));
        assert!(!timer.is_running());

        timer.start();
        elapse(30).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_is_inert_after_firing() {
        let (mut timer, count) = counting_timer(10);
        elapse(10).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        timer.stop();
        timer.start();
        elapse(100).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timer.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_delay_never_arms() {
        let (mut timer, count) = counting_timer(-1);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), None);

        timer.start();
        elapse(10_000).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_timer_never_fires() {
        let (timer, count) = counting_timer(10);
        drop(timer);
        elapse(100).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
