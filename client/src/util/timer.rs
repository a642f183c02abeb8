//! Delay abstraction for async flows that wait between steps.
//!
//! The route guard's recheck loop and the auth initialization gate sleep
//! through a `Sleeper` so tests can record delays instead of waiting.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, delay: Duration);
}

/// Browser timers via `setTimeout`. Returns immediately outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserSleeper;

#[async_trait(?Send)]
impl Sleeper for BrowserSleeper {
    async fn sleep(&self, delay: Duration) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(delay).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = delay;
        }
    }
}
