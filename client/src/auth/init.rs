//! Auth initialization gate.
//!
//! Answers "has this mount finished its first session check?". Guards keep
//! showing the loading placeholder until it has.

#[cfg(test)]
#[path = "init_test.rs"]
mod init_test;

use std::time::Duration;

use leptos::prelude::*;

use super::guard::SessionProbe;
use crate::util::timer::Sleeper;

/// Pause after a cold session check before reporting readiness.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Run the first session check for a mount.
///
/// Returns immediately when a session and its tokens are both present;
/// otherwise checks once and waits `SETTLE_DELAY`. A session restored from
/// the snapshot without tokens is stale and goes through the check, which
/// signs it out. Returns whether a session exists afterwards.
pub async fn initialize_session(probe: &impl SessionProbe, sleeper: &impl Sleeper) -> bool {
    if probe.is_authenticated() && probe.has_tokens() {
        log::debug!("auth init: session already present");
        return true;
    }
    let authenticated = probe.recheck().await;
    sleeper.sleep(SETTLE_DELAY).await;
    log::debug!("auth init: complete (authenticated: {authenticated})");
    authenticated
}

/// Per-mount initialization flag. Runs once; never re-runs on auth changes.
///
/// The persisted snapshot is restored here rather than during render so the
/// hydrated markup matches what the server produced.
pub fn use_auth_initialization() -> ReadSignal<bool> {
    let (initialized, set_initialized) = signal(false);

    #[cfg(feature = "hydrate")]
    {
        let store = expect_context::<crate::app::PortalContext>().auth_store();
        leptos::task::spawn_local(async move {
            store.rehydrate();
            initialize_session(&store, &crate::util::timer::BrowserSleeper).await;
            set_initialized.set(true);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = set_initialized;
    }

    initialized
}
