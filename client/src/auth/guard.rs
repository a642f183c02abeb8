//! Role guard state machine for protected layouts.
//!
//! DESIGN
//! ======
//! `RouteGuard::evaluate` is a pure transition from the current session
//! facts to one action: wait, render, recheck after a delay, or redirect.
//! Tokens that exist without an authenticated user get up to
//! `MAX_RECHECKS` session checks spaced by `RECHECK_DELAY`; only when all of
//! them fail are the tokens cleared on the way to `/login`. A flag blocks
//! overlapping recheck chains while one is in flight.
//!
//! `run_guard` drives the machine against a `SessionProbe` and a `Sleeper`,
//! so the whole retry discipline is testable without timers or a browser.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::time::Duration;

use async_trait::async_trait;

use crate::net::types::UserType;
use crate::state::StateCell;
use crate::util::timer::Sleeper;

pub const RECHECK_DELAY: Duration = Duration::from_secs(1);
pub const MAX_RECHECKS: u8 = 3;
pub const LOGIN_PATH: &str = "/login";

/// Session capability the guard needs from the auth store.
#[async_trait(?Send)]
pub trait SessionProbe {
    fn is_authenticated(&self) -> bool;
    fn user_type(&self) -> Option<UserType>;
    fn has_tokens(&self) -> bool;
    /// Re-run the session check; true when it authenticated.
    async fn recheck(&self) -> bool;
    fn clear_tokens(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardInput {
    pub initialized: bool,
    pub authenticated: bool,
    pub role: Option<UserType>,
    pub has_tokens: bool,
}

impl GuardInput {
    pub fn observe(probe: &impl SessionProbe, initialized: bool) -> Self {
        Self {
            initialized,
            authenticated: probe.is_authenticated(),
            role: probe.user_type(),
            has_tokens: probe.has_tokens(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPhase {
    #[default]
    Init,
    Checking(u8),
    Authorized,
    Denied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardAction {
    Wait,
    Render,
    Recheck { attempt: u8, delay: Duration },
    Redirect { clear_tokens: bool },
}

/// What a guarded layout shows for its current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Rechecking,
    Children,
    Redirecting,
}

impl GuardView {
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Chargement..."),
            Self::Rechecking => Some("Vérification de l'authentification..."),
            Self::Redirecting => Some("Redirection..."),
            Self::Children => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteGuard {
    required: UserType,
    attempts: u8,
    rechecking: bool,
    phase: GuardPhase,
}

impl RouteGuard {
    pub fn new(required: UserType) -> Self {
        Self { required, attempts: 0, rechecking: false, phase: GuardPhase::Init }
    }

    pub fn phase(&self) -> GuardPhase {
        self.phase
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    pub fn is_rechecking(&self) -> bool {
        self.rechecking
    }

    pub fn view(&self) -> GuardView {
        match self.phase {
            GuardPhase::Init => GuardView::Loading,
            GuardPhase::Checking(_) => GuardView::Rechecking,
            GuardPhase::Authorized => GuardView::Children,
            GuardPhase::Denied => GuardView::Redirecting,
        }
    }

    pub fn evaluate(&mut self, input: GuardInput) -> GuardAction {
        if input.authenticated && input.role == Some(self.required) {
            self.phase = GuardPhase::Authorized;
            return GuardAction::Render;
        }
        if self.rechecking {
            return GuardAction::Wait;
        }
        if !input.initialized {
            self.phase = GuardPhase::Init;
            return GuardAction::Wait;
        }
        // `AuthStore::check_auth` clears tokens when it fails, so against the
        // real store this branch runs once and the next pass redirects without
        // clearing. Later attempts need a check that fails but leaves tokens.
        if input.has_tokens && !input.authenticated && self.attempts < MAX_RECHECKS {
            let attempt = self.attempts + 1;
            self.rechecking = true;
            self.phase = GuardPhase::Checking(attempt);
            return GuardAction::Recheck { attempt, delay: RECHECK_DELAY };
        }
        self.phase = GuardPhase::Denied;
        GuardAction::Redirect { clear_tokens: self.attempts >= MAX_RECHECKS }
    }

    pub fn recheck_finished(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
        self.rechecking = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Authorized,
    Redirected { cleared_tokens: bool },
    /// Waiting on initialization or on a recheck chain already in flight.
    Pending,
}

/// Drive `guard` until it renders, redirects, or has to wait.
///
/// The guard lives in a cell so a concurrent evaluation (e.g. from a
/// reactive effect) sees the in-flight recheck and backs off.
pub async fn run_guard<G, P, S>(guard: &G, probe: &P, sleeper: &S, initialized: bool) -> GuardOutcome
where
    G: StateCell<RouteGuard>,
    P: SessionProbe,
    S: Sleeper,
{
    loop {
        let input = GuardInput::observe(probe, initialized);
        let mut action = GuardAction::Wait;
        guard.update_state(|g| action = g.evaluate(input));

        match action {
            GuardAction::Render => return GuardOutcome::Authorized,
            GuardAction::Wait => return GuardOutcome::Pending,
            GuardAction::Recheck { attempt, delay } => {
                log::debug!("guard: tokens without session, recheck {attempt}/{MAX_RECHECKS}");
                sleeper.sleep(delay).await;
                let ok = probe.recheck().await;
                log::debug!("guard: recheck {attempt} {}", if ok { "succeeded" } else { "failed" });
                guard.update_state(RouteGuard::recheck_finished);
            }
            GuardAction::Redirect { clear_tokens } => {
                if clear_tokens {
                    log::info!("guard: rechecks exhausted, clearing tokens");
                    probe.clear_tokens();
                }
                return GuardOutcome::Redirected { cleared_tokens: clear_tokens };
            }
        }
    }
}
