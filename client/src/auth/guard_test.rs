use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::testing::{RecordingSleeper, cell};

/// Probe whose session never becomes valid unless `authenticate_on` is hit.
#[derive(Default)]
struct StubProbe {
    role: RefCell<Option<UserType>>,
    tokens: Cell<bool>,
    rechecks: Cell<u8>,
    clears: Cell<u8>,
    authenticate_on: Option<(u8, UserType)>,
}

impl StubProbe {
    fn with_tokens() -> Self {
        let probe = Self::default();
        probe.tokens.set(true);
        probe
    }
}

#[async_trait(?Send)]
impl SessionProbe for StubProbe {
    fn is_authenticated(&self) -> bool {
        self.role.borrow().is_some()
    }

    fn user_type(&self) -> Option<UserType> {
        *self.role.borrow()
    }

    fn has_tokens(&self) -> bool {
        self.tokens.get()
    }

    async fn recheck(&self) -> bool {
        let n = self.rechecks.get() + 1;
        self.rechecks.set(n);
        match self.authenticate_on {
            Some((attempt, role)) if attempt == n => {
                *self.role.borrow_mut() = Some(role);
                true
            }
            _ => false,
        }
    }

    fn clear_tokens(&self) {
        self.clears.set(self.clears.get() + 1);
        self.tokens.set(false);
    }
}

fn input(initialized: bool, role: Option<UserType>, has_tokens: bool) -> GuardInput {
    GuardInput { initialized, authenticated: role.is_some(), role, has_tokens }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    futures::executor::block_on(future)
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn waits_until_initialized() {
    let mut guard = RouteGuard::new(UserType::Doctor);
    assert_eq!(guard.evaluate(input(false, None, true)), GuardAction::Wait);
    assert_eq!(guard.view(), GuardView::Loading);
}

#[test]
fn authorized_role_renders_even_before_init() {
    let mut guard = RouteGuard::new(UserType::Doctor);
    assert_eq!(guard.evaluate(input(false, Some(UserType::Doctor), true)), GuardAction::Render);
    assert_eq!(guard.view(), GuardView::Children);
}

#[test]
fn wrong_role_redirects_without_clearing() {
    let mut guard = RouteGuard::new(UserType::Doctor);
    assert_eq!(
        guard.evaluate(input(true, Some(UserType::Patient), true)),
        GuardAction::Redirect { clear_tokens: false }
    );
    assert_eq!(guard.view(), GuardView::Redirecting);
}

#[test]
fn no_tokens_redirects_immediately() {
    let mut guard = RouteGuard::new(UserType::Patient);
    assert_eq!(guard.evaluate(input(true, None, false)), GuardAction::Redirect { clear_tokens: false });
}

#[test]
fn tokens_without_session_schedule_recheck_and_block_overlap() {
    let mut guard = RouteGuard::new(UserType::Doctor);
    assert_eq!(
        guard.evaluate(input(true, None, true)),
        GuardAction::Recheck { attempt: 1, delay: RECHECK_DELAY }
    );
    assert!(guard.is_rechecking());
    assert_eq!(guard.view(), GuardView::Rechecking);
    assert_eq!(guard.evaluate(input(true, None, true)), GuardAction::Wait);

    guard.recheck_finished();
    assert_eq!(guard.attempts(), 1);
    assert_eq!(
        guard.evaluate(input(true, None, true)),
        GuardAction::Recheck { attempt: 2, delay: RECHECK_DELAY }
    );
}

#[test]
fn clears_tokens_only_after_third_attempt() {
    let mut guard = RouteGuard::new(UserType::Doctor);
    for _ in 0..MAX_RECHECKS {
        assert!(matches!(guard.evaluate(input(true, None, true)), GuardAction::Recheck { .. }));
        guard.recheck_finished();
    }
    assert_eq!(guard.evaluate(input(true, None, true)), GuardAction::Redirect { clear_tokens: true });
}

#[test]
fn session_loss_after_authorization_redirects() {
    let mut guard = RouteGuard::new(UserType::Patient);
    assert_eq!(guard.evaluate(input(true, Some(UserType::Patient), true)), GuardAction::Render);
    assert_eq!(guard.evaluate(input(true, None, false)), GuardAction::Redirect { clear_tokens: false });
}

#[test]
fn placeholders_by_view() {
    assert_eq!(GuardView::Loading.placeholder(), Some("Chargement..."));
    assert_eq!(GuardView::Rechecking.placeholder(), Some("Vérification de l'authentification..."));
    assert_eq!(GuardView::Redirecting.placeholder(), Some("Redirection..."));
    assert_eq!(GuardView::Children.placeholder(), None);
}

// =============================================================
// run_guard
// =============================================================

#[test]
fn three_failed_rechecks_then_clear_and_redirect() {
    let guard = cell(RouteGuard::new(UserType::Doctor));
    let probe = StubProbe::with_tokens();
    let sleeper = RecordingSleeper::default();

    let outcome = block_on(run_guard(&guard, &probe, &sleeper, true));

    assert_eq!(outcome, GuardOutcome::Redirected { cleared_tokens: true });
    assert_eq!(probe.rechecks.get(), 3);
    assert_eq!(probe.clears.get(), 1);
    assert_eq!(sleeper.recorded(), vec![RECHECK_DELAY; 3]);
    assert_eq!(guard.borrow().phase(), GuardPhase::Denied);
}

#[test]
fn successful_recheck_authorizes() {
    let guard = cell(RouteGuard::new(UserType::Doctor));
    let probe = StubProbe { authenticate_on: Some((2, UserType::Doctor)), ..StubProbe::with_tokens() };
    let sleeper = RecordingSleeper::default();

    let outcome = block_on(run_guard(&guard, &probe, &sleeper, true));

    assert_eq!(outcome, GuardOutcome::Authorized);
    assert_eq!(probe.rechecks.get(), 2);
    assert_eq!(probe.clears.get(), 0);
    assert_eq!(sleeper.recorded().len(), 2);
}

#[test]
fn uninitialized_run_is_pending_without_rechecks() {
    let guard = cell(RouteGuard::new(UserType::Patient));
    let probe = StubProbe::with_tokens();
    let sleeper = RecordingSleeper::default();

    assert_eq!(block_on(run_guard(&guard, &probe, &sleeper, false)), GuardOutcome::Pending);
    assert_eq!(probe.rechecks.get(), 0);
    assert!(sleeper.recorded().is_empty());
}

#[test]
fn in_flight_chain_makes_second_run_pending() {
    let guard: Rc<RefCell<RouteGuard>> = cell(RouteGuard::new(UserType::Doctor));
    guard.borrow_mut().evaluate(input(true, None, true));
    let probe = StubProbe::with_tokens();

    let outcome = block_on(run_guard(&guard, &probe, &RecordingSleeper::default(), true));

    assert_eq!(outcome, GuardOutcome::Pending);
    assert_eq!(probe.rechecks.get(), 0);
}
