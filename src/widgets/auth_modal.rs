//! Login/registration panel toggling inside the auth modal.
//!
//! Exactly one of the two panels carries the active class at any
//! observation point. Switching fades the outgoing panel out and, at fade
//! completion, fades the incoming one in and restyles the toggle buttons.
//! Activating the registration side first fires a fragment fetch for the
//! registration form; the swap never waits on the response.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use tracing::debug;

use crate::dom::event::EventKind;
use crate::dom::{Element, ElementLocator, MountError};
use crate::fetch::{FetchOutcome, FragmentFetch};
use crate::snapshot::AuthSnapshot;
use crate::theme::{
    CREATE_NEW_ID, FADE_DURATION, LOGIN_PANEL_ID, LOGIN_TOGGLE_ID, PANEL_ACTIVE,
    REGISTRATION_CONTAINER_ID, REGISTRATION_PANEL_ID, REGISTRATION_TOGGLE_ID, TOGGLE_ACTIVE,
};

/// Which form panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Login,
    Registration,
}

/// Configuration for [`AuthModal::mount`].
///
/// Element ids default to the conventional page vocabulary; the
/// create-customer endpoint has no default and is always injected.
#[derive(Debug, Clone)]
pub struct AuthModalConfig {
    /// Endpoint returning the registration form fragment
    pub create_customer_url: String,
    /// Container of the login form
    pub login_panel: String,
    /// Container of the registration form
    pub registration_panel: String,
    /// Button switching to the login panel
    pub login_toggle: String,
    /// Button switching to the registration panel
    pub registration_toggle: String,
    /// Secondary trigger forcing the registration panel
    pub create_new: String,
    /// Element whose inner HTML receives the fetched fragment
    pub registration_container: String,
}

impl AuthModalConfig {
    pub fn new(create_customer_url: impl Into<String>) -> Self {
        Self {
            create_customer_url: create_customer_url.into(),
            login_panel: LOGIN_PANEL_ID.to_owned(),
            registration_panel: REGISTRATION_PANEL_ID.to_owned(),
            login_toggle: LOGIN_TOGGLE_ID.to_owned(),
            registration_toggle: REGISTRATION_TOGGLE_ID.to_owned(),
            create_new: CREATE_NEW_ID.to_owned(),
            registration_container: REGISTRATION_CONTAINER_ID.to_owned(),
        }
    }
}

/// The mounted auth modal. Cloning yields another handle to the same
/// widget, which is how the click listeners share it.
pub struct AuthModal<F> {
    login_panel: Element,
    registration_panel: Element,
    login_toggle: Element,
    registration_toggle: Element,
    registration_container: Element,
    fetch: Rc<F>,
    create_customer_url: String,
    pending: Rc<RefCell<Vec<oneshot::Receiver<FetchOutcome>>>>,
}

impl<F> Clone for AuthModal<F> {
    fn clone(&self) -> Self {
        Self {
            login_panel: self.login_panel.clone(),
            registration_panel: self.registration_panel.clone(),
            login_toggle: self.login_toggle.clone(),
            registration_toggle: self.registration_toggle.clone(),
            registration_container: self.registration_container.clone(),
            fetch: Rc::clone(&self.fetch),
            create_customer_url: self.create_customer_url.clone(),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<F: FragmentFetch + 'static> AuthModal<F> {
    /// Look up the modal's elements, apply the initial state and bind the
    /// toggle listeners.
    ///
    /// Initial state: login panel active and visible, registration panel
    /// hidden, login toggle highlighted.
    pub fn mount<L: ElementLocator>(
        locator: &L,
        config: AuthModalConfig,
        fetch: F,
    ) -> Result<Self, MountError> {
        let modal = Self {
            login_panel: locator.require(&config.login_panel)?,
            registration_panel: locator.require(&config.registration_panel)?,
            login_toggle: locator.require(&config.login_toggle)?,
            registration_toggle: locator.require(&config.registration_toggle)?,
            registration_container: locator.require(&config.registration_container)?,
            fetch: Rc::new(fetch),
            create_customer_url: config.create_customer_url,
            pending: Rc::new(RefCell::new(Vec::new())),
        };
        let create_new = locator.require(&config.create_new)?;

        modal.registration_panel.hide();
        modal.login_panel.add_class(PANEL_ACTIVE);
        modal.login_toggle.add_class(TOGGLE_ACTIVE);

        modal.login_toggle.on(EventKind::Click, {
            let modal = modal.clone();
            move |_| modal.show_login()
        });
        modal.registration_toggle.on(EventKind::Click, {
            let modal = modal.clone();
            move |_| modal.show_registration()
        });
        create_new.on(EventKind::Click, {
            let modal = modal.clone();
            move |_| modal.create_new()
        });

        Ok(modal)
    }

    /// Switch to the login panel unless it is already active.
    pub fn show_login(&self) {
        if self.login_panel.has_class(PANEL_ACTIVE) {
            return;
        }
        self.swap_to(Panel::Login);
    }

    /// Request the registration fragment, then switch to the registration
    /// panel unless it is already active.
    ///
    /// The fetch fires on every trigger, active or not, and the swap does
    /// not wait for the response.
    pub fn show_registration(&self) {
        self.request_fragment();
        if self.registration_panel.has_class(PANEL_ACTIVE) {
            return;
        }
        self.swap_to(Panel::Registration);
    }

    /// Force the registration panel from the create-new control, skipping
    /// the already-active guard.
    pub fn create_new(&self) {
        self.request_fragment();
        self.swap_to(Panel::Registration);
    }

    /// The panel currently marked active.
    pub fn active_panel(&self) -> Panel {
        if self.registration_panel.has_class(PANEL_ACTIVE) {
            Panel::Registration
        } else {
            Panel::Login
        }
    }

    /// Drain completed fragment responses.
    ///
    /// Successful bodies replace the registration container's inner HTML
    /// verbatim, in arrival order; failures are dropped with a debug log.
    /// Call from the event loop whenever responses may have landed.
    pub fn poll_responses(&self) {
        let mut pending = self.pending.borrow_mut();
        pending.retain_mut(|receiver| match receiver.try_recv() {
            Ok(Some(FetchOutcome::Success(body))) => {
                self.registration_container.set_html(&body);
                false
            }
            Ok(Some(FetchOutcome::Failed)) => {
                debug!("registration fragment fetch failed");
                false
            }
            Ok(None) => true,
            Err(oneshot::Canceled) => {
                debug!("registration fragment fetch was abandoned");
                false
            }
        });
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot {
            active_panel: self.active_panel(),
            registration_loaded: !self.registration_container.html().is_empty(),
            pending_requests: self.pending.borrow().len(),
        }
    }

    fn request_fragment(&self) {
        let receiver = self.fetch.get(&self.create_customer_url);
        self.pending.borrow_mut().push(receiver);
    }

    /// Fade the outgoing panel out; at completion show the incoming one,
    /// move the active class over and restyle the toggle buttons.
    fn swap_to(&self, target: Panel) {
        let (outgoing, incoming, outgoing_toggle, incoming_toggle) = match target {
            Panel::Registration => (
                &self.login_panel,
                &self.registration_panel,
                &self.login_toggle,
                &self.registration_toggle,
            ),
            Panel::Login => (
                &self.registration_panel,
                &self.login_panel,
                &self.registration_toggle,
                &self.login_toggle,
            ),
        };

        let incoming = incoming.clone();
        let outgoing_after = outgoing.clone();
        let incoming_toggle = incoming_toggle.clone();
        let outgoing_toggle = outgoing_toggle.clone();
        outgoing.fade_out(FADE_DURATION, move || {
            incoming.fade_in(FADE_DURATION);
            incoming.add_class(PANEL_ACTIVE);
            outgoing_after.remove_class(PANEL_ACTIVE);
            incoming_toggle.add_class(TOGGLE_ACTIVE);
            outgoing_toggle.remove_class(TOGGLE_ACTIVE);
        });
    }
}
