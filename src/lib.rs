//! Headless client-side UI glue for the companion booking pages.
//!
//! The crate re-implements the page behaviors as plain state machines
//! over a small in-memory document model, so everything is testable
//! without a browser:
//!
//! - [`widgets::AuthModal`] toggles the login/registration panels and
//!   fires the registration fragment fetch
//! - [`reserve::ReservePage`] assembles the reservation-page widgets
//!   (hover menus, star rating, price slider, filter modal, navbar
//!   scroll effect)
//! - [`dom`] holds the document model, event dispatch and virtual clock
//! - [`fetch`] is the HTTP seam for the fragment requests

pub mod dom;
pub mod fetch;
pub mod reserve;
pub mod scopefns;
pub mod snapshot;
pub mod theme;
pub mod widgets;
