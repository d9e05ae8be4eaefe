//! Serializable capture of the transient page state.
//!
//! The widgets keep no state beyond element attributes, so a snapshot is
//! just what an observer could read off the page at one instant. The demo
//! binary writes one of these as JSON at the end of its scripted session.

use serde::Serialize;

use crate::widgets::auth_modal::Panel;

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub source: &'static str,
    pub build: &'static str,
    pub captured_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserve: Option<ReserveSnapshot>,
}

impl PageSnapshot {
    pub fn new(auth: Option<AuthSnapshot>, reserve: Option<ReserveSnapshot>) -> Self {
        Self {
            source: "companion-ui",
            build: env!("CARGO_PKG_VERSION"),
            captured_at: chrono::Local::now().to_rfc3339(),
            auth,
            reserve,
        }
    }
}

/// Auth modal state.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSnapshot {
    pub active_panel: Panel,
    /// Whether the registration container holds any fetched content yet.
    pub registration_loaded: bool,
    /// Fragment requests still waiting for a response.
    pub pending_requests: usize,
}

/// Reservation-page state. Widget fields are `None` when that widget did
/// not mount.
#[derive(Debug, Clone, Serialize)]
pub struct ReserveSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navbar_solid: Option<bool>,
    pub open_menus: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSelection {
    pub from: u32,
    pub to: u32,
    pub display: String,
}
