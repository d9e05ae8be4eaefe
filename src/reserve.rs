//! Reservation-page assembly.

use tracing::{info, warn};

use crate::dom::{Document, MountError};
use crate::snapshot::{PriceSelection, ReserveSnapshot};
use crate::theme::{
    FILTER_APPLY_ID, FILTER_MODAL_ID, FILTER_TRIGGER_ID, NAVBAR, PRICE_INPUT_ID, RATING_INPUT_ID,
    RATING_ROOT_ID,
};
use crate::widgets::{FilterModal, HoverMenu, NavbarScroll, PriceSlider, SliderConfig, StarRating};

/// All reservation-page widgets, mounted against one document under the
/// conventional ids and classes.
///
/// The widgets are independent; any whose elements are missing is skipped
/// with a warning and the rest still mount.
pub struct ReservePage {
    pub menus: Vec<HoverMenu>,
    pub rating: Option<StarRating>,
    pub slider: Option<PriceSlider>,
    pub filter: Option<FilterModal>,
    pub navbar: Option<NavbarScroll>,
}

impl ReservePage {
    pub fn mount(document: &Document, slider: SliderConfig) -> Self {
        let menus = HoverMenu::mount_all(document);
        info!(cards = menus.len(), "mounted hover menus");

        Self {
            menus,
            rating: guard(
                "star rating",
                StarRating::mount(document, RATING_ROOT_ID, RATING_INPUT_ID),
            ),
            slider: guard(
                "price slider",
                PriceSlider::mount(document, PRICE_INPUT_ID, slider),
            ),
            filter: guard(
                "filter modal",
                FilterModal::mount(document, FILTER_TRIGGER_ID, FILTER_MODAL_ID, FILTER_APPLY_ID),
            ),
            navbar: guard(
                "navbar scroll effect",
                NavbarScroll::mount(document, NAVBAR),
            ),
        }
    }

    /// Observable widget state for the page snapshot.
    pub fn snapshot(&self) -> ReserveSnapshot {
        ReserveSnapshot {
            rating: self.rating.as_ref().map(StarRating::committed),
            price: self.slider.as_ref().map(|slider| {
                let (from, to) = slider.range();
                PriceSelection {
                    from,
                    to,
                    display: slider.display_text(),
                }
            }),
            filter_open: self.filter.as_ref().map(FilterModal::is_open),
            navbar_solid: self.navbar.as_ref().map(NavbarScroll::is_solid),
            open_menus: self.menus.iter().filter(|menu| menu.is_open()).count(),
        }
    }
}

fn guard<T>(name: &str, result: Result<T, MountError>) -> Option<T> {
    match result {
        Ok(mounted) => Some(mounted),
        Err(error) => {
            warn!(%error, "{name} not mounted");
            None
        }
    }
}
