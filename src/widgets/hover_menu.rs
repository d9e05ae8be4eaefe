//! Hover-revealed profile menu, one instance per card.
//!
//! Hovering a card slides its arrow in and, on the next tick, fades it to
//! opaque. Clicking the arrow toggles the menu; clicking anywhere else in
//! the document closes it, except clicks inside the menu itself, which
//! stop their propagation. Visibility is the opacity style being exactly
//! `"1"`; anything else (including unset) counts as hidden.

use std::time::Duration;

use tracing::debug;

use crate::dom::event::EventKind;
use crate::dom::{Element, ElementLocator, MountError};
use crate::theme::{CARD, CARD_ARROW, CARD_MENU, LEFT, OPACITY};

pub struct HoverMenu {
    card: Element,
    arrow: Element,
    menu: Element,
}

impl HoverMenu {
    /// Bind the hover and click behavior for one card.
    ///
    /// Fails if the card has no arrow or menu descendant.
    pub fn mount(card: &Element) -> Result<Self, MountError> {
        let arrow = card
            .first_of_class(CARD_ARROW)
            .ok_or_else(|| MountError::MissingClass(CARD_ARROW.to_owned()))?;
        let menu = card
            .first_of_class(CARD_MENU)
            .ok_or_else(|| MountError::MissingClass(CARD_MENU.to_owned()))?;
        let document = card.document();

        // the arrow slides in immediately but only turns opaque on the
        // tick after the hover, matching a zero-delay timeout
        card.on(EventKind::PointerEnter, {
            let arrow = arrow.clone();
            let document = document.clone();
            move |_| {
                arrow.set_style(LEFT, "0");
                let arrow = arrow.clone();
                document.defer(Duration::ZERO, move || arrow.set_style(OPACITY, "1"));
            }
        });

        card.on(EventKind::PointerLeave, {
            let arrow = arrow.clone();
            let menu = menu.clone();
            move |_| {
                arrow.set_style(LEFT, "0");
                arrow.set_style(OPACITY, "0");
                menu.set_style(OPACITY, "0");
            }
        });

        arrow.on(EventKind::Click, {
            let menu = menu.clone();
            move |event| {
                event.stop_propagation();
                if menu.style(OPACITY).as_deref() == Some("1") {
                    menu.set_style(OPACITY, "0");
                } else {
                    menu.set_style(OPACITY, "1");
                }
            }
        });

        // every card watches the document to close its own menu on clicks
        // landing anywhere but its arrow
        document.root().on(EventKind::Click, {
            let arrow = arrow.clone();
            let menu = menu.clone();
            move |event| {
                if menu.style(OPACITY).as_deref() == Some("1") && event.target() != &arrow {
                    menu.set_style(OPACITY, "0");
                }
            }
        });

        menu.on(EventKind::Click, |event| event.stop_propagation());

        Ok(Self {
            card: card.clone(),
            arrow,
            menu,
        })
    }

    /// Mount every card the locator finds, skipping cards that lack the
    /// menu affordances.
    pub fn mount_all<L: ElementLocator>(locator: &L) -> Vec<HoverMenu> {
        let mut menus = Vec::new();
        for card in locator.by_class(CARD) {
            match HoverMenu::mount(&card) {
                Ok(menu) => menus.push(menu),
                Err(error) => debug!(card = ?card, %error, "skipping card without menu affordances"),
            }
        }
        menus
    }

    pub fn card(&self) -> &Element {
        &self.card
    }

    pub fn arrow(&self) -> &Element {
        &self.arrow
    }

    pub fn menu(&self) -> &Element {
        &self.menu
    }

    /// Whether the menu is currently shown (opacity exactly `"1"`).
    pub fn is_open(&self) -> bool {
        self.menu.style(OPACITY).as_deref() == Some("1")
    }
}
