//! Scroll-driven navbar background toggle.

use crate::dom::{Document, Element, ElementLocator, MountError};
use crate::theme::{NAVBAR_SOLID, SCROLL_THRESHOLD};

/// Adds the solid-background class while the page is scrolled strictly
/// past the threshold, removes it at or below. Recomputed on every scroll
/// event, no debouncing.
pub struct NavbarScroll {
    navbar: Element,
}

impl NavbarScroll {
    pub fn mount(document: &Document, navbar_class: &str) -> Result<Self, MountError> {
        let navbar = document
            .first_of_class(navbar_class)
            .ok_or_else(|| MountError::MissingClass(navbar_class.to_owned()))?;

        document.on_scroll({
            let navbar = navbar.clone();
            move |offset| {
                if offset > SCROLL_THRESHOLD {
                    navbar.add_class(NAVBAR_SOLID);
                } else {
                    navbar.remove_class(NAVBAR_SOLID);
                }
            }
        });

        Ok(Self { navbar })
    }

    pub fn is_solid(&self) -> bool {
        self.navbar.has_class(NAVBAR_SOLID)
    }
}
