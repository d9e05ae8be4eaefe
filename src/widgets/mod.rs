//! The page widgets.
//!
//! Each widget looks up its elements through an
//! [`ElementLocator`](crate::dom::ElementLocator) at mount time, binds its
//! listeners and applies its initial state. Widgets are independent: they
//! touch disjoint element regions and none requires another to be mounted.

pub mod auth_modal;
pub mod filter_modal;
pub mod hover_menu;
pub mod navbar;
pub mod price_slider;
pub mod star_rating;

pub use auth_modal::{AuthModal, AuthModalConfig, Panel};
pub use filter_modal::FilterModal;
pub use hover_menu::HoverMenu;
pub use navbar::NavbarScroll;
pub use price_slider::{PriceSlider, SliderConfig};
pub use star_rating::StarRating;
