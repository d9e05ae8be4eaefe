use std::time::Duration;

// Class names
pub const PANEL_ACTIVE: &str = "panel-active";
pub const TOGGLE_ACTIVE: &str = "btn-active";
pub const MODAL_OPEN: &str = "open";
pub const NAVBAR_SOLID: &str = "navbar-solid";

pub const CARD: &str = "card";
pub const CARD_ARROW: &str = "arrow-icon";
pub const CARD_MENU: &str = "profile-menu";
pub const NAVBAR: &str = "navbar";

// Style keys and values
pub const OPACITY: &str = "opacity";
pub const LEFT: &str = "left";
pub const COLOR: &str = "color";

pub const STAR_LIT: &str = "gold";
pub const STAR_DIM: &str = "gray";

// Attribute keys
pub const STAR_VALUE_ATTR: &str = "data-value";

// Conventional element ids
pub const LOGIN_PANEL_ID: &str = "login-panel";
pub const REGISTRATION_PANEL_ID: &str = "registration-panel";
pub const LOGIN_TOGGLE_ID: &str = "show-login";
pub const REGISTRATION_TOGGLE_ID: &str = "show-registration";
pub const CREATE_NEW_ID: &str = "create-new";
pub const REGISTRATION_CONTAINER_ID: &str = "registration-form-container";

pub const RATING_ROOT_ID: &str = "rating-stars";
pub const RATING_INPUT_ID: &str = "rating";
pub const PRICE_INPUT_ID: &str = "price-range";
pub const FILTER_TRIGGER_ID: &str = "show-filters";
pub const FILTER_MODAL_ID: &str = "filter-modal";
pub const FILTER_APPLY_ID: &str = "apply-filters";

// Behavior constants
pub const FADE_DURATION: Duration = Duration::from_millis(100);
pub const SCROLL_THRESHOLD: f64 = 50.0;

// Price slider defaults
pub const PRICE_MIN: u32 = 0;
pub const PRICE_MAX: u32 = 1000;
pub const PRICE_FROM: u32 = 100;
pub const PRICE_TO: u32 = 500;
pub const PRICE_PREFIX: &str = "$";
