//! Filter modal open/apply flow.
//!
//! The trigger button opens the modal, the apply button inside closes it.
//! No filter values are collected at this layer; applying is purely a
//! dismiss action.

use crate::dom::event::EventKind;
use crate::dom::{Element, ElementLocator, MountError};
use crate::theme::MODAL_OPEN;

pub struct FilterModal {
    modal: Element,
}

impl FilterModal {
    pub fn mount<L: ElementLocator>(
        locator: &L,
        trigger_id: &str,
        modal_id: &str,
        apply_id: &str,
    ) -> Result<Self, MountError> {
        let trigger = locator.require(trigger_id)?;
        let modal = locator.require(modal_id)?;
        let apply = locator.require(apply_id)?;

        trigger.on(EventKind::Click, {
            let modal = modal.clone();
            move |_| modal.add_class(MODAL_OPEN)
        });
        apply.on(EventKind::Click, {
            let modal = modal.clone();
            move |_| modal.remove_class(MODAL_OPEN)
        });

        Ok(Self { modal })
    }

    pub fn open(&self) {
        self.modal.add_class(MODAL_OPEN);
    }

    pub fn apply(&self) {
        self.modal.remove_class(MODAL_OPEN);
    }

    pub fn is_open(&self) -> bool {
        self.modal.has_class(MODAL_OPEN)
    }
}
