//! Star rating picker backed by a hidden input.
//!
//! Hovering previews a rating by recoloring the stars; clicking commits
//! the hovered value into the hidden field. Leaving the group restores the
//! committed value's highlighting, or clears it when nothing has been
//! committed yet.

use std::rc::Rc;

use tracing::debug;

use crate::dom::event::EventKind;
use crate::dom::{Element, ElementLocator, MountError};
use crate::theme::{COLOR, STAR_DIM, STAR_LIT, STAR_VALUE_ATTR};

struct Star {
    value: u32,
    element: Element,
}

pub struct StarRating {
    stars: Rc<Vec<Star>>,
    input: Element,
}

impl StarRating {
    /// Collect the star elements under `root_id` (anything carrying the
    /// value attribute) and bind the preview/commit listeners.
    pub fn mount<L: ElementLocator>(
        locator: &L,
        root_id: &str,
        input_id: &str,
    ) -> Result<Self, MountError> {
        let root = locator.require(root_id)?;
        let input = locator.require(input_id)?;

        let mut stars = Vec::new();
        for element in root.descendants() {
            let Some(raw) = element.attr(STAR_VALUE_ATTR) else {
                continue;
            };
            match raw.parse::<u32>() {
                Ok(value) => stars.push(Star { value, element }),
                Err(_) => debug!(star = ?element, raw, "ignoring star with a non-numeric value"),
            }
        }
        if stars.is_empty() {
            return Err(MountError::MissingAttr(STAR_VALUE_ATTR.to_owned()));
        }

        let stars = Rc::new(stars);
        for star in stars.iter() {
            star.element.on(EventKind::PointerEnter, {
                let stars = Rc::clone(&stars);
                let value = star.value;
                move |_| highlight(&stars, value)
            });
            star.element.on(EventKind::Click, {
                let input = input.clone();
                let value = star.value;
                move |_| input.set_value(&value.to_string())
            });
        }
        root.on(EventKind::PointerLeave, {
            let stars = Rc::clone(&stars);
            let input = input.clone();
            move |_| highlight(&stars, committed_value(&input))
        });

        Ok(Self { stars, input })
    }

    /// The committed rating, 0 when none has been selected yet.
    pub fn committed(&self) -> u32 {
        committed_value(&self.input)
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }
}

fn highlight(stars: &[Star], value: u32) {
    for star in stars {
        let color = if star.value <= value { STAR_LIT } else { STAR_DIM };
        star.element.set_style(COLOR, color);
    }
}

/// An empty or unparseable field reads as 0.
fn committed_value(input: &Element) -> u32 {
    input.value().and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn rating_fixture(doc: &Document, count: u32) -> (Element, Vec<Element>, Element) {
        let root = doc.create("div");
        root.set_id("rating-stars");
        let mut stars = Vec::new();
        for value in 1..=count {
            let star = doc.create("i");
            star.set_attr(STAR_VALUE_ATTR, &value.to_string());
            root.append(&star);
            stars.push(star);
        }
        let input = doc.create("input");
        input.set_id("rating");
        doc.root().append(&root);
        doc.root().append(&input);
        (root, stars, input)
    }

    fn colors(stars: &[Element]) -> Vec<Option<String>> {
        stars.iter().map(|star| star.style(COLOR)).collect()
    }

    #[test]
    fn hover_previews_up_to_the_hovered_star() {
        let doc = Document::new();
        let (_root, stars, _input) = rating_fixture(&doc, 5);
        StarRating::mount(&doc, "rating-stars", "rating").unwrap();

        stars[2].pointer_enter();
        let colors = colors(&stars);
        for (index, color) in colors.iter().enumerate() {
            let expected = if index < 3 { STAR_LIT } else { STAR_DIM };
            assert_eq!(color.as_deref(), Some(expected), "star {}", index + 1);
        }
    }

    #[test]
    fn click_commits_the_star_value() {
        let doc = Document::new();
        let (_root, stars, input) = rating_fixture(&doc, 5);
        let rating = StarRating::mount(&doc, "rating-stars", "rating").unwrap();

        stars[3].pointer_enter();
        stars[3].click();

        assert_eq!(input.value().as_deref(), Some("4"));
        assert_eq!(rating.committed(), 4);
    }

    #[test]
    fn leaving_the_group_restores_the_committed_value() {
        let doc = Document::new();
        let (root, stars, _input) = rating_fixture(&doc, 5);
        StarRating::mount(&doc, "rating-stars", "rating").unwrap();

        stars[1].pointer_enter();
        stars[1].click();
        stars[4].pointer_enter();
        root.pointer_leave();

        assert_eq!(
            colors(&stars),
            vec![
                Some(STAR_LIT.to_owned()),
                Some(STAR_LIT.to_owned()),
                Some(STAR_DIM.to_owned()),
                Some(STAR_DIM.to_owned()),
                Some(STAR_DIM.to_owned()),
            ]
        );
    }

    #[test]
    fn leaving_with_no_commit_clears_the_preview() {
        let doc = Document::new();
        let (root, stars, _input) = rating_fixture(&doc, 5);
        let rating = StarRating::mount(&doc, "rating-stars", "rating").unwrap();

        stars[4].pointer_enter();
        root.pointer_leave();

        assert_eq!(rating.committed(), 0);
        assert!(colors(&stars).iter().all(|c| c.as_deref() == Some(STAR_DIM)));
    }

    #[test]
    fn garbage_in_the_hidden_field_reads_as_zero() {
        let doc = Document::new();
        let (_root, _stars, input) = rating_fixture(&doc, 5);
        let rating = StarRating::mount(&doc, "rating-stars", "rating").unwrap();

        input.set_value("lots");
        assert_eq!(rating.committed(), 0);
    }

    #[test]
    fn non_numeric_stars_are_ignored_at_mount() {
        let doc = Document::new();
        let (root, _stars, _input) = rating_fixture(&doc, 3);
        let odd = doc.create("i");
        odd.set_attr(STAR_VALUE_ATTR, "many");
        root.append(&odd);

        let rating = StarRating::mount(&doc, "rating-stars", "rating").unwrap();
        assert_eq!(rating.star_count(), 3);
    }

    #[test]
    fn mount_fails_without_stars() {
        let doc = Document::new();
        let root = doc.create("div");
        root.set_id("rating-stars");
        let input = doc.create("input");
        input.set_id("rating");
        doc.root().append(&root);
        doc.root().append(&input);

        match StarRating::mount(&doc, "rating-stars", "rating") {
            Err(MountError::MissingAttr(attr)) => assert_eq!(attr, STAR_VALUE_ATTR),
            Err(other) => panic!("expected MissingAttr, got {other:?}"),
            Ok(_) => panic!("expected MissingAttr, got a mounted widget"),
        }
    }
}
