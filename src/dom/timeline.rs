//! Virtual clock for deferred one-shot actions.
//!
//! Fade completions and zero-delay ticks are queued here and released by
//! [`Document::advance`](crate::dom::Document::advance). Nothing runs
//! spontaneously; time only moves when the owner advances it.

use std::time::Duration;

pub(crate) type Action = Box<dyn FnOnce()>;

#[derive(Default)]
pub(crate) struct Timeline {
    now: Duration,
    seq: u64,
    entries: Vec<Entry>,
}

struct Entry {
    due: Duration,
    seq: u64,
    action: Action,
}

impl Timeline {
    pub fn schedule(&mut self, delay: Duration, action: Action) {
        self.entries.push(Entry {
            due: self.now + delay,
            seq: self.seq,
            action,
        });
        self.seq += 1;
    }

    pub fn tick(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Remove and return the earliest due action, if any.
    ///
    /// Ties on the due time resolve in schedule order, so two fades queued
    /// by a rapid double-click complete in the order they were queued.
    pub fn pop_due(&mut self) -> Option<Action> {
        let mut earliest: Option<usize> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.due > self.now {
                continue;
            }
            let better = match earliest {
                Some(current) => {
                    let current = &self.entries[current];
                    (entry.due, entry.seq) < (current.due, current.seq)
                }
                None => true,
            };
            if better {
                earliest = Some(index);
            }
        }
        earliest.map(|index| self.entries.swap_remove(index).action)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Action {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn releases_in_due_then_schedule_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timeline = Timeline::default();

        timeline.schedule(Duration::from_millis(100), recorder(&log, "late"));
        timeline.schedule(Duration::ZERO, recorder(&log, "first"));
        timeline.schedule(Duration::ZERO, recorder(&log, "second"));

        timeline.tick(Duration::from_millis(100));
        while let Some(action) = timeline.pop_due() {
            action();
        }

        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn holds_back_entries_that_are_not_due() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut timeline = Timeline::default();

        timeline.schedule(Duration::from_millis(50), recorder(&log, "early"));
        timeline.schedule(Duration::from_millis(200), recorder(&log, "late"));

        timeline.tick(Duration::from_millis(50));
        while let Some(action) = timeline.pop_due() {
            action();
        }

        assert_eq!(*log.borrow(), vec!["early"]);
        assert_eq!(timeline.pending(), 1);
    }
}
