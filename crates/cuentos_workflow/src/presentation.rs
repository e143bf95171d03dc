//! Presentation contracts and the display state behind them.

use cuentos_core::{AudioRef, Candidate, CandidateKind, CandidateList};
use tracing::debug;

/// Status and candidate rendering, driven by the stage controller.
pub trait Presenter: Send {
    /// Replace the shared status text. An empty string clears it.
    fn show_status(&mut self, text: &str);

    /// Clear the selection region and fill it with `list`, replacing any
    /// earlier bindings. Nothing is pre-selected.
    fn render_candidates(&mut self, list: &CandidateList);

    /// Acknowledge a pick before the next request goes out.
    fn announce_selection(&mut self, _kind: CandidateKind, _candidate: &str) {}
}

/// The story surface shown once the workflow completes.
pub trait StoryModal: Send {
    /// Show `story`, make the surface visible and reload audio from `audio`.
    fn present(&mut self, story: &str, audio: &AudioRef);

    /// Hide the surface. The session keeps its story.
    fn dismiss(&mut self);
}

/// Input flowing from a front end back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// A candidate was chosen from the list rendered in `cycle`
    Pick {
        /// Render cycle the list came from
        cycle: u64,
        /// Position of the chosen candidate
        index: usize,
    },
}

/// The single shared status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegion {
    text: String,
}

impl StatusRegion {
    /// Replace the content.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The candidate list currently on screen.
///
/// Each render arms exactly one pick. Once a candidate has been picked the
/// region ignores further picks until the next render replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRegion {
    list: Option<CandidateList>,
    armed: bool,
    focus: Option<usize>,
}

impl SelectionRegion {
    /// Replace the region's content with `list`.
    pub fn render(&mut self, list: CandidateList) {
        debug!(kind = %list.kind(), cycle = list.cycle(), count = list.len(), "Rendering candidates");
        self.list = Some(list);
        self.armed = true;
        self.focus = None;
    }

    /// Empty the region.
    pub fn clear(&mut self) {
        self.list = None;
        self.armed = false;
        self.focus = None;
    }

    /// Rendered list, if any.
    pub fn list(&self) -> Option<&CandidateList> {
        self.list.as_ref()
    }

    /// True while a pick would be accepted.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Highlighted row, if the user has moved onto one.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Move the highlight down one row.
    pub fn focus_next(&mut self) {
        let Some(len) = self.list.as_ref().map(CandidateList::len) else {
            return;
        };
        if len == 0 {
            return;
        }
        self.focus = Some(match self.focus {
            None => 0,
            Some(i) => (i + 1).min(len - 1),
        });
    }

    /// Move the highlight up one row.
    pub fn focus_previous(&mut self) {
        if let Some(i) = self.focus {
            self.focus = Some(i.saturating_sub(1));
        } else if self.list.as_ref().is_some_and(|l| !l.is_empty()) {
            self.focus = Some(0);
        }
    }

    /// Render cycle of the list on screen.
    pub fn cycle(&self) -> Option<u64> {
        self.list.as_ref().map(|l| *l.cycle())
    }

    /// Pick the candidate at `index` from the list rendered in `cycle`.
    ///
    /// Yields at most once per render. Picks stamped with another cycle are
    /// ignored.
    pub fn pick(&mut self, cycle: u64, index: usize) -> Option<(UserAction, Candidate)> {
        if !self.armed {
            debug!(cycle, index, "Ignoring pick on a spent selection");
            return None;
        }
        let list = self.list.as_ref()?;
        if *list.cycle() != cycle {
            debug!(cycle, current = *list.cycle(), "Ignoring pick from a replaced list");
            return None;
        }
        let candidate = list.get(index)?.clone();
        self.armed = false;
        self.focus = Some(index);
        Some((
            UserAction::Pick {
                cycle: *list.cycle(),
                index,
            },
            candidate,
        ))
    }

    /// Pick the highlighted candidate.
    pub fn pick_focused(&mut self) -> Option<(UserAction, Candidate)> {
        let cycle = self.cycle()?;
        let index = self.focus?;
        self.pick(cycle, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuentos_core::CandidateFilter;

    fn list(cycle: u64, raw: &str) -> CandidateList {
        CandidateList::parse(CandidateKind::Villain, cycle, raw, CandidateFilter::KeepAll)
    }

    #[test]
    fn test_nothing_preselected() {
        let mut region = SelectionRegion::default();
        region.render(list(1, "A\nB"));
        assert_eq!(region.focus(), None);
        assert!(region.pick_focused().is_none());
        assert!(region.is_armed());
    }

    #[test]
    fn test_one_pick_per_render() {
        let mut region = SelectionRegion::default();
        region.render(list(1, "A\nB\nC"));

        let (action, candidate) = region.pick(1, 1).unwrap();
        assert_eq!(action, UserAction::Pick { cycle: 1, index: 1 });
        assert_eq!(candidate.text(), "B");
        assert!(region.pick(1, 2).is_none());

        region.render(list(2, "X\nY"));
        assert!(region.pick(1, 0).is_none());
        let (action, _) = region.pick(2, 0).unwrap();
        assert_eq!(action, UserAction::Pick { cycle: 2, index: 0 });
    }

    #[test]
    fn test_out_of_range_pick_keeps_region_armed() {
        let mut region = SelectionRegion::default();
        region.render(list(1, "A"));
        assert!(region.pick(1, 5).is_none());
        assert!(region.is_armed());
    }

    #[test]
    fn test_pick_focused() {
        let mut region = SelectionRegion::default();
        region.render(list(3, "A\nB"));
        region.focus_next();
        region.focus_next();
        let (action, candidate) = region.pick_focused().unwrap();
        assert_eq!(action, UserAction::Pick { cycle: 3, index: 1 });
        assert_eq!(candidate.text(), "B");
        assert!(region.pick_focused().is_none());
    }

    #[test]
    fn test_focus_stays_in_bounds() {
        let mut region = SelectionRegion::default();
        region.render(list(1, "A\nB"));
        region.focus_next();
        region.focus_next();
        region.focus_next();
        assert_eq!(region.focus(), Some(1));
        region.focus_previous();
        region.focus_previous();
        assert_eq!(region.focus(), Some(0));
    }

    #[derive(Default)]
    struct StatusOnly {
        statuses: Vec<String>,
        renders: usize,
    }

    impl Presenter for StatusOnly {
        fn show_status(&mut self, text: &str) {
            self.statuses.push(text.to_string());
        }

        fn render_candidates(&mut self, _list: &CandidateList) {
            self.renders += 1;
        }
    }

    #[test]
    fn test_announce_selection_defaults_to_nothing() {
        let mut presenter = StatusOnly::default();
        presenter.render_candidates(&list(1, "A\nB"));
        presenter.announce_selection(CandidateKind::Villain, "B");
        presenter.announce_selection(CandidateKind::Hero, "X");
        assert!(presenter.statuses.is_empty());
        assert_eq!(presenter.renders, 1);
    }
}
