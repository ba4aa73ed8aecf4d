use crate::section::{Section, SectionExtent};

pub const HOME_THRESHOLD: f64 = 100.0;
pub const HEADER_LOOKAHEAD: f64 = 200.0;
pub const REVEAL_VIEWPORT_FRACTION: f64 = 0.5;
pub const TRANSITION_CONTENT_FLOOR: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub active: Section,
    pub reveal_progress: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            active: Section::Home,
            reveal_progress: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSample {
    pub offset: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    /// Recomputes the state for one scroll sample. `layout` is queried per
    /// section and returns `None` for sections that are not mounted yet.
    pub fn observe<F>(&mut self, sample: ScrollSample, layout: F)
    where
        F: Fn(Section) -> Option<SectionExtent>,
    {
        self.active = resolve_active_section(self.active, sample.offset, layout);
        self.reveal_progress = reveal_progress(sample.offset, sample.viewport_height);
    }

    pub fn content_opacity(&self, transition_in_flight: bool) -> f64 {
        if transition_in_flight {
            self.reveal_progress.max(TRANSITION_CONTENT_FLOOR)
        } else {
            self.reveal_progress
        }
    }
}

pub fn resolve_active_section<F>(previous: Section, offset: f64, layout: F) -> Section
where
    F: Fn(Section) -> Option<SectionExtent>,
{
    if offset < HOME_THRESHOLD {
        return Section::Home;
    }

    let probe = offset + HEADER_LOOKAHEAD;
    Section::TRACKED
        .into_iter()
        .find(|section| layout(*section).is_some_and(|extent| extent.contains(probe)))
        .unwrap_or(previous)
}

pub fn reveal_progress(offset: f64, viewport_height: f64) -> f64 {
    let trigger = viewport_height * REVEAL_VIEWPORT_FRACTION;
    if trigger <= 0.0 {
        return if offset > 0.0 { 1.0 } else { 0.0 };
    }

    (offset / trigger).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_layout(section: Section) -> Option<SectionExtent> {
        match section {
            Section::About => Some(SectionExtent::new(100.0, 300.0)),
            Section::Skills => Some(SectionExtent::new(400.0, 100.0)),
            Section::Projects => Some(SectionExtent::new(500.0, 500.0)),
            Section::Contact => Some(SectionExtent::new(1200.0, 400.0)),
            _ => None,
        }
    }

    fn sample(offset: f64) -> ScrollSample {
        ScrollSample {
            offset,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn near_top_is_home() {
        for offset in [0.0, 1.0, 50.0, 99.9] {
            assert_eq!(
                resolve_active_section(Section::Contact, offset, page_layout),
                Section::Home
            );
        }
    }

    #[test]
    fn probe_includes_header_lookahead() {
        let mut state = ScrollState::default();
        state.observe(sample(600.0), page_layout);

        assert_eq!(state.active, Section::Projects);
    }

    #[test]
    fn gap_keeps_previous_section() {
        let mut state = ScrollState::default();
        state.observe(sample(400.0), page_layout);
        assert_eq!(state.active, Section::Projects);

        // probe 1050 falls between projects and contact
        state.observe(sample(850.0), page_layout);
        assert_eq!(state.active, Section::Projects);
    }

    #[test]
    fn unmounted_sections_are_skipped() {
        let only_contact = |section: Section| {
            (section == Section::Contact).then(|| SectionExtent::new(0.0, 5000.0))
        };

        assert_eq!(
            resolve_active_section(Section::Home, 600.0, only_contact),
            Section::Contact
        );
        assert_eq!(
            resolve_active_section(Section::Skills, 600.0, |_| None),
            Section::Skills
        );
    }

    #[test]
    fn first_matching_section_wins() {
        let overlapping = |_section: Section| Some(SectionExtent::new(0.0, 10_000.0));

        assert_eq!(
            resolve_active_section(Section::Home, 500.0, overlapping),
            Section::About
        );
    }

    #[test]
    fn reveal_progress_is_monotonic_then_pinned() {
        let viewport = 800.0;
        let mut last = 0.0;
        let mut offset = 0.0;

        while offset <= viewport {
            let progress = reveal_progress(offset, viewport);
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
            offset += 7.5;
        }

        assert_eq!(reveal_progress(400.0, viewport), 1.0);
        assert_eq!(reveal_progress(4_000.0, viewport), 1.0);
        assert_eq!(reveal_progress(200.0, viewport), 0.5);
    }

    #[test]
    fn reveal_progress_handles_degenerate_viewport() {
        assert_eq!(reveal_progress(0.0, 0.0), 0.0);
        assert_eq!(reveal_progress(10.0, 0.0), 1.0);
    }

    #[test]
    fn content_opacity_floors_during_transition() {
        let state = ScrollState {
            active: Section::Home,
            reveal_progress: 0.2,
        };

        assert_eq!(state.content_opacity(false), 0.2);
        assert_eq!(state.content_opacity(true), TRANSITION_CONTENT_FLOOR);
    }
}
