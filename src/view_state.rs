use crate::{
    contact::{ContactField, ContactForm, ContactMessage, STATUS_CLEAR_MS},
    hover_preview::HoverPreview,
    pointer::{Point, PointerState, PointerTracker, TRAILING_DELAY_MS},
    scroll_spy::{ScrollSample, ScrollState},
    section::{EducationTab, Section, SectionExtent},
    theme::Theme,
    transition::{StageOutcome, ThemeTransition, ToggleRect, TransitionVisuals},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Transition,
    Trailing(u64),
    ContactStatus,
}

/// Every input the page reacts to. `T` identifies the closest interactive
/// element for hover detection.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction<T> {
    Mounted {
        sample: ScrollSample,
        extents: Vec<(Section, SectionExtent)>,
    },
    Scrolled {
        sample: ScrollSample,
        extents: Vec<(Section, SectionExtent)>,
    },
    PointerMoved(Point),
    TrailingElapsed(u64),
    PointerEntered(Option<T>),
    PointerLeft {
        from: Option<T>,
        to: Option<T>,
    },
    ThemeToggled {
        toggle: ToggleRect,
        reduced_motion: bool,
    },
    TransitionStageElapsed,
    PreviewEntered(Point),
    PreviewLeft,
    Navigate(Section),
    MobileMenuToggled,
    EducationTabSelected(EducationTab),
    ContactEdited(ContactField, String),
    ContactSubmitted,
    ContactSettled {
        delivered: bool,
    },
    ContactStatusElapsed,
    Teardown,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewEffect<T> {
    /// Fire `action` after `delay_ms`, replacing any timer under `key`.
    Schedule {
        key: TimerKey,
        delay_ms: u32,
        action: ViewAction<T>,
    },
    CancelAllTimers,
    SetTransitionOrigin(TransitionVisuals),
    ApplyTheme(Theme),
    PersistTheme(bool),
    ScrollTo(Section),
    SendContact(ContactMessage),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewSnapshot {
    pub theme: Theme,
    pub scroll: ScrollState,
    pub pointer: PointerState,
    pub transition: Option<TransitionVisuals>,
    pub preview_position: Option<Point>,
    pub mobile_menu_open: bool,
    pub education_tab: EducationTab,
    pub contact: ContactForm,
}

impl ViewSnapshot {
    pub fn content_opacity(&self) -> f64 {
        self.scroll.content_opacity(self.transition.is_some())
    }
}

#[derive(Clone, Debug)]
pub struct ViewState {
    theme: Theme,
    scroll: ScrollState,
    pointer: PointerTracker,
    transition: ThemeTransition,
    preview: HoverPreview,
    mobile_menu_open: bool,
    education_tab: EducationTab,
    contact: ContactForm,
}

impl ViewState {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            theme: Theme::from_dark(prefers_dark),
            scroll: ScrollState::default(),
            pointer: PointerTracker::default(),
            transition: ThemeTransition::default(),
            preview: HoverPreview::default(),
            mobile_menu_open: false,
            education_tab: EducationTab::Education,
            contact: ContactForm::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[cfg(test)]
    pub fn transition_stage(&self) -> crate::transition::TransitionStage {
        self.transition.stage()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            theme: self.theme,
            scroll: self.scroll,
            pointer: self.pointer.state(),
            transition: self.transition.visuals(),
            preview_position: self.preview.position(),
            mobile_menu_open: self.mobile_menu_open,
            education_tab: self.education_tab,
            contact: self.contact.clone(),
        }
    }

    pub fn dispatch<T: PartialEq>(&mut self, action: ViewAction<T>) -> Vec<ViewEffect<T>> {
        match action {
            ViewAction::Mounted { sample, extents } => {
                self.observe_scroll(sample, &extents);
                vec![ViewEffect::ApplyTheme(self.theme)]
            }
            ViewAction::Scrolled { sample, extents } => {
                self.observe_scroll(sample, &extents);
                Vec::new()
            }
            ViewAction::PointerMoved(at) => {
                let ticket = self.pointer.on_move(at);
                self.preview.track(at);
                vec![ViewEffect::Schedule {
                    key: TimerKey::Trailing(ticket),
                    delay_ms: TRAILING_DELAY_MS,
                    action: ViewAction::TrailingElapsed(ticket),
                }]
            }
            ViewAction::TrailingElapsed(ticket) => {
                self.pointer.on_trailing_elapsed(ticket);
                Vec::new()
            }
            ViewAction::PointerEntered(qualifying) => {
                self.pointer.on_enter(qualifying);
                Vec::new()
            }
            ViewAction::PointerLeft { from, to } => {
                self.pointer.on_leave(from, to);
                Vec::new()
            }
            ViewAction::ThemeToggled {
                toggle,
                reduced_motion,
            } => self.toggle_theme(toggle, reduced_motion),
            ViewAction::TransitionStageElapsed => self.advance_transition(),
            ViewAction::PreviewEntered(at) => {
                self.preview.enter(at);
                Vec::new()
            }
            ViewAction::PreviewLeft => {
                self.preview.leave();
                Vec::new()
            }
            ViewAction::Navigate(section) => {
                self.scroll.active = section;
                self.mobile_menu_open = false;
                vec![ViewEffect::ScrollTo(section)]
            }
            ViewAction::MobileMenuToggled => {
                self.mobile_menu_open = !self.mobile_menu_open;
                Vec::new()
            }
            ViewAction::EducationTabSelected(tab) => {
                self.education_tab = tab;
                Vec::new()
            }
            ViewAction::ContactEdited(field, value) => {
                self.contact.edit(field, value);
                Vec::new()
            }
            ViewAction::ContactSubmitted => {
                if self.contact.is_submitting() {
                    return Vec::new();
                }
                match self.contact.begin_submit() {
                    Some(message) => vec![ViewEffect::SendContact(message)],
                    None => vec![Self::schedule_status_clear()],
                }
            }
            ViewAction::ContactSettled { delivered } => {
                self.contact.settle(delivered);
                vec![Self::schedule_status_clear()]
            }
            ViewAction::ContactStatusElapsed => {
                self.contact.clear_status();
                Vec::new()
            }
            ViewAction::Teardown => {
                self.pointer.teardown();
                self.transition.cancel();
                self.preview.leave();
                vec![ViewEffect::CancelAllTimers]
            }
        }
    }

    fn observe_scroll(&mut self, sample: ScrollSample, extents: &[(Section, SectionExtent)]) {
        self.scroll.observe(sample, |section| {
            extents
                .iter()
                .find(|(candidate, _)| *candidate == section)
                .map(|(_, extent)| *extent)
        });
    }

    fn toggle_theme<T>(&mut self, toggle: ToggleRect, reduced_motion: bool) -> Vec<ViewEffect<T>> {
        if self.transition.in_flight() {
            return Vec::new();
        }

        if reduced_motion {
            return self.settle_theme(self.theme.toggled());
        }

        let Some(delay_ms) = self.transition.trigger(toggle, self.theme) else {
            return Vec::new();
        };

        let mut effects = Vec::with_capacity(2);
        if let Some(visuals) = self.transition.visuals() {
            effects.push(ViewEffect::SetTransitionOrigin(visuals));
        }
        effects.push(ViewEffect::Schedule {
            key: TimerKey::Transition,
            delay_ms,
            action: ViewAction::TransitionStageElapsed,
        });
        effects
    }

    fn advance_transition<T>(&mut self) -> Vec<ViewEffect<T>> {
        match self.transition.on_stage_elapsed() {
            StageOutcome::Settle(target) => {
                let mut effects = self.settle_theme(target);
                if let Some(delay_ms) = self.transition.begin_fade() {
                    effects.push(ViewEffect::Schedule {
                        key: TimerKey::Transition,
                        delay_ms,
                        action: ViewAction::TransitionStageElapsed,
                    });
                }
                effects
            }
            StageOutcome::Finished | StageOutcome::Stale => Vec::new(),
        }
    }

    fn settle_theme<T>(&mut self, target: Theme) -> Vec<ViewEffect<T>> {
        self.theme = target;
        vec![
            ViewEffect::ApplyTheme(target),
            ViewEffect::PersistTheme(target.is_dark()),
        ]
    }

    fn schedule_status_clear<T>() -> ViewEffect<T> {
        ViewEffect::Schedule {
            key: TimerKey::ContactStatus,
            delay_ms: STATUS_CLEAR_MS,
            action: ViewAction::ContactStatusElapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transition::TransitionStage;
    use std::collections::HashMap;

    /// Drives a [`ViewState`] against a manual clock, firing scheduled
    /// actions in time order the way the browser runtime would.
    struct Harness {
        state: ViewState,
        now_ms: u64,
        timers: HashMap<TimerKey, (u64, ViewAction<u32>)>,
        applied: Vec<(u64, Theme)>,
        persisted: Vec<bool>,
        sent: Vec<ContactMessage>,
        scrolled_to: Vec<Section>,
        origins: Vec<TransitionVisuals>,
    }

    impl Harness {
        fn new(prefers_dark: bool) -> Self {
            Self {
                state: ViewState::new(prefers_dark),
                now_ms: 0,
                timers: HashMap::new(),
                applied: Vec::new(),
                persisted: Vec::new(),
                sent: Vec::new(),
                scrolled_to: Vec::new(),
                origins: Vec::new(),
            }
        }

        fn dispatch(&mut self, action: ViewAction<u32>) {
            let effects = self.state.dispatch(action);
            for effect in effects {
                match effect {
                    ViewEffect::Schedule {
                        key,
                        delay_ms,
                        action,
                    } => {
                        self.timers
                            .insert(key, (self.now_ms + u64::from(delay_ms), action));
                    }
                    ViewEffect::CancelAllTimers => self.timers.clear(),
                    ViewEffect::SetTransitionOrigin(visuals) => self.origins.push(visuals),
                    ViewEffect::ApplyTheme(theme) => self.applied.push((self.now_ms, theme)),
                    ViewEffect::PersistTheme(is_dark) => self.persisted.push(is_dark),
                    ViewEffect::ScrollTo(section) => self.scrolled_to.push(section),
                    ViewEffect::SendContact(message) => self.sent.push(message),
                }
            }
        }

        fn advance_to(&mut self, target_ms: u64) {
            loop {
                let next = self
                    .timers
                    .iter()
                    .filter(|(_, (due, _))| *due <= target_ms)
                    .min_by_key(|(_, (due, _))| *due)
                    .map(|(key, _)| *key);
                let Some(key) = next else {
                    break;
                };
                let Some((due, action)) = self.timers.remove(&key) else {
                    break;
                };
                self.now_ms = due;
                self.dispatch(action);
            }
            self.now_ms = target_ms;
        }
    }

    fn toggle() -> ToggleRect {
        ToggleRect {
            top: 12.0,
            left: 900.0,
            width: 40.0,
            height: 40.0,
        }
    }

    fn toggled() -> ViewAction<u32> {
        ViewAction::ThemeToggled {
            toggle: toggle(),
            reduced_motion: false,
        }
    }

    #[test]
    fn theme_flips_exactly_once_at_midpoint() {
        let mut harness = Harness::new(false);
        harness.dispatch(toggled());

        assert_eq!(harness.origins.len(), 1);
        assert_eq!(harness.state.transition_stage(), TransitionStage::Expanding);

        harness.advance_to(399);
        assert_eq!(harness.state.theme(), Theme::Light);
        assert!(harness.applied.is_empty());

        harness.advance_to(400);
        assert_eq!(harness.state.theme(), Theme::Dark);
        assert_eq!(harness.applied, vec![(400, Theme::Dark)]);
        assert_eq!(harness.persisted, vec![true]);
        assert_eq!(harness.state.transition_stage(), TransitionStage::Fading);

        harness.advance_to(799);
        assert!(harness.state.snapshot().transition.is_some());

        harness.advance_to(800);
        let snapshot = harness.state.snapshot();
        assert_eq!(harness.state.transition_stage(), TransitionStage::Idle);
        assert_eq!(snapshot.transition, None);
        assert_eq!(harness.applied.len(), 1);
    }

    #[test]
    fn origin_survives_toggle_moving_mid_cycle() {
        let mut harness = Harness::new(false);
        harness.dispatch(toggled());
        let origin = harness.state.snapshot().transition.map(|visuals| visuals.origin);
        assert_eq!(origin, Some(Point::new(920.0, 32.0)));

        harness.advance_to(200);
        harness.dispatch(ViewAction::ThemeToggled {
            toggle: ToggleRect {
                top: 300.0,
                left: 10.0,
                width: 80.0,
                height: 80.0,
            },
            reduced_motion: false,
        });
        harness.advance_to(600);

        let origin = harness.state.snapshot().transition.map(|visuals| visuals.origin);
        assert_eq!(origin, Some(Point::new(920.0, 32.0)));
        assert_eq!(harness.origins.len(), 1);
    }

    #[test]
    fn rapid_toggles_complete_a_single_cycle() {
        let mut harness = Harness::new(true);
        harness.dispatch(toggled());
        harness.advance_to(100);
        harness.dispatch(toggled());
        harness.advance_to(450);
        harness.dispatch(toggled());
        harness.advance_to(2_000);

        assert_eq!(harness.state.theme(), Theme::Light);
        assert_eq!(harness.applied, vec![(400, Theme::Light)]);
    }

    #[test]
    fn reduced_motion_flips_immediately() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::ThemeToggled {
            toggle: toggle(),
            reduced_motion: true,
        });

        assert_eq!(harness.state.theme(), Theme::Dark);
        assert_eq!(harness.applied, vec![(0, Theme::Dark)]);
        assert!(harness.origins.is_empty());
        assert!(harness.timers.is_empty());
    }

    #[test]
    fn teardown_cancels_pending_timers() {
        let mut harness = Harness::new(false);
        harness.dispatch(toggled());
        harness.dispatch(ViewAction::PointerMoved(Point::new(3.0, 4.0)));
        harness.dispatch(ViewAction::Teardown);

        assert!(harness.timers.is_empty());
        harness.advance_to(1_000);
        assert_eq!(harness.state.theme(), Theme::Light);
        assert_eq!(harness.state.snapshot().pointer.trailing, Point::default());

        // a timer that slipped through cancellation must not write
        harness.dispatch(ViewAction::TrailingElapsed(0));
        harness.dispatch(ViewAction::TransitionStageElapsed);
        assert_eq!(harness.state.snapshot().pointer.trailing, Point::default());
        assert_eq!(harness.state.theme(), Theme::Light);
    }

    #[test]
    fn trailing_cursor_lags_primary_by_delay() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::PointerMoved(Point::new(10.0, 10.0)));
        harness.advance_to(20);
        harness.dispatch(ViewAction::PointerMoved(Point::new(30.0, 30.0)));

        let pointer = harness.state.snapshot().pointer;
        assert_eq!(pointer.primary, Point::new(30.0, 30.0));
        assert_eq!(pointer.trailing, Point::default());

        harness.advance_to(50);
        assert_eq!(harness.state.snapshot().pointer.trailing, Point::new(10.0, 10.0));

        harness.advance_to(70);
        assert_eq!(harness.state.snapshot().pointer.trailing, Point::new(30.0, 30.0));
    }

    #[test]
    fn scroll_scenarios() {
        let mut harness = Harness::new(false);
        let extents = vec![
            (Section::About, SectionExtent::new(100.0, 300.0)),
            (Section::Projects, SectionExtent::new(500.0, 500.0)),
        ];

        harness.dispatch(ViewAction::Scrolled {
            sample: ScrollSample {
                offset: 50.0,
                viewport_height: 900.0,
            },
            extents: extents.clone(),
        });
        assert_eq!(harness.state.snapshot().scroll.active, Section::Home);

        harness.dispatch(ViewAction::Scrolled {
            sample: ScrollSample {
                offset: 600.0,
                viewport_height: 900.0,
            },
            extents,
        });
        let snapshot = harness.state.snapshot();
        assert_eq!(snapshot.scroll.active, Section::Projects);
        assert_eq!(snapshot.scroll.reveal_progress, 1.0);
        assert_eq!(snapshot.content_opacity(), 1.0);
    }

    fn mounted_mid_page() -> ViewAction<u32> {
        ViewAction::Mounted {
            sample: ScrollSample {
                offset: 600.0,
                viewport_height: 2000.0,
            },
            extents: vec![
                (Section::About, SectionExtent::new(100.0, 300.0)),
                (Section::Projects, SectionExtent::new(500.0, 500.0)),
            ],
        }
    }

    #[test]
    fn mount_resolves_section_and_applies_stored_theme() {
        for (prefers_dark, theme) in [(true, Theme::Dark), (false, Theme::Light)] {
            let mut harness = Harness::new(prefers_dark);
            harness.dispatch(mounted_mid_page());

            let snapshot = harness.state.snapshot();
            assert_eq!(snapshot.scroll.active, Section::Projects);
            assert_eq!(snapshot.scroll.reveal_progress, 0.6);
            assert_eq!(snapshot.theme, theme);
            assert_eq!(harness.applied, vec![(0, theme)]);
            assert!(harness.persisted.is_empty());
            assert!(harness.timers.is_empty());
        }
    }

    #[test]
    fn thesis_hover_mounts_and_unmounts_preview() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::PreviewEntered(Point::new(200.0, 300.0)));
        assert_eq!(
            harness.state.snapshot().preview_position,
            Some(Point::new(220.0, 240.0))
        );

        harness.dispatch(ViewAction::PointerMoved(Point::new(250.0, 320.0)));
        assert_eq!(
            harness.state.snapshot().preview_position,
            Some(Point::new(270.0, 260.0))
        );

        harness.dispatch(ViewAction::PreviewLeft);
        assert_eq!(harness.state.snapshot().preview_position, None);
    }

    #[test]
    fn navigation_activates_section_and_closes_menu() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::MobileMenuToggled);
        assert!(harness.state.snapshot().mobile_menu_open);

        harness.dispatch(ViewAction::Navigate(Section::Contact));
        let snapshot = harness.state.snapshot();
        assert_eq!(snapshot.scroll.active, Section::Contact);
        assert!(!snapshot.mobile_menu_open);

        harness.dispatch(ViewAction::Navigate(Section::Home));
        assert_eq!(harness.state.snapshot().scroll.active, Section::Home);
        assert_eq!(harness.scrolled_to, vec![Section::Contact, Section::Home]);
    }

    #[test]
    fn contact_status_clears_after_delay() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::ContactEdited(ContactField::Name, "Ada".to_string()));
        harness.dispatch(ViewAction::ContactEdited(
            ContactField::Email,
            "ada@example.com".to_string(),
        ));
        harness.dispatch(ViewAction::ContactEdited(ContactField::Message, "Hi".to_string()));
        harness.dispatch(ViewAction::ContactSubmitted);
        harness.dispatch(ViewAction::ContactSubmitted);
        assert_eq!(harness.sent.len(), 1);

        harness.advance_to(1_000);
        harness.dispatch(ViewAction::ContactSettled { delivered: true });
        assert_eq!(harness.state.snapshot().contact.status, crate::contact::SubmitStatus::Sent);

        harness.advance_to(5_999);
        assert_eq!(harness.state.snapshot().contact.status, crate::contact::SubmitStatus::Sent);
        harness.advance_to(6_000);
        assert_eq!(harness.state.snapshot().contact.status, crate::contact::SubmitStatus::Idle);
    }

    #[test]
    fn invalid_contact_never_reaches_relay() {
        let mut harness = Harness::new(false);
        harness.dispatch(ViewAction::ContactSubmitted);

        assert!(harness.sent.is_empty());
        assert_eq!(
            harness.state.snapshot().contact.status,
            crate::contact::SubmitStatus::Failed
        );
        harness.advance_to(5_000);
        assert_eq!(
            harness.state.snapshot().contact.status,
            crate::contact::SubmitStatus::Idle
        );
    }
}
