use crate::{pointer::Point, theme::Theme};

pub const EXPAND_MS: u32 = 400;
pub const FADE_MS: u32 = 400;
pub const TRANSITION_TOTAL_MS: u32 = EXPAND_MS + FADE_MS;
pub const MASK_START_DIAMETER: f64 = 48.0;
pub const MASK_START_OPACITY: f64 = 1.0;
/// The mask stays opaque until the theme has flipped underneath it.
pub const MASK_FADE_DELAY_MS: u32 = EXPAND_MS;
pub const MASK_FADE_MS: u32 = FADE_MS;
pub const OVERLAY_DELAY_MS: u32 = 100;
pub const OVERLAY_DURATION_MS: u32 = 800;
pub const OVERLAY_START_OPACITY: f64 = 0.5;
pub const TOGGLE_TOP_PROPERTY: &str = "--toggle-top";
pub const TOGGLE_LEFT_PROPERTY: &str = "--toggle-left";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStage {
    Idle,
    Expanding,
    SettlingTheme,
    Fading,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl ToggleRect {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageOutcome {
    /// The midpoint was reached; the theme must switch to `Theme` now.
    Settle(Theme),
    Finished,
    Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionVisuals {
    pub origin: Point,
    pub mask_color: &'static str,
    pub overlay_color: &'static str,
}

impl TransitionVisuals {
    /// Custom properties locating the starting mask, a
    /// [`MASK_START_DIAMETER`] box centred on the origin.
    pub fn custom_properties(&self) -> [(&'static str, String); 2] {
        let half = MASK_START_DIAMETER / 2.0;
        [
            (TOGGLE_TOP_PROPERTY, format!("{:.2}px", self.origin.y - half)),
            (TOGGLE_LEFT_PROPERTY, format!("{:.2}px", self.origin.x - half)),
        ]
    }

    /// Inline style for the mask: expansion over the whole cycle, opacity
    /// fade only after the midpoint.
    pub fn mask_style(&self) -> String {
        format!(
            "background: {}; --mask-start-size: {MASK_START_DIAMETER}px; \
             --mask-start-opacity: {MASK_START_OPACITY}; \
             animation-duration: {TRANSITION_TOTAL_MS}ms, {MASK_FADE_MS}ms; \
             animation-delay: 0ms, {MASK_FADE_DELAY_MS}ms;",
            self.mask_color
        )
    }

    pub fn overlay_style(&self) -> String {
        format!(
            "background: {}; --overlay-start-opacity: {OVERLAY_START_OPACITY}; \
             animation-delay: {OVERLAY_DELAY_MS}ms; animation-duration: {OVERLAY_DURATION_MS}ms;",
            self.overlay_color
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThemeTransition {
    stage: TransitionStage,
    origin: Option<Point>,
    target: Theme,
}

impl Default for ThemeTransition {
    fn default() -> Self {
        Self {
            stage: TransitionStage::Idle,
            origin: None,
            target: Theme::Light,
        }
    }
}

impl ThemeTransition {
    pub fn stage(&self) -> TransitionStage {
        self.stage
    }

    pub fn in_flight(&self) -> bool {
        self.stage != TransitionStage::Idle
    }

    #[cfg(test)]
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    #[cfg(test)]
    pub fn target(&self) -> Theme {
        self.target
    }

    /// Starts a transition away from `current`. Returns the delay until the
    /// midpoint, or `None` when a transition is already running.
    pub fn trigger(&mut self, toggle: ToggleRect, current: Theme) -> Option<u32> {
        if self.in_flight() {
            return None;
        }

        self.stage = TransitionStage::Expanding;
        self.origin = Some(toggle.center());
        self.target = current.toggled();
        Some(EXPAND_MS)
    }

    pub fn on_stage_elapsed(&mut self) -> StageOutcome {
        match self.stage {
            TransitionStage::Expanding => {
                self.stage = TransitionStage::SettlingTheme;
                StageOutcome::Settle(self.target)
            }
            TransitionStage::Fading => {
                self.cancel();
                StageOutcome::Finished
            }
            TransitionStage::Idle | TransitionStage::SettlingTheme => StageOutcome::Stale,
        }
    }

    /// Leaves the midpoint once the theme has been applied and returns the
    /// delay until the transition completes.
    pub fn begin_fade(&mut self) -> Option<u32> {
        if self.stage != TransitionStage::SettlingTheme {
            return None;
        }

        self.stage = TransitionStage::Fading;
        Some(FADE_MS)
    }

    pub fn cancel(&mut self) {
        self.stage = TransitionStage::Idle;
        self.origin = None;
    }

    pub fn visuals(&self) -> Option<TransitionVisuals> {
        if !self.in_flight() {
            return None;
        }

        Some(TransitionVisuals {
            origin: self.origin?,
            mask_color: self.target.mask_color(),
            overlay_color: self.target.toggled().base_color(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggle_at(left: f64, top: f64) -> ToggleRect {
        ToggleRect {
            top,
            left,
            width: 40.0,
            height: 40.0,
        }
    }

    #[test]
    fn full_cycle_settles_once_at_midpoint() {
        let mut transition = ThemeTransition::default();

        assert_eq!(transition.trigger(toggle_at(100.0, 10.0), Theme::Light), Some(EXPAND_MS));
        assert_eq!(transition.stage(), TransitionStage::Expanding);

        assert_eq!(transition.on_stage_elapsed(), StageOutcome::Settle(Theme::Dark));
        assert_eq!(transition.stage(), TransitionStage::SettlingTheme);

        assert_eq!(transition.begin_fade(), Some(FADE_MS));
        assert_eq!(transition.stage(), TransitionStage::Fading);

        assert_eq!(transition.on_stage_elapsed(), StageOutcome::Finished);
        assert_eq!(transition.stage(), TransitionStage::Idle);
        assert_eq!(transition.visuals(), None);
    }

    #[test]
    fn origin_is_toggle_center_captured_at_trigger() {
        let mut transition = ThemeTransition::default();
        transition.trigger(toggle_at(100.0, 10.0), Theme::Light);

        assert_eq!(transition.origin(), Some(Point::new(120.0, 30.0)));
    }

    #[test]
    fn retrigger_in_flight_is_ignored() {
        let mut transition = ThemeTransition::default();
        transition.trigger(toggle_at(100.0, 10.0), Theme::Light);

        assert_eq!(transition.trigger(toggle_at(500.0, 500.0), Theme::Dark), None);
        assert_eq!(transition.origin(), Some(Point::new(120.0, 30.0)));
        assert_eq!(transition.target(), Theme::Dark);
    }

    #[test]
    fn elapsed_while_idle_is_stale() {
        let mut transition = ThemeTransition::default();
        assert_eq!(transition.on_stage_elapsed(), StageOutcome::Stale);
        assert_eq!(transition.begin_fade(), None);
    }

    #[test]
    fn visuals_paint_target_and_fade_old_theme() {
        let mut transition = ThemeTransition::default();
        transition.trigger(toggle_at(100.0, 10.0), Theme::Dark);

        let visuals = transition.visuals().expect("visuals while expanding");
        assert_eq!(visuals.mask_color, Theme::Light.mask_color());
        assert_eq!(visuals.overlay_color, Theme::Dark.base_color());

        let [top, left] = visuals.custom_properties();
        assert_eq!(top, (TOGGLE_TOP_PROPERTY, "6.00px".to_string()));
        assert_eq!(left, (TOGGLE_LEFT_PROPERTY, "96.00px".to_string()));
    }

    #[test]
    fn mask_is_opaque_until_theme_flips() {
        assert_eq!(MASK_START_OPACITY, 1.0);
        assert!(MASK_FADE_DELAY_MS >= EXPAND_MS);
        assert_eq!(MASK_FADE_DELAY_MS + MASK_FADE_MS, TRANSITION_TOTAL_MS);

        let mut transition = ThemeTransition::default();
        transition.trigger(toggle_at(100.0, 10.0), Theme::Light);
        let style = transition.visuals().expect("visuals while expanding").mask_style();

        assert!(style.starts_with("background: #000000;"));
        assert!(style.contains("--mask-start-opacity: 1;"));
        assert!(style.contains("animation-duration: 800ms, 400ms;"));
        assert!(style.contains("animation-delay: 0ms, 400ms;"));
    }

    #[test]
    fn overlay_fades_old_theme_after_short_delay() {
        let mut transition = ThemeTransition::default();
        transition.trigger(toggle_at(100.0, 10.0), Theme::Light);
        let style = transition.visuals().expect("visuals while expanding").overlay_style();

        assert!(style.starts_with("background: #fafaf8;"));
        assert!(style.contains("--overlay-start-opacity: 0.5;"));
        assert!(style.contains("animation-delay: 100ms; animation-duration: 800ms;"));
    }
}
