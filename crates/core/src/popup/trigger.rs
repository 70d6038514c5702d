//! Popup trigger evaluation.
//!
//! The configured triggers are additive-OR: a delay timer, an exit-intent
//! listener, and a scroll-depth listener all run independently, and the
//! first to fire shows the popup. Later events are no-ops, and nothing
//! fires once the popup has been seen (dismissed or converted) this
//! session.
//!
//! The evaluator is pure: session state comes in as an explicit
//! [`TriggerState`], events come in as values, and the caller acts on the
//! returned [`TriggerDecision`].

use serde::{Deserialize, Serialize};

use super::config::PopupBehavior;

/// What the client should arm for a given behavior config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPlan {
    /// Show without waiting for any event. Set when no delay, exit, or
    /// scroll trigger is configured.
    pub show_immediately: bool,
    /// Arm a one-shot timer for this many seconds.
    pub delay_seconds: Option<u32>,
    /// Arm a document pointer-leave listener (desktop exit intent).
    pub exit_intent: bool,
    /// Arm a scroll listener firing at this depth percentage.
    pub scroll_threshold_percent: Option<u8>,
}

impl TriggerPlan {
    /// Build the plan for a behavior config.
    #[must_use]
    pub const fn for_behavior(behavior: &PopupBehavior) -> Self {
        let delay_seconds = if behavior.delay_seconds > 0 {
            Some(behavior.delay_seconds)
        } else {
            None
        };
        let scroll_threshold_percent = if behavior.show_on_scroll {
            Some(behavior.scroll_percentage)
        } else {
            None
        };

        Self {
            show_immediately: delay_seconds.is_none()
                && !behavior.show_on_exit
                && scroll_threshold_percent.is_none(),
            delay_seconds,
            exit_intent: behavior.show_on_exit,
            scroll_threshold_percent,
        }
    }
}

/// An event one of the armed listeners observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerEvent {
    /// The page finished loading (only relevant for `show_immediately`).
    PageLoaded,
    /// The delay timer elapsed.
    DelayElapsed,
    /// The pointer left the document at this vertical position.
    ExitIntent { pointer_y: f64 },
    /// The page was scrolled.
    Scrolled {
        scroll_y: f64,
        scroll_height: f64,
        viewport_height: f64,
    },
}

/// Whether an event shows the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    Show,
    Ignore,
}

/// Session-scoped trigger state.
///
/// `seen` mirrors the session's dismissed/converted flag; `fired` makes the
/// show idempotent when several listeners race.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerState {
    seen: bool,
    fired: bool,
}

impl TriggerState {
    /// Start-of-page state. `seen` comes from the session store.
    #[must_use]
    pub const fn new(seen: bool) -> Self {
        Self { seen, fired: false }
    }

    /// Whether a trigger has already shown the popup.
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    /// Evaluate one event against the plan. The first matching event
    /// returns [`TriggerDecision::Show`] and latches; everything after
    /// that, and everything while `seen`, is ignored.
    pub fn on_event(&mut self, plan: &TriggerPlan, event: TriggerEvent) -> TriggerDecision {
        if self.seen || self.fired {
            return TriggerDecision::Ignore;
        }

        let matches = match event {
            TriggerEvent::PageLoaded => plan.show_immediately,
            TriggerEvent::DelayElapsed => plan.delay_seconds.is_some(),
            TriggerEvent::ExitIntent { pointer_y } => plan.exit_intent && pointer_y <= 0.0,
            TriggerEvent::Scrolled {
                scroll_y,
                scroll_height,
                viewport_height,
            } => plan.scroll_threshold_percent.is_some_and(|threshold| {
                scroll_percent(scroll_y, scroll_height, viewport_height) >= f64::from(threshold)
            }),
        };

        if matches {
            self.fired = true;
            TriggerDecision::Show
        } else {
            TriggerDecision::Ignore
        }
    }
}

/// Scroll depth as a percentage of the scrollable distance.
///
/// `scroll_y / (scroll_height - viewport_height) * 100`, clamped to
/// `[0, 100]`. A page with nothing to scroll counts as fully scrolled.
#[must_use]
pub fn scroll_percent(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 100.0;
    }
    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behavior(delay: u32, exit: bool, scroll: Option<u8>) -> PopupBehavior {
        PopupBehavior {
            delay_seconds: delay,
            show_on_exit: exit,
            show_on_scroll: scroll.is_some(),
            scroll_percentage: scroll.unwrap_or(0),
        }
    }

    fn scrolled(percent: f64) -> TriggerEvent {
        // 2000px of scrollable distance
        TriggerEvent::Scrolled {
            scroll_y: percent / 100.0 * 2000.0,
            scroll_height: 2800.0,
            viewport_height: 800.0,
        }
    }

    #[test]
    fn test_plan_delay_only() {
        let plan = TriggerPlan::for_behavior(&behavior(5, false, None));
        assert_eq!(plan.delay_seconds, Some(5));
        assert!(!plan.show_immediately);
        assert!(!plan.exit_intent);
        assert_eq!(plan.scroll_threshold_percent, None);
    }

    #[test]
    fn test_plan_no_triggers_shows_immediately() {
        let plan = TriggerPlan::for_behavior(&behavior(0, false, None));
        assert!(plan.show_immediately);
    }

    #[test]
    fn test_plan_other_trigger_disables_immediate_show() {
        let plan = TriggerPlan::for_behavior(&behavior(0, true, None));
        assert!(!plan.show_immediately);
        assert!(plan.exit_intent);
    }

    #[test]
    fn test_delay_only_fires_exactly_once() {
        let plan = TriggerPlan::for_behavior(&behavior(5, false, None));
        let mut state = TriggerState::new(false);

        assert_eq!(
            state.on_event(&plan, TriggerEvent::DelayElapsed),
            TriggerDecision::Show
        );
        assert_eq!(
            state.on_event(&plan, TriggerEvent::DelayElapsed),
            TriggerDecision::Ignore
        );
    }

    #[test]
    fn test_first_trigger_wins() {
        let plan = TriggerPlan::for_behavior(&behavior(5, true, Some(50)));
        let mut state = TriggerState::new(false);

        assert_eq!(state.on_event(&plan, scrolled(75.0)), TriggerDecision::Show);
        // Later timer and exit events are idempotent no-ops
        assert_eq!(
            state.on_event(&plan, TriggerEvent::DelayElapsed),
            TriggerDecision::Ignore
        );
        assert_eq!(
            state.on_event(&plan, TriggerEvent::ExitIntent { pointer_y: -1.0 }),
            TriggerDecision::Ignore
        );
    }

    #[test]
    fn test_seen_session_ignores_every_trigger() {
        let plan = TriggerPlan::for_behavior(&behavior(5, true, Some(10)));
        let mut state = TriggerState::new(true);

        for event in [
            TriggerEvent::PageLoaded,
            TriggerEvent::DelayElapsed,
            TriggerEvent::ExitIntent { pointer_y: -2.0 },
            scrolled(100.0),
        ] {
            assert_eq!(state.on_event(&plan, event), TriggerDecision::Ignore);
        }
        assert!(!state.has_fired());
    }

    #[test]
    fn test_exit_intent_requires_top_edge() {
        let plan = TriggerPlan::for_behavior(&behavior(0, true, None));
        let mut state = TriggerState::new(false);

        assert_eq!(
            state.on_event(&plan, TriggerEvent::ExitIntent { pointer_y: 300.0 }),
            TriggerDecision::Ignore
        );
        assert_eq!(
            state.on_event(&plan, TriggerEvent::ExitIntent { pointer_y: 0.0 }),
            TriggerDecision::Show
        );
    }

    #[test]
    fn test_scroll_below_threshold_ignored() {
        let plan = TriggerPlan::for_behavior(&behavior(0, false, Some(60)));
        let mut state = TriggerState::new(false);

        assert_eq!(
            state.on_event(&plan, scrolled(59.0)),
            TriggerDecision::Ignore
        );
        assert_eq!(state.on_event(&plan, scrolled(60.0)), TriggerDecision::Show);
    }

    #[test]
    fn test_scroll_percent_math() {
        assert!((scroll_percent(500.0, 1800.0, 800.0) - 50.0).abs() < f64::EPSILON);
        assert!((scroll_percent(0.0, 1800.0, 800.0)).abs() < f64::EPSILON);
        // Past the end (elastic scrolling) clamps to 100
        assert!((scroll_percent(1200.0, 1800.0, 800.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scroll_percent_degenerate_page() {
        assert!((scroll_percent(0.0, 600.0, 800.0) - 100.0).abs() < f64::EPSILON);
    }
}
