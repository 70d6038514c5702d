//! Popup lifecycle state machine.
//!
//! One lifecycle per browser session: the popup starts [`PopupStep::Hidden`],
//! a trigger shows the offer, the visitor either converts (through the spin
//! step for spinner campaigns) or dismisses. `Dismissed` is terminal for the
//! session, and both conversion and dismissal mark the popup as seen so no
//! trigger may re-show it.

use serde::{Deserialize, Serialize};

use super::config::Campaign;

/// Errors for transitions the current step does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// The requested action is not valid from the current step.
    #[error("cannot {action} from the {from:?} step")]
    InvalidTransition {
        from: PopupStep,
        action: &'static str,
    },
}

/// Where the popup is in its session lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupStep {
    /// Not yet shown this session.
    #[default]
    Hidden,
    /// The offer step (email capture, countdown if configured).
    Offer,
    /// The wheel is on screen (spinner campaigns only).
    Spin,
    /// Conversion complete; the discount code is displayed.
    Success,
    /// Explicitly closed; terminal for the session.
    Dismissed,
}

impl PopupStep {
    /// A trigger fired. Idempotent: showing an already-visible popup, or one
    /// that has been dismissed or has converted, changes nothing.
    #[must_use]
    pub const fn show(self) -> Self {
        match self {
            Self::Hidden => Self::Offer,
            other => other,
        }
    }

    /// The visitor submitted their email on the offer step.
    ///
    /// Standard and countdown campaigns convert immediately; spinner
    /// campaigns advance to the wheel.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless the popup is on
    /// the offer step.
    pub fn submit_email(self, campaign: &Campaign) -> Result<Self, LifecycleError> {
        match self {
            Self::Offer => Ok(match campaign {
                Campaign::Spinner { .. } => Self::Spin,
                Campaign::Standard | Campaign::Countdown { .. } => Self::Success,
            }),
            from => Err(LifecycleError::InvalidTransition {
                from,
                action: "submit email",
            }),
        }
    }

    /// The wheel finished spinning.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] unless the popup is on
    /// the spin step of a spinner campaign.
    pub fn finish_spin(self, campaign: &Campaign) -> Result<Self, LifecycleError> {
        match (self, campaign) {
            (Self::Spin, Campaign::Spinner { .. }) => Ok(Self::Success),
            (from, _) => Err(LifecycleError::InvalidTransition {
                from,
                action: "finish spin",
            }),
        }
    }

    /// The visitor closed the popup. Valid from any step.
    #[must_use]
    pub const fn dismiss(self) -> Self {
        Self::Dismissed
    }

    /// Whether the popup has been seen this session: converted (or mid-spin)
    /// or dismissed. While seen, no trigger may show it again.
    #[must_use]
    pub const fn is_seen(self) -> bool {
        matches!(self, Self::Spin | Self::Success | Self::Dismissed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::popup::config::SpinnerSegment;

    fn spinner() -> Campaign {
        Campaign::Spinner {
            segments: vec![SpinnerSegment {
                id: "s1".to_owned(),
                label: "Free shipping".to_owned(),
                value: "SHIPFREE".to_owned(),
                color: "#0f766e".to_owned(),
                text_color: "#ffffff".to_owned(),
                probability: 1.0,
            }],
        }
    }

    #[test]
    fn test_standard_flow() {
        let step = PopupStep::Hidden.show();
        assert_eq!(step, PopupStep::Offer);

        let step = step.submit_email(&Campaign::Standard).unwrap();
        assert_eq!(step, PopupStep::Success);
        assert!(step.is_seen());
    }

    #[test]
    fn test_countdown_converts_like_standard() {
        let campaign = Campaign::Countdown {
            timer_duration_minutes: 10,
        };
        let step = PopupStep::Offer.submit_email(&campaign).unwrap();
        assert_eq!(step, PopupStep::Success);
    }

    #[test]
    fn test_spinner_flow_goes_through_spin() {
        let campaign = spinner();
        let step = PopupStep::Offer.submit_email(&campaign).unwrap();
        assert_eq!(step, PopupStep::Spin);
        assert!(step.is_seen());

        let step = step.finish_spin(&campaign).unwrap();
        assert_eq!(step, PopupStep::Success);
    }

    #[test]
    fn test_show_is_idempotent() {
        assert_eq!(PopupStep::Offer.show(), PopupStep::Offer);
        assert_eq!(PopupStep::Success.show(), PopupStep::Success);
        assert_eq!(PopupStep::Dismissed.show(), PopupStep::Dismissed);
    }

    #[test]
    fn test_dismiss_from_any_step() {
        for step in [
            PopupStep::Hidden,
            PopupStep::Offer,
            PopupStep::Spin,
            PopupStep::Success,
        ] {
            assert_eq!(step.dismiss(), PopupStep::Dismissed);
        }
    }

    #[test]
    fn test_submit_requires_offer_step() {
        let err = PopupStep::Hidden.submit_email(&Campaign::Standard);
        assert!(matches!(
            err,
            Err(LifecycleError::InvalidTransition {
                from: PopupStep::Hidden,
                ..
            })
        ));
    }

    #[test]
    fn test_finish_spin_requires_spinner_campaign() {
        assert!(PopupStep::Spin.finish_spin(&Campaign::Standard).is_err());
        assert!(PopupStep::Offer.finish_spin(&spinner()).is_err());
    }

    #[test]
    fn test_hidden_and_offer_are_not_seen() {
        assert!(!PopupStep::Hidden.is_seen());
        assert!(!PopupStep::Offer.is_seen());
    }
}
