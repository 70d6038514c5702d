//! Popup render payloads.
//!
//! [`render`] builds the view-model the client draws for a given config and
//! lifecycle step. The storefront popup endpoint and the admin builder's
//! live preview both call it, which is what keeps preview and production
//! identical.

use serde::{Deserialize, Serialize};

use super::config::{Campaign, PopupConfig, PopupStyle, ScreenPosition};
use super::countdown::CountdownTimer;
use super::lifecycle::PopupStep;
use super::spinner::{REVEAL_DELAY_SECONDS, SPIN_DURATION_SECONDS, segment_angle};

/// Everything the client needs to draw the popup at one lifecycle step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPopup {
    pub step: PopupStep,
    pub placement: Placement,
    pub content: RenderedContent,
    pub style: PopupStyle,
    /// Present on the spin step of spinner campaigns.
    pub wheel: Option<RenderedWheel>,
    /// Present on the offer step of countdown campaigns: the starting
    /// number of seconds for the client-side ticker.
    pub countdown_seconds: Option<u32>,
}

/// How the popup is placed on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Centered card over a dimming overlay.
    CenterOverlay { overlay_color: String },
    /// Full-width banner pinned to the top edge.
    TopBanner,
    /// Fixed-offset card in one corner.
    FixedCorner { corner: Corner },
}

/// Screen corner for [`Placement::FixedCorner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Step-appropriate copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedContent {
    pub title: String,
    pub message: String,
    pub image_url: Option<String>,
    pub button_text: Option<String>,
    pub email_placeholder: Option<String>,
    pub disclaimer: Option<String>,
    /// The granted code, on the success step. Spinner campaigns omit it
    /// here - the spin response carries the won segment's code.
    pub discount_code: Option<String>,
}

/// The wheel, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedWheel {
    pub sectors: Vec<WheelSector>,
    pub spin_duration_seconds: f64,
    pub reveal_delay_seconds: f64,
}

/// One painted sector. Prize codes are not included; the spin endpoint
/// reveals only the winning one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSector {
    pub label: String,
    pub color: String,
    pub text_color: String,
    /// Degrees clockwise from the top pointer.
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Build the render payload for `config` at `step`.
#[must_use]
pub fn render(config: &PopupConfig, step: PopupStep) -> RenderedPopup {
    RenderedPopup {
        step,
        placement: placement_for(&config.style),
        content: content_for(config, step),
        style: config.style.clone(),
        wheel: wheel_for(&config.campaign, step),
        countdown_seconds: countdown_for(&config.campaign, step),
    }
}

fn placement_for(style: &PopupStyle) -> Placement {
    match style.position {
        ScreenPosition::Center => Placement::CenterOverlay {
            overlay_color: style.overlay_color.clone(),
        },
        ScreenPosition::TopCenter => Placement::TopBanner,
        ScreenPosition::TopLeft => Placement::FixedCorner {
            corner: Corner::TopLeft,
        },
        ScreenPosition::TopRight => Placement::FixedCorner {
            corner: Corner::TopRight,
        },
        ScreenPosition::BottomLeft => Placement::FixedCorner {
            corner: Corner::BottomLeft,
        },
        ScreenPosition::BottomRight => Placement::FixedCorner {
            corner: Corner::BottomRight,
        },
    }
}

fn content_for(config: &PopupConfig, step: PopupStep) -> RenderedContent {
    let content = &config.content;
    match step {
        PopupStep::Offer | PopupStep::Spin => RenderedContent {
            title: content.title.clone(),
            message: content.description.clone(),
            image_url: content.image_url.clone(),
            button_text: Some(content.button_text.clone()),
            email_placeholder: Some(content.email_placeholder.clone()),
            disclaimer: content.disclaimer.clone(),
            discount_code: None,
        },
        PopupStep::Success => RenderedContent {
            title: content.success_title.clone(),
            message: content.success_message.clone(),
            image_url: content.image_url.clone(),
            discount_code: match config.campaign {
                Campaign::Standard | Campaign::Countdown { .. } => {
                    Some(content.discount_code.clone())
                }
                Campaign::Spinner { .. } => None,
            },
            ..RenderedContent::default()
        },
        PopupStep::Hidden | PopupStep::Dismissed => RenderedContent::default(),
    }
}

fn wheel_for(campaign: &Campaign, step: PopupStep) -> Option<RenderedWheel> {
    let Campaign::Spinner { segments } = campaign else {
        return None;
    };
    if step != PopupStep::Spin {
        return None;
    }

    let angle = segment_angle(segments.len());
    let sectors = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            #[allow(clippy::cast_precision_loss)] // segment counts are tiny
            let start_angle = i as f64 * angle;
            WheelSector {
                label: segment.label.clone(),
                color: segment.color.clone(),
                text_color: segment.text_color.clone(),
                start_angle,
                end_angle: start_angle + angle,
            }
        })
        .collect();

    Some(RenderedWheel {
        sectors,
        spin_duration_seconds: SPIN_DURATION_SECONDS,
        reveal_delay_seconds: REVEAL_DELAY_SECONDS,
    })
}

const fn countdown_for(campaign: &Campaign, step: PopupStep) -> Option<u32> {
    match (campaign, step) {
        (
            Campaign::Countdown {
                timer_duration_minutes,
            },
            PopupStep::Offer,
        ) => Some(CountdownTimer::new(*timer_duration_minutes).remaining_seconds()),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::popup::config::{PopupBehavior, PopupContent, SpinnerSegment};

    fn base_config(campaign: Campaign) -> PopupConfig {
        PopupConfig {
            enabled: true,
            campaign,
            content: PopupContent {
                title: "Take 10% off your first order".to_owned(),
                description: "Join the studio list.".to_owned(),
                button_text: "Claim offer".to_owned(),
                email_placeholder: "you@example.com".to_owned(),
                success_title: "Welcome in!".to_owned(),
                success_message: "Here is your code:".to_owned(),
                discount_code: "WELCOME10".to_owned(),
                ..PopupContent::default()
            },
            style: PopupStyle::default(),
            behavior: PopupBehavior::default(),
        }
    }

    fn segments(n: usize) -> Vec<SpinnerSegment> {
        (0..n)
            .map(|i| SpinnerSegment {
                id: format!("s{i}"),
                label: format!("Prize {i}"),
                value: format!("CODE{i}"),
                color: "#78350f".to_owned(),
                text_color: "#ffffff".to_owned(),
                probability: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_offer_step_has_form_fields() {
        let rendered = render(&base_config(Campaign::Standard), PopupStep::Offer);
        assert_eq!(rendered.content.title, "Take 10% off your first order");
        assert_eq!(rendered.content.button_text.as_deref(), Some("Claim offer"));
        assert!(rendered.content.email_placeholder.is_some());
        assert!(rendered.content.discount_code.is_none());
        assert!(rendered.wheel.is_none());
        assert!(rendered.countdown_seconds.is_none());
    }

    #[test]
    fn test_success_step_shows_fixed_code_for_standard() {
        let rendered = render(&base_config(Campaign::Standard), PopupStep::Success);
        assert_eq!(rendered.content.title, "Welcome in!");
        assert_eq!(rendered.content.discount_code.as_deref(), Some("WELCOME10"));
    }

    #[test]
    fn test_success_step_omits_code_for_spinner() {
        let config = base_config(Campaign::Spinner {
            segments: segments(4),
        });
        let rendered = render(&config, PopupStep::Success);
        assert!(rendered.content.discount_code.is_none());
    }

    #[test]
    fn test_spin_step_renders_equal_sectors() {
        let config = base_config(Campaign::Spinner {
            segments: segments(6),
        });
        let rendered = render(&config, PopupStep::Spin);

        let wheel = rendered.wheel.unwrap();
        assert_eq!(wheel.sectors.len(), 6);
        assert!((wheel.spin_duration_seconds - 5.0).abs() < f64::EPSILON);
        assert!((wheel.reveal_delay_seconds - 1.5).abs() < f64::EPSILON);

        let first = wheel.sectors.first().unwrap();
        assert!((first.start_angle - 0.0).abs() < f64::EPSILON);
        assert!((first.end_angle - 60.0).abs() < f64::EPSILON);
        let last = wheel.sectors.last().unwrap();
        assert!((last.end_angle - 360.0).abs() < f64::EPSILON);
        // Prize codes stay server-side
        assert!(!serde_json::to_string(&wheel).unwrap().contains("CODE0"));
    }

    #[test]
    fn test_wheel_absent_outside_spin_step() {
        let config = base_config(Campaign::Spinner {
            segments: segments(4),
        });
        assert!(render(&config, PopupStep::Offer).wheel.is_none());
        assert!(render(&config, PopupStep::Success).wheel.is_none());
    }

    #[test]
    fn test_countdown_offer_carries_seconds() {
        let config = base_config(Campaign::Countdown {
            timer_duration_minutes: 15,
        });
        let rendered = render(&config, PopupStep::Offer);
        assert_eq!(rendered.countdown_seconds, Some(900));
        assert!(render(&config, PopupStep::Success).countdown_seconds.is_none());
    }

    #[test]
    fn test_placement_mapping() {
        let mut config = base_config(Campaign::Standard);

        config.style.position = ScreenPosition::Center;
        assert!(matches!(
            render(&config, PopupStep::Offer).placement,
            Placement::CenterOverlay { .. }
        ));

        config.style.position = ScreenPosition::TopCenter;
        assert_eq!(render(&config, PopupStep::Offer).placement, Placement::TopBanner);

        config.style.position = ScreenPosition::BottomRight;
        assert_eq!(
            render(&config, PopupStep::Offer).placement,
            Placement::FixedCorner {
                corner: Corner::BottomRight
            }
        );
    }
}
