//! Popup campaign configuration.
//!
//! One [`PopupConfig`] record is published at a time (under the `popup` key
//! of the shop settings store). The campaign kind is a tagged union so a
//! countdown campaign cannot carry spinner segments and vice versa; fields
//! that only make sense for one kind live on that kind's variant.

use serde::{Deserialize, Serialize};

/// Errors produced by [`PopupConfig::validate`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PopupConfigError {
    /// A spinner campaign must have at least one segment.
    #[error("spinner campaign has no segments")]
    NoSegments,
    /// Scroll threshold must be a percentage.
    #[error("scroll percentage must be between 0 and 100 (got {0})")]
    ScrollPercentageOutOfRange(u8),
    /// A countdown campaign must run for at least one minute.
    #[error("countdown duration must be at least 1 minute")]
    ZeroCountdown,
}

/// The published popup campaign configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Master gate; a disabled config never renders or triggers.
    pub enabled: bool,
    /// Which interaction flow this campaign runs.
    pub campaign: Campaign,
    pub content: PopupContent,
    pub style: PopupStyle,
    pub behavior: PopupBehavior,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            campaign: Campaign::Standard,
            content: PopupContent::default(),
            style: PopupStyle::default(),
            behavior: PopupBehavior::default(),
        }
    }
}

impl PopupConfig {
    /// Validate a config before publishing.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: an empty spinner wheel, a scroll
    /// threshold above 100, or a zero-length countdown.
    pub fn validate(&self) -> Result<(), PopupConfigError> {
        match &self.campaign {
            Campaign::Spinner { segments } if segments.is_empty() => {
                return Err(PopupConfigError::NoSegments);
            }
            Campaign::Countdown {
                timer_duration_minutes,
            } if *timer_duration_minutes == 0 => {
                return Err(PopupConfigError::ZeroCountdown);
            }
            _ => {}
        }

        if self.behavior.scroll_percentage > 100 {
            return Err(PopupConfigError::ScrollPercentageOutOfRange(
                self.behavior.scroll_percentage,
            ));
        }

        Ok(())
    }
}

/// The campaign kind and its kind-specific data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Campaign {
    /// Email capture for a fixed discount code.
    #[default]
    Standard,
    /// Email capture with a live countdown as an urgency cue. The timer is
    /// cosmetic: reaching zero freezes the display, nothing is enforced.
    Countdown { timer_duration_minutes: u32 },
    /// Email capture followed by a spin-to-win wheel.
    Spinner { segments: Vec<SpinnerSegment> },
}

/// One sector of the spin-to-win wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinnerSegment {
    pub id: String,
    /// Label painted on the wheel (e.g., "10% OFF").
    pub label: String,
    /// The redeemable discount code granted when this segment wins.
    pub value: String,
    pub color: String,
    pub text_color: String,
    /// Editable in the builder and persisted, but NOT consulted by the
    /// selection algorithm - segments win uniformly. See `winning_index`.
    #[serde(default)]
    pub probability: f64,
}

/// Campaign copy and the offer itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupContent {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub button_text: String,
    pub email_placeholder: String,
    pub disclaimer: Option<String>,
    pub success_title: String,
    pub success_message: String,
    /// Fixed discount code for standard/countdown campaigns. Spinner
    /// campaigns grant a segment's `value` instead.
    pub discount_code: String,
}

/// Visual styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupStyle {
    pub layout: LayoutVariant,
    pub width: WidthClass,
    pub position: ScreenPosition,
    pub rounding: CornerRounding,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
    pub button_text_color: String,
    pub overlay_color: String,
    /// Entrance animation identifier (e.g., "fade-in", "slide-up").
    pub entrance_animation: String,
    /// Exit animation identifier.
    pub exit_animation: String,
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            layout: LayoutVariant::default(),
            width: WidthClass::default(),
            position: ScreenPosition::default(),
            rounding: CornerRounding::default(),
            background_color: "#ffffff".to_owned(),
            text_color: "#1f2937".to_owned(),
            button_color: "#1f2937".to_owned(),
            button_text_color: "#ffffff".to_owned(),
            overlay_color: "rgba(0, 0, 0, 0.5)".to_owned(),
            entrance_animation: "fade-in".to_owned(),
            exit_animation: "fade-out".to_owned(),
        }
    }
}

/// Layout arrangement within the popup card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    #[default]
    ImageTop,
    ImageLeft,
    TextOnly,
}

/// Width class of the popup card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    Narrow,
    #[default]
    Standard,
    Wide,
}

/// Where on the screen the popup appears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPosition {
    #[default]
    Center,
    TopCenter,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Corner rounding of the popup card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRounding {
    None,
    #[default]
    Medium,
    Large,
}

/// When the popup triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupBehavior {
    /// Seconds to wait before showing. Zero disables the delay timer.
    pub delay_seconds: u32,
    /// Show when the pointer leaves through the top edge (desktop only).
    pub show_on_exit: bool,
    /// Show once the page is scrolled past `scroll_percentage`.
    pub show_on_scroll: bool,
    /// Scroll depth threshold in percent (0-100).
    pub scroll_percentage: u8,
}

impl Default for PopupBehavior {
    fn default() -> Self {
        Self {
            delay_seconds: 5,
            show_on_exit: false,
            show_on_scroll: false,
            scroll_percentage: 50,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn segment(id: &str) -> SpinnerSegment {
        SpinnerSegment {
            id: id.to_owned(),
            label: "10% OFF".to_owned(),
            value: "SPIN10".to_owned(),
            color: "#b45309".to_owned(),
            text_color: "#ffffff".to_owned(),
            probability: 0.25,
        }
    }

    #[test]
    fn test_default_config_is_disabled_and_valid() {
        let config = PopupConfig::default();
        assert!(!config.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spinner_without_segments_is_invalid() {
        let config = PopupConfig {
            campaign: Campaign::Spinner {
                segments: Vec::new(),
            },
            ..PopupConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PopupConfigError::NoSegments)
        ));
    }

    #[test]
    fn test_zero_countdown_is_invalid() {
        let config = PopupConfig {
            campaign: Campaign::Countdown {
                timer_duration_minutes: 0,
            },
            ..PopupConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PopupConfigError::ZeroCountdown)
        ));
    }

    #[test]
    fn test_scroll_percentage_over_100_is_invalid() {
        let config = PopupConfig {
            behavior: PopupBehavior {
                scroll_percentage: 120,
                ..PopupBehavior::default()
            },
            ..PopupConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PopupConfigError::ScrollPercentageOutOfRange(120))
        ));
    }

    #[test]
    fn test_campaign_json_tagging() {
        let campaign = Campaign::Spinner {
            segments: vec![segment("s1")],
        };
        let json = serde_json::to_value(&campaign).unwrap();
        assert_eq!(json["type"], "spinner");
        assert_eq!(json["segments"][0]["value"], "SPIN10");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = PopupConfig {
            enabled: true,
            campaign: Campaign::Countdown {
                timer_duration_minutes: 15,
            },
            ..PopupConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PopupConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        // Stored configs from older builder versions may omit fields.
        let parsed: PopupConfig = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(parsed.enabled);
        assert_eq!(parsed.campaign, Campaign::Standard);
        assert_eq!(parsed.behavior.delay_seconds, 5);
    }
}
