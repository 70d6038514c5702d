//! Promotional popup engine.
//!
//! A popup campaign is described by a single [`PopupConfig`] record: what to
//! show (standard email capture, spin-to-win wheel, or countdown banner),
//! how it looks, and when it triggers. The admin panel publishes the config;
//! the storefront renders it. Everything in this module is pure - the
//! storefront API and the admin live preview both go through [`render`], so
//! the two cannot drift apart.
//!
//! Lifecycle state ([`PopupStep`]) and the has-been-seen flag are
//! session-scoped and passed in explicitly; nothing here reads ambient
//! state.

pub mod config;
pub mod countdown;
pub mod lifecycle;
pub mod render;
pub mod spinner;
pub mod trigger;

pub use config::{
    Campaign, CornerRounding, LayoutVariant, PopupBehavior, PopupConfig, PopupConfigError,
    PopupContent, PopupStyle, ScreenPosition, SpinnerSegment, WidthClass,
};
pub use countdown::CountdownTimer;
pub use lifecycle::{LifecycleError, PopupStep};
pub use render::{Placement, RenderedContent, RenderedPopup, RenderedWheel, WheelSector, render};
pub use spinner::{SpinOutcome, spin};
pub use trigger::{TriggerDecision, TriggerEvent, TriggerPlan, TriggerState};
