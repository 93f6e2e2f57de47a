//! # strip-marquee
//!
//! Layout-responsive replication engine for infinitely scrolling
//! horizontal strips.
//!
//! A strip's content (the source group) is duplicated enough times to cover
//! its container plus one extra cycle. The motion itself is left to a CSS
//! keyframe animation; this crate only computes and maintains the state that
//! animation reads:
//! - Resolving layered options (defaults, caller config, live overrides)
//! - Computing clone count, cycle width and cycle duration
//! - Deriving running/paused from run mode, hover and reduced motion
//! - Debouncing relayout to at most one pass per animation frame
//!
//! The document is reached through the [`CarouselHost`] trait, so the
//! engine runs against any element tree. A `web-sys` implementation ships
//! behind the `web` feature.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for option types
//! - `toml` - Load an option layer from a TOML file
//! - `web` - Enable the browser DOM backend
//!
//! ## Example
//!
//! ```rust
//! use strip_marquee::{compute_layout, evaluate, resolve, CarouselOptions, OptionLayer};
//! use strip_marquee::{LayoutOutcome, PlayInputs, PlayState};
//!
//! let caller = OptionLayer::new().with_speed(100.0);
//! let live = OptionLayer::from_lookup(|key| (key == "hoverPause").then(|| "true".to_string()));
//! let options = resolve(&CarouselOptions::default(), &caller, &live);
//!
//! let layout = compute_layout(500.0, 1200.0, true, &options);
//! assert!(matches!(layout, LayoutOutcome::Active(r) if r.clone_count == 3));
//!
//! let state = evaluate(&PlayInputs::new(&options, true, false));
//! assert_eq!(state, PlayState::Paused);
//! ```

mod carousel;
mod clones;
mod error;
pub mod host;
mod layout;
mod options;
mod play_state;
pub mod registry;
pub mod scheduler;
pub mod style;

#[cfg(test)]
mod testing;

#[cfg(feature = "web")]
pub mod web;

pub use carousel::{Carousel, CarouselEvent};
pub use clones::CloneGroup;
pub use error::{CarouselError, Result};
pub use host::{CarouselHost, PreferenceStrategy, ResizeStrategy, Subscriptions};
pub use layout::{
    compute_layout, cycle_duration, LayoutOutcome, LayoutResult, MAX_CLONE_GROUPS,
    MIN_DURATION_SECS,
};
pub use options::{
    parse_direction, parse_duration, parse_gap, parse_hover_pause, parse_reduced_motion,
    parse_run, parse_speed, resolve, CarouselOptions, Direction, OptionLayer, OptionValue,
    ReducedMotion, RunMode, MIN_SPEED, OVERRIDE_KEYS,
};
pub use play_state::{evaluate, PlayInputs, PlayState};
pub use registry::CarouselRegistry;
pub use scheduler::{FrameScheduler, ImmediateScheduler, ManualFrameScheduler, RefreshCoordinator};
pub use style::StyleSink;

#[cfg(feature = "web")]
pub use web::{init_all, mount};
