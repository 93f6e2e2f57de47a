//! Running/paused decision from run mode, hover and reduced motion.

use crate::{CarouselOptions, ReducedMotion, RunMode};

/// Whether the presentation layer should animate the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    Running,
    #[default]
    Paused,
}

impl PlayState {
    /// Token written to the play-state style variable.
    pub fn as_css(self) -> &'static str {
        match self {
            PlayState::Running => "running",
            PlayState::Paused => "paused",
        }
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == PlayState::Running
    }
}

/// Everything the play state depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayInputs {
    pub run: RunMode,
    pub hover_pause: bool,
    pub reduced_motion: ReducedMotion,
    /// Pointer is over the strip or focus is within it
    pub hovered: bool,
    /// The OS reduced-motion preference is active
    pub prefers_reduced_motion: bool,
}

impl PlayInputs {
    pub fn new(options: &CarouselOptions, hovered: bool, prefers_reduced_motion: bool) -> Self {
        Self {
            run: options.run,
            hover_pause: options.hover_pause,
            reduced_motion: options.reduced_motion,
            hovered,
            prefers_reduced_motion,
        }
    }
}

/// Evaluate the play state.
///
/// Precedence: an honored reduced-motion preference pauses outright; hover
/// mode runs only while hovered; otherwise the strip runs unless hover-pause
/// is on and it is hovered.
///
/// ```rust
/// use strip_marquee::{evaluate, PlayInputs, PlayState, ReducedMotion, RunMode};
///
/// let inputs = PlayInputs {
///     run: RunMode::Hover,
///     hover_pause: false,
///     reduced_motion: ReducedMotion::Stop,
///     hovered: true,
///     prefers_reduced_motion: false,
/// };
/// assert_eq!(evaluate(&inputs), PlayState::Running);
/// ```
pub fn evaluate(inputs: &PlayInputs) -> PlayState {
    if inputs.reduced_motion == ReducedMotion::Stop && inputs.prefers_reduced_motion {
        return PlayState::Paused;
    }

    let running = match inputs.run {
        RunMode::Hover => inputs.hovered,
        RunMode::Always => !(inputs.hover_pause && inputs.hovered),
    };

    if running {
        PlayState::Running
    } else {
        PlayState::Paused
    }
}
