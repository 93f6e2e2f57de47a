//! Declarative style channel between the carousel and its stylesheet.
//!
//! The carousel never positions anything itself. It writes CSS custom
//! properties and marker classes on the root element and the stylesheet
//! turns them into a keyframe animation.

use crate::{Direction, LayoutResult, PlayState};

pub const VAR_GAP: &str = "--carousel-gap";
pub const VAR_PLAY_STATE: &str = "--carousel-play-state";
pub const VAR_CYCLE_WIDTH: &str = "--carousel-cycle-width";
pub const VAR_DURATION: &str = "--carousel-duration";

pub const CLASS_ENHANCED: &str = "is-enhanced";
pub const CLASS_DIRECTION_LEFT: &str = "is-direction-left";
pub const CLASS_DIRECTION_RIGHT: &str = "is-direction-right";

/// Class of the element wrapping the source group and its clones.
pub const CLASS_TRACK: &str = "carousel-track";
/// Class of the source group and of every clone group.
pub const CLASS_GROUP: &str = "carousel-group";

const ALL_VARS: [&str; 4] = [VAR_GAP, VAR_DURATION, VAR_CYCLE_WIDTH, VAR_PLAY_STATE];

/// Receiver of style state, implemented by the root element's host.
pub trait StyleSink {
    fn set_style_var(&mut self, name: &str, value: &str);
    fn remove_style_var(&mut self, name: &str);
    /// Add or remove a marker class.
    fn set_marker(&mut self, class: &str, on: bool);
}

impl Direction {
    /// Marker class for this direction.
    pub fn marker_class(self) -> &'static str {
        match self {
            Direction::Left => CLASS_DIRECTION_LEFT,
            Direction::Right => CLASS_DIRECTION_RIGHT,
        }
    }
}

/// Format a pixel length, e.g. `10px` or `12.5px`.
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Format a duration, e.g. `5s` or `0.1s`.
pub fn seconds(value: f64) -> String {
    format!("{value}s")
}

/// Write the gap and the direction markers. Runs before measuring, since
/// the gap contributes to the source group's width.
pub fn write_spacing<S: StyleSink + ?Sized>(sink: &mut S, gap: f64, direction: Direction) {
    sink.set_style_var(VAR_GAP, &px(gap));
    for candidate in [Direction::Left, Direction::Right] {
        sink.set_marker(candidate.marker_class(), candidate == direction);
    }
}

pub fn write_layout<S: StyleSink + ?Sized>(sink: &mut S, layout: &LayoutResult) {
    sink.set_style_var(VAR_CYCLE_WIDTH, &px(layout.cycle_width));
    sink.set_style_var(VAR_DURATION, &seconds(layout.duration_secs));
}

pub fn write_play_state<S: StyleSink + ?Sized>(sink: &mut S, state: PlayState) {
    sink.set_style_var(VAR_PLAY_STATE, state.as_css());
}

/// Remove every variable and marker the carousel ever writes.
pub fn clear<S: StyleSink + ?Sized>(sink: &mut S) {
    sink.set_marker(CLASS_ENHANCED, false);
    sink.set_marker(CLASS_DIRECTION_LEFT, false);
    sink.set_marker(CLASS_DIRECTION_RIGHT, false);
    for name in ALL_VARS {
        sink.remove_style_var(name);
    }
}
