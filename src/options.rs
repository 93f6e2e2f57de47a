//! Option resolution: library defaults, caller configuration and live
//! per-instance overrides merged into one normalized [`CarouselOptions`].
//!
//! Every parser in this module is total. Malformed input never fails; a
//! field either takes the new layer's value or keeps the prior layer's.

/// Minimum scroll speed in pixels per second.
pub const MIN_SPEED: f64 = 1.0;

/// Keys read from a carousel element's data attributes, in camelCase.
pub const OVERRIDE_KEYS: [&str; 7] = [
    "speed",
    "duration",
    "gap",
    "run",
    "hoverPause",
    "direction",
    "reducedMotion",
];

/// Whether the strip animates by default or only while interacted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RunMode {
    /// Animate continuously
    #[default]
    Always,
    /// Animate only while hovered or focused within
    Hover,
}

/// Travel direction of the strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Direction {
    #[default]
    Left,
    Right,
}

/// Whether the OS reduced-motion preference is honored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ReducedMotion {
    /// Pause while the preference is active
    #[default]
    Stop,
    /// Keep animating regardless of the preference
    Ignore,
}

impl RunMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RunMode::Always => "always",
            RunMode::Hover => "hover",
        }
    }
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl ReducedMotion {
    pub fn as_str(self) -> &'static str {
        match self {
            ReducedMotion::Stop => "stop",
            ReducedMotion::Ignore => "ignore",
        }
    }
}

/// A raw option value as supplied by a caller or read from markup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Interpret the value as a finite number.
    ///
    /// Text is trimmed and parsed; blank text, booleans, NaN and infinities
    /// yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            OptionValue::Number(n) => *n,
            OptionValue::Text(s) => s.trim().parse::<f64>().ok()?,
            OptionValue::Bool(_) => return None,
        };
        n.is_finite().then_some(n)
    }

    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Interpret the value as a boolean.
    ///
    /// Booleans pass through and `"true"`/`"false"` match case-insensitively.
    /// Anything else, including empty text, yields `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Text(s) if s.eq_ignore_ascii_case("true") => Some(true),
            OptionValue::Text(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(n as f64)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

/// One layer of unvalidated options. Absent fields defer to the prior layer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct OptionLayer {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub speed: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub duration: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub gap: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub run: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hover_pause: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub direction: Option<OptionValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub reduced_motion: Option<OptionValue>,
}

impl OptionLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from a string lookup keyed by [`OVERRIDE_KEYS`].
    ///
    /// This is how data attributes are decoded: the lookup receives the
    /// camelCase key and returns the attribute text, if any.
    ///
    /// ```rust
    /// use strip_marquee::{OptionLayer, OptionValue};
    ///
    /// let layer = OptionLayer::from_lookup(|key| match key {
    ///     "speed" => Some("120".to_string()),
    ///     "hoverPause" => Some("TRUE".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(layer.speed, Some(OptionValue::from("120")));
    /// assert!(layer.duration.is_none());
    /// ```
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut layer = Self::default();
        for key in OVERRIDE_KEYS {
            if let Some(text) = lookup(key) {
                layer.set(key, text);
            }
        }
        layer
    }

    /// Set a field by its camelCase key. Unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) {
        let slot = match key {
            "speed" => &mut self.speed,
            "duration" => &mut self.duration,
            "gap" => &mut self.gap,
            "run" => &mut self.run,
            "hoverPause" => &mut self.hover_pause,
            "direction" => &mut self.direction,
            "reducedMotion" => &mut self.reduced_motion,
            _ => return,
        };
        *slot = Some(value.into());
    }

    pub fn with_speed(mut self, value: impl Into<OptionValue>) -> Self {
        self.speed = Some(value.into());
        self
    }

    pub fn with_duration(mut self, value: impl Into<OptionValue>) -> Self {
        self.duration = Some(value.into());
        self
    }

    pub fn with_gap(mut self, value: impl Into<OptionValue>) -> Self {
        self.gap = Some(value.into());
        self
    }

    pub fn with_run(mut self, value: impl Into<OptionValue>) -> Self {
        self.run = Some(value.into());
        self
    }

    pub fn with_hover_pause(mut self, value: impl Into<OptionValue>) -> Self {
        self.hover_pause = Some(value.into());
        self
    }

    pub fn with_direction(mut self, value: impl Into<OptionValue>) -> Self {
        self.direction = Some(value.into());
        self
    }

    pub fn with_reduced_motion(mut self, value: impl Into<OptionValue>) -> Self {
        self.reduced_motion = Some(value.into());
        self
    }

    /// Parse a TOML options file into a layer.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> crate::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Normalized carousel configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CarouselOptions {
    /// Scroll speed in pixels per second, at least [`MIN_SPEED`]
    pub speed: f64,
    /// Cycle duration in seconds; overrides `speed` when present
    pub duration: Option<f64>,
    /// Gap between items in pixels, never negative
    pub gap: f64,
    pub run: RunMode,
    /// Pause while hovered when `run` is `Always`
    pub hover_pause: bool,
    pub direction: Direction,
    pub reduced_motion: ReducedMotion,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            speed: 90.0,
            duration: None,
            gap: 10.0,
            run: RunMode::Always,
            hover_pause: false,
            direction: Direction::Left,
            reduced_motion: ReducedMotion::Stop,
        }
    }
}

impl CarouselOptions {
    /// Apply one layer on top of these options, validating each field.
    pub fn merge(&self, layer: &OptionLayer) -> Self {
        Self {
            speed: parse_speed(layer.speed.as_ref(), self.speed),
            duration: parse_duration(layer.duration.as_ref(), self.duration),
            gap: parse_gap(layer.gap.as_ref(), self.gap),
            run: parse_run(layer.run.as_ref(), self.run),
            hover_pause: parse_hover_pause(layer.hover_pause.as_ref(), self.hover_pause),
            direction: parse_direction(layer.direction.as_ref(), self.direction),
            reduced_motion: parse_reduced_motion(layer.reduced_motion.as_ref(), self.reduced_motion),
        }
    }
}

/// Merge `defaults < caller < live` into one configuration.
///
/// ```rust
/// use strip_marquee::{resolve, CarouselOptions, OptionLayer, RunMode};
///
/// let caller = OptionLayer::new().with_speed(120.0).with_run("hover");
/// let live = OptionLayer::new().with_speed("fast").with_duration("0");
///
/// let options = resolve(&CarouselOptions::default(), &caller, &live);
/// assert_eq!(options.speed, 120.0);
/// assert_eq!(options.duration, None);
/// assert_eq!(options.run, RunMode::Hover);
/// ```
pub fn resolve(defaults: &CarouselOptions, caller: &OptionLayer, live: &OptionLayer) -> CarouselOptions {
    defaults.merge(caller).merge(live)
}

/// Non-finite values keep `prior`; the result is clamped to [`MIN_SPEED`].
pub fn parse_speed(value: Option<&OptionValue>, prior: f64) -> f64 {
    value
        .and_then(OptionValue::as_number)
        .unwrap_or(prior)
        .max(MIN_SPEED)
}

/// A present value that is non-finite or not positive clears the duration.
pub fn parse_duration(value: Option<&OptionValue>, prior: Option<f64>) -> Option<f64> {
    match value {
        None => prior.filter(|d| d.is_finite() && *d > 0.0),
        Some(v) => v.as_number().filter(|d| *d > 0.0),
    }
}

pub fn parse_gap(value: Option<&OptionValue>, prior: f64) -> f64 {
    value
        .and_then(OptionValue::as_number)
        .unwrap_or(prior)
        .max(0.0)
}

pub fn parse_run(value: Option<&OptionValue>, prior: RunMode) -> RunMode {
    match value {
        None => prior,
        Some(v) if v.as_text() == Some("hover") => RunMode::Hover,
        Some(_) => RunMode::Always,
    }
}

pub fn parse_direction(value: Option<&OptionValue>, prior: Direction) -> Direction {
    match value {
        None => prior,
        Some(v) if v.as_text() == Some("right") => Direction::Right,
        Some(_) => Direction::Left,
    }
}

pub fn parse_reduced_motion(value: Option<&OptionValue>, prior: ReducedMotion) -> ReducedMotion {
    match value {
        None => prior,
        Some(v) if v.as_text() == Some("ignore") => ReducedMotion::Ignore,
        Some(_) => ReducedMotion::Stop,
    }
}

/// Malformed values keep `prior`.
pub fn parse_hover_pause(value: Option<&OptionValue>, prior: bool) -> bool {
    value.and_then(OptionValue::as_bool).unwrap_or(prior)
}
