//! The document-side collaborator of a carousel.
//!
//! Implement [`CarouselHost`] to connect the engine to a concrete element
//! tree: a browser DOM (see the `web` feature), a test double, or any other
//! retained-mode UI that can measure, clone and style nodes.

use crate::style::StyleSink;
use crate::OptionLayer;

/// Tab index forced onto focusable nodes inside clone groups.
pub const SUPPRESSED_TAB_INDEX: &str = "-1";

/// How container size changes reach the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeStrategy {
    /// A size observer on the root element
    Observer,
    /// Fallback: the window's resize event
    WindowResize,
}

/// How reduced-motion preference changes reach the carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferenceStrategy {
    /// `change` event listener on the media query
    ChangeEvent,
    /// Legacy `addListener` callback
    LegacyListener,
    /// No change notification; the preference is still read on every update
    Unavailable,
}

/// Which subscription paths a host took when binding listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscriptions {
    pub resize: ResizeStrategy,
    pub reduced_motion: PreferenceStrategy,
}

/// Structural, measuring and event plumbing for one carousel root element.
///
/// Node handles are cheap to clone and compare by identity. Methods are
/// infallible; a host that talks to a fallible backend logs and skips.
pub trait CarouselHost: StyleSink {
    type Node: Clone + std::fmt::Debug;

    /// Whether the root is an element that can be rendered and enhanced.
    fn is_renderable(&self) -> bool;

    /// Number of child nodes directly under the root.
    fn root_child_count(&self) -> usize;

    /// Move every root child, in order, into a new source group inside a new
    /// track element appended to the root. Returns the source group, or
    /// `None` if the wrapper elements could not be created.
    fn wrap_children(&mut self) -> Option<Self::Node>;

    /// Move the source group's children back under the root, in order, and
    /// remove the track element.
    fn unwrap_children(&mut self, source: &Self::Node);

    /// Number of child nodes of `node`.
    fn child_count(&self, node: &Self::Node) -> usize;

    /// Rendered width of `node` in pixels.
    fn measure_width(&self, node: &Self::Node) -> f64;

    /// Rendered width of the root element in pixels.
    fn measure_container(&self) -> f64;

    /// Current per-instance overrides, read fresh on every call.
    fn read_overrides(&self) -> OptionLayer;

    /// Deep-clone `source`, mark the copy hidden from assistive technology
    /// and append it to the track. Returns the copy, or `None` on failure.
    fn append_clone(&mut self, source: &Self::Node) -> Option<Self::Node>;

    /// Detach `node` from the tree.
    fn remove_node(&mut self, node: &Self::Node);

    /// Focusable descendants of `group` (links, buttons, form controls and
    /// anything carrying a tab index).
    fn focusable_descendants(&self, group: &Self::Node) -> Vec<Self::Node>;

    fn tab_index(&self, node: &Self::Node) -> Option<String>;

    /// Set or, with `None`, remove the tab index attribute.
    fn set_tab_index(&mut self, node: &Self::Node, value: Option<&str>);

    /// Whether the OS reduced-motion preference is currently active.
    fn prefers_reduced_motion(&self) -> bool;

    /// Start delivering events for `source` and the root. Hosts feature-detect
    /// the observer primitives they have and report what they used.
    fn subscribe(&mut self, source: &Self::Node) -> Subscriptions;

    /// Detach everything registered by [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self);
}
