//! A single carousel instance: structure, event handling and refresh passes.

use tracing::{debug, trace, warn};

use crate::clones::CloneGroup;
use crate::host::{CarouselHost, Subscriptions};
use crate::scheduler::{FrameScheduler, RefreshCoordinator, ScheduleOutcome};
use crate::style::{self, CLASS_ENHANCED};
use crate::{
    compute_layout, evaluate, resolve, CarouselError, CarouselOptions, LayoutOutcome, OptionLayer,
    PlayInputs, PlayState, Result,
};

/// Something happened that the carousel may need to react to.
///
/// Hosts translate their native notifications into these and pass them to
/// [`Carousel::handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Nodes, attributes or text inside the source group changed
    ContentMutated,
    /// The root element (or, as a fallback, the window) was resized
    ContainerResized,
    OrientationChanged,
    WindowLoaded,
    /// Something inside the source group finished loading
    SourceLoaded {
        /// Only image loads affect layout
        image: bool,
    },
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut {
        /// Focus is moving to another node inside the root
        focus_stays_inside: bool,
    },
    /// The OS reduced-motion preference flipped
    ReducedMotionChanged,
    /// A frame requested through the scheduler fired
    AnimationFrame,
}

/// An infinitely scrolling strip bound to one root element.
///
/// Construction wraps the root's children in a track, subscribes to the
/// host's events and runs the first layout pass. From then on the host
/// feeds [`CarouselEvent`]s into [`handle`](Self::handle) until
/// [`destroy`](Self::destroy) puts the element back the way it was.
///
/// ## Example
///
/// ```rust,ignore
/// use strip_marquee::{Carousel, CarouselEvent, ManualFrameScheduler, OptionLayer};
///
/// let mut carousel = Carousel::new(host, ManualFrameScheduler::new(), &OptionLayer::new())?;
/// carousel.handle(CarouselEvent::ContainerResized);
/// carousel.handle(CarouselEvent::ContainerResized); // coalesced
///
/// if carousel.scheduler_mut().advance() > 0 {
///     carousel.handle(CarouselEvent::AnimationFrame);
/// }
/// carousel.destroy();
/// ```
#[derive(Debug)]
pub struct Carousel<H: CarouselHost, S: FrameScheduler> {
    host: H,
    coordinator: RefreshCoordinator<S>,
    /// Defaults merged with the caller's layer; live overrides go on top
    base: CarouselOptions,
    options: CarouselOptions,
    source: Option<H::Node>,
    clones: Vec<CloneGroup<H::Node>>,
    layout: Option<LayoutOutcome>,
    play_state: PlayState,
    hovered: bool,
    /// Listener paths the host bound, while subscribed
    subscriptions: Option<Subscriptions>,
    destroyed: bool,
}

impl<H: CarouselHost, S: FrameScheduler> Carousel<H, S> {
    /// Enhance the host's root element.
    ///
    /// Fails only when the root is not renderable. A root without children
    /// is accepted but stays inert: nothing is wrapped or subscribed.
    pub fn new(host: H, scheduler: S, caller: &OptionLayer) -> Result<Self> {
        Self::with_defaults(host, scheduler, &CarouselOptions::default(), caller)
    }

    /// Like [`new`](Self::new) with custom library defaults.
    pub fn with_defaults(
        host: H,
        scheduler: S,
        defaults: &CarouselOptions,
        caller: &OptionLayer,
    ) -> Result<Self> {
        if !host.is_renderable() {
            return Err(CarouselError::invalid_element("host root is not renderable"));
        }

        let base = resolve(defaults, caller, &OptionLayer::new());
        let options = base.merge(&host.read_overrides());

        let mut carousel = Self {
            host,
            coordinator: RefreshCoordinator::new(scheduler),
            base,
            options,
            source: None,
            clones: Vec::new(),
            layout: None,
            play_state: PlayState::Paused,
            hovered: false,
            subscriptions: None,
            destroyed: false,
        };

        carousel.setup_structure();
        carousel.subscribe();
        carousel.refresh();
        Ok(carousel)
    }

    fn setup_structure(&mut self) {
        if self.host.root_child_count() == 0 {
            debug!("carousel root has no children, leaving it untouched");
            return;
        }
        let Some(source) = self.host.wrap_children() else {
            warn!("carousel could not wrap its children, leaving it untouched");
            return;
        };
        self.host.set_marker(CLASS_ENHANCED, true);
        self.source = Some(source);
    }

    fn subscribe(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let subscriptions = self.host.subscribe(&source);
        self.subscriptions = Some(subscriptions);
        debug!(
            resize = ?subscriptions.resize,
            reduced_motion = ?subscriptions.reduced_motion,
            "carousel subscribed"
        );
    }

    /// React to one event. Events after [`destroy`](Self::destroy) are ignored.
    pub fn handle(&mut self, event: CarouselEvent) {
        if self.destroyed {
            return;
        }

        match event {
            CarouselEvent::ContentMutated
            | CarouselEvent::ContainerResized
            | CarouselEvent::OrientationChanged
            | CarouselEvent::WindowLoaded
            | CarouselEvent::SourceLoaded { image: true } => self.schedule_refresh(),
            CarouselEvent::SourceLoaded { image: false } => {}
            CarouselEvent::PointerEnter | CarouselEvent::FocusIn => self.set_hovered(true),
            CarouselEvent::PointerLeave | CarouselEvent::FocusOut { focus_stays_inside: false } => {
                self.set_hovered(false)
            }
            CarouselEvent::FocusOut { focus_stays_inside: true } => {}
            CarouselEvent::ReducedMotionChanged => self.update_play_state(),
            CarouselEvent::AnimationFrame => {
                if self.coordinator.frame_fired() {
                    self.refresh();
                }
            }
        }
    }

    /// Request a layout pass on the next frame. Idempotent while one is
    /// pending.
    pub fn schedule_refresh(&mut self) {
        if self.destroyed || self.source.is_none() {
            return;
        }
        match self.coordinator.schedule() {
            ScheduleOutcome::Scheduled => trace!("carousel refresh scheduled"),
            ScheduleOutcome::Coalesced => trace!("carousel refresh already pending"),
            ScheduleOutcome::RunNow => self.refresh(),
        }
    }

    /// Run a layout pass now.
    ///
    /// Re-reads the live overrides, discards every clone group, measures,
    /// builds fresh clones and writes the style state.
    pub fn refresh(&mut self) {
        if self.destroyed {
            return;
        }
        let Some(source) = self.source.clone() else {
            return;
        };

        self.options = self.base.merge(&self.host.read_overrides());
        self.clear_clones();
        style::write_spacing(&mut self.host, self.options.gap, self.options.direction);

        let source_width = self.host.measure_width(&source);
        let container_width = self.host.measure_container();
        let has_content = self.host.child_count(&source) > 0;
        let outcome = compute_layout(source_width, container_width, has_content, &self.options);
        self.layout = Some(outcome);

        match outcome {
            LayoutOutcome::Paused => {
                debug!(source_width, container_width, "carousel paused, nothing to measure");
                self.play_state = PlayState::Paused;
                style::write_play_state(&mut self.host, PlayState::Paused);
            }
            LayoutOutcome::Active(result) => {
                for _ in 0..result.clone_count {
                    match CloneGroup::create(&mut self.host, &source) {
                        Some(group) => self.clones.push(group),
                        None => warn!("carousel could not clone its source group"),
                    }
                }
                style::write_layout(&mut self.host, &result);
                debug!(
                    clones = result.clone_count,
                    cycle_width = result.cycle_width,
                    duration = result.duration_secs,
                    "carousel refreshed"
                );
                self.update_play_state();
            }
        }
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        self.update_play_state();
    }

    /// Recompute and write the play state from the current inputs.
    fn update_play_state(&mut self) {
        if self.source.is_none() {
            return;
        }

        let next = match self.layout {
            Some(LayoutOutcome::Active(_)) => evaluate(&PlayInputs::new(
                &self.options,
                self.hovered,
                self.host.prefers_reduced_motion(),
            )),
            _ => PlayState::Paused,
        };

        if next != self.play_state {
            trace!(from = ?self.play_state, to = ?next, "carousel play state changed");
        }
        self.play_state = next;
        style::write_play_state(&mut self.host, next);
    }

    fn clear_clones(&mut self) {
        for group in self.clones.drain(..) {
            group.dispose(&mut self.host);
        }
    }

    /// Tear down: cancel the pending frame, unsubscribe, drop every clone,
    /// return the children to the root and remove all style state.
    ///
    /// Calling it twice is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.coordinator.cancel();
        if self.subscriptions.take().is_some() {
            self.host.unsubscribe();
        }
        self.clear_clones();
        if let Some(source) = self.source.take() {
            self.host.unwrap_children(&source);
        }
        style::clear(&mut self.host);

        self.layout = None;
        self.play_state = PlayState::Paused;
        self.hovered = false;
        self.destroyed = true;
        debug!("carousel destroyed");
    }

    /// Options resolved by the most recent pass.
    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    /// Outcome of the most recent pass, if one ran.
    pub fn layout(&self) -> Option<&LayoutOutcome> {
        self.layout.as_ref()
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Number of live clone groups.
    pub fn clone_count(&self) -> usize {
        self.clones.len()
    }

    /// Whether the root was wrapped and is being managed.
    pub fn is_enhanced(&self) -> bool {
        self.source.is_some()
    }

    /// How the host delivers resize and reduced-motion notifications, or
    /// `None` when nothing is subscribed.
    pub fn subscriptions(&self) -> Option<Subscriptions> {
        self.subscriptions
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.coordinator.is_pending()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to change overrides between passes.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.coordinator.scheduler_mut()
    }
}
