//! Browser DOM backend built on `web-sys`.
//!
//! [`mount`] enhances one element, [`init_all`] every element matching a
//! selector, and [`destroy`] tears an instance down again. DOM calls that
//! fail are logged and skipped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Reflect};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, FocusEvent, HtmlElement, MediaQueryList, MutationObserver,
    MutationObserverInit, Node, ResizeObserver, Window,
};

use crate::host::{CarouselHost, PreferenceStrategy, ResizeStrategy, Subscriptions};
use crate::registry::{CarouselRegistry, Shared};
use crate::scheduler::FrameScheduler;
use crate::style::{StyleSink, CLASS_GROUP, CLASS_TRACK};
use crate::{Carousel, CarouselError, CarouselEvent, OptionLayer, Result};

/// Selector used by [`init_all`] when none is given.
pub const DEFAULT_SELECTOR: &str = ".h-carousel.auto";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

const FOCUSABLE_SELECTOR: &str = "a, button, input, select, textarea, [tabindex]";

pub type WebCarousel = Carousel<WebHost, AnimationFrameScheduler>;

/// Registry of mounted carousels keyed by their root element.
pub type WebRegistry = CarouselRegistry<Element, WebCarousel>;

/// Late-bound route from DOM callbacks to the instance that owns them.
type Dispatch = Rc<RefCell<Option<Weak<RefCell<WebCarousel>>>>>;

fn dispatch_event(dispatch: &Dispatch, event: CarouselEvent) {
    let target = dispatch.borrow().as_ref().and_then(Weak::upgrade);
    let Some(carousel) = target else {
        return;
    };
    match carousel.try_borrow_mut() {
        Ok(mut carousel) => carousel.handle(event),
        Err(_) => warn!(?event, "carousel is busy, dropping event"),
    };
}

fn forward(dispatch: &Dispatch, event: CarouselEvent) -> Closure<dyn FnMut(Event)> {
    let dispatch = Rc::clone(dispatch);
    Closure::wrap(Box::new(move |_: Event| dispatch_event(&dispatch, event)) as Box<dyn FnMut(Event)>)
}

fn has_property(target: &JsValue, name: &str) -> bool {
    Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// An event listener that remembers how to remove itself.
#[derive(Debug)]
struct EventBinding {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventBinding {
    fn attach(
        target: EventTarget,
        kind: &'static str,
        capture: bool,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Option<Self> {
        let function: &Function = callback.as_ref().unchecked_ref();
        match target.add_event_listener_with_callback_and_bool(kind, function, capture) {
            Ok(()) => Some(Self {
                target,
                kind,
                capture,
                callback,
            }),
            Err(err) => {
                warn!(kind, ?err, "failed to add carousel listener");
                None
            }
        }
    }

    fn detach(self) {
        let function: &Function = self.callback.as_ref().unchecked_ref();
        if let Err(err) =
            self.target
                .remove_event_listener_with_callback_and_bool(self.kind, function, self.capture)
        {
            warn!(kind = self.kind, ?err, "failed to remove carousel listener");
        }
    }
}

#[derive(Debug, Default)]
struct Listeners {
    events: Vec<EventBinding>,
    resize_observer: Option<(ResizeObserver, Closure<dyn FnMut()>)>,
    mutation_observer: Option<(MutationObserver, Closure<dyn FnMut()>)>,
    legacy_media: Option<(MediaQueryList, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    fn bind(
        &mut self,
        target: impl Into<EventTarget>,
        kind: &'static str,
        capture: bool,
        callback: Closure<dyn FnMut(Event)>,
    ) -> bool {
        match EventBinding::attach(target.into(), kind, capture, callback) {
            Some(binding) => {
                self.events.push(binding);
                true
            }
            None => false,
        }
    }

    fn release(self) {
        for binding in self.events {
            binding.detach();
        }
        if let Some((observer, _callback)) = self.resize_observer {
            observer.disconnect();
        }
        if let Some((observer, _callback)) = self.mutation_observer {
            observer.disconnect();
        }
        if let Some((query, callback)) = self.legacy_media {
            let function: &Function = callback.as_ref().unchecked_ref();
            if let Err(err) = query.remove_listener_with_opt_callback(Some(function)) {
                warn!(?err, "failed to remove reduced-motion listener");
            }
        }
    }
}

/// [`CarouselHost`] over a live `HtmlElement`.
#[derive(Debug)]
pub struct WebHost {
    element: HtmlElement,
    window: Option<Window>,
    track: Option<Element>,
    reduced_motion: Option<MediaQueryList>,
    listeners: Option<Listeners>,
    dispatch: Dispatch,
}

impl WebHost {
    fn new(element: HtmlElement, dispatch: Dispatch) -> Self {
        let window = web_sys::window();
        let reduced_motion = window
            .as_ref()
            .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten());
        Self {
            element,
            window,
            track: None,
            reduced_motion,
            listeners: None,
            dispatch,
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn create_div(&self, class: &str) -> Option<Element> {
        let document = self.element.owner_document()?;
        match document.create_element("div") {
            Ok(div) => {
                div.set_class_name(class);
                Some(div)
            }
            Err(err) => {
                warn!(?err, "failed to create carousel element");
                None
            }
        }
    }

    fn append(parent: &Node, child: &Node) {
        if let Err(err) = parent.append_child(child) {
            warn!(?err, "failed to move carousel node");
        }
    }

    fn bind_resize(&self, listeners: &mut Listeners) -> ResizeStrategy {
        let observer_available = self
            .window
            .as_ref()
            .map(|w| has_property(w, "ResizeObserver"))
            .unwrap_or(false);

        if observer_available {
            let dispatch = Rc::clone(&self.dispatch);
            let callback = Closure::wrap(Box::new(move || {
                dispatch_event(&dispatch, CarouselEvent::ContainerResized)
            }) as Box<dyn FnMut()>);
            match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
                Ok(observer) => {
                    observer.observe(&self.element);
                    listeners.resize_observer = Some((observer, callback));
                    return ResizeStrategy::Observer;
                }
                Err(err) => warn!(?err, "ResizeObserver construction failed"),
            }
        }

        if let Some(window) = &self.window {
            listeners.bind(
                window.clone(),
                "resize",
                false,
                forward(&self.dispatch, CarouselEvent::ContainerResized),
            );
        }
        ResizeStrategy::WindowResize
    }

    fn bind_mutations(&self, listeners: &mut Listeners, source: &Element) {
        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::wrap(Box::new(move || {
            dispatch_event(&dispatch, CarouselEvent::ContentMutated)
        }) as Box<dyn FnMut()>);

        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(?err, "MutationObserver construction failed");
                return;
            }
        };

        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        init.set_attributes(true);
        init.set_character_data(true);
        match observer.observe_with_options(source, &init) {
            Ok(()) => listeners.mutation_observer = Some((observer, callback)),
            Err(err) => warn!(?err, "failed to observe carousel content"),
        }
    }

    fn bind_reduced_motion(&self, listeners: &mut Listeners) -> PreferenceStrategy {
        let Some(query) = self.reduced_motion.clone() else {
            return PreferenceStrategy::Unavailable;
        };
        let callback = forward(&self.dispatch, CarouselEvent::ReducedMotionChanged);

        if has_property(&query, "addEventListener") {
            if listeners.bind(query, "change", false, callback) {
                return PreferenceStrategy::ChangeEvent;
            }
            return PreferenceStrategy::Unavailable;
        }

        let function: &Function = callback.as_ref().unchecked_ref();
        match query.add_listener_with_opt_callback(Some(function)) {
            Ok(()) => {
                listeners.legacy_media = Some((query, callback));
                PreferenceStrategy::LegacyListener
            }
            Err(err) => {
                warn!(?err, "failed to add reduced-motion listener");
                PreferenceStrategy::Unavailable
            }
        }
    }
}

impl StyleSink for WebHost {
    fn set_style_var(&mut self, name: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(name, value) {
            warn!(name, ?err, "failed to set carousel style");
        }
    }

    fn remove_style_var(&mut self, name: &str) {
        if let Err(err) = self.element.style().remove_property(name) {
            warn!(name, ?err, "failed to remove carousel style");
        }
    }

    fn set_marker(&mut self, class: &str, on: bool) {
        if let Err(err) = self.element.class_list().toggle_with_force(class, on) {
            warn!(class, ?err, "failed to toggle carousel class");
        }
    }
}

impl CarouselHost for WebHost {
    type Node = Element;

    fn is_renderable(&self) -> bool {
        self.element.owner_document().is_some()
    }

    fn root_child_count(&self) -> usize {
        self.element.children().length() as usize
    }

    fn wrap_children(&mut self) -> Option<Element> {
        let track = self.create_div(CLASS_TRACK)?;
        let source = self.create_div(CLASS_GROUP)?;

        while let Some(child) = self.element.first_child() {
            Self::append(&source, &child);
        }
        Self::append(&track, &source);
        Self::append(&self.element, &track);

        self.track = Some(track);
        Some(source)
    }

    fn unwrap_children(&mut self, source: &Element) {
        while let Some(child) = source.first_child() {
            Self::append(&self.element, &child);
        }
        if let Some(track) = self.track.take() {
            track.remove();
        }
    }

    fn child_count(&self, node: &Element) -> usize {
        node.children().length() as usize
    }

    fn measure_width(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().width()
    }

    fn measure_container(&self) -> f64 {
        self.element.get_bounding_client_rect().width()
    }

    fn read_overrides(&self) -> OptionLayer {
        let dataset = self.element.dataset();
        OptionLayer::from_lookup(|key| dataset.get(key))
    }

    fn append_clone(&mut self, source: &Element) -> Option<Element> {
        let track = self.track.as_ref()?;
        let copy = match source.clone_node_with_deep(true) {
            Ok(node) => node.dyn_into::<Element>().ok()?,
            Err(err) => {
                warn!(?err, "failed to clone carousel group");
                return None;
            }
        };
        if let Err(err) = copy.set_attribute("aria-hidden", "true") {
            warn!(?err, "failed to hide carousel clone");
        }
        Self::append(track, &copy);
        Some(copy)
    }

    fn remove_node(&mut self, node: &Element) {
        node.remove();
    }

    fn focusable_descendants(&self, group: &Element) -> Vec<Element> {
        let Ok(list) = group.query_selector_all(FOCUSABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn tab_index(&self, node: &Element) -> Option<String> {
        node.get_attribute("tabindex")
    }

    fn set_tab_index(&mut self, node: &Element, value: Option<&str>) {
        let result = match value {
            Some(value) => node.set_attribute("tabindex", value),
            None => node.remove_attribute("tabindex"),
        };
        if let Err(err) = result {
            warn!(?err, "failed to update tabindex");
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
            .as_ref()
            .map(MediaQueryList::matches)
            .unwrap_or(false)
    }

    fn subscribe(&mut self, source: &Element) -> Subscriptions {
        self.unsubscribe();
        let mut listeners = Listeners::default();

        listeners.bind(
            self.element.clone(),
            "mouseenter",
            false,
            forward(&self.dispatch, CarouselEvent::PointerEnter),
        );
        listeners.bind(
            self.element.clone(),
            "mouseleave",
            false,
            forward(&self.dispatch, CarouselEvent::PointerLeave),
        );
        listeners.bind(
            self.element.clone(),
            "focusin",
            false,
            forward(&self.dispatch, CarouselEvent::FocusIn),
        );

        let root = self.element.clone();
        let dispatch = Rc::clone(&self.dispatch);
        let on_focus_out = Closure::wrap(Box::new(move |event: Event| {
            let focus_stays_inside = event
                .dyn_ref::<FocusEvent>()
                .and_then(FocusEvent::related_target)
                .and_then(|target| target.dyn_into::<Node>().ok())
                .map(|node| root.contains(Some(&node)))
                .unwrap_or(false);
            dispatch_event(&dispatch, CarouselEvent::FocusOut { focus_stays_inside });
        }) as Box<dyn FnMut(Event)>);
        listeners.bind(self.element.clone(), "focusout", false, on_focus_out);

        let resize = self.bind_resize(&mut listeners);
        self.bind_mutations(&mut listeners, source);

        let dispatch = Rc::clone(&self.dispatch);
        let on_source_load = Closure::wrap(Box::new(move |event: Event| {
            let image = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .map(|element| element.tag_name().eq_ignore_ascii_case("img"))
                .unwrap_or(false);
            dispatch_event(&dispatch, CarouselEvent::SourceLoaded { image });
        }) as Box<dyn FnMut(Event)>);
        listeners.bind(source.clone(), "load", true, on_source_load);

        if let Some(window) = &self.window {
            listeners.bind(
                window.clone(),
                "orientationchange",
                false,
                forward(&self.dispatch, CarouselEvent::OrientationChanged),
            );
            listeners.bind(
                window.clone(),
                "load",
                false,
                forward(&self.dispatch, CarouselEvent::WindowLoaded),
            );
        }

        let reduced_motion = self.bind_reduced_motion(&mut listeners);
        self.listeners = Some(listeners);

        Subscriptions {
            resize,
            reduced_motion,
        }
    }

    fn unsubscribe(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            listeners.release();
        }
    }
}

/// `requestAnimationFrame`-backed scheduler that reports back through the
/// instance's dispatch route.
///
/// The callback of the outstanding frame is owned here so a cancelled frame
/// releases it. A new frame is only requested after the previous callback
/// returned or was cancelled, so replacing it never drops a running closure.
#[derive(Debug)]
pub struct AnimationFrameScheduler {
    window: Option<Window>,
    dispatch: Dispatch,
    frame: Option<(i32, Closure<dyn FnMut()>)>,
}

impl AnimationFrameScheduler {
    fn new(dispatch: Dispatch) -> Self {
        Self {
            window: web_sys::window(),
            dispatch,
            frame: None,
        }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let window = self.window.as_ref()?;
        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::wrap(Box::new(move || {
            dispatch_event(&dispatch, CarouselEvent::AnimationFrame)
        }) as Box<dyn FnMut()>);
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.frame = Some((handle, callback));
                Some(handle)
            }
            Err(err) => {
                warn!(?err, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = &self.window {
            if let Err(err) = window.cancel_animation_frame(handle) {
                warn!(?err, "cancelAnimationFrame failed");
            }
        }
        if matches!(self.frame, Some((pending, _)) if pending == handle) {
            self.frame = None;
        }
    }
}

/// Enhance a single element.
///
/// Fails if `element` is not an HTML element (an SVG node, for instance).
pub fn mount(element: &Element, options: &OptionLayer) -> Result<Shared<WebCarousel>> {
    let html = element.clone().dyn_into::<HtmlElement>().map_err(|el| {
        CarouselError::invalid_element(format!("<{}>", el.tag_name().to_lowercase()))
    })?;

    let dispatch: Dispatch = Rc::new(RefCell::new(None));
    let host = WebHost::new(html, Rc::clone(&dispatch));
    let scheduler = AnimationFrameScheduler::new(Rc::clone(&dispatch));
    let carousel = Rc::new(RefCell::new(Carousel::new(host, scheduler, options)?));
    *dispatch.borrow_mut() = Some(Rc::downgrade(&carousel));
    Ok(carousel)
}

/// Enhance every element matching `selector` (default
/// [`DEFAULT_SELECTOR`]). Elements already in `registry` return their
/// existing instance.
pub fn init_all(
    registry: &mut WebRegistry,
    selector: Option<&str>,
    options: &OptionLayer,
) -> Result<Vec<Shared<WebCarousel>>> {
    let selector = selector.unwrap_or(DEFAULT_SELECTOR);
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(CarouselError::NoDocument)?;
    let list = document
        .query_selector_all(selector)
        .map_err(|_| CarouselError::InvalidSelector(selector.to_string()))?;

    let elements = (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok());
    registry.init_all(elements, |element| mount(element, options))
}

/// Tear down and unregister the carousel on `element`.
pub fn destroy(registry: &mut WebRegistry, element: &Element) -> bool {
    registry.destroy(element)
}
