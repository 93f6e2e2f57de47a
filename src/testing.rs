//! In-memory element tree used by the unit tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::host::{CarouselHost, PreferenceStrategy, ResizeStrategy, Subscriptions};
use crate::style::{StyleSink, CLASS_GROUP, CLASS_TRACK};
use crate::OptionLayer;

pub type NodeId = usize;

#[derive(Clone, Debug, Default)]
pub struct MockNode {
    pub label: String,
    pub class: Option<&'static str>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Own width; a node measures as this plus its children
    pub width: f64,
    pub focusable: bool,
    pub tab_index: Option<String>,
    pub aria_hidden: bool,
}

#[derive(Debug)]
pub struct MockHost {
    nodes: Vec<MockNode>,
    root: NodeId,
    track: Option<NodeId>,
    pub renderable: bool,
    pub container_width: f64,
    pub overrides: OptionLayer,
    pub reduced_motion: bool,
    pub has_resize_observer: bool,
    /// Reduced-motion notification path reported by `subscribe`
    pub preference: PreferenceStrategy,
    pub subscribed: bool,
    pub vars: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

impl MockHost {
    pub fn new(container_width: f64) -> Self {
        Self {
            nodes: vec![MockNode {
                label: "root".to_string(),
                ..Default::default()
            }],
            root: 0,
            track: None,
            renderable: true,
            container_width,
            overrides: OptionLayer::new(),
            reduced_motion: false,
            has_resize_observer: true,
            preference: PreferenceStrategy::ChangeEvent,
            subscribed: false,
            vars: BTreeMap::new(),
            classes: BTreeSet::new(),
        }
    }

    fn push(&mut self, node: MockNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child].parent.take() {
            self.nodes[parent].children.retain(|c| *c != child);
        }
    }

    /// Append a leaf item of the given width under `parent`.
    pub fn add_child(&mut self, parent: NodeId, label: &str, width: f64) -> NodeId {
        let id = self.push(MockNode {
            label: label.to_string(),
            width,
            ..Default::default()
        });
        self.attach(parent, id);
        id
    }

    /// Append an item directly under the root.
    pub fn add_item(&mut self, label: &str, width: f64) -> NodeId {
        let root = self.root;
        self.add_child(root, label, width)
    }

    pub fn add_focusable(&mut self, parent: NodeId, label: &str, tab_index: Option<&str>) -> NodeId {
        let id = self.add_child(parent, label, 0.0);
        self.nodes[id].focusable = true;
        self.nodes[id].tab_index = tab_index.map(str::to_string);
        id
    }

    pub fn node(&self, id: NodeId) -> &MockNode {
        &self.nodes[id]
    }

    pub fn root_children(&self) -> Vec<NodeId> {
        self.nodes[self.root].children.clone()
    }

    pub fn track(&self) -> Option<NodeId> {
        self.track
    }

    /// Groups on the track after the source group.
    pub fn clone_groups(&self) -> Vec<NodeId> {
        self.track
            .map(|t| self.nodes[t].children.iter().skip(1).copied().collect())
            .unwrap_or_default()
    }

    /// Every descendant of `id`, depth first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let mut copy = self.nodes[id].clone();
        copy.parent = None;
        copy.children = Vec::new();
        let copy_id = self.push(copy);
        for child in self.nodes[id].children.clone() {
            let child_copy = self.deep_clone(child);
            self.attach(copy_id, child_copy);
        }
        copy_id
    }

    fn width_of(&self, id: NodeId) -> f64 {
        let node = &self.nodes[id];
        node.width + node.children.iter().map(|c| self.width_of(*c)).sum::<f64>()
    }
}

impl StyleSink for MockHost {
    fn set_style_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn remove_style_var(&mut self, name: &str) {
        self.vars.remove(name);
    }

    fn set_marker(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

impl CarouselHost for MockHost {
    type Node = NodeId;

    fn is_renderable(&self) -> bool {
        self.renderable
    }

    fn root_child_count(&self) -> usize {
        self.nodes[self.root].children.len()
    }

    fn wrap_children(&mut self) -> Option<NodeId> {
        let track = self.push(MockNode {
            label: "track".to_string(),
            class: Some(CLASS_TRACK),
            ..Default::default()
        });
        let source = self.push(MockNode {
            label: "group".to_string(),
            class: Some(CLASS_GROUP),
            ..Default::default()
        });
        for child in self.root_children() {
            self.attach(source, child);
        }
        self.attach(track, source);
        let root = self.root;
        self.attach(root, track);
        self.track = Some(track);
        Some(source)
    }

    fn unwrap_children(&mut self, source: &NodeId) {
        let root = self.root;
        for child in self.nodes[*source].children.clone() {
            self.attach(root, child);
        }
        if let Some(track) = self.track.take() {
            self.detach(track);
        }
    }

    fn child_count(&self, node: &NodeId) -> usize {
        self.nodes[*node].children.len()
    }

    fn measure_width(&self, node: &NodeId) -> f64 {
        self.width_of(*node)
    }

    fn measure_container(&self) -> f64 {
        self.container_width
    }

    fn read_overrides(&self) -> OptionLayer {
        self.overrides.clone()
    }

    fn append_clone(&mut self, source: &NodeId) -> Option<NodeId> {
        let copy = self.deep_clone(*source);
        self.nodes[copy].aria_hidden = true;
        if let Some(track) = self.track {
            self.attach(track, copy);
        }
        Some(copy)
    }

    fn remove_node(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn focusable_descendants(&self, group: &NodeId) -> Vec<NodeId> {
        self.descendants(*group)
            .into_iter()
            .filter(|id| self.nodes[*id].focusable || self.nodes[*id].tab_index.is_some())
            .collect()
    }

    fn tab_index(&self, node: &NodeId) -> Option<String> {
        self.nodes[*node].tab_index.clone()
    }

    fn set_tab_index(&mut self, node: &NodeId, value: Option<&str>) {
        self.nodes[*node].tab_index = value.map(str::to_string);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn subscribe(&mut self, _source: &NodeId) -> Subscriptions {
        self.subscribed = true;
        Subscriptions {
            resize: if self.has_resize_observer {
                ResizeStrategy::Observer
            } else {
                ResizeStrategy::WindowResize
            },
            reduced_motion: self.preference,
        }
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}
