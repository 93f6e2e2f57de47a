//! Disposable clone groups.

use crate::host::{CarouselHost, SUPPRESSED_TAB_INDEX};

/// One duplicate of the source group.
///
/// Owns the saved tab indices of its focusable descendants so disposal can
/// put every attribute back exactly as it was before suppression.
#[derive(Clone, Debug)]
pub struct CloneGroup<N> {
    node: N,
    saved_tab_indices: Vec<(N, Option<String>)>,
}

impl<N: Clone + std::fmt::Debug> CloneGroup<N> {
    /// Append a new clone of `source` and take its focusables out of the
    /// tab order. Returns `None` if the host could not clone.
    pub fn create<H>(host: &mut H, source: &N) -> Option<Self>
    where
        H: CarouselHost<Node = N> + ?Sized,
    {
        let node = host.append_clone(source)?;
        let saved_tab_indices = host
            .focusable_descendants(&node)
            .into_iter()
            .map(|focusable| {
                let prior = host.tab_index(&focusable);
                host.set_tab_index(&focusable, Some(SUPPRESSED_TAB_INDEX));
                (focusable, prior)
            })
            .collect();

        Some(Self {
            node,
            saved_tab_indices,
        })
    }

    /// Restore suppressed tab indices and detach the clone.
    pub fn dispose<H>(self, host: &mut H)
    where
        H: CarouselHost<Node = N> + ?Sized,
    {
        for (focusable, prior) in self.saved_tab_indices.iter().rev() {
            host.set_tab_index(focusable, prior.as_deref());
        }
        host.remove_node(&self.node);
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    /// Number of focusables whose tab index was suppressed.
    pub fn suppressed_count(&self) -> usize {
        self.saved_tab_indices.len()
    }
}
