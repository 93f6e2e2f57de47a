//! Instance registry keyed by element identity.
//!
//! Batch initialization must not enhance the same element twice. Rather than
//! stashing the instance on the element, callers own a registry and pass it
//! to whatever initializes carousels.

use std::cell::RefCell;
use std::rc::Rc;

use crate::host::CarouselHost;
use crate::scheduler::FrameScheduler;
use crate::{Carousel, Result};

/// Shared handle to a registered instance.
pub type Shared<C> = Rc<RefCell<C>>;

/// Instances keyed by an identity-comparable element handle.
///
/// Lookups are linear; pages hold a handful of carousels, and element
/// handles such as `web_sys::Element` compare by identity but do not hash.
#[derive(Debug)]
pub struct CarouselRegistry<K, C> {
    entries: Vec<(K, Shared<C>)>,
}

impl<K, C> Default for CarouselRegistry<K, C> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, C> CarouselRegistry<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &K) -> Option<Shared<C>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| Rc::clone(c))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Return the instance registered for `key`, creating it with `create`
    /// if there is none.
    pub fn get_or_try_insert_with<F>(&mut self, key: K, create: F) -> Result<Shared<C>>
    where
        F: FnOnce(&K) -> Result<Shared<C>>,
    {
        if let Some(existing) = self.get(&key) {
            return Ok(existing);
        }
        let instance = create(&key)?;
        self.entries.push((key, Rc::clone(&instance)));
        Ok(instance)
    }

    /// Ensure every key has an instance, in order.
    ///
    /// Keys already registered return their existing instance. The first
    /// construction error aborts the batch; instances created before it stay
    /// registered.
    pub fn init_all<I, F>(&mut self, keys: I, mut create: F) -> Result<Vec<Shared<C>>>
    where
        I: IntoIterator<Item = K>,
        F: FnMut(&K) -> Result<Shared<C>>,
    {
        keys.into_iter()
            .map(|key| self.get_or_try_insert_with(key, &mut create))
            .collect()
    }

    /// Unregister `key` without tearing the instance down.
    pub fn remove(&mut self, key: &K) -> Option<Shared<C>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }
}

impl<K, H, S> CarouselRegistry<K, Carousel<H, S>>
where
    K: PartialEq,
    H: CarouselHost,
    S: FrameScheduler,
{
    /// Unregister and tear down the instance for `key`. Returns whether one
    /// was registered.
    pub fn destroy(&mut self, key: &K) -> bool {
        match self.remove(key) {
            Some(instance) => {
                instance.borrow_mut().destroy();
                true
            }
            None => false,
        }
    }
}
