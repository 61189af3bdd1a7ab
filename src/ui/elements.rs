use crate::traits::ScrollIntoView;
use fxhash::FxHashMap;

/// Page elements (vineyard cards) keyed by vineyard name.
///
/// The parent registers a handle per card and passes the registry down, so
/// markers look elements up by key instead of by generated class names.
#[derive(Debug, Clone)]
pub struct ElementRegistry<H> {
    handles: FxHashMap<String, H>,
}

impl<H> ElementRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: FxHashMap::default(),
        }
    }

    /// Registers `handle` under `key`, returning the handle it replaced
    pub fn register(&mut self, key: impl Into<String>, handle: H) -> Option<H> {
        self.handles.insert(key.into(), handle)
    }

    pub fn unregister(&mut self, key: &str) -> Option<H> {
        self.handles.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&H> {
        self.handles.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut H> {
        self.handles.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H: ScrollIntoView> ElementRegistry<H> {
    /// Scrolls the element for `key` into view. A missing element is a no-op.
    pub fn scroll_to(&mut self, key: &str) -> bool {
        match self.handles.get_mut(key) {
            Some(handle) => {
                handle.scroll_into_view();
                true
            }
            None => {
                log::warn!("no element registered for {:?}, skipping scroll", key);
                false
            }
        }
    }
}

impl<H> Default for ElementRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
