use crate::{
    core::geo::{LatLng, Point},
    data::vineyard::Vineyard,
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// What an info popup shows for a vineyard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContent {
    pub image: String,
    pub region: String,
    /// Slug of the vineyard card this popup links to
    pub link: String,
    pub description: String,
}

impl PopupContent {
    pub fn for_vineyard(vineyard: &Vineyard) -> Self {
        Self {
            image: vineyard.image.clone(),
            region: vineyard.name.clone(),
            link: vineyard.slug(),
            description: vineyard.location.clone(),
        }
    }
}

/// A popup attached to a list-variant marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupNode {
    pub position: LatLng,
    pub offset: Point,
    pub content: PopupContent,
    /// Clicking the map outside the popup closes it
    pub close_on_click: bool,
    /// Whether the provider may reposition the popup to keep it on screen
    pub dynamic_position: bool,
}

/// Open/close notifications recorded by [`PopupOwner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent<K> {
    Opened(K),
    Closed(K),
}

/// Sole owner of "which popup is open".
///
/// Markers never write this state; they call [`request_open`](Self::request_open)
/// and [`request_close`](Self::request_close). At most one key is open at any time.
#[derive(Debug, Clone)]
pub struct PopupOwner<K> {
    open_key: Option<K>,
    events: Vec<PopupEvent<K>>,
}

impl<K: Clone + PartialEq + Debug> PopupOwner<K> {
    pub fn new() -> Self {
        Self {
            open_key: None,
            events: Vec::new(),
        }
    }

    pub fn open_key(&self) -> Option<&K> {
        self.open_key.as_ref()
    }

    /// True if any popup is open
    pub fn is_open(&self) -> bool {
        self.open_key.is_some()
    }

    pub fn is_open_for(&self, key: &K) -> bool {
        self.open_key.as_ref() == Some(key)
    }

    /// Opens `key`, closing whatever was open before.
    /// Returns the key that had to be closed, if any.
    pub fn request_open(&mut self, key: K) -> Option<K> {
        if self.is_open_for(&key) {
            return None;
        }
        let previous = self.request_close();
        log::debug!("popup opened: {:?}", key);
        self.events.push(PopupEvent::Opened(key.clone()));
        self.open_key = Some(key);
        previous
    }

    /// Closes the open popup, returning its key
    pub fn request_close(&mut self) -> Option<K> {
        let closed = self.open_key.take()?;
        log::debug!("popup closed: {:?}", closed);
        self.events.push(PopupEvent::Closed(closed.clone()));
        Some(closed)
    }

    /// Open/close history since the last drain
    pub fn events(&self) -> &[PopupEvent<K>] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<PopupEvent<K>> {
        std::mem::take(&mut self.events)
    }
}

impl<K: Clone + PartialEq + Debug> Default for PopupOwner<K> {
    fn default() -> Self {
        Self::new()
    }
}
