pub mod events;

pub use events::{EventHandled, MarkerClickEvent, MarkerEvent};
