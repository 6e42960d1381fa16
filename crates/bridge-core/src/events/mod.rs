//! Host events

mod host_event;

pub use host_event::HostEvent;
