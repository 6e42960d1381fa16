//! Ports - interfaces the runtime depends on

mod ports;

pub use ports::{Host, PortResult, PresenceApi, PresenceApiFactory};
