//! Port implementations: the live HTTP adapters and in-process stand-ins.

pub mod in_memory;
pub mod upstream;
