// Library crate: the rig, geometry cache, backends and scripting surface.
// The binary only parses arguments and drives a headless session.

pub mod build;
pub mod command;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod session;
pub mod state;
pub mod validation;
pub mod viewport;
