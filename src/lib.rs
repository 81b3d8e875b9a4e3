#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Canvas effects and page state for the operator portfolio site.
//!
//! The effect modules are plain state machines painting through
//! [`surface::Painter`], so they run and test on the host. The `wasm` module
//! binds them to the browser.

pub mod category;
pub mod config;
pub mod content;
pub mod error;
pub mod orbit;
pub mod page;
pub mod particles;
pub mod scheduler;
pub mod scramble;
pub mod surface;
pub mod tilt;

pub use error::{SiteError, SiteResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start, unmount};
