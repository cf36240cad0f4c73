//! Browser support for simple-loader
//!
//! [`DomHost`] renders a [`Loader`](simple_loader_core::Loader) into the
//! page, [`styles`] provides the default animations, and the
//! `SimpleLoader` class makes the widget usable from plain JavaScript.

pub mod bindings;
pub mod dom;
pub mod logging;
pub mod styles;

pub use bindings::JsLoader;
pub use dom::DomHost;
pub use logging::init_logging;
pub use simple_loader_core::*;
pub use styles::{STYLESHEET_ID, inject_styles, stylesheet};
