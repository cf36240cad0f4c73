//! Loading indicator widget, independent of where it is rendered
//!
//! A [`Loader`] turns [`LoaderOptions`] into a small element tree on a
//! [`Host`], toggles it with a fading overlay, and notifies listeners of
//! `show`, `hide` and `update`. The browser host lives in
//! `simple-loader-web`; [`HeadlessHost`] renders into memory.

pub mod catalog;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod loader;
pub mod options;
pub mod theme;

pub use error::{LoaderError, LoaderResult, WarnOnError};
pub use events::{EventNotifier, Listener, LoaderEvent, listener};
pub use headless::{HeadlessHost, HeadlessInterval, NodeId};
pub use host::Host;
pub use loader::{Loader, OVERLAY_FADE_MS, PROGRESS_TICK_MS};
pub use options::{Config, LoaderOptions, Size, Speed, Variant};
pub use theme::ThemePreset;
