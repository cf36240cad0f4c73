//! The seam between the widget and whatever renders it
//!
//! A [`Host`] owns elements and scheduling. The browser implementation
//! lives in `simple-loader-web`; [`HeadlessHost`](crate::HeadlessHost)
//! keeps everything in memory.

use crate::error::LoaderResult;

pub trait Host: Clone + 'static {
    /// Handle to one element; cloning it must not copy the element
    type Node: Clone + 'static;

    /// Repeating timer handle; dropping it cancels the timer
    type Interval: 'static;

    /// Create a detached `div` carrying the given class list
    fn create_element(&self, class: &str) -> LoaderResult<Self::Node>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> LoaderResult<()>;

    /// Set one inline style property; `--custom` properties included
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> LoaderResult<()>;

    fn set_text(&self, node: &Self::Node, text: &str) -> LoaderResult<()>;

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> LoaderResult<()>;

    /// Remove the node from its parent; no-op when already detached
    fn detach(&self, node: &Self::Node);

    fn is_attached(&self, node: &Self::Node) -> bool;

    /// The container used when the caller does not name one (the document body)
    fn default_container(&self) -> LoaderResult<Self::Node>;

    /// Run `f` before the next repaint
    fn request_animation_frame<F>(&self, f: F)
    where
        F: FnOnce() + 'static;

    /// Run `f` once after `millis` milliseconds
    fn set_timeout<F>(&self, millis: u32, f: F)
    where
        F: FnOnce() + 'static;

    /// Run `f` every `millis` milliseconds until the handle is dropped
    fn set_interval<F>(&self, millis: u32, f: F) -> Self::Interval
    where
        F: FnMut() + 'static;
}
