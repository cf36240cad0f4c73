//! [`Host`] implementation on top of the browser DOM

use gloo_timers::callback::{Interval, Timeout};
use simple_loader_core::{Host, LoaderError, LoaderResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

/// Renders loaders into the page's document
#[derive(Clone, Debug)]
pub struct DomHost {
    window: Window,
    document: Document,
}

impl DomHost {
    /// Bind to the global window; fails outside a browser context
    pub fn new() -> LoaderResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| LoaderError::host_unavailable("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| LoaderError::host_unavailable("window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn js_error(operation: &str, err: &JsValue) -> LoaderError {
    LoaderError::dom(format!("{operation}: {err:?}"))
}

impl Host for DomHost {
    type Node = HtmlElement;
    type Interval = Interval;

    fn create_element(&self, class: &str) -> LoaderResult<HtmlElement> {
        let element = self
            .document
            .create_element("div")
            .map_err(|e| js_error("createElement", &e))?;
        element.set_class_name(class);
        element
            .dyn_into::<HtmlElement>()
            .map_err(|_| LoaderError::dom("created element is not an HTMLElement"))
    }

    fn set_attribute(&self, node: &HtmlElement, name: &str, value: &str) -> LoaderResult<()> {
        node.set_attribute(name, value)
            .map_err(|e| js_error("setAttribute", &e))
    }

    fn set_style(&self, node: &HtmlElement, property: &str, value: &str) -> LoaderResult<()> {
        node.style()
            .set_property(property, value)
            .map_err(|e| js_error("style.setProperty", &e))
    }

    fn set_text(&self, node: &HtmlElement, text: &str) -> LoaderResult<()> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) -> LoaderResult<()> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|e| js_error("appendChild", &e))
    }

    fn detach(&self, node: &HtmlElement) {
        node.remove();
    }

    fn is_attached(&self, node: &HtmlElement) -> bool {
        node.parent_node().is_some()
    }

    fn default_container(&self) -> LoaderResult<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| LoaderError::host_unavailable("document has no body"))
    }

    fn request_animation_frame<F>(&self, f: F)
    where
        F: FnOnce() + 'static,
    {
        let callback = Closure::once_into_js(f);
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            tracing::warn!(?err, "requestAnimationFrame rejected");
        }
    }

    fn set_timeout<F>(&self, millis: u32, f: F)
    where
        F: FnOnce() + 'static,
    {
        // the timeout must outlive this call
        let _id = Timeout::new(millis, f).forget();
    }

    fn set_interval<F>(&self, millis: u32, f: F) -> Interval
    where
        F: FnMut() + 'static,
    {
        Interval::new(millis, f)
    }
}
