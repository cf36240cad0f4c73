//! `SimpleLoader` class exported to JavaScript
//!
//! ```js
//! const loader = new SimpleLoader({ theme: "ios", type: "progress" });
//! loader.on("hide", () => console.log("done"));
//! loader.show();
//! ```

use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use simple_loader_core::{
    Config, Listener, Loader, LoaderError, LoaderEvent, LoaderOptions, LoaderResult, Size,
    listener,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom::DomHost;
use crate::styles;

struct Subscription {
    event: LoaderEvent,
    function: Function,
    listener: Listener,
}

#[wasm_bindgen(js_name = SimpleLoader)]
pub struct JsLoader {
    loader: Loader<DomHost>,
    subscriptions: Vec<Subscription>,
}

#[wasm_bindgen(js_class = SimpleLoader)]
impl JsLoader {
    /// `options` is a plain object; `container` may name the host element
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsLoader, JsError> {
        let host = DomHost::new()?;
        styles::inject_styles(host.document())?;

        let container = container_option(&options)?;
        let options = parse_options(options)?;
        let loader = match container {
            Some(container) => Loader::with_container(host, container, options)?,
            None => Loader::new(host, options)?,
        };

        Ok(Self {
            loader,
            subscriptions: Vec::new(),
        })
    }

    pub fn show(&self) {
        self.loader.show();
    }

    pub fn hide(&self) {
        self.loader.hide();
    }

    pub fn toggle(&self) {
        self.loader.toggle();
    }

    pub fn update(&self, options: JsValue) -> Result<(), JsError> {
        self.loader.update(parse_options(options)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, color: String) {
        self.loader.set_color(color);
    }

    /// Accepts a pixel number or one of `small`, `medium`, `large`
    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&self, size: JsValue) -> Result<(), JsError> {
        let size = if let Some(px) = size.as_f64() {
            Size::Pixels(px)
        } else if let Some(name) = size.as_string() {
            Size::parse(&name)
        } else {
            return Err(LoaderError::invalid_options("size must be a number or a string").into());
        };
        self.loader.set_size(size);
        Ok(())
    }

    #[wasm_bindgen(js_name = setSpeed)]
    pub fn set_speed(&self, speed: String) {
        self.loader.set_speed(speed.as_str());
    }

    #[wasm_bindgen(js_name = setProgress)]
    pub fn set_progress(&self, percent: f64) {
        self.loader.set_progress(percent);
    }

    /// Subscribe to `show`, `hide` or `update`; other names are ignored
    pub fn on(&mut self, event: &str, callback: Function) {
        let Some(event) = LoaderEvent::from_name(event) else {
            tracing::debug!(event, "ignoring subscription to unknown loader event");
            return;
        };
        let function = callback.clone();
        let listener = listener(move |payload| {
            let argument = payload
                .and_then(|config| config_to_js(config).ok())
                .unwrap_or(JsValue::UNDEFINED);
            if let Err(err) = function.call1(&JsValue::NULL, &argument) {
                tracing::warn!(?err, "loader listener threw");
            }
        });
        self.loader.on(event, listener.clone());
        self.subscriptions.push(Subscription {
            event,
            function: callback,
            listener,
        });
    }

    pub fn off(&mut self, event: &str, callback: &Function) {
        let Some(event) = LoaderEvent::from_name(event) else {
            return;
        };
        let loader = &self.loader;
        self.subscriptions.retain(|subscription| {
            let matches =
                subscription.event == event && Object::is(&subscription.function, callback);
            if matches {
                loader.off(event, &subscription.listener);
            }
            !matches
        });
    }

    pub fn destroy(&mut self) {
        self.loader.destroy();
        self.subscriptions.clear();
    }

    #[wasm_bindgen(getter, js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.loader.is_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.loader.progress()
    }

    /// The resolved configuration as a plain object
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> Result<JsValue, JsError> {
        Ok(config_to_js(&self.loader.config())?)
    }
}

/// Plain-object form of a config; maps become objects, not `Map`s
fn config_to_js(config: &Config) -> Result<JsValue, serde_wasm_bindgen::Error> {
    config.serialize(&Serializer::json_compatible())
}

/// Options object to [`LoaderOptions`]; `undefined` and `null` mean defaults
fn parse_options(options: JsValue) -> LoaderResult<LoaderOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(LoaderOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|err| LoaderError::invalid_options(err.to_string()))
}

fn container_option(options: &JsValue) -> LoaderResult<Option<HtmlElement>> {
    if !options.is_object() {
        return Ok(None);
    }
    let container = Reflect::get(options, &JsValue::from_str("container"))
        .map_err(|err| LoaderError::invalid_options(format!("{err:?}")))?;
    if container.is_undefined() || container.is_null() {
        return Ok(None);
    }
    container
        .dyn_into::<HtmlElement>()
        .map(Some)
        .map_err(|_| LoaderError::invalid_options("container must be an HTMLElement"))
}
