//! Browser tests; run with `wasm-pack test --headless --firefox crates/web`
#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Map, Object, Reflect};
use simple_loader_web::{
    DomHost, Host, JsLoader, Loader, LoaderOptions, STYLESHEET_ID, init_logging, inject_styles,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use tracing::Level;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn host() -> DomHost {
    DomHost::new().expect("tests run in a browser")
}

#[wasm_bindgen_test]
fn test_loader_attaches_to_body_on_show() {
    let host = host();
    let loader = Loader::new(host.clone(), LoaderOptions::default()).unwrap();
    let root = loader.root().unwrap();
    assert!(!host.is_attached(&root));

    loader.show();
    assert!(host.is_attached(&root));
    assert_eq!(root.get_attribute("role").as_deref(), Some("status"));
    assert_eq!(root.style().get_property_value("display").unwrap(), "block");
    assert_eq!(
        root.style().get_property_value("--loader-size").unwrap(),
        "48px"
    );

    loader.destroy();
    assert!(!host.is_attached(&root));
}

#[wasm_bindgen_test]
fn test_progress_text_in_dom() {
    let host = host();
    let loader = Loader::new(
        host.clone(),
        LoaderOptions::default().with_variant("progress"),
    )
    .unwrap();
    loader.set_progress(42.7);
    let root = loader.root().unwrap();
    let text = root.query_selector(".progress-text").unwrap().unwrap();
    assert_eq!(text.text_content().as_deref(), Some("43%"));
    loader.destroy();
}

#[wasm_bindgen_test]
async fn test_overlay_fades_in() {
    let host = host();
    let loader = Loader::new(host.clone(), LoaderOptions::default()).unwrap();
    let overlay = loader.overlay().unwrap();

    loader.show();
    TimeoutFuture::new(100).await;
    assert_eq!(overlay.style().get_property_value("display").unwrap(), "block");
    assert_eq!(overlay.style().get_property_value("opacity").unwrap(), "1");

    loader.hide();
    TimeoutFuture::new(400).await;
    assert_eq!(overlay.style().get_property_value("display").unwrap(), "none");
    loader.destroy();
}

#[wasm_bindgen_test]
fn test_stylesheet_injected_once() {
    let host = host();
    inject_styles(host.document()).unwrap();
    inject_styles(host.document()).unwrap();
    let count = host
        .document()
        .query_selector_all(&format!("#{STYLESHEET_ID}"))
        .unwrap()
        .length();
    assert_eq!(count, 1);
}

fn set(target: &JsValue, key: &str, value: &JsValue) {
    Reflect::set(target, &JsValue::from_str(key), value).unwrap();
}

#[wasm_bindgen_test]
fn test_js_class_container_and_subscriptions() {
    let host = host();
    let container: HtmlElement = host
        .document()
        .create_element("section")
        .unwrap()
        .dyn_into()
        .unwrap();
    host.append_child(&host.default_container().unwrap(), &container)
        .unwrap();

    let options: JsValue = Object::new().into();
    set(&options, "container", &container);
    set(&options, "type", &JsValue::from_str("dots"));
    let Ok(mut loader) = JsLoader::new(options) else {
        panic!("SimpleLoader construction failed");
    };

    let shows = Rc::new(Cell::new(0));
    let counter = shows.clone();
    let on_show = Closure::<dyn FnMut()>::new(move || counter.set(counter.get() + 1));
    let on_show_fn: Function = on_show.as_ref().unchecked_ref::<Function>().clone();
    let lookalike = Function::new_no_args("");

    loader.on("show", on_show_fn.clone());
    loader.on("sparkle", lookalike.clone());
    loader.off("show", &lookalike);
    loader.show();
    assert_eq!(shows.get(), 1);
    assert!(loader.is_visible());
    assert_eq!(container.child_element_count(), 2);
    assert!(
        container
            .query_selector(".simple-loader.simple-loader-dots")
            .unwrap()
            .is_some()
    );

    loader.hide();
    loader.off("show", &on_show_fn);
    loader.show();
    assert_eq!(shows.get(), 1);

    let payload = Rc::new(RefCell::new(JsValue::UNDEFINED));
    let slot = payload.clone();
    let on_update = Closure::<dyn FnMut(JsValue)>::new(move |config| *slot.borrow_mut() = config);
    loader.on("update", on_update.as_ref().unchecked_ref::<Function>().clone());

    let overrides: JsValue = Object::new().into();
    set(&overrides, "borderRadius", &JsValue::from_str("4px"));
    let update: JsValue = Object::new().into();
    set(&update, "customCSS", &overrides);
    assert!(loader.update(update).is_ok());

    let config = payload.borrow().clone();
    let styles = Reflect::get(&config, &JsValue::from_str("customStyleOverrides")).unwrap();
    assert!(!styles.is_instance_of::<Map>());
    assert_eq!(
        Reflect::get(&styles, &JsValue::from_str("borderRadius"))
            .unwrap()
            .as_string()
            .as_deref(),
        Some("4px")
    );

    loader.destroy();
    assert_eq!(container.child_element_count(), 0);
    container.remove();
}

#[wasm_bindgen_test]
fn test_init_logging_twice() {
    init_logging(Level::DEBUG);
    init_logging(Level::INFO);
    tracing::info!(target: "simple_loader_web", "console logging active");
}
