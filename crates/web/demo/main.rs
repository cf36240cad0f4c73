use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use simple_loader_web::{
    DomHost, Loader, LoaderError, LoaderEvent, LoaderOptions, LoaderResult, ThemePreset, Variant,
    init_logging, inject_styles, listener,
};
use tracing::Level;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement};

const COLORS: [&str; 5] = ["#e74c3c", "#8e44ad", "#16a085", "#f39c12", "#2c3e50"];

type DemoLoader = Rc<Loader<DomHost>>;

fn button(
    document: &Document,
    parent: &HtmlElement,
    label: &str,
    on_click: impl FnMut(&Event) + 'static,
) -> LoaderResult<()> {
    let button = document
        .create_element("button")
        .map_err(|e| LoaderError::dom(format!("createElement: {e:?}")))?;
    button.set_text_content(Some(label));
    parent
        .append_child(&button)
        .map_err(|e| LoaderError::dom(format!("appendChild: {e:?}")))?;
    EventListener::new(&button, "click", on_click).forget();
    Ok(())
}

fn status(document: &Document) -> Option<HtmlElement> {
    document
        .get_element_by_id("status")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

fn build(document: &Document) -> LoaderResult<()> {
    let host = DomHost::new()?;
    inject_styles(document)?;
    let controls = document
        .get_element_by_id("controls")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| LoaderError::host_unavailable("missing #controls"))?;

    let loader: DemoLoader = Rc::new(Loader::new(host, LoaderOptions::default())?);

    for event in [LoaderEvent::Show, LoaderEvent::Hide, LoaderEvent::Update] {
        let status = status(document);
        loader.on(
            event,
            listener(move |config| {
                tracing::info!(%event, "loader event");
                if let Some(status) = &status {
                    let text = match config {
                        Some(config) => format!("{event}: {} / {}", config.variant, config.color),
                        None => event.to_string(),
                    };
                    status.set_text_content(Some(&text));
                }
            }),
        );
    }

    {
        let loader = loader.clone();
        button(document, &controls, "Show for 2s", move |_| {
            loader.show();
            let loader = loader.clone();
            Timeout::new(2_000, move || loader.hide()).forget();
        })?;
    }
    {
        let loader = loader.clone();
        button(document, &controls, "Toggle", move |_| loader.toggle())?;
    }
    {
        let loader = loader.clone();
        let next = Cell::new(0_usize);
        button(document, &controls, "Next variant", move |_| {
            let index = (next.get() + 1) % Variant::KNOWN.len();
            next.set(index);
            let variant = Variant::KNOWN[index].clone();
            loader.update(LoaderOptions::default().with_variant(variant));
        })?;
    }
    {
        let loader = loader.clone();
        let next = Cell::new(0_usize);
        button(document, &controls, "Next theme", move |_| {
            let theme = ThemePreset::ALL[next.get() % ThemePreset::ALL.len()];
            next.set(next.get() + 1);
            loader.update(theme.options().with_theme(theme.name()));
        })?;
    }
    {
        let loader = loader.clone();
        button(document, &controls, "Progress +25%", move |_| {
            if !loader.config().is_progress() {
                loader.update(LoaderOptions::default().with_variant(Variant::Progress));
            }
            loader.set_progress(loader.progress() + 25.0);
            loader.show();
        })?;
    }
    {
        let loader = loader.clone();
        let next = Cell::new(0_usize);
        button(document, &controls, "Next color", move |_| {
            loader.set_color(COLORS[next.get() % COLORS.len()]);
            next.set(next.get() + 1);
        })?;
    }

    Ok(())
}

#[wasm_bindgen(start)]
#[allow(clippy::main_recursion)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging(Level::DEBUG);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        tracing::error!("demo must run in a browser window");
        return;
    };
    if let Err(err) = build(&document) {
        tracing::error!(%err, "failed to build demo");
    }
}
