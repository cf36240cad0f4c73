//! The loader widget
//!
//! [`Loader`] owns a root element, an optional dimming overlay and, for the
//! `progress` variant, a repeating timer. State sits behind
//! `Rc<RefCell<_>>`; deferred callbacks only hold a `Weak` to it, so a
//! callback firing after the loader is gone does nothing. No borrow is held
//! while listeners run, which lets them call back into the loader.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::catalog::{self, Part};
use crate::error::{LoaderResult, WarnOnError};
use crate::events::{EventNotifier, Listener, LoaderEvent};
use crate::host::Host;
use crate::options::{Config, LoaderOptions, Size, Speed};

/// Period of the demo progress animation
pub const PROGRESS_TICK_MS: u32 = 50;

/// Delay before a fading overlay is taken out of layout
pub const OVERLAY_FADE_MS: u32 = 300;

/// Elements created for one build of the visual tree
struct Visuals<N> {
    root: N,
    overlay: Option<N>,
    progress: Option<ProgressParts<N>>,
}

struct ProgressParts<N> {
    fill: N,
    text: N,
}

impl<N> Visuals<N> {
    fn detach<H: Host<Node = N>>(&self, host: &H) {
        host.detach(&self.root);
        if let Some(overlay) = &self.overlay {
            host.detach(overlay);
        }
    }
}

struct State<H: Host> {
    config: Config,
    container: H::Node,
    visuals: Option<Visuals<H::Node>>,
    visible: bool,
    progress: f64,
    /// Counter advanced by the ticker; `set_progress` never touches it
    step: u32,
    ticker: Option<H::Interval>,
    events: EventNotifier,
    destroyed: bool,
}

impl<H: Host> State<H> {
    /// Clamp and reflect a progress value; no-op unless the variant is `progress`
    fn apply_progress(&mut self, host: &H, value: f64) {
        if !self.config.is_progress() || value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 100.0);
        self.progress = value;
        if let Some(parts) = self.visuals.as_ref().and_then(|v| v.progress.as_ref()) {
            host.set_style(&parts.fill, "width", &format!("{value}%"))
                .or_warn("set progress width");
            host.set_text(&parts.text, &format!("{}%", value.round()))
                .or_warn("set progress text");
        }
    }
}

/// A loading indicator attached to a container of host `H`
pub struct Loader<H: Host> {
    host: H,
    state: Rc<RefCell<State<H>>>,
}

impl<H: Host> Loader<H> {
    /// Build a loader that attaches to the host's default container
    pub fn new(host: H, options: LoaderOptions) -> LoaderResult<Self> {
        let container = host.default_container()?;
        Self::with_container(host, container, options)
    }

    /// Build a loader that attaches to `container` on first `show`
    pub fn with_container(
        host: H,
        container: H::Node,
        options: LoaderOptions,
    ) -> LoaderResult<Self> {
        let config = Config::resolve(options);
        debug!(variant = %config.variant, theme = ?config.theme, "creating loader");

        let loader = Self {
            host,
            state: Rc::new(RefCell::new(State {
                config,
                container,
                visuals: None,
                visible: false,
                progress: 0.0,
                step: 0,
                ticker: None,
                events: EventNotifier::default(),
                destroyed: false,
            })),
        };
        loader.rebuild()?;
        Ok(loader)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.state.borrow().config.clone()
    }

    /// Last progress value reflected in the tree, by the ticker or `set_progress`
    pub fn progress(&self) -> f64 {
        self.state.borrow().progress
    }

    pub fn root(&self) -> Option<H::Node> {
        self.state.borrow().visuals.as_ref().map(|v| v.root.clone())
    }

    pub fn overlay(&self) -> Option<H::Node> {
        self.state
            .borrow()
            .visuals
            .as_ref()
            .and_then(|v| v.overlay.clone())
    }

    /// Attach (on first use) and reveal the loader; no-op when already visible
    pub fn show(&self) {
        let overlay = {
            let mut state = self.state.borrow_mut();
            if state.visible || state.destroyed {
                return;
            }
            let Some(visuals) = state.visuals.as_ref() else {
                return;
            };

            if !self.host.is_attached(&visuals.root) {
                if let Some(overlay) = &visuals.overlay {
                    self.host
                        .append_child(&state.container, overlay)
                        .or_warn("attach overlay");
                }
                self.host
                    .append_child(&state.container, &visuals.root)
                    .or_warn("attach root");
            }
            self.host
                .set_style(&visuals.root, "display", "block")
                .or_warn("show root");

            let overlay = visuals.overlay.clone();
            state.visible = true;
            overlay
        };

        if let Some(overlay) = overlay {
            self.fade_in(overlay);
        }
        debug!("loader shown");
        self.emit(LoaderEvent::Show, None);
    }

    /// Display flip on the next frame, opacity flip on the one after, so
    /// the opacity transition is not batched away with the display change.
    fn fade_in(&self, overlay: H::Node) {
        let host = self.host.clone();
        self.host.request_animation_frame(move || {
            host.set_style(&overlay, "display", "block")
                .or_warn("display overlay");
            let next = host.clone();
            host.request_animation_frame(move || {
                next.set_style(&overlay, "opacity", "1")
                    .or_warn("fade in overlay");
            });
        });
    }

    /// Hide the loader; the overlay fades out and stays attached
    pub fn hide(&self) {
        {
            let mut state = self.state.borrow_mut();
            if !state.visible {
                return;
            }
            if let Some(visuals) = state.visuals.as_ref() {
                if let Some(overlay) = &visuals.overlay {
                    self.host
                        .set_style(overlay, "opacity", "0")
                        .or_warn("fade out overlay");
                    let host = self.host.clone();
                    let overlay = overlay.clone();
                    self.host.set_timeout(OVERLAY_FADE_MS, move || {
                        host.set_style(&overlay, "display", "none")
                            .or_warn("remove overlay from layout");
                    });
                }
                self.host
                    .set_style(&visuals.root, "display", "none")
                    .or_warn("hide root");
            }
            state.visible = false;
        }
        debug!("loader hidden");
        self.emit(LoaderEvent::Hide, None);
    }

    pub fn toggle(&self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Merge `partial` into the configuration and rebuild the visual tree.
    ///
    /// A visible loader is shown again with a fresh reveal.
    pub fn update(&self, partial: LoaderOptions) {
        let was_visible = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.config.merge(partial);
            state.visible
        };

        if let Err(err) = self.rebuild() {
            tracing::warn!(%err, "failed to rebuild loader");
        }
        if was_visible {
            self.state.borrow_mut().visible = false;
            self.show();
        }

        let config = self.config();
        debug!(variant = %config.variant, "loader updated");
        self.emit(LoaderEvent::Update, Some(&config));
    }

    pub fn set_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.set_property(catalog::COLOR_PROPERTY, &color, |config| {
            config.color = color.clone();
        });
    }

    pub fn set_size(&self, size: impl Into<Size>) {
        let size = size.into();
        self.set_property(catalog::SIZE_PROPERTY, &size.css_value(), |config| {
            config.size = size.clone();
        });
    }

    pub fn set_speed(&self, speed: impl Into<Speed>) {
        let speed = speed.into();
        self.set_property(catalog::SPEED_PROPERTY, &speed.css_value(), |config| {
            config.speed = speed.clone();
        });
    }

    fn set_property(&self, property: &str, value: &str, store: impl FnOnce(&mut Config)) {
        let mut state = self.state.borrow_mut();
        if state.destroyed {
            return;
        }
        store(&mut state.config);
        if let Some(visuals) = state.visuals.as_ref() {
            self.host
                .set_style(&visuals.root, property, value)
                .or_warn("set style property");
        }
    }

    /// Show `percent` (clamped to 0..=100) on a `progress` loader
    pub fn set_progress(&self, percent: f64) {
        let mut state = self.state.borrow_mut();
        if !state.destroyed {
            state.apply_progress(&self.host, percent);
        }
    }

    pub fn on(&self, event: LoaderEvent, listener: Listener) {
        self.state.borrow_mut().events.on(event, listener);
    }

    pub fn off(&self, event: LoaderEvent, listener: &Listener) {
        self.state.borrow_mut().events.off(event, listener);
    }

    /// Hide, stop the progress timer, drop both elements and every listener
    pub fn destroy(&self) {
        if self.is_destroyed() {
            return;
        }
        self.hide();

        let mut state = self.state.borrow_mut();
        state.ticker = None;
        if let Some(visuals) = state.visuals.take() {
            visuals.detach(&self.host);
        }
        state.events.clear();
        state.destroyed = true;
        debug!("loader destroyed");
    }

    /// Call every subscriber of `event` in order; no borrow is held, so
    /// listeners may call back into the loader. A panicking listener aborts
    /// the remaining ones.
    fn emit(&self, event: LoaderEvent, payload: Option<&Config>) {
        let listeners = self.state.borrow().events.listeners(event);
        for listener in listeners {
            listener(payload);
        }
    }

    /// Throw away the current elements and build them again from the config
    fn rebuild(&self) -> LoaderResult<()> {
        let mut state = self.state.borrow_mut();
        state.ticker = None;
        if let Some(old) = state.visuals.take() {
            old.detach(&self.host);
        }

        let visuals = build_visuals(&self.host, &state.config)?;
        state.visuals = Some(visuals);
        if state.config.is_progress() {
            state.step = 0;
            state.apply_progress(&self.host, 0.0);
            state.ticker = Some(start_ticker(&self.host, Rc::downgrade(&self.state)));
        }
        Ok(())
    }
}

/// Advance the step counter every tick while visible, wrapping after 100
fn start_ticker<H: Host>(host: &H, state: Weak<RefCell<State<H>>>) -> H::Interval {
    let tick_host = host.clone();
    host.set_interval(PROGRESS_TICK_MS, move || {
        let Some(state) = state.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        if !state.visible || !state.config.is_progress() {
            return;
        }
        state.step = (state.step + 1) % 101;
        let step = state.step;
        trace!(step, "progress tick");
        state.apply_progress(&tick_host, f64::from(step));
    })
}

fn build_visuals<H: Host>(host: &H, config: &Config) -> LoaderResult<Visuals<H::Node>> {
    let overlay = if config.overlay_enabled {
        let overlay = host.create_element(catalog::OVERLAY_CLASS)?;
        for (property, value) in catalog::OVERLAY_STYLES {
            host.set_style(&overlay, property, value)?;
        }
        host.set_style(&overlay, "background", &config.overlay_color)?;
        host.set_style(&overlay, "transition", catalog::OVERLAY_TRANSITION)?;
        Some(overlay)
    } else {
        None
    };

    let root = host.create_element(&catalog::root_class(
        &config.variant,
        &config.extra_class_name,
    ))?;
    host.set_attribute(&root, "role", "status")?;
    host.set_attribute(&root, "aria-label", &config.accessibility_label)?;
    for (property, value) in catalog::ROOT_STYLES {
        host.set_style(&root, property, value)?;
    }

    let content = host.create_element(catalog::CONTENT_CLASS)?;
    let mut fill = None;
    let mut text = None;
    build_part(
        host,
        &content,
        catalog::fragment(&config.variant),
        &mut |part: &Part, node: &H::Node| match part.class {
            catalog::PROGRESS_FILL_CLASS => fill = Some(node.clone()),
            catalog::PROGRESS_TEXT_CLASS => text = Some(node.clone()),
            _ => {}
        },
    )?;
    host.append_child(&root, &content)?;

    host.set_style(&root, catalog::COLOR_PROPERTY, &config.color)?;
    host.set_style(&root, catalog::SIZE_PROPERTY, &config.size.css_value())?;
    host.set_style(&root, catalog::SPEED_PROPERTY, &config.speed.css_value())?;
    for (key, value) in &config.custom_style_overrides {
        host.set_style(&root, &catalog::style_property(key), value)?;
    }

    let progress = match (fill, text) {
        (Some(fill), Some(text)) => Some(ProgressParts { fill, text }),
        _ => None,
    };
    Ok(Visuals {
        root,
        overlay,
        progress,
    })
}

fn build_part<H: Host>(
    host: &H,
    parent: &H::Node,
    part: &'static Part,
    visit: &mut impl FnMut(&Part, &H::Node),
) -> LoaderResult<()> {
    let node = host.create_element(part.class)?;
    for child in part.children {
        build_part(host, &node, child, visit)?;
    }
    visit(part, &node);
    host.append_child(parent, &node)
}
