//! Default stylesheet for every loader variant
//!
//! All rules read the `--loader-color`, `--loader-size` and `--loader-speed`
//! custom properties the loader sets on its root element.

use simple_loader_core::{LoaderError, LoaderResult};
use web_sys::Document;

/// `id` of the injected `<style>` element
pub const STYLESHEET_ID: &str = "simple-loader-styles";

// Layout shared by all variants
pub const BASE_RULES: &str = "
.simple-loader { color: var(--loader-color); }
.simple-loader-content { display: flex; flex-direction: column; align-items: center; justify-content: center; }";

// Rotating indicators
pub const SPINNER_RULES: &str = "
.simple-loader .spinner { width: var(--loader-size); height: var(--loader-size); border: calc(var(--loader-size) / 8) solid rgba(0, 0, 0, 0.1); border-top-color: var(--loader-color); border-radius: 50%; animation: simple-loader-spin var(--loader-speed) linear infinite; }";
pub const RING_RULES: &str = "
.simple-loader .ring { width: var(--loader-size); height: var(--loader-size); border: calc(var(--loader-size) / 10) solid var(--loader-color); border-right-color: transparent; border-left-color: transparent; border-radius: 50%; animation: simple-loader-spin var(--loader-speed) ease-in-out infinite; }";

// Scaling indicators
pub const PULSE_RULES: &str = "
.simple-loader .pulse { width: var(--loader-size); height: var(--loader-size); border-radius: 50%; background: var(--loader-color); animation: simple-loader-pulse var(--loader-speed) ease-in-out infinite; }";
pub const HEARTBEAT_RULES: &str = "
.simple-loader .heartbeat { width: calc(var(--loader-size) / 2); height: calc(var(--loader-size) / 2); background: var(--loader-color); transform: rotate(45deg); animation: simple-loader-heartbeat var(--loader-speed) ease-in-out infinite; }";
pub const BOUNCE_RULES: &str = "
.simple-loader .bounce { width: calc(var(--loader-size) / 2); height: calc(var(--loader-size) / 2); border-radius: 50%; background: var(--loader-color); animation: simple-loader-bounce var(--loader-speed) ease-in-out infinite; }";

// Multi-element indicators
pub const DOTS_RULES: &str = "
.simple-loader .dots { display: flex; gap: calc(var(--loader-size) / 8); }
.simple-loader .dot { width: calc(var(--loader-size) / 4); height: calc(var(--loader-size) / 4); border-radius: 50%; background: var(--loader-color); animation: simple-loader-pulse var(--loader-speed) ease-in-out infinite both; }
.simple-loader .dot:nth-child(1) { animation-delay: -0.32s; }
.simple-loader .dot:nth-child(2) { animation-delay: -0.16s; }";
pub const WAVE_RULES: &str = "
.simple-loader .wave { display: flex; align-items: center; gap: calc(var(--loader-size) / 16); height: var(--loader-size); }
.simple-loader .wave-bar { width: calc(var(--loader-size) / 8); height: 100%; background: var(--loader-color); animation: simple-loader-wave var(--loader-speed) ease-in-out infinite; }
.simple-loader .wave-bar:nth-child(2) { animation-delay: -0.9s; }
.simple-loader .wave-bar:nth-child(3) { animation-delay: -0.8s; }
.simple-loader .wave-bar:nth-child(4) { animation-delay: -0.7s; }
.simple-loader .wave-bar:nth-child(5) { animation-delay: -0.6s; }";

// Bars
pub const BAR_RULES: &str = "
.simple-loader .bar { width: calc(var(--loader-size) * 4); height: calc(var(--loader-size) / 8); overflow: hidden; background: rgba(0, 0, 0, 0.1); border-radius: 999px; }
.simple-loader .bar-inner { width: 40%; height: 100%; background: var(--loader-color); border-radius: inherit; animation: simple-loader-slide var(--loader-speed) ease-in-out infinite; }";
pub const PROGRESS_RULES: &str = "
.simple-loader .progress-container { display: flex; flex-direction: column; align-items: center; gap: 8px; }
.simple-loader .progress-bar { width: calc(var(--loader-size) * 4); height: calc(var(--loader-size) / 8); overflow: hidden; background: rgba(0, 0, 0, 0.1); border-radius: 999px; }
.simple-loader .progress-fill { height: 100%; background: var(--loader-color); transition: width 0.05s linear; }
.simple-loader .progress-text { font: 600 14px sans-serif; color: var(--loader-color); }";

pub const KEYFRAMES: &str = "
@keyframes simple-loader-spin { to { transform: rotate(360deg); } }
@keyframes simple-loader-pulse { 0%, 100% { transform: scale(0.6); opacity: 0.5; } 50% { transform: scale(1); opacity: 1; } }
@keyframes simple-loader-heartbeat { 0%, 100% { transform: rotate(45deg) scale(0.8); } 30% { transform: rotate(45deg) scale(1.1); } }
@keyframes simple-loader-bounce { 0%, 100% { transform: translateY(0); } 50% { transform: translateY(calc(var(--loader-size) / -2)); } }
@keyframes simple-loader-wave { 0%, 40%, 100% { transform: scaleY(0.4); } 20% { transform: scaleY(1); } }
@keyframes simple-loader-slide { from { transform: translateX(-100%); } to { transform: translateX(250%); } }";

/// Utility function to combine multiple rule blocks
pub fn combine_styles(styles: &[&str]) -> String {
    styles.join("\n")
}

/// The full default stylesheet
pub fn stylesheet() -> String {
    combine_styles(&[
        BASE_RULES,
        SPINNER_RULES,
        RING_RULES,
        PULSE_RULES,
        HEARTBEAT_RULES,
        BOUNCE_RULES,
        DOTS_RULES,
        WAVE_RULES,
        BAR_RULES,
        PROGRESS_RULES,
        KEYFRAMES,
    ])
}

/// Append the default stylesheet to `<head>` unless it is already there
pub fn inject_styles(document: &Document) -> LoaderResult<()> {
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| LoaderError::host_unavailable("document has no head"))?;
    let style = document
        .create_element("style")
        .map_err(|e| LoaderError::dom(format!("createElement: {e:?}")))?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(&stylesheet()));
    head.append_child(&style)
        .map_err(|e| LoaderError::dom(format!("appendChild: {e:?}")))?;
    tracing::debug!("injected default loader stylesheet");
    Ok(())
}
