//! Class names and the fixed markup fragment for each variant

use crate::options::Variant;

pub const ROOT_CLASS: &str = "simple-loader";
pub const CONTENT_CLASS: &str = "simple-loader-content";
pub const OVERLAY_CLASS: &str = "simple-loader-overlay";
pub const PROGRESS_FILL_CLASS: &str = "progress-fill";
pub const PROGRESS_TEXT_CLASS: &str = "progress-text";

pub const COLOR_PROPERTY: &str = "--loader-color";
pub const SIZE_PROPERTY: &str = "--loader-size";
pub const SPEED_PROPERTY: &str = "--loader-speed";

/// Inline styles of the root element before any option is applied
pub const ROOT_STYLES: [(&str, &str); 6] = [
    ("position", "fixed"),
    ("top", "50%"),
    ("left", "50%"),
    ("transform", "translate(-50%, -50%)"),
    ("display", "none"),
    ("z-index", "9999"),
];

/// Inline styles of the overlay, minus its background color
pub const OVERLAY_STYLES: [(&str, &str); 8] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("display", "none"),
    ("z-index", "9998"),
    ("opacity", "0"),
];

pub const OVERLAY_TRANSITION: &str = "opacity 0.3s ease";

/// One element of a fragment: its class and its children in order
#[derive(Debug, PartialEq, Eq)]
pub struct Part {
    pub class: &'static str,
    pub children: &'static [Part],
}

impl Part {
    /// Depth-first iterator over this part and all of its descendants
    pub fn walk(&'static self) -> impl Iterator<Item = &'static Part> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let part = stack.pop()?;
            stack.extend(part.children.iter().rev());
            Some(part)
        })
    }
}

const DOT: Part = Part {
    class: "dot",
    children: &[],
};

const WAVE_BAR: Part = Part {
    class: "wave-bar",
    children: &[],
};

pub static SPINNER: Part = Part {
    class: "spinner",
    children: &[],
};

pub static DOTS: Part = Part {
    class: "dots",
    children: &[DOT, DOT, DOT],
};

pub static PULSE: Part = Part {
    class: "pulse",
    children: &[],
};

pub static BAR: Part = Part {
    class: "bar",
    children: &[Part {
        class: "bar-inner",
        children: &[],
    }],
};

pub static WAVE: Part = Part {
    class: "wave",
    children: &[WAVE_BAR, WAVE_BAR, WAVE_BAR, WAVE_BAR, WAVE_BAR],
};

pub static BOUNCE: Part = Part {
    class: "bounce",
    children: &[],
};

pub static RING: Part = Part {
    class: "ring",
    children: &[],
};

pub static HEARTBEAT: Part = Part {
    class: "heartbeat",
    children: &[],
};

pub static PROGRESS: Part = Part {
    class: "progress-container",
    children: &[
        Part {
            class: "progress-bar",
            children: &[Part {
                class: PROGRESS_FILL_CLASS,
                children: &[],
            }],
        },
        Part {
            class: PROGRESS_TEXT_CLASS,
            children: &[],
        },
    ],
};

/// Fragment rendered inside the content element; unknown variants get the spinner
pub fn fragment(variant: &Variant) -> &'static Part {
    match variant {
        Variant::Spinner | Variant::Other(_) => &SPINNER,
        Variant::Dots => &DOTS,
        Variant::Pulse => &PULSE,
        Variant::Bar => &BAR,
        Variant::Wave => &WAVE,
        Variant::Bounce => &BOUNCE,
        Variant::Ring => &RING,
        Variant::Heartbeat => &HEARTBEAT,
        Variant::Progress => &PROGRESS,
    }
}

/// Class list of the root element, skipping empty parts
pub fn root_class(variant: &Variant, extra: &str) -> String {
    let variant_class = format!("{ROOT_CLASS}-{}", variant.name());
    [ROOT_CLASS, variant_class.as_str(), extra.trim()]
        .into_iter()
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// CSS property name for a style override key.
///
/// Keys already in CSS form (`z-index`, `--gap`) are kept; camelCase keys
/// (`backgroundColor`, `WebkitTransform`) are converted to kebab-case.
pub fn style_property(key: &str) -> String {
    if key.contains('-') {
        return key.to_string();
    }
    let mut property = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            property.push('-');
            property.push(ch.to_ascii_lowercase());
        } else {
            property.push(ch);
        }
    }
    property
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(part: &'static Part) -> Vec<&'static str> {
        part.walk().map(|p| p.class).collect()
    }

    #[test]
    fn test_fragment_shapes() {
        assert_eq!(classes(fragment(&Variant::Dots)), ["dots", "dot", "dot", "dot"]);
        assert_eq!(classes(fragment(&Variant::Bar)), ["bar", "bar-inner"]);
        assert_eq!(fragment(&Variant::Wave).children.len(), 5);
        assert_eq!(
            classes(fragment(&Variant::Progress)),
            [
                "progress-container",
                "progress-bar",
                "progress-fill",
                "progress-text"
            ]
        );
    }

    #[test]
    fn test_single_element_fragments() {
        for (variant, class) in [
            (Variant::Spinner, "spinner"),
            (Variant::Pulse, "pulse"),
            (Variant::Bounce, "bounce"),
            (Variant::Ring, "ring"),
            (Variant::Heartbeat, "heartbeat"),
        ] {
            assert_eq!(classes(fragment(&variant)), [class]);
        }
    }

    #[test]
    fn test_unknown_variant_falls_back_to_spinner() {
        assert_eq!(fragment(&Variant::from("confetti")), &SPINNER);
    }

    #[test]
    fn test_root_class() {
        assert_eq!(
            root_class(&Variant::Dots, ""),
            "simple-loader simple-loader-dots"
        );
        assert_eq!(
            root_class(&Variant::from("confetti"), " page-loader "),
            "simple-loader simple-loader-confetti page-loader"
        );
    }

    #[test]
    fn test_style_property() {
        assert_eq!(style_property("backgroundColor"), "background-color");
        assert_eq!(style_property("WebkitTransform"), "-webkit-transform");
        assert_eq!(style_property("margin"), "margin");
        assert_eq!(style_property("z-index"), "z-index");
        assert_eq!(style_property("--loader-color"), "--loader-color");
    }
}
