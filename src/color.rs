//! Color normalization and palette generation.
//!
//! The planner emits loose color hints ("light blue", "red") that are first
//! normalized to concrete colors, then multi-slice charts derive a palette
//! by blending the base color toward white in sRGB. The blend is not
//! perceptually uniform, but slices come out monotonically lighter-to-darker
//! and visually distinguishable without a categorical palette.

/// A concrete sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lowercase hex form, e.g. "#6366f1".
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Natural-language hints the planner is known to produce, mapped to the
/// concrete colors the charts should actually use.
const NAMED_HINTS: &[(&str, &str)] = &[
    ("light blue", "lightblue"),
    ("lightblue", "lightblue"),
    ("blue", "steelblue"),
    ("dark blue", "darkblue"),
    ("red", "tomato"),
    ("green", "seagreen"),
    ("orange", "orange"),
    ("purple", "rebeccapurple"),
    ("teal", "teal"),
    ("yellow", "gold"),
];

/// Normalize a raw color hint.
///
/// Known natural-language names map to a concrete color; unmatched
/// non-empty hints pass through unchanged (assumed already concrete, e.g. a
/// hex code); empty or absent hints yield None so the caller can apply the
/// chart-kind default.
pub fn normalize(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let key = raw.to_lowercase();
    for (hint, concrete) in NAMED_HINTS {
        if *hint == key {
            return Some((*concrete).to_string());
        }
    }
    Some(raw.to_string())
}

/// Generate `count` shades of `base` for multi-slice charts.
///
/// Slice `i` blends the base color toward white at opacity
/// `0.35 + 0.55 * (i+1) / (count+1)`, so earlier slices are lighter.
/// An unparseable base falls back to `fallback`.
pub fn palette(base: &str, count: usize, fallback: Rgb) -> Vec<String> {
    let base_rgb = parse_color(base).unwrap_or(fallback);
    (0..count)
        .map(|i| {
            let alpha = 0.35 + 0.55 * (i + 1) as f64 / (count + 1) as f64;
            mix_with_white(base_rgb, alpha).to_hex()
        })
        .collect()
}

/// Linear interpolation toward white in sRGB: `alpha` of the base color,
/// `1 - alpha` white.
fn mix_with_white(base: Rgb, alpha: f64) -> Rgb {
    let mix = |c: u8| -> u8 { (c as f64 * alpha + 255.0 * (1.0 - alpha)).round() as u8 };
    Rgb(mix(base.0), mix(base.1), mix(base.2))
}

/// Parse a concrete color string: hex (#RRGGBB, #RGB) or a CSS color name.
pub fn parse_color(color_str: &str) -> Option<Rgb> {
    let color_str = color_str.trim();

    if color_str.starts_with('#') {
        return parse_hex_color(color_str);
    }

    match color_str.to_lowercase().as_str() {
        "white" => Some(Rgb(255, 255, 255)),
        "black" => Some(Rgb(0, 0, 0)),
        "red" => Some(Rgb(255, 0, 0)),
        "green" => Some(Rgb(0, 128, 0)),
        "blue" => Some(Rgb(0, 0, 255)),
        "yellow" => Some(Rgb(255, 255, 0)),
        "cyan" => Some(Rgb(0, 255, 255)),
        "magenta" => Some(Rgb(255, 0, 255)),
        "orange" => Some(Rgb(255, 165, 0)),
        "purple" => Some(Rgb(128, 0, 128)),
        "pink" => Some(Rgb(255, 192, 203)),
        "brown" => Some(Rgb(139, 69, 19)),
        "gray" | "grey" => Some(Rgb(128, 128, 128)),
        // Concrete names the hint table resolves to.
        "steelblue" => Some(Rgb(70, 130, 180)),
        "lightblue" => Some(Rgb(173, 216, 230)),
        "darkblue" => Some(Rgb(0, 0, 139)),
        "tomato" => Some(Rgb(255, 99, 71)),
        "seagreen" => Some(Rgb(46, 139, 87)),
        "rebeccapurple" => Some(Rgb(102, 51, 153)),
        "teal" => Some(Rgb(0, 128, 128)),
        "gold" => Some(Rgb(255, 215, 0)),
        _ => None,
    }
}

/// Parse hex color (#RRGGBB or #RGB)
fn parse_hex_color(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    // Hints are arbitrary upstream text; byte slicing a multi-byte
    // character would panic, so reject non-ASCII input outright.
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Rgb(r, g, b))
        }
        _ => None,
    }
}
