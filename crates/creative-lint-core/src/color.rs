//! Hex color parsing and WCAG contrast math.

/// Pure white.
pub const WHITE: &str = "#ffffff";
/// Pure black.
pub const BLACK: &str = "#000000";

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a color from channels.
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance of this color.
    #[must_use]
    pub fn luminance(self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }
}

/// Parses `#rgb`, `#rrggbb`, `rgb` or `rrggbb`.
///
/// Anything else yields black instead of an error.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or_default()
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let expand = |i: usize| channel(&digits[i..=i].repeat(2));
            Some(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.039_28 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG 2.x relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratio between two hex colors, in `[1, 21]`.
#[must_use]
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    let la = hex_to_rgb(a).luminance();
    let lb = hex_to_rgb(b).luminance();
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// White or black, whichever contrasts more with `background`.
#[must_use]
pub fn best_contrasting_color(background: &str) -> &'static str {
    if contrast_ratio(WHITE, background) >= contrast_ratio(BLACK, background) {
        WHITE
    } else {
        BLACK
    }
}

/// A background is dark when white text reads better on it than black.
#[must_use]
pub fn is_dark(background: &str) -> bool {
    best_contrasting_color(background) == WHITE
}
