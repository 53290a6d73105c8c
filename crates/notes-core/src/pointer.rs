//! Pointer event normalization.
//!
//! Browsers report click positions in viewport (client) coordinates. Tools
//! want coordinates relative to the root's content box, so the element's
//! bounding-box origin, border and padding are subtracted. The DOM lookups
//! live in the WASM bridge; this module only does the arithmetic so it can
//! be tested natively.

use crate::model::PointerInfo;

/// Mouse button that produced a click (`MouseEvent.button`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
    Other(i16),
}

impl MouseButton {
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

/// Geometry of the element a click landed on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementBox {
    /// `getBoundingClientRect().left`
    pub left: f64,
    /// `getBoundingClientRect().top`
    pub top: f64,
    pub border_left: f64,
    pub border_top: f64,
    pub padding_left: f64,
    pub padding_top: f64,
}

impl ElementBox {
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            ..Self::default()
        }
    }

    pub fn with_border(mut self, left: f64, top: f64) -> Self {
        self.border_left = left;
        self.border_top = top;
        self
    }

    pub fn with_padding(mut self, left: f64, top: f64) -> Self {
        self.padding_left = left;
        self.padding_top = top;
        self
    }

    /// Translate client coordinates into this element's content-box space.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> PointerInfo {
        PointerInfo {
            x: client_x - self.left - self.border_left - self.padding_left,
            y: client_y - self.top - self.border_top - self.padding_top,
        }
    }
}

/// A raw click on the root surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub button: MouseButton,
    /// `None` when the event target is not an element (e.g. a text node).
    pub target: Option<ElementBox>,
}

impl ClickEvent {
    pub fn primary(client_x: f64, client_y: f64, target: Option<ElementBox>) -> Self {
        Self {
            client_x,
            client_y,
            button: MouseButton::Primary,
            target,
        }
    }

    /// Surface-local coordinates, or `None` if the target is not an element.
    pub fn normalize(&self) -> Option<PointerInfo> {
        self.target
            .map(|target| target.to_local(self.client_x, self.client_y))
    }
}

/// Parse a computed CSS length the way `parseFloat` does: take the longest
/// numeric prefix (`"12.5px"` → 12.5). Anything without a numeric prefix
/// yields 0 so a missing style never poisons the coordinates.
pub fn parse_px(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // Only a sign and/or a lone dot: no number.
    if !bytes[digits_start..end].iter().any(u8::is_ascii_digit) {
        return 0.0;
    }
    // Optional exponent, only if followed by digits.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
