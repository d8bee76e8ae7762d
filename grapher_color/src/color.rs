// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between configuration color strings and [`Color`].

extern crate alloc;

use alloc::format;
use alloc::string::String;

use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Gray used for the "No data" bin unless configured otherwise.
pub const NO_DATA_GRAY: Color = Color::from_rgb8(0x6e, 0x75, 0x81);

/// Error returned when a configuration color string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{0}`")]
pub struct ParseColorError(pub String);

/// Parses a CSS color string (`#rgb`, `#rrggbb`, named colors, `rgb(...)`, ...).
pub fn parse_css_color(s: &str) -> Result<Color, ParseColorError> {
    parse_color(s.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ParseColorError(s.into()))
}

/// Formats a color as a lowercase `#rrggbb` hex string, dropping alpha.
pub fn to_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

/// Linear interpolation between two colors in (gamma-encoded) sRGB.
pub(crate) fn lerp(a: Color, b: Color, t: f32) -> Color {
    let mut components = [0.0_f32; 4];
    for (i, out) in components.iter_mut().enumerate() {
        *out = a.components[i] + (b.components[i] - a.components[i]) * t;
    }
    Color::new(components)
}
