// Copyright 2025 the Grapher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named color schemes.
//!
//! The registry is a static table; schemes are looked up by name and never mutated. Gradient
//! schemes store their nine-class ColorBrewer palette and stretch or compress it to the number
//! of colors requested. Qualitative schemes hand out their colors in order and cycle.

extern crate alloc;

use alloc::vec::Vec;

use peniko::Color;

use crate::color::lerp;

/// Scheme used when a configuration names no scheme or an unknown one.
pub const DEFAULT_COLOR_SCHEME: &str = "BuGn";

/// How a scheme's colors relate to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSchemeKind {
    /// Light-to-dark progression for ordered data.
    Sequential,
    /// Two hues diverging from a light midpoint.
    Diverging,
    /// Unordered, maximally distinct hues for categories.
    Qualitative,
}

/// A named palette.
#[derive(Clone, Copy, Debug)]
pub struct ColorScheme {
    /// Registry key.
    pub name: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Palette family.
    pub kind: ColorSchemeKind,
    colors: &'static [Color],
}

impl ColorScheme {
    /// Looks up a scheme by registry name.
    pub fn get(name: &str) -> Option<&'static Self> {
        SCHEMES.iter().find(|s| s.name == name)
    }

    /// Looks up a scheme by name, falling back to `default` and then to
    /// [`DEFAULT_COLOR_SCHEME`].
    pub fn get_or_default(name: Option<&str>, default: &str) -> &'static Self {
        if let Some(name) = name {
            if let Some(scheme) = Self::get(name) {
                return scheme;
            }
            log::debug!("unknown color scheme `{name}`, using `{default}`");
        }
        Self::get(default)
            .or_else(|| Self::get(DEFAULT_COLOR_SCHEME))
            .unwrap_or(&SCHEMES[0])
    }

    /// All registered schemes.
    pub fn all() -> &'static [Self] {
        SCHEMES
    }

    /// The palette as stored.
    pub fn palette(&self) -> &'static [Color] {
        self.colors
    }

    /// Returns exactly `count` colors, optionally reversed.
    pub fn colors(&self, count: usize, invert: bool) -> Vec<Color> {
        let mut out = match self.kind {
            ColorSchemeKind::Qualitative => self.distinct_colors(count),
            ColorSchemeKind::Sequential | ColorSchemeKind::Diverging => {
                self.gradient_colors(count)
            }
        };
        if invert {
            out.reverse();
        }
        out
    }

    fn distinct_colors(&self, count: usize) -> Vec<Color> {
        self.colors.iter().copied().cycle().take(count).collect()
    }

    fn gradient_colors(&self, count: usize) -> Vec<Color> {
        let palette = self.colors;
        match count {
            0 => Vec::new(),
            n if n == palette.len() => palette.to_vec(),
            1 => palette.get(palette.len() / 2).copied().into_iter().collect(),
            n => {
                let last = (palette.len() - 1) as f64;
                (0..n)
                    .map(|i| {
                        let pos = i as f64 / (n - 1) as f64 * last;
                        #[allow(
                            clippy::cast_possible_truncation,
                            clippy::cast_sign_loss,
                            reason = "pos is in [0, palette.len() - 1]"
                        )]
                        let lo = (pos as usize).min(palette.len() - 1);
                        let hi = (lo + 1).min(palette.len() - 1);
                        #[allow(
                            clippy::cast_possible_truncation,
                            reason = "interpolation weight is in [0, 1]"
                        )]
                        let t = (pos - lo as f64) as f32;
                        lerp(palette[lo], palette[hi], t)
                    })
                    .collect()
            }
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "each shift selects one 8-bit channel"
)]
const fn hex(rgb: u32) -> Color {
    Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

macro_rules! scheme {
    ($name:literal, $display:literal, $kind:ident, [$($rgb:literal),+ $(,)?]) => {
        ColorScheme {
            name: $name,
            display_name: $display,
            kind: ColorSchemeKind::$kind,
            colors: &[$(hex($rgb)),+],
        }
    };
}

static SCHEMES: &[ColorScheme] = &[
    scheme!("BuGn", "Blue-Green", Sequential, [
        0xf7fcfd, 0xe5f5f9, 0xccece6, 0x99d8c9, 0x66c2a4, 0x41ae76, 0x238b45, 0x006d2c, 0x00441b,
    ]),
    scheme!("YlGn", "Yellow-Green", Sequential, [
        0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d, 0x238443, 0x006837, 0x004529,
    ]),
    scheme!("YlOrRd", "Yellow-Orange-Red", Sequential, [
        0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026,
    ]),
    scheme!("OrRd", "Orange-Red", Sequential, [
        0xfff7ec, 0xfee8c8, 0xfdd49e, 0xfdbb84, 0xfc8d59, 0xef6548, 0xd7301f, 0xb30000, 0x7f0000,
    ]),
    scheme!("Blues", "Blues", Sequential, [
        0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c, 0x08306b,
    ]),
    scheme!("Greens", "Greens", Sequential, [
        0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
    ]),
    scheme!("Reds", "Reds", Sequential, [
        0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15, 0x67000d,
    ]),
    scheme!("Oranges", "Oranges", Sequential, [
        0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
    ]),
    scheme!("Purples", "Purples", Sequential, [
        0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
    ]),
    scheme!("Greys", "Greys", Sequential, [
        0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525, 0x000000,
    ]),
    scheme!("RdBu", "Red-Blue", Diverging, [
        0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de, 0x4393c3, 0x2166ac,
    ]),
    scheme!("PiYG", "Pink-Yellow-Green", Diverging, [
        0xc51b7d, 0xde77ae, 0xf1b6da, 0xfde0ef, 0xf7f7f7, 0xe6f5d0, 0xb8e186, 0x7fbc41, 0x4d9221,
    ]),
    scheme!("Set1", "Set 1", Qualitative, [
        0xe41a1c, 0x377eb8, 0x4daf4a, 0x984ea3, 0xff7f00, 0xffff33, 0xa65628, 0xf781bf, 0x999999,
    ]),
    scheme!("Dark2", "Dark 2", Qualitative, [
        0x1b9e77, 0xd95f02, 0x7570b3, 0xe7298a, 0x66a61e, 0xe6ab02, 0xa6761d, 0x666666,
    ]),
];

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec::Vec;

    use super::*;
    use crate::color::to_hex;

    fn hexes(colors: &[Color]) -> Vec<String> {
        colors.iter().copied().map(to_hex).collect()
    }

    #[test]
    fn registry_names_are_unique() {
        for (i, a) in SCHEMES.iter().enumerate() {
            for b in &SCHEMES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
        assert!(ColorScheme::get(DEFAULT_COLOR_SCHEME).is_some());
    }

    #[test]
    fn exact_palette_length_returns_palette() {
        let blues = ColorScheme::get("Blues").unwrap();
        assert_eq!(hexes(&blues.colors(9, false)), hexes(blues.palette()));
    }

    #[test]
    fn gradient_endpoints_are_preserved() {
        let blues = ColorScheme::get("Blues").unwrap();
        let five = hexes(&blues.colors(5, false));
        assert_eq!(five.len(), 5);
        assert_eq!(five[0], "#f7fbff");
        assert_eq!(five[2], "#6baed6");
        assert_eq!(five[4], "#08306b");
    }

    #[test]
    fn invert_reverses() {
        let blues = ColorScheme::get("Blues").unwrap();
        let mut forward = hexes(&blues.colors(4, false));
        forward.reverse();
        assert_eq!(forward, hexes(&blues.colors(4, true)));
    }

    #[test]
    fn qualitative_schemes_cycle() {
        let dark2 = ColorScheme::get("Dark2").unwrap();
        let colors = dark2.colors(10, false);
        assert_eq!(colors.len(), 10);
        assert_eq!(to_hex(colors[8]), to_hex(colors[0]));
        assert!(dark2.colors(0, false).is_empty());
    }

    #[test]
    fn unknown_scheme_falls_back() {
        let scheme = ColorScheme::get_or_default(Some("NoSuchScheme"), "Reds");
        assert_eq!(scheme.name, "Reds");
        let scheme = ColorScheme::get_or_default(Some("NoSuchScheme"), "AlsoMissing");
        assert_eq!(scheme.name, DEFAULT_COLOR_SCHEME);
        let scheme = ColorScheme::get_or_default(None, "Dark2");
        assert_eq!(scheme.name, "Dark2");
    }
}
