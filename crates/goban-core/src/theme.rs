#![forbid(unsafe_code)]

//! Board palette and the process-wide stone texture cache.
//!
//! Colors are plain CSS color strings so hosts can forward them to either a
//! style sheet or a canvas fill without conversion. Textures are opaque host
//! handles: the engine never rasterizes images, it only remembers which
//! handle goes with which stone at which scale.

use std::sync::{Mutex, OnceLock};

use ahash::AHashMap;

/// Opaque handle to a host-side baked stone texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Board palette plus optional stone texture handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Board surface fill.
    pub background_color: String,
    /// Grid lines and hoshi points.
    pub foreground_color: String,
    pub black_stone_color: String,
    /// Marker/label color on black stones.
    pub black_text_color: String,
    pub white_stone_color: String,
    /// Marker/label color on white stones.
    pub white_text_color: String,
    /// Baked black stone image; flat-color fallback when absent.
    pub black_stone_texture: Option<TextureId>,
    /// Baked white stone image; flat-color fallback when absent.
    pub white_stone_texture: Option<TextureId>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#F1B458".into(),
            foreground_color: "#5E2E0C".into(),
            black_stone_color: "#222".into(),
            black_text_color: "#eee".into(),
            white_stone_color: "#eee".into(),
            white_text_color: "#222".into(),
            black_stone_texture: None,
            white_stone_texture: None,
        }
    }
}

impl Theme {
    /// Stone fill color for a sign value; empty intersections fall back to
    /// the board background.
    #[must_use]
    pub fn stone_color(&self, sign: crate::sign::Sign) -> &str {
        match sign {
            crate::sign::Sign::Black => &self.black_stone_color,
            crate::sign::Sign::White => &self.white_stone_color,
            crate::sign::Sign::Empty => &self.background_color,
        }
    }

    /// Text color readable on a stone of the given sign.
    #[must_use]
    pub fn stone_text_color(&self, sign: crate::sign::Sign) -> &str {
        match sign {
            crate::sign::Sign::Black => &self.black_text_color,
            crate::sign::Sign::White => &self.white_text_color,
            crate::sign::Sign::Empty => &self.foreground_color,
        }
    }
}

/// Source of resolved themes.
///
/// Hosts that pull colors from CSS custom properties or user settings
/// implement this; the engine only ever sees the resolved value struct.
/// Resolution must not fail: a missing token or image falls back to the
/// built-in palette and flat-color stones.
pub trait ThemeProvider {
    fn resolve(&self) -> Theme;
}

/// The built-in palette with no stone textures.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTheme;

impl ThemeProvider for DefaultTheme {
    fn resolve(&self) -> Theme {
        Theme::default()
    }
}

/// Baked stone textures for one (vertex size, pixel ratio) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoneTextures {
    pub black: TextureId,
    pub white: TextureId,
}

type TextureCache = Mutex<AHashMap<(u32, u32), StoneTextures>>;

fn texture_cache() -> &'static TextureCache {
    static CACHE: OnceLock<TextureCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(AHashMap::new()))
}

/// Quantize a device pixel ratio to hundredths so float ratios make stable
/// cache keys.
#[inline]
#[must_use]
pub fn dpr_key(dpr: f32) -> u32 {
    (dpr.max(0.0) * 100.0).round() as u32
}

/// Record baked textures for a scale, keeping any earlier entry. Boards at
/// the same scale share one baked set per process; first writer wins so
/// concurrent boards do not thrash each other's bakes.
pub fn register_stone_textures(vertex_size: u32, dpr: f32, textures: StoneTextures) {
    let mut cache = match texture_cache().lock() {
        Ok(cache) => cache,
        // A panicking baker leaves the map intact; keep serving it.
        Err(poisoned) => poisoned.into_inner(),
    };
    cache.entry((vertex_size, dpr_key(dpr))).or_insert(textures);
}

/// Look up baked textures for a scale.
#[must_use]
pub fn cached_stone_textures(vertex_size: u32, dpr: f32) -> Option<StoneTextures> {
    let cache = match texture_cache().lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache.get(&(vertex_size, dpr_key(dpr))).copied()
}
