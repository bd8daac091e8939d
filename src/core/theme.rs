use fnv::FnvHashMap;
use glam::Vec3;

/// A named color palette applied to every themed scene object at once.
///
/// Scene colors are 24-bit sRGB hex values; `thumb` and `accent` are CSS
/// colors used only by the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub thumb: [&'static str; 2],
    pub background: u32,
    pub plane: u32,
    pub orb: u32,
    pub emissive: u32,
    pub rim: u32,
    pub accent: &'static str,
}

pub const THEMES: &[Theme] = &[
    Theme {
        id: "forest",
        name: "Forest Glade",
        thumb: ["#0b3d2e", "#38d39f"],
        background: 0x07110e,
        plane: 0x0a2017,
        orb: 0xff3b30,
        emissive: 0x660000,
        rim: 0xff3b30,
        accent: "#0b3d2e",
    },
    Theme {
        id: "beach",
        name: "Sunset Beach",
        thumb: ["#ffb86b", "#6c5ce7"],
        background: 0x0b0b12,
        plane: 0x130f1a,
        orb: 0xff3b30,
        emissive: 0x660000,
        rim: 0xff3b30,
        accent: "#ffb86b",
    },
    Theme {
        id: "mountain",
        name: "Mountain Peak",
        thumb: ["#9ecbff", "#2f62ff"],
        background: 0x070b14,
        plane: 0x0b1224,
        orb: 0xff3b30,
        emissive: 0x660000,
        rim: 0xff3b30,
        accent: "#2f62ff",
    },
    Theme {
        id: "night",
        name: "Night Sky",
        thumb: ["#12123a", "#ff3b30"],
        background: 0x000010,
        plane: 0x050515,
        orb: 0xffffff,
        emissive: 0x330000,
        rim: 0xff3b30,
        accent: "#12123a",
    },
    Theme {
        id: "minimal",
        name: "Minimal",
        thumb: ["#f3f4f6", "#e5e7eb"],
        background: 0x000000,
        plane: 0x090909,
        orb: 0xff3b30,
        emissive: 0x660000,
        rim: 0xff3b30,
        accent: "#111827",
    },
];

#[inline]
pub fn list_themes() -> &'static [Theme] {
    THEMES
}

/// Decode a 24-bit sRGB hex color into linear RGB.
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// CSS background for a gallery thumbnail: a soft highlight of the second
/// stop over a diagonal gradient of both.
pub fn thumb_css(theme: &Theme) -> String {
    let [a, b] = theme.thumb;
    format!(
        "radial-gradient(120px 80px at 35% 30%, {b}55, transparent 60%), linear-gradient(135deg, {a}, {b})"
    )
}

/// The static catalog plus a pointer to the current entry.
pub struct ThemeRegistry {
    by_id: FnvHashMap<&'static str, usize>,
    current: usize,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    pub fn new() -> Self {
        let by_id = THEMES.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        Self { by_id, current: 0 }
    }

    /// Index of `id` in the catalog, or 0 when unknown.
    pub fn resolve(&self, id: &str) -> usize {
        match self.by_id.get(id) {
            Some(&i) => i,
            None => {
                log::warn!("[theme] unknown theme id {:?}; using {}", id, THEMES[0].id);
                0
            }
        }
    }

    pub fn select(&mut self, id: &str) -> &'static Theme {
        self.current = self.resolve(id);
        &THEMES[self.current]
    }

    pub fn select_index(&mut self, index: usize) -> Option<&'static Theme> {
        let theme = THEMES.get(index)?;
        self.current = index;
        Some(theme)
    }

    #[inline]
    pub fn current(&self) -> &'static Theme {
        &THEMES[self.current]
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn is_current(&self, id: &str) -> bool {
        self.current().id == id
    }
}
