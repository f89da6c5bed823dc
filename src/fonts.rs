use anyhow::anyhow;
use std::path::PathBuf;

/// Codepoints the report font must map to real glyphs: Latin plus the
/// Kazakh Cyrillic letters outside the basic Russian set.
pub const REQUIRED_SAMPLE: [char; 12] = [
    'A', 'z', '0', 'Я', 'ж', 'Қ', 'ә', 'Ң', 'ғ', 'Ү', 'ұ', 'і',
];

/// Explicit font policy for the PDF artifact: a primary path from the
/// environment plus a fixed fallback list, each candidate accepted only if
/// its character map actually covers the working script.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub primary: Option<PathBuf>,
    pub fallbacks: Vec<PathBuf>,
    pub required: Vec<char>,
}

impl FontConfig {
    pub fn from_env() -> Self {
        Self {
            primary: std::env::var_os("GPAD_REPORT_FONT").map(PathBuf::from),
            fallbacks: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            required: REQUIRED_SAMPLE.to_vec(),
        }
    }

    /// First candidate that exists and covers the required codepoints.
    pub fn resolve(&self) -> anyhow::Result<PathBuf> {
        let candidates = self.primary.iter().chain(self.fallbacks.iter());
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            if covers(&bytes, &self.required) {
                return Ok(path.clone());
            }
        }
        Err(anyhow!(
            "no report font with Kazakh Cyrillic coverage found; \
             set GPAD_REPORT_FONT to a covering TTF"
        ))
    }
}

/// True when every required codepoint maps to a non-zero glyph in the font's
/// best `cmap` subtable. Malformed fonts count as not covering.
pub fn covers(font: &[u8], required: &[char]) -> bool {
    let Some(sub) = best_cmap_subtable(font) else {
        return false;
    };
    required
        .iter()
        .all(|&ch| glyph_mapped(font, sub, ch as u32).unwrap_or(false))
}

fn u16_at(b: &[u8], off: usize) -> Option<u16> {
    Some(u16::from_be_bytes([*b.get(off)?, *b.get(off + 1)?]))
}

fn u32_at(b: &[u8], off: usize) -> Option<u32> {
    Some(u32::from_be_bytes([
        *b.get(off)?,
        *b.get(off + 1)?,
        *b.get(off + 2)?,
        *b.get(off + 3)?,
    ]))
}

/// Walk the sfnt table directory to the `cmap` table, then pick the best
/// encoding subtable (Windows UCS-4, then Unicode, then Windows BMP).
fn best_cmap_subtable(font: &[u8]) -> Option<usize> {
    let num_tables = u16_at(font, 4)? as usize;
    let mut cmap: Option<usize> = None;
    for i in 0..num_tables {
        let rec = 12 + 16 * i;
        if font.get(rec..rec + 4)? == b"cmap" {
            cmap = Some(u32_at(font, rec + 8)? as usize);
            break;
        }
    }
    let cmap = cmap?;

    let sub_count = u16_at(font, cmap + 2)? as usize;
    let mut best: Option<(u8, usize)> = None;
    for i in 0..sub_count {
        let rec = cmap + 4 + 8 * i;
        let platform = u16_at(font, rec)?;
        let encoding = u16_at(font, rec + 2)?;
        let offset = cmap + u32_at(font, rec + 4)? as usize;
        let rank: u8 = match (platform, encoding) {
            (3, 10) => 4,
            (0, 4) | (0, 6) => 4,
            (3, 1) => 3,
            (0, _) => 2,
            _ => 1,
        };
        if best.map(|(r, _)| rank > r).unwrap_or(true) {
            best = Some((rank, offset));
        }
    }
    best.map(|(_, off)| off)
}

fn glyph_mapped(font: &[u8], sub: usize, c: u32) -> Option<bool> {
    match u16_at(font, sub)? {
        4 => glyph_mapped_format4(font, sub, c),
        12 => glyph_mapped_format12(font, sub, c),
        _ => Some(false),
    }
}

fn glyph_mapped_format4(font: &[u8], sub: usize, c: u32) -> Option<bool> {
    if c > 0xFFFF {
        return Some(false);
    }
    let c = c as u16;
    let seg_count = (u16_at(font, sub + 6)? / 2) as usize;
    let end_base = sub + 14;
    let start_base = end_base + seg_count * 2 + 2; // +2 skips reservedPad
    let delta_base = start_base + seg_count * 2;
    let range_base = delta_base + seg_count * 2;

    for i in 0..seg_count {
        let end = u16_at(font, end_base + 2 * i)?;
        if c > end {
            continue;
        }
        let start = u16_at(font, start_base + 2 * i)?;
        if c < start {
            return Some(false); // segments are sorted by end code
        }
        let delta = u16_at(font, delta_base + 2 * i)?;
        let range_offset = u16_at(font, range_base + 2 * i)?;
        let glyph = if range_offset == 0 {
            c.wrapping_add(delta)
        } else {
            let addr = range_base + 2 * i + range_offset as usize + 2 * (c - start) as usize;
            let raw = u16_at(font, addr)?;
            if raw == 0 {
                return Some(false);
            }
            raw.wrapping_add(delta)
        };
        return Some(glyph != 0);
    }
    Some(false)
}

fn glyph_mapped_format12(font: &[u8], sub: usize, c: u32) -> Option<bool> {
    let num_groups = u32_at(font, sub + 12)? as usize;
    for i in 0..num_groups {
        let group = sub + 16 + 12 * i;
        let start = u32_at(font, group)?;
        if c < start {
            return Some(false); // groups are sorted by start code
        }
        let end = u32_at(font, group + 4)?;
        if c <= end {
            let start_glyph = u32_at(font, group + 8)?;
            return Some(start_glyph + (c - start) != 0);
        }
    }
    Some(false)
}

#[allow(dead_code)]
pub fn first_missing(font: &[u8], required: &[char]) -> Option<char> {
    let sub = best_cmap_subtable(font)?;
    required
        .iter()
        .copied()
        .find(|&ch| !glyph_mapped(font, sub, ch as u32).unwrap_or(false))
}
