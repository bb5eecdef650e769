//! Font lookup, metrics and PDF font objects.
//!
//! Text is always encoded as WinAnsi single bytes, so every font exposes
//! widths for codes 32 to 255 only.

use crate::metrics::{STANDARD_FONTS, StandardMetrics};
use lopdf::{Dictionary, Object, Stream, dictionary};
use spotdeck_render_core::RenderError;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Used whenever a requested family is unknown.
pub const FALLBACK_FONT: &str = "Helvetica-Bold";

const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 255;

/// Encodes text as WinAnsi bytes; characters outside Latin-1 become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

/// A parsed TrueType font, ready for measuring and embedding.
pub struct TrueTypeFont {
    pub postscript_name: String,
    data: Vec<u8>,
    /// Advance widths in 1/1000 em for codes `FIRST_CHAR..=LAST_CHAR`.
    widths: Vec<u16>,
    ascent: i64,
    descent: i64,
    cap_height: i64,
    bbox: [i64; 4],
}

impl TrueTypeFont {
    pub fn parse(fallback_name: &str, data: Vec<u8>) -> Result<Self, RenderError> {
        let (postscript_name, widths, ascent, descent, cap_height, bbox) = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| RenderError::Font(format!("{}: {}", fallback_name, e)))?;
            let scale = 1000.0 / face.units_per_em() as f32;
            let to_pdf = |v: i16| (v as f32 * scale).round() as i64;

            let postscript_name = face
                .names()
                .into_iter()
                .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
                .and_then(|n| n.to_string())
                .unwrap_or_else(|| fallback_name.replace(' ', ""));

            let missing = face
                .glyph_hor_advance(ttf_parser::GlyphId(0))
                .unwrap_or(0);
            let widths = (FIRST_CHAR..=LAST_CHAR)
                .map(|code| {
                    let advance = char::from_u32(code as u32)
                        .and_then(|c| face.glyph_index(c))
                        .and_then(|g| face.glyph_hor_advance(g))
                        .unwrap_or(missing);
                    (advance as f32 * scale).round() as u16
                })
                .collect();

            let rect = face.global_bounding_box();
            (
                postscript_name,
                widths,
                to_pdf(face.ascender()),
                to_pdf(face.descender()),
                to_pdf(face.capital_height().unwrap_or(face.ascender())),
                [
                    to_pdf(rect.x_min),
                    to_pdf(rect.y_min),
                    to_pdf(rect.x_max),
                    to_pdf(rect.y_max),
                ],
            )
        };

        Ok(Self {
            postscript_name,
            data,
            widths,
            ascent,
            descent,
            cap_height,
            bbox,
        })
    }

    fn width(&self, code: u8) -> u16 {
        if code < FIRST_CHAR {
            0
        } else {
            self.widths[(code - FIRST_CHAR) as usize]
        }
    }
}

#[derive(Clone)]
pub enum FontKind {
    Standard(&'static StandardMetrics),
    TrueType(Arc<TrueTypeFont>),
}

impl FontKind {
    pub fn base_font(&self) -> &str {
        match self {
            FontKind::Standard(m) => m.name,
            FontKind::TrueType(t) => &t.postscript_name,
        }
    }

    /// Width of WinAnsi-encoded text in 1/1000 em.
    pub fn units_width(&self, encoded: &[u8]) -> u32 {
        encoded
            .iter()
            .map(|&b| match self {
                FontKind::Standard(m) => m.width(b) as u32,
                FontKind::TrueType(t) => t.width(b) as u32,
            })
            .sum()
    }

    /// Builds the font dictionary. Embedded fonts add their file and
    /// descriptor through `add_object`, which returns the new object's id.
    pub fn to_pdf<F>(&self, mut add_object: F) -> Dictionary
    where
        F: FnMut(Object) -> lopdf::ObjectId,
    {
        match self {
            FontKind::Standard(m) => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => m.name,
                "Encoding" => "WinAnsiEncoding",
            },
            FontKind::TrueType(t) => {
                let file = Stream::new(
                    dictionary! { "Length1" => Object::Integer(t.data.len() as i64) },
                    t.data.clone(),
                );
                let file_id = add_object(Object::Stream(file));
                let descriptor = dictionary! {
                    "Type" => "FontDescriptor",
                    "FontName" => Object::Name(t.postscript_name.as_bytes().to_vec()),
                    "Flags" => Object::Integer(32),
                    "FontBBox" => t.bbox.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
                    "ItalicAngle" => Object::Integer(0),
                    "Ascent" => Object::Integer(t.ascent),
                    "Descent" => Object::Integer(t.descent),
                    "CapHeight" => Object::Integer(t.cap_height),
                    "StemV" => Object::Integer(80),
                    "FontFile2" => file_id,
                };
                let descriptor_id = add_object(Object::Dictionary(descriptor));
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "TrueType",
                    "BaseFont" => Object::Name(t.postscript_name.as_bytes().to_vec()),
                    "FirstChar" => Object::Integer(FIRST_CHAR as i64),
                    "LastChar" => Object::Integer(LAST_CHAR as i64),
                    "Widths" => t.widths.iter().map(|w| Object::Integer(*w as i64)).collect::<Vec<_>>(),
                    "FontDescriptor" => descriptor_id,
                    "Encoding" => "WinAnsiEncoding",
                }
            }
        }
    }
}

/// Fonts available to a document, keyed by the name symbols refer to.
#[derive(Clone)]
pub struct FontLibrary {
    fonts: BTreeMap<String, FontKind>,
}

impl Default for FontLibrary {
    fn default() -> Self {
        let fonts = STANDARD_FONTS
            .iter()
            .map(|m| (m.name.to_string(), FontKind::Standard(m)))
            .collect();
        Self { fonts }
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers TrueType data under `name`, replacing any font of that name.
    pub fn register_truetype(&mut self, name: &str, data: Vec<u8>) -> Result<(), RenderError> {
        let font = TrueTypeFont::parse(name, data)?;
        log::debug!(
            "Registered TrueType font '{}' ({})",
            name,
            font.postscript_name
        );
        self.fonts
            .insert(name.to_string(), FontKind::TrueType(Arc::new(font)));
        Ok(())
    }

    pub fn register_truetype_file(&mut self, name: &str, path: &Path) -> Result<(), RenderError> {
        let data = std::fs::read(path).map_err(|e| {
            RenderError::Font(format!("cannot read '{}': {}", path.display(), e))
        })?;
        self.register_truetype(name, data)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FontKind> {
        self.fonts.get(name)
    }

    /// Registered name for `family`: exact match, then case-insensitive,
    /// then the fallback font.
    pub fn resolve(&self, family: &str) -> &str {
        if let Some((name, _)) = self.fonts.get_key_value(family) {
            return name;
        }
        if let Some(name) = self
            .fonts
            .keys()
            .find(|name| name.eq_ignore_ascii_case(family))
        {
            return name;
        }
        log::debug!(
            "Font '{}' not registered, falling back to {}",
            family,
            FALLBACK_FONT
        );
        FALLBACK_FONT
    }

    /// Width in points of `text` set in the registered font `name`.
    pub fn text_width(&self, name: &str, text: &str, size: f32) -> f32 {
        match self.get(name).or_else(|| self.get(FALLBACK_FONT)) {
            Some(font) => font.units_width(&to_win_ansi(text)) as f32 * size / 1000.0,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi_replaces_unencodable() {
        assert_eq!(to_win_ansi("Aé"), vec![b'A', 0xE9]);
        assert_eq!(to_win_ansi("漢\u{1F600}"), b"??".to_vec());
        assert_eq!(to_win_ansi("\u{85}"), b"?".to_vec());
    }

    #[test]
    fn test_resolves_standard_fonts_case_insensitively() {
        let fonts = FontLibrary::new();
        assert_eq!(fonts.resolve("Times-Roman"), "Times-Roman");
        assert_eq!(fonts.resolve("courier"), "Courier");
        assert_eq!(fonts.resolve("Comic Sans"), FALLBACK_FONT);
    }

    #[test]
    fn test_text_width_uses_metrics() {
        let fonts = FontLibrary::new();
        // "AB" in Helvetica-Bold: 722 + 722.
        assert!((fonts.text_width("Helvetica-Bold", "AB", 10.0) - 14.44).abs() < 1e-4);
        assert!((fonts.text_width("Courier", "abc", 10.0) - 18.0).abs() < 1e-4);
        // Unknown names measure with the fallback.
        assert_eq!(
            fonts.text_width("Nope", "AB", 10.0),
            fonts.text_width(FALLBACK_FONT, "AB", 10.0)
        );
    }

    #[test]
    fn test_invalid_truetype_is_rejected() {
        let mut fonts = FontLibrary::new();
        let result = fonts.register_truetype("Broken", vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(RenderError::Font(_))));
        assert!(!fonts.contains("Broken"));
    }

    #[test]
    fn test_standard_font_dictionary() {
        let fonts = FontLibrary::new();
        let dict = fonts
            .get("Helvetica")
            .unwrap()
            .to_pdf(|_| unreachable!("standard fonts embed nothing"));
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
        assert_eq!(dict.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica");
    }
}
