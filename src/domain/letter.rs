//! Collected letters, normalized once at the queue boundary.
//!
//! The typing scene hands over either bare strings (`"a"`) or objects
//! (`{"char": "a", "color": "#6ee7b7", "tier": "slow"}`). Both become a
//! [`Letter`] here so the physics loop never has to look at raw shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLACEHOLDER_GLYPH: char = '?';
pub const DEFAULT_COLOR: &str = "#f8fafc";
const DEFAULT_RGB: u32 = 0xF8FAFC;

/// Fall-speed tier the letter was caught at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Slow,
    Medium,
    Fast,
}

impl Tier {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "slow" => Some(Tier::Slow),
            "medium" => Some(Tier::Medium),
            "fast" => Some(Tier::Fast),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Slow => "slow",
            Tier::Medium => "medium",
            Tier::Fast => "fast",
        }
    }

    /// Color the typing scene paints this tier with
    pub fn color(self) -> &'static str {
        match self {
            Tier::Slow => "#6ee7b7",
            Tier::Medium => "#fbbf24",
            Tier::Fast => "#f87171",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Letter {
    glyph: char,
    color: String,
    tier: Option<Tier>,
}

impl Letter {
    /// Build a letter from loose parts. Empty text gives the placeholder
    /// glyph; a missing color borrows the tier color, then the default.
    pub fn new(text: &str, color: Option<&str>, tier: Option<&str>) -> Self {
        let glyph = text
            .chars()
            .flat_map(char::to_uppercase)
            .next()
            .unwrap_or(PLACEHOLDER_GLYPH);
        let tier = tier.and_then(Tier::from_name);
        let color = color
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .or_else(|| tier.map(|t| t.color().to_string()))
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        Self { glyph, color, tier }
    }

    pub fn placeholder() -> Self {
        Self {
            glyph: PLACEHOLDER_GLYPH,
            color: DEFAULT_COLOR.to_string(),
            tier: None,
        }
    }

    /// Normalize one queue entry. Anything that is neither a string nor an
    /// object becomes the placeholder.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<RawLetter>(value) {
            Ok(raw) => raw.into(),
            Err(_) => {
                log::warn!("unrecognized letter payload, using placeholder");
                Self::placeholder()
            }
        }
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// Color as `0xRRGGBB`; unparseable colors map to the default white
    pub fn color_rgb(&self) -> u32 {
        parse_hex_color(&self.color).unwrap_or(DEFAULT_RGB)
    }
}

impl From<char> for Letter {
    fn from(c: char) -> Self {
        Letter::new(c.encode_utf8(&mut [0u8; 4]), None, None)
    }
}

/// Parse a JSON array of letters.
pub fn parse_letters(json: &str) -> Result<Vec<Letter>, String> {
    let items: Vec<Value> = serde_json::from_str(json).map_err(|e| e.to_string())?;
    Ok(items.into_iter().map(Letter::from_value).collect())
}

/// [`parse_letters`] that treats an unreadable document as "no letters".
pub fn parse_letters_lossy(json: &str) -> Vec<Letter> {
    if json.trim().is_empty() {
        return Vec::new();
    }
    parse_letters(json).unwrap_or_else(|e| {
        log::warn!("letter list unreadable ({}), starting empty", e);
        Vec::new()
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLetter {
    Plain(String),
    Tagged {
        #[serde(default, rename = "char")]
        glyph: Option<Value>,
        #[serde(default)]
        color: Option<Value>,
        #[serde(default)]
        tier: Option<Value>,
    },
}

impl From<RawLetter> for Letter {
    fn from(raw: RawLetter) -> Self {
        match raw {
            RawLetter::Plain(text) => Letter::new(&text, None, None),
            RawLetter::Tagged { glyph, color, tier } => Letter::new(
                glyph.as_ref().and_then(Value::as_str).unwrap_or(""),
                color.as_ref().and_then(Value::as_str),
                tier.as_ref().and_then(Value::as_str),
            ),
        }
    }
}

fn parse_hex_color(color: &str) -> Option<u32> {
    let hex = color.trim().strip_prefix('#')?;
    match hex.len() {
        6 => u32::from_str_radix(hex, 16).ok(),
        3 => {
            let short = u32::from_str_radix(hex, 16).ok()?;
            let r = (short >> 8) & 0xF;
            let g = (short >> 4) & 0xF;
            let b = short & 0xF;
            Some((r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_are_uppercased_with_default_color() {
        let letters = parse_letters(r#"["a", "j"]"#).unwrap();
        assert_eq!(letters[0].glyph(), 'A');
        assert_eq!(letters[1].glyph(), 'J');
        assert_eq!(letters[0].color(), DEFAULT_COLOR);
        assert_eq!(letters[0].tier(), None);
    }

    #[test]
    fn objects_keep_color_and_tier() {
        let letters =
            parse_letters(r##"[{"char": "k", "color": "#123456", "tier": "fast"}]"##).unwrap();
        assert_eq!(letters[0].glyph(), 'K');
        assert_eq!(letters[0].color(), "#123456");
        assert_eq!(letters[0].tier(), Some(Tier::Fast));
        assert_eq!(letters[0].color_rgb(), 0x123456);
    }

    #[test]
    fn missing_fields_fall_back() {
        let letters = parse_letters(
            r#"[{"color": ""}, {"char": "", "tier": "medium"}, {"char": 7, "tier": "warp"}]"#,
        )
        .unwrap();
        assert_eq!(letters[0], Letter::placeholder());
        assert_eq!(letters[1].glyph(), PLACEHOLDER_GLYPH);
        assert_eq!(letters[1].color(), Tier::Medium.color());
        assert_eq!(letters[2].glyph(), PLACEHOLDER_GLYPH);
        assert_eq!(letters[2].tier(), None);
    }

    #[test]
    fn non_letter_values_become_placeholders() {
        let letters = parse_letters("[3, null, true]").unwrap();
        assert_eq!(letters.len(), 3);
        assert!(letters.iter().all(|l| *l == Letter::placeholder()));
    }

    #[test]
    fn unreadable_list_is_empty_when_lossy() {
        assert!(parse_letters("{").is_err());
        assert!(parse_letters_lossy("{").is_empty());
        assert!(parse_letters_lossy("").is_empty());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#fff"), Some(0xFFFFFF));
        assert_eq!(parse_hex_color("#6ee7b7"), Some(0x6EE7B7));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(Letter::new("a", Some("red"), None).color_rgb(), DEFAULT_RGB);
    }

    #[test]
    fn from_char() {
        assert_eq!(Letter::from(';').glyph(), ';');
        assert_eq!(Letter::from('q').glyph(), 'Q');
    }
}
