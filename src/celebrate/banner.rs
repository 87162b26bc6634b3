use figlet_rs::FIGfont;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

/// The font that ships inside figlet-rs and is always available.
pub const BUNDLED_FONT: &str = "standard";

/// FIGlet fonts found on the system that render without panicking.
/// Maps lowercased font name (without .flf) to full file path.
static SYSTEM_FONTS: OnceCell<BTreeMap<String, String>> = OnceCell::new();

const FONT_DIRS: &[&str] =
    &["/opt/homebrew/share/figlet/fonts", "/usr/local/share/figlet", "/usr/share/figlet", "/usr/share/figlet/fonts"];

fn font_renders(path: &str) -> bool {
    // figlet-rs panics on some malformed fonts
    let loaded = catch_unwind(AssertUnwindSafe(|| FIGfont::from_file(path)));
    let Ok(Ok(font)) = loaded else {
        return false;
    };
    let converted = catch_unwind(AssertUnwindSafe(|| font.convert("Winner")));
    matches!(converted, Ok(Some(_)))
}

fn scan_system_fonts() -> BTreeMap<String, String> {
    let mut fonts = BTreeMap::new();
    for dir in FONT_DIRS.iter().map(Path::new).filter(|dir| dir.is_dir()) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.extension().map_or(true, |ext| ext != "flf") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let name = stem.to_lowercase();
            if fonts.contains_key(&name) {
                continue;
            }
            let path = path.to_string_lossy().to_string();
            if font_renders(&path) {
                fonts.insert(name, path);
            } else {
                log::debug!("skipping broken FIGlet font {path}");
            }
        }
    }
    log::debug!("found {} usable system FIGlet fonts", fonts.len());
    fonts
}

fn system_fonts() -> &'static BTreeMap<String, String> {
    SYSTEM_FONTS.get_or_init(scan_system_fonts)
}

/// Every font name [BannerGenerator::new] accepts, sorted.
pub fn available_fonts() -> Vec<String> {
    let mut names: Vec<String> = system_fonts().keys().cloned().collect();
    if !names.iter().any(|name| name == BUNDLED_FONT) {
        names.push(BUNDLED_FONT.to_string());
        names.sort();
    }
    names
}

/// Writes the winner's name as ASCII art.
pub struct BannerGenerator {
    font: FIGfont,
}

impl BannerGenerator {
    pub fn new(font_name: &str) -> Result<Self, BannerError> {
        let font = Self::load_font(font_name)?;
        Ok(Self { font })
    }

    /// Renders `text`, dropping trailing whitespace and blank rows.
    pub fn generate(&self, text: &str) -> Result<Vec<String>, BannerError> {
        let converted = catch_unwind(AssertUnwindSafe(|| self.font.convert(text)));
        let Ok(Some(figure)) = converted else {
            return Err(BannerError::ConversionFailed(text.to_string()));
        };
        let mut lines: Vec<String> = figure.to_string().lines().map(|line| line.trim_end().to_string()).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        while lines.first().is_some_and(|line| line.is_empty()) {
            lines.remove(0);
        }
        if lines.is_empty() {
            return Err(BannerError::ConversionFailed(text.to_string()));
        }
        Ok(lines)
    }

    fn load_font(font_name: &str) -> Result<FIGfont, BannerError> {
        let name = font_name.to_lowercase();
        let loaded = if name == BUNDLED_FONT {
            catch_unwind(FIGfont::standard)
        } else {
            let Some(path) = system_fonts().get(&name) else {
                return Err(BannerError::FontUnavailable(font_name.to_string()));
            };
            catch_unwind(AssertUnwindSafe(|| FIGfont::from_file(path)))
        };
        match loaded {
            Ok(Ok(font)) => Ok(font),
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(font_name.to_string(), e)),
            Err(_) => Err(BannerError::FontLoadFailed(font_name.to_string(), "panic during font loading".into())),
        }
    }
}

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("failed to load font '{0}': {1}")]
    FontLoadFailed(String, String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),

    #[error("FIGlet font '{0}' is not available")]
    FontUnavailable(String),
}
