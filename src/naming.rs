//! Output names for generated supercuts.
//!
//! Shows are expected to follow a `<Show>/Season N/<episode files>` layout.
//! The show name is the folder right above the season folder; episodes are
//! recognised by an `S01E02` style code in the file name.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path};

static EPISODE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"S\d{1,2}E\d{1,2}").unwrap());

const SEASON_MARKER: &str = "Season";
const SUPERCUT_LABEL: &str = "supercut";

/// Show name for `path`: the component before the first one containing "Season",
/// otherwise the final component
pub fn top_level_name(path: &Path) -> String {
    let components: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if let Some(index) = components.iter().position(|c| c.contains(SEASON_MARKER)) {
        if index > 0 {
            return components[index - 1].clone();
        }
    }

    components.last().cloned().unwrap_or_default()
}

/// The first episode code in `stem`, e.g. `S02E05`
pub fn episode_code(stem: &str) -> Option<&str> {
    EPISODE_CODE.find(stem).map(|m| m.as_str())
}

/// `Show.S02E05.1080p` becomes `Show.S02E05 supercut.<ext>`
pub fn episode_output_name(stem: &str, extension: &str) -> Option<String> {
    let code = episode_code(stem)?;
    // The first occurrence of the matched text is the leftmost match itself
    let end = stem.find(code)? + code.len();
    Some(format!("{} {}.{}", &stem[..end], SUPERCUT_LABEL, extension))
}

pub fn fallback_output_name(show: &str, extension: &str) -> String {
    format!("{} {}.{}", show, SUPERCUT_LABEL, extension)
}

/// Name of the single output produced in combine mode
pub fn combined_output_name(root: &Path, search: &str, extension: &str) -> String {
    format!(
        "{} {} {}.{}",
        top_level_name(root),
        file_name_safe(search),
        SUPERCUT_LABEL,
        extension
    )
}

/// Path separators in free text would turn a file name into nested directories
fn file_name_safe(text: &str) -> String {
    text.replace(['/', '\\'], "-")
}
