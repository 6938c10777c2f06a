// i18n.rs
//
// Lightweight runtime i18n:
// - Strings live in either:
//   A) assets/i18n/<lang>.json
//   B) assets/i18n.json (single file, format: { "<lang>": { "key": "value" } })
// - Load order: selected lang -> English table compiled into the binary
// - Lookup: tr("key") / tr_with("key", [("name", "...")]) with {name} placeholders

use once_cell::sync::{Lazy, OnceCell};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[cfg(test)]
#[path = "i18n_test.rs"]
mod i18n_test;

const BUILTIN_EN: &str = include_str!("../assets/i18n/en.json");

static BUILTIN: Lazy<HashMap<String, String>> = Lazy::new(|| {
    serde_json::from_str(BUILTIN_EN).unwrap_or_else(|e| {
        log::error!("built-in string table is malformed: {e}");
        HashMap::new()
    })
});

#[derive(Debug, Clone)]
pub struct I18n {
    pub lang: String,
    map: HashMap<String, String>,
}

static I18N: OnceCell<RwLock<I18n>> = OnceCell::new();

fn load_json_map(path: &Path) -> Option<HashMap<String, String>> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn load_multi_lang_json(path: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let text = std::fs::read_to_string(path).ok()?;
    let mut all: HashMap<String, HashMap<String, String>> = serde_json::from_str(&text).ok()?;
    all.remove(lang)
}

/// First existing `assets/<rel>` next to the executable, then under the working directory.
fn find_asset(rel: &Path) -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    exe_dir
        .into_iter()
        .chain(std::iter::once(PathBuf::new()))
        .map(|dir| dir.join("assets").join(rel))
        .find(|p| p.exists())
}

fn load_lang(lang: &str) -> HashMap<String, String> {
    let per_lang = Path::new("i18n").join(format!("{lang}.json"));
    if let Some(m) = find_asset(&per_lang).and_then(|p| load_json_map(&p)) {
        return m;
    }
    if let Some(m) = find_asset(Path::new("i18n.json")).and_then(|p| load_multi_lang_json(&p, lang)) {
        return m;
    }
    if lang != "en" {
        log::warn!("no string table for '{lang}', using English");
    }
    HashMap::new()
}

/// Initialize global i18n. Safe to call multiple times; later calls replace the active table.
pub fn init(lang: impl Into<String>) {
    let lang = lang.into();
    let map = load_lang(&lang);
    let i = I18n { lang, map };
    log::debug!("language '{}', {} strings", i.lang, i.map.len());

    if let Some(lock) = I18N.get() {
        if let Ok(mut w) = lock.write() {
            *w = i;
        }
    } else if I18N.set(RwLock::new(i)).is_err() {
        log::debug!("i18n initialised concurrently");
    }
}

/// Get localized text by key. If key missing, returns key itself.
pub fn tr(key: &str) -> String {
    let active = I18N
        .get()
        .and_then(|l| l.read().ok())
        .and_then(|i| i.map.get(key).cloned());
    active
        .or_else(|| BUILTIN.get(key).cloned())
        .unwrap_or_else(|| key.to_string())
}

/// Get localized text and substitute `{name}` placeholders.
/// Any placeholder not provided is kept as-is.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    substitute(tr(key), args)
}

fn substitute(mut s: String, args: &[(&str, String)]) -> String {
    for (k, v) in args {
        let placeholder = format!("{{{}}}", k);
        s = s.replace(&placeholder, v);
    }
    s
}
