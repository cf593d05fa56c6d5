use std::{collections::HashMap, sync::LazyLock};

use crate::{content::load_json, settings::Locale};

type Catalogue = HashMap<String, String>;

static CATALOGUES: LazyLock<HashMap<Locale, Catalogue>> = LazyLock::new(|| {
    Locale::ALL
        .into_iter()
        .map(|locale| {
            let file = format!("messages/{}.json", locale.code());
            let catalogue = load_json::<Catalogue>(&file).unwrap_or_else(|e| {
                log::error!("Couldn't load {file}: {e}");
                Catalogue::new()
            });
            (locale, catalogue)
        })
        .collect()
});

/// Looks `key` up for `locale`, then in English, then gives back the key.
pub fn translate(locale: Locale, key: &str) -> String {
    lookup(locale, key)
        .or_else(|| lookup(Locale::default(), key))
        .unwrap_or(key)
        .to_string()
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    CATALOGUES
        .get(&locale)
        .and_then(|c| c.get(key))
        .map(String::as_str)
}
