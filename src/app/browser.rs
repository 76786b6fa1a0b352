use web_sys::{window, DomTokenList, Storage};

use crate::theme::{
    ClassList, ThemeDocument, ThemeEnv, ThemeError, ThemeMode, ThemeStyle, PREFERS_DARK_QUERY,
    STORAGE_KEY,
};

/// `localStorage`, `matchMedia` and the live document.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEnv;

impl BrowserEnv {
    fn storage() -> Option<Storage> {
        window()?.local_storage().ok().flatten()
    }
}

impl ThemeEnv for BrowserEnv {
    fn is_browser(&self) -> bool {
        window().is_some()
    }

    fn stored_preference(&self) -> Option<String> {
        Self::storage()?.get_item(STORAGE_KEY).ok().flatten()
    }

    fn prefers_dark(&self) -> bool {
        window()
            .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten())
            .is_some_and(|q| q.matches())
    }

    fn store_preference(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        let storage = Self::storage().ok_or(ThemeError::StorageUnavailable)?;
        storage
            .set_item(STORAGE_KEY, mode.as_str())
            .map_err(|e| ThemeError::StorageWrite(format!("{e:?}")))
    }
}

impl ThemeDocument for BrowserEnv {
    fn apply_theme(&self, style: &ThemeStyle) -> Result<(), ThemeError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(ThemeError::NoDocument)?;
        let root = document
            .document_element()
            .ok_or(ThemeError::MissingElement("html"))?;
        let body = document.body().ok_or(ThemeError::MissingElement("body"))?;

        style.swap_classes(&root.class_list())?;
        body.set_attribute("style", &style.body_style)
            .map_err(|e| ThemeError::Dom(format!("{e:?}")))
    }
}

impl ClassList for DomTokenList {
    fn replace(&self, old: &str, new: &str) -> Result<bool, ThemeError> {
        DomTokenList::replace(self, old, new).map_err(|e| ThemeError::Dom(format!("{e:?}")))
    }

    fn add(&self, class: &str) -> Result<(), ThemeError> {
        self.add_1(class).map_err(|e| ThemeError::Dom(format!("{e:?}")))
    }
}
