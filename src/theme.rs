//! Light/dark theme resolution and application.
//!
//! Nothing in here touches the browser directly. The persisted preference and
//! the OS color-scheme signal come from a [`ThemeEnv`], and the document is
//! mutated through a [`ThemeDocument`], so the same logic runs during SSR (via
//! [`Headless`]), in the hydrated app, and in tests.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Local storage key holding `"dark"` or `"light"`.
pub const STORAGE_KEY: &str = "theme";
pub const DARK_BACKGROUND: &str = "#253237";
pub const LIGHT_BACKGROUND: &str = "#E0FBFC";
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

const HIGHLIGHT_STYLES: &str = "//cdnjs.cloudflare.com/ajax/libs/highlight.js/11.6.0/styles";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub const fn background_color(self) -> &'static str {
        match self {
            ThemeMode::Dark => DARK_BACKGROUND,
            ThemeMode::Light => LIGHT_BACKGROUND,
        }
    }

    /// highlight.js stylesheet matching this mode.
    pub fn highlight_stylesheet(self) -> String {
        format!("{HIGHLIGHT_STYLES}/tokyo-night-{}.min.css", self.as_str())
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ThemeError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme mode: {0:?}")]
    UnknownMode(String),
    #[error("local storage is not available")]
    StorageUnavailable,
    #[error("couldn't persist theme preference: {0}")]
    StorageWrite(String),
    #[error("no document to apply the theme to")]
    NoDocument,
    #[error("document has no <{0}> element")]
    MissingElement(&'static str),
    #[error("DOM update failed: {0}")]
    Dom(String),
}

/// Where the theme preference comes from and where toggles are saved.
pub trait ThemeEnv {
    /// False when rendering outside a browser; nothing else may be called then.
    fn is_browser(&self) -> bool;
    fn stored_preference(&self) -> Option<String>;
    fn prefers_dark(&self) -> bool;
    fn store_preference(&self, mode: ThemeMode) -> Result<(), ThemeError>;
}

/// The document surface a theme is applied to.
///
/// Implementations apply the whole [`ThemeStyle`] in one synchronous call and
/// swap the root classes through [`ThemeStyle::swap_classes`].
pub trait ThemeDocument {
    fn apply_theme(&self, style: &ThemeStyle) -> Result<(), ThemeError>;
}

/// Every document change needed to show one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStyle {
    pub remove_class: &'static str,
    pub add_class: &'static str,
    pub body_style: String,
}

impl ThemeStyle {
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            remove_class: mode.opposite().as_str(),
            add_class: mode.as_str(),
            body_style: format!("background-color: {};", mode.background_color()),
        }
    }

    /// Swaps the marker class with a single `replace` when the old one is
    /// present, so the list never holds both classes or neither.
    pub fn swap_classes<L: ClassList + ?Sized>(&self, classes: &L) -> Result<(), ThemeError> {
        if !classes.replace(self.remove_class, self.add_class)? {
            classes.add(self.add_class)?;
        }
        Ok(())
    }
}

/// The `classList` operations a theme swap is built from.
pub trait ClassList {
    /// Replaces `old` with `new`; false (and no change) when `old` is absent.
    fn replace(&self, old: &str, new: &str) -> Result<bool, ThemeError>;
    fn add(&self, class: &str) -> Result<(), ThemeError>;
}

/// Stand-in used when there is no browser, e.g. while rendering on the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl ThemeEnv for Headless {
    fn is_browser(&self) -> bool {
        false
    }

    fn stored_preference(&self) -> Option<String> {
        None
    }

    fn prefers_dark(&self) -> bool {
        false
    }

    fn store_preference(&self, _mode: ThemeMode) -> Result<(), ThemeError> {
        Err(ThemeError::StorageUnavailable)
    }
}

impl ThemeDocument for Headless {
    fn apply_theme(&self, _style: &ThemeStyle) -> Result<(), ThemeError> {
        Err(ThemeError::NoDocument)
    }
}

/// A stored `"dark"` wins; with nothing stored the OS signal decides.
/// Anything else, including unrecognised stored values, is light.
pub fn resolve_preference(stored: Option<&str>, prefers_dark: impl FnOnce() -> bool) -> ThemeMode {
    match stored.map(str::parse::<ThemeMode>) {
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            log::debug!("ignoring stored preference: {e}");
            ThemeMode::Light
        }
        None if prefers_dark() => ThemeMode::Dark,
        None => ThemeMode::Light,
    }
}

/// The mode every first render uses, on the server and while hydrating, so
/// the client adopts server markup unchanged. The resolved mode is set once
/// hydration is done.
pub const fn render_mode() -> ThemeMode {
    ThemeMode::Dark
}

pub fn resolve<E: ThemeEnv + ?Sized>(env: &E) -> ThemeMode {
    if !env.is_browser() {
        return render_mode();
    }
    let stored = env.stored_preference();
    resolve_preference(stored.as_deref(), || env.prefers_dark())
}

pub fn apply<D: ThemeDocument + ?Sized>(doc: &D, mode: ThemeMode) -> Result<(), ThemeError> {
    let style = ThemeStyle::for_mode(mode);
    log::debug!("applying {mode} theme");
    doc.apply_theme(&style)
}

/// Resolves the starting mode and, in a browser, applies it right away.
pub fn initialize<E, D>(env: &E, doc: &D) -> ThemeMode
where
    E: ThemeEnv + ?Sized,
    D: ThemeDocument + ?Sized,
{
    let mode = resolve(env);
    if env.is_browser() {
        if let Err(e) = apply(doc, mode) {
            log::warn!("couldn't apply initial theme: {e}");
        }
    }
    mode
}

/// Flips `current` and persists the result. Applying it is left to whoever
/// tracks the mode.
pub fn toggle_preference<E: ThemeEnv + ?Sized>(env: &E, current: ThemeMode) -> ThemeMode {
    let next = current.opposite();
    if let Err(e) = env.store_preference(next) {
        log::warn!("theme preference not saved: {e}");
    }
    next
}

/// Inline script for `<head>` doing the same resolution before first paint.
pub fn bootstrap_script() -> String {
    format!(
        r#"(function(){{try{{var t=localStorage.getItem("{key}");var d=t==="{dark}"||(t===null&&window.matchMedia("{query}").matches);var r=document.documentElement;r.classList.remove(d?"{light}":"{dark}");r.classList.add(d?"{dark}":"{light}");var s="background-color: "+(d?"{dark_bg}":"{light_bg}")+";";if(document.body){{document.body.setAttribute("style",s);}}else{{document.addEventListener("DOMContentLoaded",function(){{document.body.setAttribute("style",s);}});}}}}catch(e){{}}}})();"#,
        key = STORAGE_KEY,
        dark = ThemeMode::Dark.as_str(),
        light = ThemeMode::Light.as_str(),
        query = PREFERS_DARK_QUERY,
        dark_bg = DARK_BACKGROUND,
        light_bg = LIGHT_BACKGROUND,
    )
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    #[derive(Default)]
    struct FakeEnv {
        browser: bool,
        stored: Option<String>,
        prefers_dark: bool,
        reads: Cell<usize>,
        os_reads: Cell<usize>,
        saved: RefCell<Vec<ThemeMode>>,
    }

    impl FakeEnv {
        fn browser(stored: Option<&str>, prefers_dark: bool) -> Self {
            Self {
                browser: true,
                stored: stored.map(str::to_string),
                prefers_dark,
                ..Default::default()
            }
        }
    }

    impl ThemeEnv for FakeEnv {
        fn is_browser(&self) -> bool {
            self.browser
        }

        fn stored_preference(&self) -> Option<String> {
            self.reads.set(self.reads.get() + 1);
            self.stored.clone()
        }

        fn prefers_dark(&self) -> bool {
            self.os_reads.set(self.os_reads.get() + 1);
            self.prefers_dark
        }

        fn store_preference(&self, mode: ThemeMode) -> Result<(), ThemeError> {
            self.saved.borrow_mut().push(mode);
            Ok(())
        }
    }

    /// Mimics `classList` + `body.style`, recording the root classes after
    /// every primitive change.
    #[derive(Default)]
    struct MemoryDocument {
        classes: RefCell<Vec<String>>,
        body_style: RefCell<Option<String>>,
        snapshots: RefCell<Vec<Vec<String>>>,
    }

    impl MemoryDocument {
        fn with_classes(classes: &[&str]) -> Self {
            Self {
                classes: RefCell::new(classes.iter().map(|c| c.to_string()).collect()),
                ..Default::default()
            }
        }

        fn snapshot(&self) {
            let classes = self.classes.borrow().clone();
            self.snapshots.borrow_mut().push(classes);
        }

        fn mutations(&self) -> usize {
            self.snapshots.borrow().len()
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().iter().any(|c| c == class)
        }
    }

    impl ClassList for MemoryDocument {
        fn replace(&self, old: &str, new: &str) -> Result<bool, ThemeError> {
            let mut classes = self.classes.borrow_mut();
            let Some(i) = classes.iter().position(|c| c == old) else {
                return Ok(false);
            };
            classes[i] = new.to_string();
            let mut seen = false;
            classes.retain(|c| c != new || !std::mem::replace(&mut seen, true));
            drop(classes);
            self.snapshot();
            Ok(true)
        }

        fn add(&self, class: &str) -> Result<(), ThemeError> {
            if !self.has_class(class) {
                self.classes.borrow_mut().push(class.to_string());
                self.snapshot();
            }
            Ok(())
        }
    }

    impl ThemeDocument for MemoryDocument {
        fn apply_theme(&self, style: &ThemeStyle) -> Result<(), ThemeError> {
            style.swap_classes(self)?;
            *self.body_style.borrow_mut() = Some(style.body_style.clone());
            self.snapshot();
            Ok(())
        }
    }

    fn theme_classes(classes: &[String]) -> usize {
        classes
            .iter()
            .filter(|c| *c == "dark" || *c == "light")
            .count()
    }

    #[test]
    fn test_unset_preference_follows_dark_os() {
        let env = FakeEnv::browser(None, true);
        let doc = MemoryDocument::default();

        let mode = initialize(&env, &doc);

        assert_eq!(mode, ThemeMode::Dark);
        assert!(doc.has_class("dark"));
        assert!(!doc.has_class("light"));
        assert_eq!(
            doc.body_style.borrow().as_deref(),
            Some("background-color: #253237;")
        );
    }

    #[test]
    fn test_unset_preference_follows_light_os() {
        let env = FakeEnv::browser(None, false);
        let doc = MemoryDocument::default();

        let mode = initialize(&env, &doc);

        assert_eq!(mode, ThemeMode::Light);
        assert!(doc.has_class("light"));
        assert!(!doc.has_class("dark"));
        assert_eq!(
            doc.body_style.borrow().as_deref(),
            Some("background-color: #E0FBFC;")
        );
    }

    #[test]
    fn test_stored_dark_beats_light_os() {
        let env = FakeEnv::browser(Some("dark"), false);
        assert_eq!(resolve(&env), ThemeMode::Dark);
    }

    #[test]
    fn test_stored_light_ignores_os() {
        for prefers_dark in [true, false] {
            let env = FakeEnv::browser(Some("light"), prefers_dark);
            assert_eq!(resolve(&env), ThemeMode::Light);
            // the OS signal only matters when nothing is stored
            assert_eq!(env.os_reads.get(), 0);
        }
    }

    #[test]
    fn test_unrecognised_stored_value_is_light() {
        for stored in ["solarized", "Dark", ""] {
            let env = FakeEnv::browser(Some(stored), true);
            assert_eq!(resolve(&env), ThemeMode::Light, "stored {stored:?}");
            assert_eq!(env.os_reads.get(), 0);
        }
    }

    #[test]
    fn test_no_browser_defaults_dark_without_side_effects() {
        let env = FakeEnv {
            stored: Some("light".to_string()),
            ..Default::default()
        };
        let doc = MemoryDocument::default();

        let mode = initialize(&env, &doc);

        assert_eq!(mode, ThemeMode::Dark);
        assert_eq!(env.reads.get(), 0);
        assert_eq!(env.os_reads.get(), 0);
        assert_eq!(doc.mutations(), 0);
        assert!(doc.body_style.borrow().is_none());
    }

    #[test]
    fn test_headless_renders_dark() {
        assert_eq!(initialize(&Headless, &Headless), ThemeMode::Dark);
        assert_eq!(apply(&Headless, ThemeMode::Dark), Err(ThemeError::NoDocument));
    }

    #[test]
    fn test_toggle_swaps_classes_atomically() {
        let env = FakeEnv::browser(Some("dark"), false);
        let doc = MemoryDocument::with_classes(&["font-sans"]);

        let mode = initialize(&env, &doc);
        let mode = toggle_preference(&env, mode);
        apply(&doc, mode).unwrap();

        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(*env.saved.borrow(), vec![ThemeMode::Light]);
        assert!(doc.has_class("light"));
        assert!(!doc.has_class("dark"));
        assert!(doc.has_class("font-sans"));
        assert_eq!(
            doc.body_style.borrow().as_deref(),
            Some("background-color: #E0FBFC;")
        );
        for classes in doc.snapshots.borrow().iter() {
            assert_eq!(
                theme_classes(classes),
                1,
                "exactly one theme class expected: {classes:?}"
            );
        }
    }

    #[test]
    fn test_swap_repairs_document_with_both_classes() {
        let doc = MemoryDocument::with_classes(&["dark", "light"]);

        ThemeStyle::for_mode(ThemeMode::Light)
            .swap_classes(&doc)
            .unwrap();

        assert_eq!(*doc.classes.borrow(), vec!["light".to_string()]);
    }

    #[test]
    fn test_first_render_matches_server() {
        // hydration must start from what the server rendered
        assert_eq!(resolve(&Headless), render_mode());
        let env = FakeEnv::browser(Some("light"), false);
        assert_ne!(resolve(&env), render_mode());
    }

    #[test]
    fn test_toggle_back_and_forth() {
        let env = FakeEnv::browser(None, false);
        let doc = MemoryDocument::default();
        let mut mode = initialize(&env, &doc);
        for _ in 0..3 {
            mode = toggle_preference(&env, mode);
            apply(&doc, mode).unwrap();
        }
        assert_eq!(mode, ThemeMode::Dark);
        assert_eq!(
            *env.saved.borrow(),
            vec![ThemeMode::Dark, ThemeMode::Light, ThemeMode::Dark]
        );
        assert_eq!(*doc.classes.borrow(), vec!["dark".to_string()]);
    }

    #[test]
    fn test_toggle_survives_storage_failure() {
        assert_eq!(
            toggle_preference(&Headless, ThemeMode::Light),
            ThemeMode::Dark
        );
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert_eq!(
            "Dark".parse::<ThemeMode>(),
            Err(ThemeError::UnknownMode("Dark".to_string()))
        );
        assert_eq!(ThemeMode::Light.to_string(), "light");
    }

    #[test]
    fn test_highlight_stylesheet_follows_mode() {
        assert_eq!(
            ThemeMode::Dark.highlight_stylesheet(),
            "//cdnjs.cloudflare.com/ajax/libs/highlight.js/11.6.0/styles/tokyo-night-dark.min.css"
        );
        assert!(ThemeMode::Light
            .highlight_stylesheet()
            .ends_with("tokyo-night-light.min.css"));
    }

    #[test]
    fn test_bootstrap_script_uses_shared_constants() {
        let script = bootstrap_script();
        assert!(script.contains(r#"localStorage.getItem("theme")"#));
        assert!(script.contains(PREFERS_DARK_QUERY));
        assert!(script.contains(DARK_BACKGROUND));
        assert!(script.contains(LIGHT_BACKGROUND));
        assert!(!script.contains("{{"));
    }
}
