//! Localized strings for `axialmap-ui`.
//!
//! Fluent bundles live under `i18n/<lang>/axialmap-ui.ftl` and are embedded at
//! compile time; `en-US` is the fallback. Call [`init`] once at startup, then
//! look strings up with [`t!`](crate::t).
//!
//! ```ignore
//! ui::i18n::init();
//! let label = ui::t!("upload-submit");
//! ```
//!
//! Desktop builds pick the OS locale list, web builds use `navigator.languages`.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl;

/// Translation lookup through the shared [`LOADER`].
///
/// Takes a literal message id, optionally followed by `name = value` arguments.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; every locale ships `i18n/<lang>/{DOMAIN}.ftl`.
const DOMAIN: &str = "axialmap-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            warn!("failed selecting languages ({err}); continuing with fallback");
        }
    });
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fl;

    #[test]
    fn fallback_language_is_present() {
        assert!(available_languages().iter().any(|l| l == "en-US"));
    }

    #[test]
    fn basic_lookup_works() {
        init();
        let s = fl!(&*LOADER, "nav-map");
        assert_eq!(s, "Map");
    }

    #[test]
    fn spanish_bundle_is_embedded() {
        assert!(available_languages().iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn unknown_language_keeps_current_bundle() {
        init();
        let before = fl!(&*LOADER, "nav-map");
        let _ = set_language("zz-ZZ");
        let after = fl!(&*LOADER, "nav-map");
        assert_eq!(before, after);
    }
}
