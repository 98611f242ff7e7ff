//! Localization for `tagvalidator-ui`.
//!
//! Every user-facing string routes through Fluent:
//! - `i18n-embed` loads the bundle,
//! - `rust-embed` compiles the `.ftl` files into the binary,
//! - `i18n-embed-fl` checks keys and arguments at compile time (`fl!`).
//!
//! ```text
//! i18n.toml
//! i18n/
//!   pt-BR/tagvalidator-ui.ftl
//! ```
//!
//! The dashboard ships a single fixed locale, pt-BR. There is no runtime
//! language selection; `init()` loads the fallback bundle once.
//!
//! ```ignore
//! ui::i18n::init(); // idempotent
//! let title = ui::t!("dashboard-title");
//! ```
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// Translation lookup through the shared loader.
///
/// ```ignore
/// t!("chart-title")
/// t!("ai-updated", stamp = "01/01/2024, 10:00:00")
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; also the `.ftl` file name.
const DOMAIN: &str = "tagvalidator-ui";

pub const LOCALE: LanguageIdentifier = langid!("pt-BR");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, LOCALE));

static INIT: Once = Once::new();

/// Load the pt-BR bundle (idempotent).
pub fn init() {
    INIT.call_once(|| {
        if let Err(err) = LOADER.load_fallback_language(&Localizations) {
            tracing::warn!(%err, "failed to load pt-BR translations; keys will render verbatim");
        }
        // Unicode isolation marks would leak into exported text and ids.
        LOADER.set_use_isolating(false);
    });
}

/// Locales embedded in the binary.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}
