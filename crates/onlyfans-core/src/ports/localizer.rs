//! Translation catalog port.

/// Name of the plugin's translation catalog.
pub const CATALOG_NAME: &str = "curaengine_onlyfans";

/// Host translation service, bound to one catalog.
pub trait Localizer: Send + Sync {
    /// Translate `text`.
    fn i18n(&self, text: &str) -> String;

    /// Translate `text` within a disambiguating `context`.
    fn i18nc(&self, context: &str, text: &str) -> String;
}

/// Returns every string untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLocalizer;

impl Localizer for NoopLocalizer {
    fn i18n(&self, text: &str) -> String {
        text.to_string()
    }

    fn i18nc(&self, _context: &str, text: &str) -> String {
        text.to_string()
    }
}
