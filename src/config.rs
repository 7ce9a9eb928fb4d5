//! Defaults and locale resolution for a README run.

/// npms.io package endpoint; the package name is appended verbatim.
pub const DEFAULT_REGISTRY_URL: &str = "https://api.npms.io/v2/package/";

/// Packages summarised in the README.
pub const DEFAULT_PACKAGES: &[&str] = &["http-responder", "pkgplay", "await-fn"];

pub const DEFAULT_TEMPLATE_PATH: &str = "assets/readme-template.md";
pub const DEFAULT_OUTPUT_PATH: &str = "README.md";

const FALLBACK_LOCALE: &str = "en-US";

/// Picks the locale used for grouping digits.
///
/// An explicit, non-empty `configured` value wins; otherwise the system locale
/// is used, then `en-US`.
pub fn resolve_locale(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

pub fn default_packages() -> Vec<String> {
    DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect()
}
