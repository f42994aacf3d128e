//! Active locale resolution.

use unic_langid::LanguageIdentifier;

use super::registry::Registry;

/// Normalizes a runtime language tag to BCP 47 form.
///
/// Accepts POSIX forms such as `sv_SE.UTF-8` or `de_DE@euro` and fixes the
/// casing (`en-us` becomes `en-US`). Returns `None` for tags that cannot be
/// parsed (`C`, empty strings).
pub fn normalize_language_tag(tag: &str) -> Option<String> {
    let base = tag.split(['.', '@']).next().unwrap_or_default().trim().replace('_', "-");
    if base.is_empty() {
        return None;
    }
    base.parse::<LanguageIdentifier>().ok().map(|langid| langid.to_string())
}

fn language_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Picks the active locale.
///
/// Priority:
/// 1. `persisted` if it names a registered locale
/// 2. `runtime` if it exactly matches a registered locale
/// 3. the first registered locale sharing `runtime`'s language subtag
/// 4. the registry default
pub fn resolve_locale<'r>(
    registry: &'r Registry,
    persisted: Option<&str>,
    runtime: Option<&str>,
) -> &'r str {
    if let Some(config) = persisted.and_then(|id| registry.get(id)) {
        return config.id;
    }

    if let Some(runtime) = runtime.and_then(normalize_language_tag) {
        if let Some(config) = registry.get(&runtime) {
            return config.id;
        }

        let language = language_subtag(&runtime);
        if let Some(id) = registry.ids().find(|id| language_subtag(id) == language) {
            return id;
        }
    }

    registry.default_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(persisted: Option<&str>, runtime: Option<&str>) -> &'static str {
        resolve_locale(Registry::builtin(), persisted, runtime)
    }

    #[test]
    fn test_persisted_choice_wins() {
        assert_eq!(resolve(Some("de-DE"), Some("sv-SE")), "de-DE");
    }

    #[test]
    fn test_unknown_persisted_choice_is_ignored() {
        assert_eq!(resolve(Some("xx-XX"), Some("fr-FR")), "fr-FR");
    }

    #[test]
    fn test_exact_runtime_match() {
        assert_eq!(resolve(None, Some("en-GB")), "en-GB");
        assert_eq!(resolve(None, Some("sv_SE.UTF-8")), "sv-SE");
    }

    #[test]
    fn test_language_prefix_match_uses_declaration_order() {
        assert_eq!(resolve(None, Some("en-AU")), "en-US");
        assert_eq!(resolve(None, Some("de-AT")), "de-DE");
        assert_eq!(resolve(None, Some("fr")), "fr-FR");
    }

    #[test]
    fn test_unregistered_locales_fall_back_to_default() {
        for tag in ["xx-XX", "ja-JP", "nl_NL.UTF-8", "C", ""] {
            assert_eq!(resolve(Some(tag), Some(tag)), "en-US", "tag {tag:?}");
        }
        assert_eq!(resolve(None, None), "en-US");
    }

    #[test]
    fn test_normalize_language_tag() {
        assert_eq!(normalize_language_tag("en-us").as_deref(), Some("en-US"));
        assert_eq!(normalize_language_tag("de_DE@euro").as_deref(), Some("de-DE"));
        assert_eq!(normalize_language_tag(""), None);
        assert_eq!(normalize_language_tag("C"), None);
    }
}
