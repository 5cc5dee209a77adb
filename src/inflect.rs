// File: src/inflect.rs
// Purpose: Naming-service boundary (singularization and path dasherizing)

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Naming service consumed by [`ResourceContext`](crate::ResourceContext).
///
/// The generator never assumes a particular inflection algorithm; it only
/// requires these two pure functions and caches their results per context.
///
/// Contract:
/// - `singularize` must be idempotent: singularizing an already-singular word
///   returns it unchanged.
/// - `dasherize` lowercases underscore-separated path segments into
///   hyphen-separated ones while leaving `:param` placeholders and optional
///   group syntax (`(...)`) untouched.
pub trait Inflector {
    fn singularize(&self, word: &str) -> String;
    fn dasherize(&self, path: &str) -> String;
}

/// Irregular plural → singular pairs the suffix rules get wrong.
static IRREGULAR: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("people", "person"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("movies", "movie"),
        ("houses", "house"),
        ("knives", "knife"),
        ("lives", "life"),
        ("wives", "wife"),
    ])
});

/// Words whose singular and plural forms are identical.
static UNCOUNTABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "equipment",
        "fish",
        "information",
        "money",
        "news",
        "series",
        "sheep",
        "species",
    ])
});

/// Default locale-aware English inflector.
///
/// Covers the regular suffix rules plus a small table of irregular and
/// uncountable nouns. Deliberately modest: callers with stricter inflection
/// needs can supply their own [`Inflector`].
///
/// # Examples
///
/// ```
/// use rusty_routes::{EnglishInflector, Inflector};
///
/// let inflector = EnglishInflector;
/// assert_eq!(inflector.singularize("things"), "thing");
/// assert_eq!(inflector.singularize("categories"), "category");
/// assert_eq!(inflector.singularize("profile"), "profile");
/// assert_eq!(inflector.singularize("admin/reports"), "admin/report");
///
/// assert_eq!(inflector.dasherize("crazy_things/new"), "crazy-things/new");
/// assert_eq!(inflector.dasherize("posts/:post_id/comments"), "posts/:post_id/comments");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        // Namespaced identifiers singularize their last segment only.
        match word.rsplit_once('/') {
            Some((head, tail)) => format!("{head}/{}", singularize_word(tail)),
            None => singularize_word(word),
        }
    }

    fn dasherize(&self, path: &str) -> String {
        let mut out = String::with_capacity(path.len());
        let mut in_placeholder = false;

        for ch in path.chars() {
            if in_placeholder {
                if ch.is_ascii_alphanumeric() || ch == '_' {
                    out.push(ch);
                    continue;
                }
                in_placeholder = false;
            }

            match ch {
                ':' => {
                    in_placeholder = true;
                    out.push(ch);
                }
                '_' => out.push('-'),
                other => out.push(other.to_ascii_lowercase()),
            }
        }

        out
    }
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.contains(lower.as_str()) {
        return word.to_string();
    }
    if let Some(singular) = IRREGULAR.get(lower.as_str()) {
        return (*singular).to_string();
    }

    // Regular suffix rules, most specific first.
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = word.strip_suffix("ves") {
        if !stem.is_empty() {
            return format!("{stem}f");
        }
    }
    // Sibilant endings take "es" in the plural: boxes, classes, statuses.
    // Plain "-ses" words (cases, phrases) fall through to the trailing-s rule.
    for suffix in ["ches", "shes", "sses", "xes", "zes", "uses"] {
        if word.ends_with(suffix) && word.len() > suffix.len() {
            return word[..word.len() - 2].to_string();
        }
    }

    // Already-singular guards: class, status, analysis.
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    if word.len() > 1 {
        if let Some(stem) = word.strip_suffix('s') {
            return stem.to_string();
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("things", "thing")]
    #[case("comments", "comment")]
    #[case("categories", "category")]
    #[case("boxes", "box")]
    #[case("classes", "class")]
    #[case("statuses", "status")]
    #[case("branches", "branch")]
    #[case("wolves", "wolf")]
    #[case("people", "person")]
    #[case("movies", "movie")]
    #[case("settings", "setting")]
    fn test_singularize_plural(#[case] plural: &str, #[case] singular: &str) {
        assert_eq!(EnglishInflector.singularize(plural), singular);
    }

    #[rstest]
    #[case("profile")]
    #[case("login")]
    #[case("signup")]
    #[case("status")]
    #[case("analysis")]
    #[case("news")]
    #[case("series")]
    #[case("person")]
    fn test_singularize_already_singular(#[case] word: &str) {
        assert_eq!(EnglishInflector.singularize(word), word);
    }

    #[test]
    fn test_singularize_is_idempotent() {
        let inflector = EnglishInflector;
        for word in ["things", "categories", "people", "profile", "statuses"] {
            let once = inflector.singularize(word);
            let twice = inflector.singularize(&once);
            assert_eq!(once, twice, "singularize({word}) is not idempotent");
        }
    }

    #[test]
    fn test_singularize_namespaced_last_segment_only() {
        assert_eq!(
            EnglishInflector.singularize("admin/reports"),
            "admin/report"
        );
        assert_eq!(
            EnglishInflector.singularize("things/categories"),
            "things/category"
        );
    }

    #[test]
    fn test_dasherize_rewrites_underscores() {
        assert_eq!(
            EnglishInflector.dasherize("crazy_things/new"),
            "crazy-things/new"
        );
    }

    #[test]
    fn test_dasherize_preserves_placeholders() {
        let inflector = EnglishInflector;
        assert_eq!(
            inflector.dasherize("posts/:post_id/comments/:id/edit"),
            "posts/:post_id/comments/:id/edit"
        );
        assert_eq!(inflector.dasherize("signup(/:step)"), "signup(/:step)");
    }

    #[test]
    fn test_dasherize_lowercases_static_segments() {
        assert_eq!(
            EnglishInflector.dasherize("Admin_Reports/:Id"),
            "admin-reports/:Id"
        );
    }
}
