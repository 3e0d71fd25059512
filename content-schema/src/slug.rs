//! URL slugs for content entries.

/// Lowercase kebab-case slug: alphanumerics (any script) are kept and
/// lowercased, every run of anything else becomes a single `-`, and
/// leading/trailing dashes are dropped.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `slug` is already in the form [`slugify`] produces.
#[must_use]
pub fn is_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
