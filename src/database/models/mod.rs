pub mod activity;
pub mod category;
pub mod channel;
pub mod comment;
pub mod rating;
pub mod subcategory;
pub mod tag;
pub mod user;
pub mod video;

/// Derive a URL slug from a display name: lowercase, alphanumerics kept,
/// runs of anything else collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug charset check for client-supplied slugs.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 100
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Rust Tutorials"), "rust-tutorials");
        assert_eq!(slugify("  C++ & Systems!  "), "c-systems");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slug_validation() {
        assert!(is_valid_slug("rust-tutorials"));
        assert!(is_valid_slug("a1"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Has Spaces"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
    }
}
