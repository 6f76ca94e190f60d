//! Shared utility functions.

/// Convert a name to a URL slug.
///
/// Lowercases, turns every run of characters outside `a-z0-9` into a
/// single `-`, and trims leading and trailing dashes.
/// "Elden Ring: Nightreign" -> "elden-ring-nightreign"
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Elden Ring: Nightreign"), "elden-ring-nightreign");
        assert_eq!(slugify("  --Guides--  "), "guides");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("Pokémon"), "pok-mon");
        assert_eq!(slugify("!!!"), "");
    }
}
