#![forbid(unsafe_code)]

//! Title helpers for catalog rows and tweak names.

/// Short, human-readable name of a type: the last path segment without
/// generic arguments (`demokit::sample::ColorsGroup<X>` → `ColorsGroup`).
pub fn type_title<T: ?Sized>() -> String {
    short_type_name(std::any::type_name::<T>())
}

/// Strip module path and generic arguments from a full type name.
pub fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Uppercase the first character, leave the rest untouched.
///
/// `"primaryButton"` → `"PrimaryButton"`.
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a `camelCase` or `PascalCase` identifier into spaced title case.
///
/// A space is inserted before every ASCII capital, the result is trimmed,
/// and every word is capitalized with the rest of the word lowercased:
/// `"largeSize"` → `"Large Size"`, `"darkMode"` → `"Dark Mode"`.
pub fn presentation_case(s: &str) -> String {
    let mut spaced = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    capitalize_words(spaced.trim())
}

fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
