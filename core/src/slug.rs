//! Tag slugs compatible with lodash's `kebabCase`, so tag URLs built here
//! match the ones already published.

/// `"React Native"` → `"react-native"`, `"fooBar"` → `"foo-bar"`,
/// `"Node.js"` → `"node-js"`, `"ES6"` → `"es-6"`.
pub fn kebab_case(input: &str) -> String {
    words(input)
        .into_iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Path of the listing page for `tag`.
pub fn tag_path(tag: &str) -> String {
    format!("/tags/{}", kebab_case(tag))
}

fn words(input: &str) -> Vec<String> {
    let stripped: String = input.chars().filter(|c| !matches!(c, '\'' | '\u{2019}')).collect();
    let mut out = Vec::new();
    for run in stripped.split(|c: char| !c.is_alphanumeric()).filter(|r| !r.is_empty()) {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let (prev, cur) = (chars[i - 1], chars[i]);
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || (prev.is_numeric() != cur.is_numeric())
                || (prev.is_uppercase() && cur.is_uppercase() && next_lower);
            if boundary {
                out.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        out.push(chars[start..].iter().collect());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_acronym_before_word() {
        assert_eq!(kebab_case("XMLHttpRequest"), "xml-http-request");
    }

    #[test]
    fn drops_apostrophes() {
        assert_eq!(kebab_case("Don't panic"), "dont-panic");
    }
}
