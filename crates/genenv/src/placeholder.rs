//! `${name}` placeholders
//!
//! A placeholder is `${` followed by one or more characters other than `}` and a closing `}`.
//! A backslash escapes it: `\${name}` is never resolved and is emitted as `${name}`.
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Stands in for `\${` while scanning so escaped placeholders are not matched
const ESCAPE_MARKER: &str = "\u{1}genenv-escaped\u{1}";

/// `true` if the value has something to substitute, escaped or not
///
/// An escaped placeholder still counts: the backslash is dropped when the value is rendered.
pub fn contains_placeholder(value: &str) -> bool {
    PLACEHOLDER.is_match(value)
}

/// Names of all unescaped placeholders in order of appearance, duplicates included
pub fn names(value: &str) -> Vec<String> {
    let escaped = value.replace(r"\${", ESCAPE_MARKER);
    PLACEHOLDER
        .captures_iter(&escaped)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The name of the only placeholder in `value` when the value is nothing else
///
/// `" ${name} "` gives `name`, `"prefix_${name}"` and `"${a}${b}"` give `None`.
pub fn bare_name(value: &str) -> Option<String> {
    let names = names(value);
    let [name] = names.as_slice() else {
        return None;
    };

    (value.trim() == format!("${{{name}}}")).then(|| name.clone())
}

/// Replace every unescaped placeholder with the value returned by `lookup`
///
/// `lookup` returning `None` leaves that placeholder as written. Escaped placeholders lose
/// their backslash.
pub fn substitute<E>(
    value: &str,
    mut lookup: impl FnMut(&str) -> Result<Option<String>, E>,
) -> Result<String, E> {
    let escaped = value.replace(r"\${", ESCAPE_MARKER);

    let mut rendered = String::with_capacity(escaped.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(&escaped) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        rendered.push_str(&escaped[last..whole.start()]);
        match lookup(&caps[1])? {
            Some(replacement) => rendered.push_str(&replacement),
            None => rendered.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    rendered.push_str(&escaped[last..]);

    Ok(rendered.replace(ESCAPE_MARKER, "${"))
}
