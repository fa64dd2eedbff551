//! Environment variable resolution for deployment requests.

use std::collections::BTreeMap;

/// Resolved environment passed to every instance of an app.
pub type EnvironmentMap = BTreeMap<String, String>;

/// Merge `NAME=VALUE` / bare `NAME` tokens with inherited process entries.
///
/// - `NAME=VALUE` is taken verbatim; everything after the first `=` is the value.
/// - Bare `NAME` copies the value of the first inherited `NAME=...` entry, or `""`.
/// - Repeated names: the last token wins.
pub fn resolve_environment<T, I>(tokens: &[T], inherited: &[I]) -> EnvironmentMap
where
    T: AsRef<str>,
    I: AsRef<str>,
{
    let mut env = EnvironmentMap::new();
    for token in tokens {
        let token = token.as_ref();
        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, value.to_string()),
            None => (token, inherited_value(token, inherited).unwrap_or_default()),
        };
        env.insert(name.to_string(), value);
    }
    env
}

fn inherited_value<I: AsRef<str>>(name: &str, inherited: &[I]) -> Option<String> {
    inherited.iter().find_map(|entry| match entry.as_ref().split_once('=') {
        Some((key, value)) if key == name => Some(value.to_string()),
        _ => None,
    })
}
