//! Namespace-insensitive key lookup.
//!
//! OJP producers disagree on how they declare namespaces. The same element
//! may arrive as `ResponseTimestamp` (no namespace), as `ResponseTimestamp`
//! under a default SIRI namespace, or as `siri:ResponseTimestamp`. The
//! prefix carries no meaning for this protocol, so every key probe goes
//! through [`local_name`] before comparing.

/// Strip an optional namespace prefix from an element or attribute name.
///
/// Everything up to and including the last `:` is removed.
///
/// # Examples
///
/// ```
/// use ojp_client::xml::local_name;
///
/// assert_eq!(local_name("siri:ResponseTimestamp"), "ResponseTimestamp");
/// assert_eq!(local_name("ResponseTimestamp"), "ResponseTimestamp");
/// assert_eq!(local_name("xml:lang"), "lang");
/// ```
pub fn local_name(key: &str) -> &str {
    match key.rfind(':') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// Returns true if two keys name the same element once prefixes are stripped.
pub fn same_local_name(a: &str, b: &str) -> bool {
    local_name(a) == local_name(b)
}

/// Find the key in `available` that matches `candidate`.
///
/// The candidate may itself carry a prefix (`siri:StopPointRef`); only the
/// local parts are compared. Returns the first matching key exactly as it
/// appears in the input.
pub fn resolve<'k, I>(candidate: &str, available: I) -> Option<&'k str>
where
    I: IntoIterator<Item = &'k str>,
{
    let wanted = local_name(candidate);
    available.into_iter().find(|key| local_name(key) == wanted)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prefix_never_changes_local_name(
            prefix in "[a-z]{1,8}",
            name in "[A-Za-z][A-Za-z0-9]{0,20}",
        ) {
            let qualified = format!("{prefix}:{name}");
            prop_assert_eq!(local_name(&qualified), name.as_str());
            prop_assert!(same_local_name(&qualified, &name));
        }

        #[test]
        fn local_name_is_idempotent(key in "[a-z:]{0,12}[A-Za-z]{0,12}") {
            let once = local_name(&key);
            prop_assert_eq!(local_name(once), once);
            prop_assert!(!once.contains(':'));
        }
    }
}
