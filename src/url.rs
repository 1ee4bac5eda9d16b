//! `cleanshot://` URL construction
//!
//! Keys and values are percent-encoded as URL query components: everything
//! except ASCII alphanumerics and `-._~` is escaped, and spaces become `%20`.

use crate::model::{ArgumentSet, Operation, SCHEME};

/// Builds the scheme URL for an operation and its validated arguments
///
/// Parameters appear in the order they were supplied. An empty argument set
/// yields a bare `cleanshot://<path>` with no `?`.
///
/// # Examples
///
/// ```
/// use cleanshot_mcp::{
///     model::{ArgumentSet, Operation},
///     url::build_url,
/// };
///
/// let url = build_url(Operation::OpenFromClipboard, &ArgumentSet::new());
/// assert_eq!(url, "cleanshot://open-from-clipboard");
/// ```
pub fn build_url(operation: Operation, args: &ArgumentSet) -> String {
    let mut url = format!("{}://{}", SCHEME, operation.path());

    let query = args
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_query_value())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}
