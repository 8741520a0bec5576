//! Canonical query ordering for signed URLs.
//!
//! The remote verifier recomputes signatures over a query string whose parameters are
//! sorted by name, so every signed URL must be canonicalized before it is signed. Only the
//! order changes: names and values are passed through byte-for-byte, never decoded or
//! re-encoded.
//!
//! Repeated parameter names are unsupported input. When they occur the last occurrence
//! wins, so `?a=1&a=2` canonicalizes to `?a=2`.

// self
use crate::_prelude::*;

/// Sorts the query parameters of `url` (absolute or relative) by name.
///
/// URLs without a query, or with an empty one, are returned unchanged. A parameter without
/// `=` is emitted as `name=`, empty segments are dropped, and a `#fragment` is kept after
/// the sorted query.
pub fn canonicalize(url: &str) -> Cow<'_, str> {
	let Some((base, rest)) = url.split_once('?') else {
		return Cow::Borrowed(url);
	};
	let (query, fragment) = match rest.split_once('#') {
		Some((query, fragment)) => (query, Some(fragment)),
		None => (rest, None),
	};
	let params = query
		.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| pair.split_once('=').unwrap_or((pair, "")))
		.collect::<BTreeMap<_, _>>();

	if params.is_empty() {
		return Cow::Borrowed(url);
	}

	let mut buf = String::with_capacity(url.len() + params.len());

	buf.push_str(base);
	buf.push('?');

	for (idx, (name, value)) in params.into_iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(name);
		buf.push('=');
		buf.push_str(value);
	}

	if let Some(fragment) = fragment {
		buf.push('#');
		buf.push_str(fragment);
	}

	Cow::Owned(buf)
}
