//! Instance-owned bearer token slot.
//!
//! A [`TokenCache`] holds at most one [`AccessToken`]. It starts empty, is replaced
//! wholesale whenever a new token is issued, and is emptied on demand by
//! [`TokenCache::clear`]. The slot is never mutated in place: readers clone the current
//! token under a short `RwLock` read, so no guard is ever held across an `.await`.
//!
//! Clients receive the cache by `Arc`, which lets several clients for the same credential
//! set share one token while different credential sets stay isolated.

// self
use crate::{_prelude::*, auth::AccessToken};

/// Shared slot holding the current bearer token, if any.
#[derive(Debug, Default)]
pub struct TokenCache {
	slot: RwLock<Option<AccessToken>>,
	issuance: AsyncMutex<()>,
}
impl TokenCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached token when `now < expires_at`.
	pub fn valid_at(&self, now: OffsetDateTime) -> Option<AccessToken> {
		self.slot.read().as_ref().filter(|token| token.is_valid_at(now)).cloned()
	}

	/// Returns the cached token regardless of expiry.
	pub fn peek(&self) -> Option<AccessToken> {
		self.slot.read().clone()
	}

	/// Replaces the cached token, returning the previous one.
	pub fn replace(&self, token: AccessToken) -> Option<AccessToken> {
		self.slot.write().replace(token)
	}

	/// Discards the cached token regardless of expiry, returning it.
	pub fn clear(&self) -> Option<AccessToken> {
		self.slot.write().take()
	}

	/// Singleflight guard serializing issuance so concurrent callers that find the slot
	/// empty share one token request.
	pub(crate) fn issuance_guard(&self) -> &AsyncMutex<()> {
		&self.issuance
	}
}
