use axum::{extract::{FromRef, FromRequestParts}, http::{header, request::Parts}};

use crate::ApiError;

/// header admins may use instead of a bearer token
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// proof that the request carries the configured admin key
///
/// listing applications is always restricted: while no key is configured nobody can list,
/// a request without any key gets 401 and a request with the wrong key gets 403
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl<S> FromRequestParts<S> for AdminAccess
where
	scholar::Context: FromRef<S>,
	S: Send + Sync,
{
	type Rejection = ApiError;

	async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
		let ctx = scholar::Context::from_ref(state);
		let expected = ctx.cfg().security.admin_key.as_str();

		let presented = parts
			.headers
			.get(ADMIN_KEY_HEADER)
			.and_then(|v| v.to_str().ok())
			.or_else(||
				parts
					.headers
					.get(header::AUTHORIZATION)
					.and_then(|v| v.to_str().ok())
					.and_then(|v| v.strip_prefix("Bearer "))
			)
			.map(str::trim)
			.filter(|x| !x.is_empty());

		let Some(presented) = presented else {
			return Err(ApiError::unauthorized());
		};

		if expected.is_empty() {
			tracing::warn!("refusing admin request: no admin key configured");
			return Err(ApiError::forbidden());
		}

		if !keys_match(presented, expected) {
			tracing::warn!("refusing admin request with mismatching key");
			return Err(ApiError::forbidden());
		}

		Ok(AdminAccess)
	}
}

/// constant time comparison
fn keys_match(presented: &str, expected: &str) -> bool {
	let (a, b) = (presented.as_bytes(), expected.as_bytes());
	a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod test {
	#[test]
	fn keys_must_match_exactly() {
		assert!(super::keys_match("secret", "secret"));
		assert!(!super::keys_match("secret", "secreT"));
		assert!(!super::keys_match("secret", "secrets"));
		assert!(!super::keys_match("", "secret"));
	}
}
