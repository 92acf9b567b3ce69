use axum::extract::FromRequestParts;
use axum::http::{header::COOKIE, request::Parts};
use consent_app::record::{ConsentRecord, TERMS_COOKIE};
use cookie::Cookie;
use tracing::debug;

use super::error::WebError;

/// The consent the browser recorded on the terms page, read back out of the
/// `termsAgreement` cookie.
#[derive(Clone, Debug)]
pub(crate) struct TermsAgreement(pub(crate) ConsentRecord);

/// Finds a cookie in the raw `Cookie` headers. Values are left percent encoded,
/// decoding them is up to the caller.
fn raw_cookie(parts: &Parts, name: &str) -> Option<Cookie<'static>> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_string()))
        .filter_map(|cookie| match cookie {
            Ok(cookie) => Some(cookie),
            Err(e) => {
                debug!("skipping unparseable cookie {e:?}");
                None
            }
        })
        .find(|cookie| cookie.name() == name)
}

impl<S> FromRequestParts<S> for TermsAgreement
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = raw_cookie(parts, TERMS_COOKIE).ok_or(WebError::TermsNotAgreed)?;
        Ok(Self(ConsentRecord::from_cookie(&cookie)?))
    }
}
