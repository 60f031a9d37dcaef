//! Caller identity extraction (§6.5's "Auth provider" collaborator).
//!
//! The engine trusts whatever `playerId` it is handed; it is the HTTP layer's
//! job to produce one. A production deployment would swap this for a real
//! session/JWT stack sitting in front of the API; this stands in with a
//! single trusted header.
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::FromRequest;
use std::future::Future;
use std::future::ready;
use std::pin::Pin;

const PLAYER_ID_HEADER: &str = "X-Player-Id";

/// The authenticated caller's player id, read from the `X-Player-Id` header.
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for CallerId {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(PLAYER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Box::pin(ready(header.map(CallerId).ok_or_else(|| {
            actix_web::error::ErrorUnauthorized("missing X-Player-Id header")
        })))
    }
}

/// The caller's player id if present, without failing the request when it
/// is not -- used by routes that only need identity for optional framing.
pub struct MaybeCallerId(pub Option<String>);

impl FromRequest for MaybeCallerId {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let caller = CallerId::from_request(req, payload);
        Box::pin(async move {
            match caller.await {
                Ok(CallerId(id)) => Ok(MaybeCallerId(Some(id))),
                Err(_) => Ok(MaybeCallerId(None)),
            }
        })
    }
}
