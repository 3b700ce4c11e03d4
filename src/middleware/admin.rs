use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    error::ErrorUnauthorized,
    http::header,
};
use futures_util::future::LocalBoxFuture;
use secrecy::{ExposeSecret, SecretString};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

/// Guards admin routes with the shared admin token.
///
/// End-user sessions belong to the hosted auth provider; admin triggers
/// (manual syncs, resets, pool lock) only need `Authorization: Bearer <token>`.
pub struct AdminMiddleware {
    token: Arc<SecretString>,
}

impl AdminMiddleware {
    pub fn new(token: Arc<SecretString>) -> Self {
        Self { token }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddlewareService {
            service: Rc::new(service),
            token: self.token.clone(),
        }))
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
    token: Arc<SecretString>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let provided = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        match provided {
            Some(token) if tokens_match(token, self.token.expose_secret()) => {}
            Some(_) => {
                tracing::warn!("Rejected admin request to {} with an invalid token", req.path());
                return Box::pin(async move { Err(ErrorUnauthorized("Invalid admin token")) });
            }
            None => {
                tracing::warn!("Rejected admin request to {} without a token", req.path());
                return Box::pin(async move { Err(ErrorUnauthorized("Missing admin token")) });
            }
        }

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

/// Length-independent comparison so response timing does not leak the token
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    let mut diff = a.len() ^ b.len();
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= (x ^ y) as usize;
    }
    diff == 0 && !expected.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_match() {
        assert!(tokens_match("secret", "secret"));
        assert!(!tokens_match("secret", "secret2"));
        assert!(!tokens_match("", ""));
    }
}
