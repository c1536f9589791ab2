use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};
use tracing::debug;
use uuid::Uuid;
use voicecart_shared::PrincipalKind;

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};

/// Authenticated caller extracted from a bearer token
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub kind: PrincipalKind,
}

impl Principal {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        Ok(Self {
            id: claims.principal_id()?,
            name: claims.name.clone(),
            email: claims.email.clone(),
            kind: claims.kind,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.kind == PrincipalKind::Admin
    }
}

/// Handlers behind `AuthMiddleware` take `Principal` as a parameter.
impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Principal>()
                .cloned()
                .ok_or_else(|| AppError::Authentication("Authorization token is required".to_string())),
        )
    }
}

/// Bearer-token guard for a scope or resource. The token kind must match
/// exactly unless the guard also admits admins.
#[derive(Clone, Copy)]
pub struct AuthMiddleware {
    required: PrincipalKind,
    admits_admin: bool,
}

impl AuthMiddleware {
    pub fn require(kind: PrincipalKind) -> Self {
        Self {
            required: kind,
            admits_admin: false,
        }
    }

    /// Also lets admin tokens through. Only for handlers that check
    /// ownership themselves and never persist the caller's id.
    pub fn or_admin(self) -> Self {
        Self {
            admits_admin: true,
            ..self
        }
    }

    fn admits(&self, kind: PrincipalKind) -> bool {
        if self.admits_admin {
            kind.permits(self.required)
        } else {
            kind == self.required
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            guard: *self,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    guard: AuthMiddleware,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let guard = self.guard;

        Box::pin(async move {
            let principal = match authenticate(&req, guard) {
                Ok(principal) => principal,
                Err(e) => {
                    debug!("Rejected {} {}: {}", req.method(), req.path(), e);
                    let response = e.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(principal);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate(req: &ServiceRequest, guard: AuthMiddleware) -> Result<Principal, AppError> {
    let jwt = req
        .app_data::<web::Data<JwtService>>()
        .ok_or_else(|| AppError::Internal("JWT service not configured".to_string()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Authentication("Authorization token is required".to_string()))?;

    let claims = jwt.validate(token)?;
    if !guard.admits(claims.kind) {
        return Err(AppError::Authorization(format!(
            "This endpoint requires a {} account",
            guard.required
        )));
    }

    Principal::from_claims(&claims)
}
