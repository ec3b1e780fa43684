use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::MongoDB;
use crate::services::token_service::Claims;
use crate::services::user_service::{self, ROLE_ADMIN, ROLE_MODERATOR};
use crate::utils::error::AppError;

/// Which stored role unlocks the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    Admin,
    ModeratorOrAdmin,
}

impl RoleRequirement {
    pub fn allows(&self, role: Option<&str>) -> bool {
        match self {
            RoleRequirement::Admin => role == Some(ROLE_ADMIN),
            RoleRequirement::ModeratorOrAdmin => {
                matches!(role, Some(r) if r == ROLE_MODERATOR || r == ROLE_ADMIN)
            }
        }
    }
}

/// Second guard of the authorization chain. Must run after
/// [`AuthMiddleware`](crate::middleware::auth::AuthMiddleware) has attached
/// the claims. The role is re-fetched from the users collection on every
/// request rather than trusted from the token, so a role change takes
/// effect immediately without re-login.
pub struct RoleGuard {
    requirement: RoleRequirement,
}

impl RoleGuard {
    pub fn admin() -> Self {
        Self {
            requirement: RoleRequirement::Admin,
        }
    }

    pub fn moderator_or_admin() -> Self {
        Self {
            requirement: RoleRequirement::ModeratorOrAdmin,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardService {
            service: Rc::new(service),
            requirement: self.requirement,
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    requirement: RoleRequirement,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
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
        let service = Rc::clone(&self.service);
        let requirement = self.requirement;

        Box::pin(async move {
            let claims = req.extensions().get::<Claims>().cloned();
            let Some(claims) = claims else {
                // Route was wired without AuthMiddleware in front
                return Err(AppError::Unauthorized.into());
            };

            let Some(db) = req.app_data::<web::Data<MongoDB>>().cloned() else {
                return Err(
                    AppError::Database("MongoDB handle missing from app data".to_string()).into(),
                );
            };

            let role = user_service::find_role(&db, &claims.email).await?;
            if !requirement.allows(role.as_deref()) {
                return Err(AppError::Forbidden.into());
            }

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_requirement() {
        let req = RoleRequirement::Admin;
        assert!(req.allows(Some("admin")));
        assert!(!req.allows(Some("moderator")));
        assert!(!req.allows(Some("applicant")));
        assert!(!req.allows(None));
    }

    #[test]
    fn test_moderator_or_admin_requirement() {
        let req = RoleRequirement::ModeratorOrAdmin;
        assert!(req.allows(Some("admin")));
        assert!(req.allows(Some("moderator")));
        assert!(!req.allows(Some("applicant")));
        assert!(!req.allows(None));
    }
}
