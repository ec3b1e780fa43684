use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scholars Service API",
        version = "1.0.0",
        description = "Backend for the scholarship-discovery web app.\n\n**Authentication:** protected endpoints take a JWT Bearer token from POST /jwt. Admin and moderator routes additionally check the role stored on the user record - on every request, so role changes apply immediately."
    ),
    paths(
        crate::api::health::health_check,
        crate::api::auth::issue_token,
        crate::api::users::create_user,
        crate::api::users::get_users,
        crate::api::users::set_user_role,
        crate::api::users::check_admin,
        crate::api::scholarships::top_scholarships,
        crate::api::scholarships::all_scholarships,
        crate::api::scholarships::scholarship_count,
        crate::api::scholarships::create_scholarship,
        crate::api::reviews::top_reviews,
        crate::api::reviews::average_rating,
        crate::api::applications::apply,
        crate::api::applications::moderate_application,
        crate::api::payments::create_payment_intent,
        crate::api::payments::record_payment,
        crate::api::uploads::get_signature,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::auth::TokenRequest,
            crate::models::User,
            crate::models::SetRoleRequest,
            crate::models::Scholarship,
            crate::models::Review,
            crate::models::AppliedScholarship,
            crate::models::ModerateApplicationRequest,
            crate::models::Payment,
            crate::models::PaymentIntentRequest,
            crate::services::imagekit_service::UploadSignature,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Session token issuance."),
        (name = "Users", description = "Account records and role management."),
        (name = "Scholarships", description = "Scholarship listings: search, pagination, top picks, CRUD."),
        (name = "Reviews", description = "Scholarship reviews and ratings."),
        (name = "Applications", description = "Scholarship applications and moderation."),
        (name = "Payments", description = "Stripe payment intents and payment records."),
        (name = "Uploads", description = "ImageKit direct-upload signatures."),
        (name = "Health", description = "Liveness probes.")
    )
)]
pub struct ApiDoc;
