mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{guard, middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{AuthMiddleware, RoleGuard};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5500".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting Scholars Service...");

    // Initialize MongoDB connection (also creates the unique indexes the
    // duplicate-application and duplicate-user guards rely on)
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server.
    //
    // Guard chains are wrapped per resource. Note the wrap order: the LAST
    // .wrap() is the outermost, so AuthMiddleware always runs before
    // RoleGuard. Methods of the same path get separate resources (with a
    // method guard) when their guard chains differ.
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness
            .route("/", web::get().to(api::health::root))
            .route("/health", web::get().to(api::health::health_check))
            // Session tokens
            .route("/jwt", web::post().to(api::auth::issue_token))
            // ==================== USERS ====================
            .service(
                web::resource("/users")
                    .guard(guard::Post())
                    .route(web::route().to(api::users::create_user)),
            )
            .service(
                web::resource("/users")
                    .guard(guard::Get())
                    .wrap(RoleGuard::admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::get_users)),
            )
            .service(
                web::resource("/users/admin/{id}")
                    .guard(guard::Put())
                    .wrap(RoleGuard::admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::set_user_role)),
            )
            .service(
                web::resource("/users/admin/{email}")
                    .guard(guard::Get())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::check_admin)),
            )
            .service(
                web::resource("/users/moderator/{email}")
                    .guard(guard::Get())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::check_moderator)),
            )
            .service(
                web::resource("/users/{email}")
                    .guard(guard::Get())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::get_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .guard(guard::Delete())
                    .wrap(RoleGuard::admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::users::delete_user)),
            )
            // ==================== SCHOLARSHIPS ====================
            .route("/top-sholarship", web::get().to(api::scholarships::top_scholarships))
            .route("/allsholarship", web::get().to(api::scholarships::all_scholarships))
            .route("/scholarship-count", web::get().to(api::scholarships::scholarship_count))
            .service(
                web::resource("/scholarships")
                    .guard(guard::Post())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::scholarships::create_scholarship)),
            )
            .service(
                web::resource("/scholarships/{id}")
                    .guard(guard::Get())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::scholarships::get_scholarship)),
            )
            .service(
                web::resource("/scholarships/{id}")
                    .guard(guard::Patch())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::scholarships::update_scholarship)),
            )
            .service(
                web::resource("/scholarships/{id}")
                    .guard(guard::Delete())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::scholarships::delete_scholarship)),
            )
            // ==================== REVIEWS ====================
            .route("/top-reviews", web::get().to(api::reviews::top_reviews))
            .route(
                "/average-rating/{scholarshipID}",
                web::get().to(api::reviews::average_rating),
            )
            .service(
                web::resource("/reviews")
                    .guard(guard::Post())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::reviews::create_review)),
            )
            .service(
                web::resource("/reviews")
                    .guard(guard::Get())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::reviews::get_reviews)),
            )
            .service(
                web::resource("/reviews/{id}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::reviews::reviews_for_scholarship))
                    .route(web::patch().to(api::reviews::update_review))
                    .route(web::delete().to(api::reviews::delete_review)),
            )
            .service(
                web::resource("/myreviews/{email}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::reviews::my_reviews)),
            )
            // ==================== PAYMENTS ====================
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route("/payments", web::post().to(api::payments::record_payment))
            // ==================== APPLICATIONS ====================
            .service(
                web::resource("/appliedScholarship")
                    .guard(guard::Post())
                    .route(web::route().to(api::applications::apply)),
            )
            .service(
                web::resource("/appliedScholarship")
                    .guard(guard::Get())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::applications::get_applications)),
            )
            .service(
                web::resource("/appliedScholarship/{email}")
                    .guard(guard::Get())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::applications::applications_for_user)),
            )
            .service(
                web::resource("/appliedScholarship/{id}")
                    .guard(guard::Patch())
                    .wrap(RoleGuard::moderator_or_admin())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::applications::moderate_application)),
            )
            .service(
                web::resource("/appliedScholarship/{id}")
                    .guard(guard::Delete())
                    .wrap(AuthMiddleware)
                    .route(web::route().to(api::applications::delete_application)),
            )
            .service(
                web::resource("/appliedapplication/{id}")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::applications::application_by_scholarship))
                    .route(web::patch().to(api::applications::update_application)),
            )
            // ==================== UPLOADS ====================
            .route("/get-signature", web::get().to(api::uploads::get_signature))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
