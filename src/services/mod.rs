pub mod application_service;
pub mod imagekit_service;
pub mod payment_service;
pub mod review_service;
pub mod scholarship_service;
pub mod token_service;
pub mod user_service;
