use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

use crate::models::{AppliedScholarship, Payment, Review, Scholarship, User};

/// Shared MongoDB handle. Cloning is cheap; the driver pools connections
/// internally.
#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Database name from the URI path, falling back to the app default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("AwsScholars");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the route handlers rely on. Idempotent: Mongo
    /// treats re-creation of an identical index as a no-op.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("Creating database indexes...");

        // users(email) unique - one account per email
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();
        self.users().create_index(email_index).await?;
        log::info!("   index ready: users(email) unique");

        // appliedScholarships(userEmail, scholarshipId) unique - closes the
        // check-then-insert race on duplicate applications
        let application_index = IndexModel::builder()
            .keys(doc! { "userEmail": 1, "scholarshipId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_scholarship_unique".to_string())
                    .build(),
            )
            .build();
        self.applied_scholarships().create_index(application_index).await?;
        log::info!("   index ready: appliedScholarships(userEmail, scholarshipId) unique");

        // reviews(scholarshipId) - per-listing review pages and the
        // average-rating aggregation
        let review_index = IndexModel::builder()
            .keys(doc! { "scholarshipId": 1 })
            .build();
        self.reviews().create_index(review_index).await?;
        log::info!("   index ready: reviews(scholarshipId)");

        log::info!("Database indexes ready");
        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn scholarships(&self) -> Collection<Scholarship> {
        self.db.collection("scholarships")
    }

    pub fn reviews(&self) -> Collection<Review> {
        self.db.collection("reviews")
    }

    pub fn applied_scholarships(&self) -> Collection<AppliedScholarship> {
        self.db.collection("appliedScholarships")
    }

    pub fn payments(&self) -> Collection<Payment> {
        self.db.collection("payments")
    }
}
