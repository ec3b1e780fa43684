use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account document in the `users` collection. Created on first sign-in;
/// `role` is absent for regular applicants and only set by an admin.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::serialize_oid_as_hex",
        default
    )]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    pub email: String,

    /// Profile name from the front-end auth provider
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar URL coming from the front-end auth provider
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// "applicant" | "moderator" | "admin"; absent means applicant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body of `PUT /users/admin/:id` - assigns a role to a user.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetRoleRequest {
    #[serde(rename = "userRole")]
    pub user_role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_body_keeps_profile_fields() {
        let body = serde_json::json!({
            "email": "alice@example.com",
            "displayName": "Alice Rahman",
            "photoURL": "https://img.example.com/alice.png"
        });
        let user: User = serde_json::from_value(body).unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Alice Rahman"));
        assert_eq!(user.photo_url.as_deref(), Some("https://img.example.com/alice.png"));

        let wire = serde_json::to_value(&user).unwrap();
        assert_eq!(wire["displayName"], "Alice Rahman");
        assert_eq!(wire["photoURL"], "https://img.example.com/alice.png");
        assert!(wire.get("_id").is_none());
    }
}
