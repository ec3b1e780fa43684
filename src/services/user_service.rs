use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::MongoDB;
use crate::models::User;
use crate::utils::error::AppError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";

/// Outcome of `POST /users`: either a fresh insert or a no-op because the
/// email is already registered.
pub enum CreateUserOutcome {
    Inserted(mongodb::bson::Bson),
    AlreadyExists,
}

/// Inserts the user only if no document with that email exists yet
/// (first-sign-in upsert semantics). The unique index on `email` backs the
/// check, so a losing racer surfaces as a duplicate-key error and is
/// reported the same way as the fast path.
pub async fn create_if_absent(db: &MongoDB, user: &User) -> Result<CreateUserOutcome, AppError> {
    let existing = db.users().find_one(doc! { "email": &user.email }).await?;
    if existing.is_some() {
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    match db.users().insert_one(user).await {
        Ok(result) => Ok(CreateUserOutcome::Inserted(result.inserted_id)),
        Err(e) if is_duplicate_key(&e) => Ok(CreateUserOutcome::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}

/// Lists users, optionally filtered by role (`GET /users?role=...`).
pub async fn list(db: &MongoDB, role: Option<&str>) -> Result<Vec<User>, AppError> {
    let filter = match role {
        Some(r) => doc! { "role": r },
        None => Document::new(),
    };
    let users = db.users().find(filter).await?.try_collect().await?;
    Ok(users)
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    let user = db.users().find_one(doc! { "email": email }).await?;
    Ok(user)
}

/// Role Resolver: the stored role for an email, or None for accounts
/// without one (default applicant). Looked up fresh on every guarded
/// request - never cached, never trusted from the token.
pub async fn find_role(db: &MongoDB, email: &str) -> Result<Option<String>, AppError> {
    let user = find_by_email(db, email).await?;
    Ok(user.and_then(|u| u.role))
}

/// `PUT /users/admin/:id` - sets the role field. Upsert keeps the call
/// total even when the id no longer resolves to a document.
pub async fn set_role(
    db: &MongoDB,
    id: &str,
    role: &str,
) -> Result<mongodb::results::UpdateResult, AppError> {
    let oid = parse_object_id(id)?;
    let result = db
        .users()
        .update_one(doc! { "_id": oid }, doc! { "$set": { "role": role } })
        .upsert(true)
        .await?;
    Ok(result)
}

pub async fn delete(db: &MongoDB, id: &str) -> Result<mongodb::results::DeleteResult, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.users().delete_one(doc! { "_id": oid }).await?;
    Ok(result)
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("invalid id".to_string()))
}

pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == 11000,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_rejects_garbage() {
        assert!(parse_object_id("not-an-oid").is_err());
        assert!(parse_object_id("65a1b2c3d4e5f6a7b8c9d0e1").is_ok());
    }
}
