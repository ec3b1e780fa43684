pub mod applications;
pub mod auth;
pub mod health;
pub mod payments;
pub mod reviews;
pub mod scholarships;
pub mod swagger;
pub mod uploads;
pub mod users;

use mongodb::bson::Bson;
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};

/// The front-end consumes the Node driver's raw acknowledgement objects, so
/// the driver results are mapped onto the same field names here.
fn bson_id_json(id: &Bson) -> serde_json::Value {
    match id {
        Bson::ObjectId(oid) => serde_json::Value::String(oid.to_hex()),
        Bson::Null => serde_json::Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}

pub(crate) fn insert_ack(result: &InsertOneResult) -> serde_json::Value {
    serde_json::json!({
        "acknowledged": true,
        "insertedId": bson_id_json(&result.inserted_id),
    })
}

pub(crate) fn inserted_id_ack(inserted_id: &Bson) -> serde_json::Value {
    serde_json::json!({
        "acknowledged": true,
        "insertedId": bson_id_json(inserted_id),
    })
}

pub(crate) fn update_ack(result: &UpdateResult) -> serde_json::Value {
    serde_json::json!({
        "acknowledged": true,
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedCount": if result.upserted_id.is_some() { 1 } else { 0 },
        "upsertedId": result.upserted_id.as_ref().map(bson_id_json),
    })
}

pub(crate) fn delete_ack(result: &DeleteResult) -> serde_json::Value {
    serde_json::json!({
        "acknowledged": true,
        "deletedCount": result.deleted_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_object_id_serialized_as_hex() {
        let oid = ObjectId::new();
        let value = bson_id_json(&Bson::ObjectId(oid));
        assert_eq!(value, serde_json::Value::String(oid.to_hex()));
    }

    #[test]
    fn test_null_inserted_id_stays_null() {
        let ack = inserted_id_ack(&Bson::Null);
        assert!(ack["insertedId"].is_null());
        assert_eq!(ack["acknowledged"], true);
    }
}
