pub mod applied_scholarship;
pub mod payment;
pub mod review;
pub mod scholarship;
pub mod user;

pub use applied_scholarship::*;
pub use payment::*;
pub use review::*;
pub use scholarship::*;
pub use user::*;

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

/// Serializes the Mongo `_id` as a plain hex string on the JSON side,
/// matching what the Node driver put on the wire for the front-end.
pub fn serialize_oid_as_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}
