//! Serde helpers that complement the ones shipped with `bson`.

use bson::oid::ObjectId;
use serde::Serializer;

/// Serializes an `Option<ObjectId>` as its 24-character hex string, or null.
///
/// `bson::serde_helpers` covers the mandatory `_id` field but has no
/// optional counterpart, which the appointment's `doctor_id` needs.
pub fn serialize_opt_object_id_as_hex_string<S>(
    value: &Option<ObjectId>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(serialize_with = "serialize_opt_object_id_as_hex_string")]
        doctor_id: Option<ObjectId>,
    }

    #[test]
    fn some_becomes_hex_string() {
        let oid = ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_string(&Wrapper {
            doctor_id: Some(oid),
        })
        .unwrap();
        assert_eq!(json, r#"{"doctor_id":"507f1f77bcf86cd799439011"}"#);
    }

    #[test]
    fn none_becomes_null() {
        let json = serde_json::to_string(&Wrapper { doctor_id: None }).unwrap();
        assert_eq!(json, r#"{"doctor_id":null}"#);
    }
}
