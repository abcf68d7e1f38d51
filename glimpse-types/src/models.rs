use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Dates arrive as RFC3339 strings ("2024-03-03T16:05:00.000Z")
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// A post as returned by `/posts/getAllByUsername/{username}`.
///
/// Like and comment counts are not part of the record; they are fetched
/// separately per post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub content: String,
    #[serde(rename = "imageId", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(with = "datetime_format")]
    pub date: DateTime<Utc>,
}

/// An uploaded image as returned by `/images/getAll`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub img: ImageBlob,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlob {
    pub data: ImageData,
    #[serde(rename = "contentType")]
    pub content_type: String,
}

impl ImageBlob {
    /// Inline `data:` URI for the blob
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data.to_base64())
    }
}

/// Image payload. The backend serializes a raw buffer either as
/// `{ "type": "Buffer", "data": [..] }` or as a bare byte array, and some
/// records carry an already base64-encoded string instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageData {
    Buffer { data: Vec<u8> },
    Bytes(Vec<u8>),
    Encoded(String),
}

impl ImageData {
    pub fn to_base64(&self) -> String {
        match self {
            ImageData::Buffer { data } | ImageData::Bytes(data) => STANDARD.encode(data),
            ImageData::Encoded(encoded) => encoded.clone(),
        }
    }

    /// Size of the decoded payload in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            ImageData::Buffer { data } | ImageData::Bytes(data) => data.len(),
            ImageData::Encoded(encoded) => {
                let trimmed = encoded.trim_end_matches('=');
                trimmed.len() * 3 / 4
            }
        }
    }
}

/// Entry of `/user-likes/{userId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "postId")]
    pub post_id: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

/// The signed-in user, decoded from the access credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// Request/Response types for API
#[derive(Debug, Serialize, Deserialize)]
pub struct LikeRequest {
    #[serde(rename = "postId")]
    pub post_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_deserializes_mongo_shape() {
        let json = r#"{
            "_id": "65e4a1",
            "username": "ana",
            "content": "hello",
            "imageId": "img1",
            "date": "2024-03-03T16:05:00.000Z",
            "__v": 0
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, "65e4a1");
        assert_eq!(post.image_id.as_deref(), Some("img1"));
        assert_eq!(post.date.to_rfc3339(), "2024-03-03T16:05:00+00:00");
    }

    #[test]
    fn test_post_without_image() {
        let json = r#"{"_id":"p","username":"u","content":"c","date":"2024-01-01T00:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.image_id.is_none());
    }

    #[test]
    fn test_image_buffer_payload() {
        let json = r#"{
            "_id": "a",
            "name": "x",
            "desc": "a cat",
            "img": { "data": { "type": "Buffer", "data": [104, 105] }, "contentType": "image/png" }
        }"#;
        let image: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(image.img.data, ImageData::Buffer { data: vec![104, 105] });
        assert_eq!(image.img.data_uri(), "data:image/png;base64,aGk=");
        assert_eq!(image.img.data.byte_len(), 2);
    }

    #[test]
    fn test_image_encoded_payload() {
        let json = r#"{"_id":"a","name":"x","img":{"data":"aGk=","contentType":"image/jpeg"}}"#;
        let image: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(image.desc, "");
        assert_eq!(image.img.data, ImageData::Encoded("aGk=".to_string()));
        assert_eq!(image.img.data_uri(), "data:image/jpeg;base64,aGk=");
        assert_eq!(image.img.data.byte_len(), 2);
    }

    #[test]
    fn test_like_request_uses_camel_case() {
        let body = LikeRequest {
            post_id: "p1".to_string(),
            user_id: "u1".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({ "postId": "p1", "userId": "u1" }));
    }
}
