use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable};
use serde::Serialize;

/// One persisted record describing an uploaded image.
#[derive(Debug, Serialize, Queryable)]
pub struct Image {
    pub id: i32,
    pub stored_name: String,
    pub original_name: String,
    pub storage_path: String,
    pub mime_type: String,
    pub size: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage {
    pub stored_name: String,
    pub original_name: String,
    pub storage_path: String,
    pub mime_type: String,
    pub size: i64,
}

/// The projection returned by the upload and list endpoints.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i32,
    pub filename: String,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        let url = format!("/uploads/{}", image.stored_name);
        ImageResponse {
            id: image.id,
            filename: image.stored_name,
            url,
            created_at: image.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn response_derives_relative_url_from_stored_name() {
        let image = Image {
            id: 7,
            stored_name: "1749718800000-a1b2c3d4.png".to_string(),
            original_name: "cat.png".to_string(),
            storage_path: "uploads/1749718800000-a1b2c3d4.png".to_string(),
            mime_type: "image/png".to_string(),
            size: 1024,
            created_at: NaiveDateTime::default(),
        };

        let resp = ImageResponse::from(image);
        assert_eq!(resp.url, "/uploads/1749718800000-a1b2c3d4.png");
        assert_eq!(resp.filename, "1749718800000-a1b2c3d4.png");
    }

    #[test]
    fn response_serializes_with_camel_case_timestamp() {
        let resp = ImageResponse {
            id: 1,
            filename: "x.png".to_string(),
            url: "/uploads/x.png".to_string(),
            created_at: NaiveDateTime::default(),
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
