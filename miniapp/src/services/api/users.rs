//! # User Endpoints
//!
//! Search, transaction partners, and avatar upload.

use reqwest::multipart::{Form, Part};
use shared::dto::{AvatarResponse, UserProfile};

use super::client::ApiClient;
use super::error::ApiError;

/// MIME type of a supported image, from its file extension.
pub fn image_mime(file_name: &str) -> Option<&'static str> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())?;
    match ext.as_str() {
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

impl ApiClient {
    /// Users whose name contains `username`; the backend excludes the caller.
    pub async fn search_users(
        &self,
        token: &str,
        username: &str,
    ) -> Result<Vec<UserProfile>, ApiError> {
        let request = self
            .client
            .get(self.url("/users/search"))
            .bearer_auth(token)
            .query(&[("username", username)]);
        self.send_json("users/search", request).await
    }

    /// Counterparties of the caller's completed listings
    pub async fn transaction_partners(&self, token: &str) -> Result<Vec<UserProfile>, ApiError> {
        let request = self
            .client
            .get(self.url("/users/transactions"))
            .bearer_auth(token);
        self.send_json("users/transactions", request).await
    }

    /// Upload an avatar as the multipart field `file`.
    #[tracing::instrument(skip(self, token, bytes), fields(size = bytes.len()))]
    pub async fn upload_avatar(
        &self,
        token: &str,
        user_id: i64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AvatarResponse, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(image_mime(file_name).unwrap_or("application/octet-stream"))
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let form = Form::new().part("file", part);

        let path = format!("/users/{}/avatar", user_id);
        let request = self
            .client
            .post(self.url(&path))
            .bearer_auth(token)
            .multipart(form);

        let response: AvatarResponse = self.send_json("users/avatar", request).await?;
        tracing::info!(avatar_url = %response.avatar_url, "Avatar uploaded");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime("me.PNG"), Some("image/png"));
        assert_eq!(image_mime("me.jpeg"), Some("image/jpeg"));
        assert_eq!(image_mime("me.jpg"), Some("image/jpeg"));
        assert_eq!(image_mime("notes.txt"), None);
        assert_eq!(image_mime("noext"), None);
    }
}
