// Instagram provider adapter.
//
// Instagram wants the access token as a query parameter on every API call,
// so initialize() mirrors the stored token into the request parameters.
// The contact list (followed accounts) is paginated: each page carries an
// absolute cursor URL under paging.next until the last one.

use async_trait::async_trait;
use serde_json::Value;

use fedauth_core::error::{FedAuthError, Result};
use fedauth_core::user::{Contact, Profile};

use crate::adapter::{ContactQuery, Endpoints, OAuth2Api, ProviderAdapter};
use crate::client::{HttpApi, ACCESS_TOKEN};

use super::{field_to_string, non_empty_field, str_field};

static ENDPOINTS: Endpoints = Endpoints {
    api_base_url: "https://graph.facebook.com/v2.8/",
    authorize_url: "https://api.instagram.com/oauth/authorize/",
    access_token_url: "https://api.instagram.com/oauth/access_token",
    api_documentation: "https://www.instagram.com/developer/authentication/",
};

/// Instagram OAuth2 provider adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instagram;

#[async_trait]
impl ProviderAdapter for Instagram {
    fn id(&self) -> &'static str {
        "instagram"
    }

    fn name(&self) -> &'static str {
        "Instagram"
    }

    fn default_scope(&self) -> &'static str {
        "follower_list"
    }

    fn endpoints(&self) -> &'static Endpoints {
        &ENDPOINTS
    }

    // Instagram authenticates API calls with an access_token query
    // parameter rather than a header.
    fn initialize(&self, api: &mut HttpApi) {
        if let Some(token) = api.stored_data(ACCESS_TOKEN) {
            api.set_request_param(ACCESS_TOKEN, token);
        }
    }

    fn map_profile(&self, response: &Value) -> Result<Profile> {
        let data = response
            .get("data")
            .ok_or_else(|| FedAuthError::unexpected("data"))?;

        let mut profile = Profile {
            identifier: field_to_string(data, "id").unwrap_or_default(),
            description: str_field(data, "bio"),
            photo_url: str_field(data, "profile_picture"),
            web_site_url: str_field(data, "website"),
            display_name: non_empty_field(data, "full_name")
                .or_else(|| non_empty_field(data, "username")),
            ..Default::default()
        };

        if let Some(counts) = data.get("counts") {
            if !counts.is_null() {
                profile.data = counts.clone();
            }
        }

        Ok(profile)
    }

    fn map_contact(&self, entry: &Value) -> Result<Contact> {
        Ok(Contact {
            identifier: field_to_string(entry, "id").unwrap_or_default(),
            display_name: str_field(entry, "full_name"),
            photo_url: str_field(entry, "profile_picture"),
            ..Default::default()
        })
    }

    async fn get_user_profile(&self, api: &dyn OAuth2Api) -> Result<Profile> {
        let response = api
            .api_request("users/self/")
            .await?
            .ok_or_else(|| FedAuthError::unexpected("data"))?;

        self.map_profile(&response)
    }

    async fn get_user_contacts(
        &self,
        api: &dyn OAuth2Api,
        _query: &ContactQuery,
    ) -> Result<Vec<Contact>> {
        let mut contacts = Vec::new();
        let mut api_url = "users/self/follows".to_string();

        loop {
            let Some(response) = api.api_request(&api_url).await? else {
                break;
            };

            let data = response
                .get("data")
                .and_then(Value::as_array)
                .ok_or_else(|| FedAuthError::unexpected("data"))?;

            for entry in data {
                contacts.push(self.map_contact(entry)?);
            }

            match response.pointer("/paging/next").and_then(Value::as_str) {
                Some(next) if !next.is_empty() => api_url = next.to_string(),
                _ => break,
            }
        }

        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_fixture() -> Value {
        json!({
            "data": {
                "id": 1574083,
                "username": "snoopdogg",
                "full_name": "Snoop Dogg",
                "profile_picture": "https://distillery.example/profile.jpg",
                "bio": "This is my bio",
                "website": "https://snoopdogg.example",
                "counts": {"media": 1320, "follows": 420, "followed_by": 3410}
            }
        })
    }

    #[test]
    fn test_map_profile_fields() {
        let profile = Instagram.map_profile(&profile_fixture()).unwrap();
        assert_eq!(profile.identifier, "1574083");
        assert_eq!(profile.display_name.as_deref(), Some("Snoop Dogg"));
        assert_eq!(profile.description.as_deref(), Some("This is my bio"));
        assert_eq!(profile.web_site_url.as_deref(), Some("https://snoopdogg.example"));
        assert_eq!(
            profile.photo_url.as_deref(),
            Some("https://distillery.example/profile.jpg")
        );
        assert_eq!(profile.data["media"], 1320);
    }

    #[test]
    fn test_map_profile_display_name_falls_back_to_username() {
        let mut fixture = profile_fixture();
        fixture["data"]["full_name"] = json!("");
        let profile = Instagram.map_profile(&fixture).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("snoopdogg"));

        fixture["data"].as_object_mut().unwrap().remove("full_name");
        let profile = Instagram.map_profile(&fixture).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("snoopdogg"));
    }

    #[test]
    fn test_map_profile_without_data_key_fails() {
        let err = Instagram
            .map_profile(&json!({"meta": {"code": 200}}))
            .unwrap_err();
        assert!(matches!(err, FedAuthError::UnexpectedApiResponse(_)));
    }

    #[test]
    fn test_map_contact_fields() {
        let contact = Instagram
            .map_contact(&json!({
                "id": 372,
                "full_name": "Kevin S",
                "profile_picture": "https://distillery.example/kevin.jpg"
            }))
            .unwrap();
        assert_eq!(contact.identifier, "372");
        assert_eq!(contact.display_name.as_deref(), Some("Kevin S"));
        assert_eq!(
            contact.photo_url.as_deref(),
            Some("https://distillery.example/kevin.jpg")
        );
        assert!(contact.emails.is_empty());
    }
}
