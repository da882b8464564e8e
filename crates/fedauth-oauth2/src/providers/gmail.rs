// Gmail provider adapter, backed by the Google People API.
//
// Profile and contacts both come from people.googleapis.com with an
// explicit personFields list. Google marks the canonical entry of a
// multi-valued field (names, photos) with metadata.primary; emails and
// phone numbers are collected in full, preferring the canonicalForm of a
// phone number over its raw value.

use async_trait::async_trait;
use serde_json::Value;

use fedauth_core::error::{FedAuthError, Result};
use fedauth_core::user::{Contact, Profile};

use crate::adapter::{ContactQuery, Endpoints, OAuth2Api, ProviderAdapter};

use super::{entries, primary_entry, str_field};

static ENDPOINTS: Endpoints = Endpoints {
    api_base_url: "https://people.googleapis.com/v1/",
    authorize_url: "https://accounts.google.com/o/oauth2/auth",
    access_token_url: "https://accounts.google.com/o/oauth2/token",
    api_documentation: "https://developers.google.com/identity/protocols/OAuth2",
};

const DEFAULT_SCOPE: &str = "profile email \
    https://www.googleapis.com/auth/contacts.readonly \
    https://www.googleapis.com/auth/user.phonenumbers.read";

/// Google OAuth2 provider adapter (People API).
#[derive(Debug, Clone, Copy, Default)]
pub struct Gmail;

impl Gmail {
    fn person_fields(&self) -> String {
        self.profile_fields().join(",")
    }

    /// Phone numbers keep their canonical form when Google provides one.
    fn phone_number(entry: &Value) -> Option<String> {
        str_field(entry, "canonicalForm").or_else(|| str_field(entry, "value"))
    }
}

#[async_trait]
impl ProviderAdapter for Gmail {
    fn id(&self) -> &'static str {
        "gmail"
    }

    fn name(&self) -> &'static str {
        "Gmail"
    }

    fn default_scope(&self) -> &'static str {
        DEFAULT_SCOPE
    }

    fn endpoints(&self) -> &'static Endpoints {
        &ENDPOINTS
    }

    // Offline access so the external flow can obtain a refresh token.
    fn authorize_url_params(&self) -> &'static [(&'static str, &'static str)] {
        &[("access_type", "offline")]
    }

    fn profile_fields(&self) -> &'static [&'static str] {
        &["emailAddresses", "names", "photos", "phoneNumbers"]
    }

    fn map_profile(&self, data: &Value) -> Result<Profile> {
        let resource_name = data
            .get("resourceName")
            .and_then(Value::as_str)
            .ok_or_else(|| FedAuthError::unexpected("resourceName"))?;

        let mut profile = Profile {
            identifier: resource_name.trim_start_matches("people/").to_string(),
            profile_url: Some(resource_name.to_string()),
            ..Default::default()
        };

        if let Some(name) = primary_entry(data.get("names")) {
            profile.first_name = str_field(name, "givenName");
            profile.last_name = str_field(name, "familyName");
            profile.display_name = str_field(name, "displayName");
        }

        if let Some(photo) = primary_entry(data.get("photos")) {
            profile.photo_url = str_field(photo, "url");
        }

        for email in entries(data.get("emailAddresses")) {
            if let Some(value) = str_field(email, "value") {
                profile.emails.push(value);
            }
        }

        for phone in entries(data.get("phoneNumbers")) {
            if let Some(value) = Self::phone_number(phone) {
                profile.phone_numbers.push(value);
            }
        }

        Ok(profile)
    }

    fn map_contact(&self, entry: &Value) -> Result<Contact> {
        let resource_name = str_field(entry, "resourceName");

        let mut contact = Contact {
            identifier: resource_name.clone().unwrap_or_default(),
            profile_url: resource_name,
            ..Default::default()
        };

        if let Some(name) = primary_entry(entry.get("names")) {
            contact.display_name = str_field(name, "displayName");
        }

        if let Some(photo) = primary_entry(entry.get("photos")) {
            contact.photo_url = str_field(photo, "url");
        }

        for email in entries(entry.get("emailAddresses")) {
            if let Some(value) = str_field(email, "value") {
                contact.emails.push(value);
            }
        }

        for phone in entries(entry.get("phoneNumbers")) {
            if let Some(value) = Self::phone_number(phone) {
                contact.phone_numbers.push(value);
            }
        }

        // A contact without a listed name still gets a usable label.
        if contact.display_name.as_deref().map_or(true, str::is_empty) {
            contact.display_name = contact.emails.first().cloned();
        }

        Ok(contact)
    }

    async fn get_user_profile(&self, api: &dyn OAuth2Api) -> Result<Profile> {
        let path = format!("people/me?personFields={}", self.person_fields());
        let response = api
            .api_request(&path)
            .await?
            .ok_or_else(|| FedAuthError::unexpected("resourceName"))?;

        self.map_profile(&response)
    }

    async fn get_user_contacts(
        &self,
        api: &dyn OAuth2Api,
        query: &ContactQuery,
    ) -> Result<Vec<Contact>> {
        let mut path = format!(
            "people/me/connections?personFields={}",
            self.person_fields()
        );
        if let Some(page_size) = query.page_size {
            path.push_str(&format!("&pageSize={page_size}"));
        }

        let Some(response) = api.api_request(&path).await? else {
            return Ok(Vec::new());
        };

        let connections = response
            .get("connections")
            .and_then(Value::as_array)
            .ok_or_else(|| FedAuthError::unexpected("connections"))?;

        connections
            .iter()
            .map(|entry| self.map_contact(entry))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_fixture() -> Value {
        json!({
            "resourceName": "people/108123456789",
            "names": [
                {
                    "metadata": {"primary": false},
                    "displayName": "Old Name",
                    "givenName": "Old",
                    "familyName": "Name"
                },
                {
                    "metadata": {"primary": true},
                    "displayName": "Ada Lovelace",
                    "givenName": "Ada",
                    "familyName": "Lovelace"
                }
            ],
            "photos": [
                {"metadata": {"primary": false}, "url": "https://lh3.example/old"},
                {"metadata": {"primary": true}, "url": "https://lh3.example/current"}
            ],
            "emailAddresses": [
                {"value": "ada@example.com"},
                {"value": "lovelace@work.example"}
            ],
            "phoneNumbers": [
                {"value": "020 7946 0018", "canonicalForm": "+442079460018"},
                {"value": "07700 900123"}
            ]
        })
    }

    #[test]
    fn test_map_profile_strips_resource_prefix() {
        let profile = Gmail.map_profile(&profile_fixture()).unwrap();
        assert_eq!(profile.identifier, "108123456789");
        assert_eq!(profile.profile_url.as_deref(), Some("people/108123456789"));
    }

    #[test]
    fn test_map_profile_uses_primary_name_and_photo() {
        let profile = Gmail.map_profile(&profile_fixture()).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(profile.photo_url.as_deref(), Some("https://lh3.example/current"));
    }

    #[test]
    fn test_map_profile_collects_emails_in_order() {
        let profile = Gmail.map_profile(&profile_fixture()).unwrap();
        assert_eq!(profile.emails, vec!["ada@example.com", "lovelace@work.example"]);
    }

    #[test]
    fn test_map_profile_prefers_canonical_phone_form() {
        let profile = Gmail.map_profile(&profile_fixture()).unwrap();
        assert_eq!(profile.phone_numbers, vec!["+442079460018", "07700 900123"]);
    }

    #[test]
    fn test_map_profile_without_resource_name_fails() {
        let err = Gmail.map_profile(&json!({"names": []})).unwrap_err();
        assert!(matches!(err, FedAuthError::UnexpectedApiResponse(_)));
    }

    #[test]
    fn test_map_contact_display_name_falls_back_to_email() {
        let contact = Gmail
            .map_contact(&json!({
                "resourceName": "people/c77",
                "emailAddresses": [{"value": "grace@example.com"}]
            }))
            .unwrap();
        assert_eq!(contact.identifier, "people/c77");
        assert_eq!(contact.display_name.as_deref(), Some("grace@example.com"));
    }

    #[test]
    fn test_map_contact_keeps_primary_name_over_email() {
        let contact = Gmail
            .map_contact(&json!({
                "resourceName": "people/c78",
                "names": [{"metadata": {"primary": true}, "displayName": "Grace Hopper"}],
                "emailAddresses": [{"value": "grace@example.com"}]
            }))
            .unwrap();
        assert_eq!(contact.display_name.as_deref(), Some("Grace Hopper"));
        assert_eq!(contact.emails, vec!["grace@example.com"]);
    }
}
