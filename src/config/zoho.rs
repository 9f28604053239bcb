use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use url::Url;

/// Zoho CRM OAuth client and REST API configuration managed by Figment.
///
/// All values are static for the process lifetime; there is no rotation.
#[derive(Clone, Deserialize, Serialize)]
pub struct ZohoConfig {
    /// OAuth client id registered in the Zoho API console.
    /// TOML: `zoho.client_id`. Must be provided.
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub client_id: String,

    /// OAuth client secret.
    /// TOML: `zoho.client_secret`. Must be provided.
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub client_secret: String,

    /// Redirect URI registered for the client; must route to `/auth/callback` on this server.
    /// TOML: `zoho.redirect_uri`. Default: `http://localhost:3000/auth/callback`.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: Url,

    /// CRM REST API base URL (the `Accounts` module is appended).
    /// TOML: `zoho.api_base_url`. Default: `https://crm.zoho.com/crm/v2`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,

    /// OAuth authorization endpoint.
    /// TOML: `zoho.auth_url`. Default: `https://accounts.zoho.com/oauth/v2/auth`.
    #[serde(default = "default_auth_url")]
    pub auth_url: Url,

    /// OAuth token endpoint.
    /// TOML: `zoho.token_url`. Default: `https://accounts.zoho.com/oauth/v2/token`.
    #[serde(default = "default_token_url")]
    pub token_url: Url,

    /// Zoho organization id. When non-empty it is sent as `X-CRM-ORG` on CRM calls.
    /// TOML: `zoho.organization_id`. Default: empty.
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub organization_id: String,

    /// OAuth scope requested by `/auth/url`.
    /// TOML: `zoho.scope`. Default: `ZohoCRM.modules.ALL`.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Optional upstream HTTP proxy for token and CRM calls.
    /// TOML: `zoho.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Default for ZohoConfig {
    fn default() -> Self {
        Self {
            // No usable default. `Config::validate()` enforces non-empty.
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            api_base_url: default_api_base_url(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            organization_id: String::new(),
            scope: default_scope(),
            proxy: None,
        }
    }
}

impl std::fmt::Debug for ZohoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZohoConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri.as_str())
            .field("api_base_url", &self.api_base_url.as_str())
            .field("auth_url", &self.auth_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("organization_id", &self.organization_id)
            .field("scope", &self.scope)
            .field("proxy", &self.proxy.as_ref().map(Url::as_str))
            .finish()
    }
}

impl ZohoConfig {
    /// `{api_base_url}/Accounts`, keeping any path prefix of the base URL.
    pub fn accounts_url(&self) -> Url {
        let mut url = self.api_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("Accounts");
        }
        url
    }

    /// Diagnostic callback on the same origin as the redirect URI.
    pub fn test_callback_url(&self) -> Url {
        let mut url = self.redirect_uri.clone();
        url.set_path("/test-callback");
        url.set_query(None);
        url
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for a zoho credential field",
        )),
    }
}

fn default_redirect_uri() -> Url {
    Url::parse("http://localhost:3000/auth/callback").expect("valid default redirect uri")
}

fn default_api_base_url() -> Url {
    Url::parse("https://crm.zoho.com/crm/v2").expect("valid default api base url")
}

fn default_auth_url() -> Url {
    Url::parse("https://accounts.zoho.com/oauth/v2/auth").expect("valid default auth url")
}

fn default_token_url() -> Url {
    Url::parse("https://accounts.zoho.com/oauth/v2/token").expect("valid default token url")
}

fn default_scope() -> String {
    "ZohoCRM.modules.ALL".to_string()
}
