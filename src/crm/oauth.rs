use crate::config::ZohoConfig;
use crate::error::OauthError;
use oauth2::basic::{
    BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
    BasicTokenType,
};
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, Client as OAuth2Client, ClientId, ClientSecret,
    EndpointNotSet, EndpointSet, ExtraTokenFields, RedirectUrl, StandardRevocableToken,
    StandardTokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;
use url::Url;

/// Extra (non-standard) fields of the Zoho token response.
///
/// `api_domain` names the data centre the token is valid for. Everything else is kept via
/// `flatten`. Debug output lists keys only.
#[derive(Clone, Deserialize, Serialize)]
pub struct ZohoTokenFields {
    pub api_domain: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl ExtraTokenFields for ZohoTokenFields {}

impl std::fmt::Debug for ZohoTokenFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.extra.keys().collect();
        keys.sort();

        f.debug_struct("ZohoTokenFields")
            .field("api_domain", &self.api_domain)
            .field("extra_keys", &keys)
            .finish()
    }
}

/// Standard OAuth2 token endpoint response extended with [`ZohoTokenFields`].
pub type ZohoTokenResponse = StandardTokenResponse<ZohoTokenFields, BasicTokenType>;

type ZohoOauth2Client = OAuth2Client<
    BasicErrorResponse,
    ZohoTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Authorization-code flow against the Zoho accounts server.
///
/// No `state` parameter and no PKCE: the authorize URL is a static function of the config.
pub struct ZohoOauth {
    client: ZohoOauth2Client,
    authorize_url: Url,
}

impl ZohoOauth {
    pub fn new(cfg: &ZohoConfig) -> Self {
        let client = OAuth2Client::<
            BasicErrorResponse,
            ZohoTokenResponse,
            BasicTokenIntrospectionResponse,
            StandardRevocableToken,
            BasicRevocationErrorResponse,
        >::new(ClientId::new(cfg.client_id.clone()))
        .set_client_secret(ClientSecret::new(cfg.client_secret.clone()))
        // Zoho expects client_id/client_secret as form fields, not HTTP Basic.
        .set_auth_type(AuthType::RequestBody)
        .set_auth_uri(AuthUrl::from_url(cfg.auth_url.clone()))
        .set_token_uri(TokenUrl::from_url(cfg.token_url.clone()))
        .set_redirect_uri(RedirectUrl::from_url(cfg.redirect_uri.clone()));

        Self {
            client,
            authorize_url: build_authorize_url(cfg),
        }
    }

    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    /// Exchanges an authorization code for a token with a single form-encoded POST.
    pub async fn exchange_code(
        &self,
        code: &str,
        http_client: &reqwest::Client,
    ) -> Result<ZohoTokenResponse, OauthError> {
        let token: ZohoTokenResponse = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(http_client)
            .await?;
        info!(
            api_domain = token.extra_fields().api_domain.as_deref().unwrap_or("<none>"),
            "Zoho OAuth2 code exchange completed successfully"
        );
        Ok(token)
    }
}

fn build_authorize_url(cfg: &ZohoConfig) -> Url {
    let mut url = cfg.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("scope", &cfg.scope)
        .append_pair("client_id", &cfg.client_id)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("redirect_uri", cfg.redirect_uri.as_str());
    url
}
