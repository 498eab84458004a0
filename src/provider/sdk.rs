// This file is part of the crossplane-provider-launchdarkly project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use async_trait::async_trait;

use tf_provider::{AttributePath, Diagnostics};

use super::{
    ProviderMeta, ResourceConfig, SdkProvider, KEY_ACCESS_TOKEN, KEY_API_HOST, KEY_OAUTH_TOKEN,
};

pub const DEFAULT_API_HOST: &str = "https://app.launchdarkly.com";

/// Token used to authenticate against the LaunchDarkly REST API.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiCredential {
    AccessToken(String),
    OAuthToken(String),
}

impl ApiCredential {
    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        match self {
            Self::AccessToken(token) => token.clone(),
            Self::OAuthToken(token) => format!("Bearer {token}"),
        }
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
            Self::OAuthToken(_) => f.write_str("OAuthToken(<redacted>)"),
        }
    }
}

/// Connection settings of a configured SDK provider, exposed as its meta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDarklyClient {
    pub api_host: String,
    pub credential: ApiCredential,
    pub user_agent: String,
}

#[derive(Debug, Default, Clone)]
pub struct LaunchDarklySdkProvider {
    client: Option<Arc<LaunchDarklyClient>>,
}

impl LaunchDarklySdkProvider {
    /// Configured client, if `configure` succeeded
    pub fn client(&self) -> Option<&Arc<LaunchDarklyClient>> {
        self.client.as_ref()
    }
}

/// Default to `https` when no scheme is given; `None` when no host remains.
fn normalize_host(host: &str) -> Option<String> {
    let (scheme, rest) = host.trim().split_once("://").unwrap_or(("https", host.trim()));
    let rest = rest.trim_end_matches('/');
    if scheme.is_empty() || rest.is_empty() {
        None
    } else {
        Some(format!("{scheme}://{rest}"))
    }
}

#[async_trait]
impl SdkProvider for LaunchDarklySdkProvider {
    async fn configure<'a>(
        &mut self,
        diags: &mut Diagnostics,
        config: &ResourceConfig<'a>,
    ) -> Option<()> {
        let credential = match (config.get(KEY_ACCESS_TOKEN), config.get(KEY_OAUTH_TOKEN)) {
            (Some(token), None) => Some(ApiCredential::AccessToken(token.to_string())),
            (None, Some(token)) => Some(ApiCredential::OAuthToken(token.to_string())),
            (None, None) => {
                diags.error_short(
                    "either an access_token or an oauth_token must be specified",
                    AttributePath::new(KEY_ACCESS_TOKEN),
                );
                None
            }
            (Some(_), Some(_)) => {
                diags.error_short(
                    "access_token and oauth_token cannot both be set",
                    AttributePath::new(KEY_OAUTH_TOKEN),
                );
                None
            }
        };

        let host = config.get(KEY_API_HOST).unwrap_or(DEFAULT_API_HOST);
        let api_host = normalize_host(host);
        if api_host.is_none() {
            diags.error(
                "Invalid api_host",
                format!("`{host}` is not a valid LaunchDarkly API host"),
                AttributePath::new(KEY_API_HOST),
            );
        }

        if !diags.errors.is_empty() {
            return None;
        }

        self.client = Some(Arc::new(LaunchDarklyClient {
            api_host: api_host?,
            credential: credential?,
            user_agent: format!(
                "crossplane-provider-launchdarkly/{}",
                env!("CARGO_PKG_VERSION")
            ),
        }));
        Some(())
    }

    fn meta(&self) -> Option<ProviderMeta> {
        self.client
            .clone()
            .map(|client| client as ProviderMeta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderConfiguration;

    async fn configure(
        configuration: ProviderConfiguration,
    ) -> (LaunchDarklySdkProvider, Diagnostics, Option<()>) {
        let mut provider = LaunchDarklySdkProvider::default();
        let mut diags = Diagnostics::default();
        let result = provider
            .configure(&mut diags, &ResourceConfig::new_raw(&configuration))
            .await;
        (provider, diags, result)
    }

    #[tokio::test]
    async fn access_token_with_default_host() {
        let (provider, diags, result) = configure(ProviderConfiguration {
            access_token: Some("api-123".into()),
            ..Default::default()
        })
        .await;

        assert_eq!(result, Some(()));
        assert!(diags.errors.is_empty());
        let client = provider.client().unwrap();
        assert_eq!(client.api_host, DEFAULT_API_HOST);
        assert_eq!(client.credential.authorization(), "api-123");
        assert!(client.user_agent.starts_with("crossplane-provider-launchdarkly/"));

        let meta = provider.meta().unwrap();
        assert!(meta.downcast_ref::<LaunchDarklyClient>().is_some());
    }

    #[tokio::test]
    async fn oauth_token_with_custom_host() {
        let (provider, _, result) = configure(ProviderConfiguration {
            oauth_token: Some("oauth".into()),
            api_host: Some("app.launchdarkly.us/".into()),
            ..Default::default()
        })
        .await;

        assert_eq!(result, Some(()));
        let client = provider.client().unwrap();
        assert_eq!(client.api_host, "https://app.launchdarkly.us");
        assert_eq!(client.credential.authorization(), "Bearer oauth");
    }

    #[tokio::test]
    async fn missing_token_is_an_error() {
        let (provider, diags, result) = configure(ProviderConfiguration {
            api_host: Some("https://h".into()),
            ..Default::default()
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(diags.errors.len(), 1);
        assert_eq!(
            diags.errors[0].summary,
            "either an access_token or an oauth_token must be specified"
        );
        assert!(provider.meta().is_none());
    }

    #[tokio::test]
    async fn both_tokens_is_an_error() {
        let (provider, diags, result) = configure(ProviderConfiguration {
            access_token: Some("a".into()),
            oauth_token: Some("o".into()),
            ..Default::default()
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(
            diags.errors[0].summary,
            "access_token and oauth_token cannot both be set"
        );
        assert!(provider.client().is_none());
    }

    #[tokio::test]
    async fn blank_host_is_an_error() {
        let (_, diags, result) = configure(ProviderConfiguration {
            access_token: Some("a".into()),
            api_host: Some("https://".into()),
            ..Default::default()
        })
        .await;

        assert_eq!(result, None);
        assert_eq!(diags.errors[0].summary, "Invalid api_host");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let debug = format!("{:?}", ApiCredential::AccessToken("api-secret".into()));
        assert_eq!(debug, "AccessToken(<redacted>)");
    }
}
