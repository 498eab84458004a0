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

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tf_provider::{Diagnostics, Value, ValueString};

mod framework;
mod sdk;

pub use framework::PluginFrameworkProvider;
pub use sdk::{ApiCredential, LaunchDarklyClient, LaunchDarklySdkProvider, DEFAULT_API_HOST};

pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_API_HOST: &str = "api_host";
pub const KEY_OAUTH_TOKEN: &str = "oauth_token";

/// Version of the plugin-framework provider instantiated for each setup.
pub const PROVIDER_VERSION: &str = "2.25.3";

/// Opaque handle produced by a configured SDK provider.
pub type ProviderMeta = Arc<dyn Any + Send + Sync>;

/// Provider settings forwarded from the credentials payload.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderConfiguration {
    pub access_token: Option<String>,
    pub api_host: Option<String>,
    pub oauth_token: Option<String>,
}

impl ProviderConfiguration {
    /// Copy the recognized keys out of decoded credentials; anything else is dropped.
    pub fn from_credentials(credentials: &HashMap<String, String>) -> Self {
        Self {
            access_token: credentials.get(KEY_ACCESS_TOKEN).cloned(),
            api_host: credentials.get(KEY_API_HOST).cloned(),
            oauth_token: credentials.get(KEY_OAUTH_TOKEN).cloned(),
        }
    }

    /// Present settings, by configuration key
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (KEY_ACCESS_TOKEN, &self.access_token),
            (KEY_API_HOST, &self.api_host),
            (KEY_OAUTH_TOKEN, &self.oauth_token),
        ]
        .into_iter()
        .filter_map(|(key, value)| Some((key, value.as_deref()?)))
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl std::fmt::Debug for ProviderConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("ProviderConfiguration")
            .field("access_token", &redact(&self.access_token))
            .field("api_host", &self.api_host)
            .field("oauth_token", &redact(&self.oauth_token))
            .finish()
    }
}

/// Raw attribute values handed to an SDK provider's `configure`.
///
/// Only keys present in the configuration are set; any other key reads as null.
#[derive(Clone, Default)]
pub struct ResourceConfig<'a> {
    raw: BTreeMap<Cow<'a, str>, ValueString<'a>>,
}

impl<'a> ResourceConfig<'a> {
    pub fn new_raw(configuration: &'a ProviderConfiguration) -> Self {
        Self {
            raw: configuration
                .iter()
                .map(|(key, value)| (Cow::Borrowed(key), Value::Value(Cow::Borrowed(value))))
                .collect(),
        }
    }

    /// Set, non-empty string value of `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw
            .get(key)
            .and_then(|value| value.as_deref_option())
            .filter(|value| !value.is_empty())
    }
}

/// SDK-style provider runtime: configured once, then exposes its meta handle.
#[async_trait]
pub trait SdkProvider: Send + Sync {
    /// Configure the provider. Problems are reported through `diags`.
    async fn configure<'a>(
        &mut self,
        diags: &mut Diagnostics,
        config: &ResourceConfig<'a>,
    ) -> Option<()>;

    /// Handle passed to resource operations, once configured
    fn meta(&self) -> Option<ProviderMeta>;
}

/// Plugin-framework-style provider runtime.
pub trait FrameworkProvider: Send + Sync + std::fmt::Debug {
    fn type_name(&self) -> &str;
    fn version(&self) -> &str;
    /// Resources served by this runtime instead of the SDK provider
    fn resources(&self) -> &[&'static str];
}

/// Creates fresh provider runtimes for each setup.
pub trait ProviderFactory: Send + Sync {
    fn sdk_provider(&self) -> Box<dyn SdkProvider>;
    fn plugin_provider(&self, version: &str) -> Arc<dyn FrameworkProvider>;
}

/// Factory for the LaunchDarkly runtimes.
#[derive(Debug, Default, Clone)]
pub struct LaunchDarklyProviderFactory {}

impl ProviderFactory for LaunchDarklyProviderFactory {
    fn sdk_provider(&self) -> Box<dyn SdkProvider> {
        Box::new(LaunchDarklySdkProvider::default())
    }

    fn plugin_provider(&self, version: &str) -> Arc<dyn FrameworkProvider> {
        Arc::new(PluginFrameworkProvider::new(version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn only_recognized_keys_are_copied() {
        let configuration = ProviderConfiguration::from_credentials(&credentials(&[
            ("access_token", "tok"),
            ("api_host", "https://h"),
            ("unused", "x"),
            ("Access_Token", "other"),
        ]));

        assert_eq!(
            configuration.to_map(),
            BTreeMap::from([
                ("access_token".to_string(), "tok".to_string()),
                ("api_host".to_string(), "https://h".to_string()),
            ])
        );
        assert!(configuration.oauth_token.is_none());
    }

    #[test]
    fn debug_redacts_tokens() {
        let configuration = ProviderConfiguration {
            access_token: Some("api-secret".into()),
            api_host: Some("https://h".into()),
            oauth_token: None,
        };
        let debug = format!("{configuration:?}");
        assert!(!debug.contains("api-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("https://h"));
    }

    #[test]
    fn raw_config_holds_present_keys_only() {
        let configuration = ProviderConfiguration {
            access_token: Some("tok".into()),
            api_host: Some(String::new()),
            oauth_token: None,
        };
        let config = ResourceConfig::new_raw(&configuration);

        assert_eq!(config.get(KEY_ACCESS_TOKEN), Some("tok"));
        // Empty strings read as unset
        assert_eq!(config.get(KEY_API_HOST), None);
        assert_eq!(config.get(KEY_OAUTH_TOKEN), None);
        assert!(ProviderConfiguration::default().is_empty());
    }

    #[test]
    fn factory_builds_framework_provider_with_version() {
        let provider = LaunchDarklyProviderFactory::default().plugin_provider(PROVIDER_VERSION);
        assert_eq!(provider.type_name(), "launchdarkly");
        assert_eq!(provider.version(), "2.25.3");
    }
}
