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

//! Builds the provider setup used to reconcile one managed resource.
//!
//! The pipeline is linear and stops at the first failing step. Steps already
//! completed are not undone: a usage tracked before a credentials failure
//! stays recorded.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tf_provider::Diagnostics;
use tracing::{debug, warn};

use crate::client::ClusterClient;
use crate::credentials::{CommonCredentialExtractor, CredentialExtractor};
use crate::error::{Error, Result};
use crate::provider::{
    FrameworkProvider, LaunchDarklyProviderFactory, ProviderConfiguration, ProviderFactory,
    ProviderMeta, ResourceConfig, PROVIDER_VERSION,
};
use crate::resource::ManagedResource;
use crate::usage::{LegacyProviderConfigUsageTracker, UsageTracker};
use crate::utils::{format_errors, format_warnings};

/// Configuration and provider handles for one reconciliation.
#[derive(Clone)]
pub struct Setup {
    pub configuration: ProviderConfiguration,
    /// Handle of the configured SDK provider
    pub meta: Option<ProviderMeta>,
    pub framework_provider: Arc<dyn FrameworkProvider>,
}

impl std::fmt::Debug for Setup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setup")
            .field("configuration", &self.configuration)
            .field("meta", &self.meta.as_ref().map(|_| "<provider meta>"))
            .field("framework_provider", &self.framework_provider)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Version the plugin-framework provider is instantiated with
    pub provider_version: String,
    /// Upper bound for the whole pipeline, unbounded if `None`
    pub timeout: Option<Duration>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            provider_version: PROVIDER_VERSION.to_string(),
            timeout: None,
        }
    }
}

impl SetupOptions {
    pub fn with_provider_version(mut self, version: impl Into<String>) -> Self {
        self.provider_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Produces a [`Setup`] from the `ProviderConfig` a managed resource references.
///
/// Holds no per-call state and can be shared between concurrent reconciliations.
#[derive(Clone)]
pub struct SetupBuilder {
    extractor: Arc<dyn CredentialExtractor>,
    factory: Arc<dyn ProviderFactory>,
    options: SetupOptions,
}

impl Default for SetupBuilder {
    fn default() -> Self {
        Self::new(
            Arc::new(CommonCredentialExtractor::default()),
            Arc::new(LaunchDarklyProviderFactory::default()),
        )
    }
}

impl SetupBuilder {
    pub fn new(extractor: Arc<dyn CredentialExtractor>, factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            extractor,
            factory,
            options: SetupOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SetupOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn build(
        &self,
        client: &dyn ClusterClient,
        managed: &dyn ManagedResource,
    ) -> Result<Setup> {
        match self.options.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.run(client, managed))
                .await
                .map_err(|_| Error::Timeout(timeout))?,
            None => self.run(client, managed).await,
        }
    }

    async fn run(&self, client: &dyn ClusterClient, managed: &dyn ManagedResource) -> Result<Setup> {
        let legacy = managed
            .as_legacy_managed()
            .ok_or(Error::NotLegacyManaged)?;
        let config_ref = legacy
            .provider_config_reference()
            .ok_or(Error::NoProviderConfig)?;

        debug!(
            provider_config = %config_ref.name,
            resource = managed.name(),
            "building provider setup"
        );

        let pc = client
            .get_provider_config(&config_ref.name)
            .await
            .map_err(|source| Error::GetProviderConfig {
                name: config_ref.name.clone(),
                source,
            })?;

        LegacyProviderConfigUsageTracker::new(client)
            .track(legacy)
            .await
            .map_err(|source| Error::TrackUsage { source })?;

        let credentials = &pc.spec.credentials;
        let data = self
            .extractor
            .extract(credentials.source, client, &credentials.selectors)
            .await
            .map_err(|source| Error::ExtractCredentials { source })?;

        // Invalid UTF-8 becomes U+FFFD; `null` decodes to an empty map
        let text = String::from_utf8_lossy(&data);
        let creds: HashMap<String, String> =
            serde_json::from_str::<Option<HashMap<String, String>>>(&text)
                .map_err(|source| Error::UnmarshalCredentials { source })?
                .unwrap_or_default();

        let configuration = ProviderConfiguration::from_credentials(&creds);
        debug!(
            keys = ?configuration.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            "forwarding provider configuration"
        );

        let mut sdk_provider = self.factory.sdk_provider();
        let mut diags = Diagnostics::default();
        let configured = sdk_provider
            .configure(&mut diags, &ResourceConfig::new_raw(&configuration))
            .await;
        if !diags.warnings.is_empty() {
            warn!(warnings = %format_warnings(&diags), "SDK provider configured with warnings");
        }
        if !diags.errors.is_empty() {
            return Err(Error::ConfigureSdkProvider {
                diagnostics: format_errors(&diags),
            });
        }
        if configured.is_none() {
            return Err(Error::ConfigureSdkProvider {
                diagnostics: "provider did not complete configuration".to_string(),
            });
        }

        let framework_provider = self
            .factory
            .plugin_provider(&self.options.provider_version);
        debug!(
            version = framework_provider.version(),
            resources = ?framework_provider.resources(),
            "attached plugin-framework provider"
        );

        Ok(Setup {
            meta: sdk_provider.meta(),
            framework_provider,
            configuration,
        })
    }
}
