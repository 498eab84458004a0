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

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::apis::{CommonCredentialSelectors, CredentialsSource};
use crate::client::ClusterClient;

/// Reads the raw credentials payload declared by a `ProviderConfig`.
#[async_trait]
pub trait CredentialExtractor: Send + Sync {
    async fn extract(
        &self,
        source: CredentialsSource,
        client: &dyn ClusterClient,
        selectors: &CommonCredentialSelectors,
    ) -> Result<Vec<u8>>;
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Extractor for the `Secret`, `Environment` and `Filesystem` sources.
#[derive(Clone)]
pub struct CommonCredentialExtractor {
    env: EnvLookup,
}

impl Default for CommonCredentialExtractor {
    fn default() -> Self {
        Self {
            env: Arc::new(|name: &str| std::env::var(name).ok()),
        }
    }
}

impl std::fmt::Debug for CommonCredentialExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommonCredentialExtractor").finish_non_exhaustive()
    }
}

impl CommonCredentialExtractor {
    /// Replace the process environment with a custom lookup
    pub fn with_env_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env: Arc::new(lookup),
        }
    }

    async fn extract_secret(
        &self,
        client: &dyn ClusterClient,
        selectors: &CommonCredentialSelectors,
    ) -> Result<Vec<u8>> {
        let selector = selectors
            .secret_ref
            .as_ref()
            .ok_or_else(|| anyhow!("cannot extract from secret key when none specified"))?;

        let secret = client
            .get_secret(&selector.namespace, &selector.name)
            .await
            .context("cannot get credentials secret")?;

        // A missing key yields an empty payload, which fails later decoding.
        Ok(secret
            .data
            .and_then(|mut data| data.remove(&selector.key))
            .map(|bytes| bytes.0)
            .unwrap_or_default())
    }

    fn extract_env(&self, selectors: &CommonCredentialSelectors) -> Result<Vec<u8>> {
        let selector = selectors.env.as_ref().ok_or_else(|| {
            anyhow!("cannot extract from environment variable when none specified")
        })?;
        Ok((self.env)(&selector.name).unwrap_or_default().into_bytes())
    }

    async fn extract_fs(&self, selectors: &CommonCredentialSelectors) -> Result<Vec<u8>> {
        let selector = selectors
            .fs
            .as_ref()
            .ok_or_else(|| anyhow!("cannot extract from filesystem when no path specified"))?;
        tokio::fs::read(&selector.path)
            .await
            .with_context(|| format!("cannot read credentials file {}", selector.path))
    }
}

#[async_trait]
impl CredentialExtractor for CommonCredentialExtractor {
    async fn extract(
        &self,
        source: CredentialsSource,
        client: &dyn ClusterClient,
        selectors: &CommonCredentialSelectors,
    ) -> Result<Vec<u8>> {
        debug!(%source, "extracting credentials");
        match source {
            CredentialsSource::Secret => self.extract_secret(client, selectors).await,
            CredentialsSource::Environment => self.extract_env(selectors),
            CredentialsSource::Filesystem => self.extract_fs(selectors).await,
            CredentialsSource::None | CredentialsSource::InjectedIdentity => Err(anyhow!(
                "credentials source {source} is not currently supported"
            )),
        }
    }
}
