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

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, Patch, PatchParams};
use kube::Client;
use tracing::debug;

use crate::apis::{ProviderConfig, ProviderConfigUsage};

use super::{ClientError, ClusterClient};

/// Field manager used for server-side apply.
pub const FIELD_MANAGER: &str = "crossplane-provider-launchdarkly";

/// `ClusterClient` backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the in-cluster or kubeconfig defaults
    pub async fn try_default() -> Result<Self, ClientError> {
        Ok(Self::new(Client::try_default().await?))
    }
}

fn map_not_found(kind: &'static str, name: &str, err: kube::Error) -> ClientError {
    match err {
        kube::Error::Api(response) if response.code == 404 => ClientError::NotFound {
            kind,
            name: name.to_string(),
        },
        other => other.into(),
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn get_provider_config(&self, name: &str) -> Result<ProviderConfig, ClientError> {
        let api: Api<ProviderConfig> = Api::all(self.client.clone());
        api.get(name)
            .await
            .map_err(|err| map_not_found("ProviderConfig", name, err))
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, ClientError> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        api.get(name)
            .await
            .map_err(|err| map_not_found("Secret", &format!("{namespace}/{name}"), err))
    }

    async fn get_provider_config_usage(
        &self,
        name: &str,
    ) -> Result<Option<ProviderConfigUsage>, ClientError> {
        let api: Api<ProviderConfigUsage> = Api::all(self.client.clone());
        Ok(api.get_opt(name).await?)
    }

    async fn apply_provider_config_usage(
        &self,
        usage: &ProviderConfigUsage,
    ) -> Result<(), ClientError> {
        let name = usage.metadata.name.as_deref().unwrap_or_default();
        let api: Api<ProviderConfigUsage> = Api::all(self.client.clone());
        let body = usage
            .to_apply_body()
            .map_err(|err| ClientError::Kube {
                source: kube::Error::SerdeError(err),
            })?;

        api.patch(name, &PatchParams::apply(FIELD_MANAGER).force(), &Patch::Apply(&body))
            .await?;
        debug!(usage = name, "applied ProviderConfigUsage");
        Ok(())
    }
}
