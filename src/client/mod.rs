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
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use crate::apis::{ProviderConfig, ProviderConfigUsage};

mod kubernetes;

pub use kubernetes::KubeClusterClient;

/// Failure of a cluster API call.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{kind} {name:?} not found")]
    NotFound { kind: &'static str, name: String },

    #[error("kubernetes error: {source}")]
    Kube {
        #[from]
        source: kube::Error,
    },
}

/// Cluster API operations the setup pipeline depends on.
///
/// Implementations must be safe for concurrent use: one client is shared by
/// every reconciliation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Get a cluster-scoped `ProviderConfig` by name
    async fn get_provider_config(&self, name: &str) -> Result<ProviderConfig, ClientError>;

    /// Get a namespaced Secret
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, ClientError>;

    /// Get a `ProviderConfigUsage` by name, `None` if it does not exist
    async fn get_provider_config_usage(
        &self,
        name: &str,
    ) -> Result<Option<ProviderConfigUsage>, ClientError>;

    /// Create or update a `ProviderConfigUsage`
    async fn apply_provider_config_usage(
        &self,
        usage: &ProviderConfigUsage,
    ) -> Result<(), ClientError>;
}
