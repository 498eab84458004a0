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

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use tracing::{debug, info};

use crate::apis::{ProviderConfigUsage, LABEL_KEY_PROVIDER_CONFIG};
use crate::client::ClusterClient;
use crate::resource::LegacyManaged;

/// Records which managed resources use which `ProviderConfig`.
#[async_trait]
pub trait UsageTracker: Send + Sync {
    async fn track(&self, managed: &dyn LegacyManaged) -> Result<()>;
}

/// Tracks usage with one `ProviderConfigUsage` per managed resource, named
/// after the resource's UID and controlled by it.
pub struct LegacyProviderConfigUsageTracker<'c> {
    client: &'c dyn ClusterClient,
}

impl<'c> LegacyProviderConfigUsageTracker<'c> {
    pub fn new(client: &'c dyn ClusterClient) -> Self {
        Self { client }
    }
}

fn desired_usage(managed: &dyn LegacyManaged) -> Result<ProviderConfigUsage> {
    let uid = managed
        .uid()
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| anyhow!("managed resource {} has no UID", managed.name()))?;
    let provider_config_ref = managed
        .provider_config_reference()
        .cloned()
        .ok_or_else(|| anyhow!("managed resource {} has no providerConfigRef", managed.name()))?;

    let mut resource_ref = managed.typed_reference();
    resource_ref.uid = None;

    Ok(ProviderConfigUsage {
        metadata: ObjectMeta {
            name: Some(uid.to_string()),
            labels: Some(BTreeMap::from([(
                LABEL_KEY_PROVIDER_CONFIG.to_string(),
                provider_config_ref.name.clone(),
            )])),
            owner_references: Some(vec![OwnerReference {
                api_version: managed.api_version().to_string(),
                kind: managed.kind().to_string(),
                name: managed.name().to_string(),
                uid: uid.to_string(),
                controller: Some(true),
                block_owner_deletion: Some(true),
            }]),
            ..Default::default()
        },
        provider_config_ref,
        resource_ref,
    })
}

#[async_trait]
impl<'c> UsageTracker for LegacyProviderConfigUsageTracker<'c> {
    async fn track(&self, managed: &dyn LegacyManaged) -> Result<()> {
        let usage = desired_usage(managed)?;
        let name = usage.metadata.name.as_deref().unwrap_or_default();

        let existing = self
            .client
            .get_provider_config_usage(name)
            .await
            .context("cannot apply ProviderConfigUsage")?;

        if let Some(current) = existing {
            // An uncontrolled usage is adopted by the apply below.
            let uid = managed.uid().unwrap_or_default();
            if let Some(owner) = current.controller_uid() {
                if owner != uid {
                    bail!("existing object is not controlled by UID {uid:?}");
                }
            }
            if current.provider_config_ref == usage.provider_config_ref {
                debug!(usage = name, "ProviderConfigUsage already up to date");
                return Ok(());
            }
        }

        self.client
            .apply_provider_config_usage(&usage)
            .await
            .context("cannot apply ProviderConfigUsage")?;
        info!(
            usage = name,
            provider_config = %usage.provider_config_ref.name,
            resource = managed.name(),
            "tracked ProviderConfig usage"
        );
        Ok(())
    }
}
