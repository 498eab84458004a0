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

//! Cluster-scoped API types of the `launchdarkly.crossplane.io` group.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

mod provider_config;
mod usage;

pub use provider_config::{
    CommonCredentialSelectors, CredentialsSource, EnvSelector, FsSelector, ProviderConfig,
    ProviderConfigSpec, ProviderConfigStatus, ProviderCredentials, SecretKeySelector,
};
pub use usage::ProviderConfigUsage;

pub const GROUP: &str = "launchdarkly.crossplane.io";
pub const VERSION: &str = "v1beta1";

/// Label set on every `ProviderConfigUsage` with the name of the config in use.
pub const LABEL_KEY_PROVIDER_CONFIG: &str = "crossplane.io/provider-config";

/// Reference to another cluster-scoped object by name.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Reference {
    pub name: String,
}

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Reference to an object of a known kind.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypedReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}
