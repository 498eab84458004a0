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

use std::time::Duration;

use thiserror::Error;

use crate::client::ClientError;

/// Failure of one step of the setup pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("managed resource does not implement LegacyManaged")]
    NotLegacyManaged,

    #[error("no providerConfigRef provided")]
    NoProviderConfig,

    #[error("cannot get referenced ProviderConfig: {source}")]
    GetProviderConfig {
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("cannot track ProviderConfig usage: {source:#}")]
    TrackUsage {
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot extract credentials: {source:#}")]
    ExtractCredentials {
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot unmarshal launchdarkly credentials as JSON: {source}")]
    UnmarshalCredentials {
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot configure LaunchDarkly SDK provider: {diagnostics}")]
    ConfigureSdkProvider { diagnostics: String },

    #[error("provider setup timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
