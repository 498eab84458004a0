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

//! Bridges a LaunchDarkly `ProviderConfig` to the configuration entry points
//! of the LaunchDarkly Terraform provider runtimes.
//!
//! [`SetupBuilder::build`] resolves the config referenced by a managed
//! resource, records the usage, decodes the credentials, and returns a
//! [`Setup`] holding the forwarded configuration and both provider handles.

pub mod apis;
pub mod client;
pub mod credentials;
pub mod error;
pub mod provider;
pub mod resource;
pub mod setup;
pub mod usage;
mod utils;

pub use error::{Error, Result};
pub use setup::{Setup, SetupBuilder, SetupOptions};
