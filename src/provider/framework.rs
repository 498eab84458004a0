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

use super::FrameworkProvider;

const FRAMEWORK_RESOURCES: &[&str] = &["launchdarkly_team_role_mapping"];

/// LaunchDarkly plugin-framework runtime, pinned to a provider version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFrameworkProvider {
    version: String,
}

impl PluginFrameworkProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl FrameworkProvider for PluginFrameworkProvider {
    fn type_name(&self) -> &str {
        "launchdarkly"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn resources(&self) -> &[&'static str] {
        FRAMEWORK_RESOURCES
    }
}
