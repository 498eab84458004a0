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

//! Capabilities of the managed resources the setup is built for.

use kube::api::DynamicObject;

use crate::apis::{Reference, TypedReference};

/// An object representing a desired external resource.
pub trait ManagedResource: Send + Sync {
    fn api_version(&self) -> &str;
    fn kind(&self) -> &str;
    fn name(&self) -> &str;
    fn uid(&self) -> Option<&str>;

    /// Access to the legacy capability, when the resource has it.
    fn as_legacy_managed(&self) -> Option<&dyn LegacyManaged> {
        None
    }

    fn typed_reference(&self) -> TypedReference {
        TypedReference {
            api_version: self.api_version().to_string(),
            kind: self.kind().to_string(),
            name: self.name().to_string(),
            uid: self.uid().map(str::to_string),
        }
    }
}

/// Cluster-scoped managed resource that names its `ProviderConfig` directly.
pub trait LegacyManaged: ManagedResource {
    fn provider_config_reference(&self) -> Option<&Reference>;
}

/// Managed resource read from the cluster without a compiled-in type.
///
/// Cluster-scoped objects are treated as legacy managed resources and carry
/// their reference in `spec.providerConfigRef`. Namespaced objects do not have
/// the legacy capability.
#[derive(Clone, Debug)]
pub struct UnstructuredManaged {
    object: DynamicObject,
    provider_config_ref: Option<Reference>,
}

impl UnstructuredManaged {
    pub fn new(object: DynamicObject) -> Self {
        let provider_config_ref = object
            .data
            .get("spec")
            .and_then(|spec| spec.get("providerConfigRef"))
            .and_then(|reference| serde_json::from_value(reference.clone()).ok());
        Self {
            object,
            provider_config_ref,
        }
    }
}

impl From<DynamicObject> for UnstructuredManaged {
    fn from(object: DynamicObject) -> Self {
        Self::new(object)
    }
}

impl ManagedResource for UnstructuredManaged {
    fn api_version(&self) -> &str {
        self.object
            .types
            .as_ref()
            .map_or("", |types| types.api_version.as_str())
    }

    fn kind(&self) -> &str {
        self.object
            .types
            .as_ref()
            .map_or("", |types| types.kind.as_str())
    }

    fn name(&self) -> &str {
        self.object.metadata.name.as_deref().unwrap_or("")
    }

    fn uid(&self) -> Option<&str> {
        self.object.metadata.uid.as_deref()
    }

    fn as_legacy_managed(&self) -> Option<&dyn LegacyManaged> {
        if self.object.metadata.namespace.is_none() {
            Some(self)
        } else {
            None
        }
    }
}

impl LegacyManaged for UnstructuredManaged {
    fn provider_config_reference(&self) -> Option<&Reference> {
        self.provider_config_ref.as_ref()
    }
}
