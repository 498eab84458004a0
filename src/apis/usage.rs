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

use std::borrow::Cow;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::ClusterResourceScope;
use kube::Resource;
use serde::{Deserialize, Serialize};

use super::{Reference, TypedReference, GROUP, VERSION};

/// Records that a managed resource uses a `ProviderConfig`.
///
/// The reference fields live at the top level of the object rather than under
/// `spec`, so the kube `Resource` impl is written by hand.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigUsage {
    pub metadata: ObjectMeta,
    pub provider_config_ref: Reference,
    pub resource_ref: TypedReference,
}

impl ProviderConfigUsage {
    pub const KIND: &'static str = "ProviderConfigUsage";

    /// UID of the owner set as controller, if any.
    pub fn controller_uid(&self) -> Option<&str> {
        self.metadata
            .owner_references
            .iter()
            .flatten()
            .find(|owner| owner.controller == Some(true))
            .map(|owner| owner.uid.as_str())
    }

    /// Wire representation including `apiVersion` and `kind`, as required by
    /// server-side apply.
    pub fn to_apply_body(&self) -> serde_json::Result<serde_json::Value> {
        let mut body = serde_json::to_value(self)?;
        if let Some(object) = body.as_object_mut() {
            object.insert(
                "apiVersion".to_string(),
                Self::api_version(&()).into_owned().into(),
            );
            object.insert("kind".to_string(), Self::KIND.into());
        }
        Ok(body)
    }
}

impl Resource for ProviderConfigUsage {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(Self::KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed("providerconfigusages")
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

    use super::*;

    #[test]
    fn apply_body_carries_type_information() {
        let usage = ProviderConfigUsage {
            metadata: ObjectMeta {
                name: Some("0b7f".into()),
                ..Default::default()
            },
            provider_config_ref: Reference::new("default"),
            resource_ref: TypedReference {
                api_version: "project.launchdarkly.crossplane.io/v1alpha1".into(),
                kind: "Project".into(),
                name: "demo".into(),
                uid: None,
            },
        };

        let body = usage.to_apply_body().unwrap();
        assert_eq!(body["apiVersion"], "launchdarkly.crossplane.io/v1beta1");
        assert_eq!(body["kind"], "ProviderConfigUsage");
        assert_eq!(body["providerConfigRef"]["name"], "default");
        assert_eq!(body["resourceRef"]["kind"], "Project");
    }

    #[test]
    fn controller_uid_ignores_plain_owners() {
        let owner = |uid: &str, controller| OwnerReference {
            api_version: "v1".into(),
            kind: "Project".into(),
            name: "demo".into(),
            uid: uid.into(),
            controller,
            block_owner_deletion: None,
        };
        let mut usage = ProviderConfigUsage::default();
        usage.metadata.owner_references = Some(vec![owner("a", None), owner("b", Some(true))]);
        assert_eq!(usage.controller_uid(), Some("b"));

        usage.metadata.owner_references = Some(vec![owner("a", Some(false))]);
        assert_eq!(usage.controller_uid(), None);
    }
}
