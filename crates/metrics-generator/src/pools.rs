//! Reference pools sampled during record generation.

use crate::generator::GeneratorError;
use crate::generators::uuid::generate_identifier_pool;
use metrics_core::DatasetConfig;
use rand::Rng;
use tracing::debug;

/// Identifier pool of one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePool {
    pub resource_type: String,
    pub ids: Vec<String>,
}

/// Immutable user and resource identifier pools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePools {
    users: Vec<String>,
    resources: Vec<ResourcePool>,
}

impl ReferencePools {
    /// Generate UUID pools sized according to `config`.
    pub fn generate<R: Rng>(config: &DatasetConfig, rng: &mut R) -> Self {
        let users = generate_identifier_pool(rng, config.users);
        let resources = config
            .resources
            .iter()
            .map(|resource| ResourcePool {
                resource_type: resource.name.clone(),
                ids: generate_identifier_pool(rng, resource.count),
            })
            .collect::<Vec<_>>();

        debug!(
            "Generated {} user ids and {} resource pools",
            users.len(),
            resources.len()
        );

        Self { users, resources }
    }

    /// Build pools from explicit identifiers.
    pub fn from_parts<I, S>(users: Vec<String>, resources: I) -> Result<Self, GeneratorError>
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        if users.is_empty() {
            return Err(GeneratorError::EmptyUserPool);
        }

        let resources = resources
            .into_iter()
            .map(|(resource_type, ids)| {
                let resource_type = resource_type.into();
                if ids.is_empty() {
                    return Err(GeneratorError::EmptyResourcePool(resource_type));
                }
                Ok(ResourcePool { resource_type, ids })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { users, resources })
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn resources(&self) -> &[ResourcePool] {
        &self.resources
    }

    /// Identifiers of one resource type.
    pub fn resource_ids(&self, resource_type: &str) -> Option<&[String]> {
        self.resources
            .iter()
            .find(|p| p.resource_type == resource_type)
            .map(|p| p.ids.as_slice())
    }

    pub fn contains_user(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u == user_id)
    }

    pub fn contains_resource(&self, resource_type: &str, resource_id: &str) -> bool {
        self.resource_ids(resource_type)
            .is_some_and(|ids| ids.iter().any(|id| id == resource_id))
    }

    /// Keep exactly the resource types of `config`, in its order.
    ///
    /// Fails when a configured type has no pool or an empty one.
    pub(crate) fn aligned_with(&self, config: &DatasetConfig) -> Result<Self, GeneratorError> {
        if self.users.is_empty() {
            return Err(GeneratorError::EmptyUserPool);
        }
        let resources = config
            .resources
            .iter()
            .map(|resource| match self.resource_ids(&resource.name) {
                None => Err(GeneratorError::MissingResourcePool(resource.name.clone())),
                Some([]) => Err(GeneratorError::EmptyResourcePool(resource.name.clone())),
                Some(ids) => Ok(ResourcePool {
                    resource_type: resource.name.clone(),
                    ids: ids.to_vec(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            users: self.users.clone(),
            resources,
        })
    }
}
