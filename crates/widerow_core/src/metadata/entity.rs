//! Entity metadata.

use super::property::PropertyMeta;
use crate::config::MappingConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{AttributeId, Consistency};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Describes one mapped entity type.
///
/// The property map is keyed by property name and kept sorted, so
/// [`all_property_metas`](Self::all_property_metas), [`first_meta`](Self::first_meta)
/// and the display rendering are stable regardless of the order in which
/// the mapping declared its attributes.
///
/// Whether the id property also appears in the property map is up to the
/// introspection step; the derived predicates treat id-tagged entries as
/// carrying no value.
#[derive(Debug, Clone)]
pub struct EntityMeta {
    class_name: String,
    table_name: String,
    id_type_name: Option<String>,
    id_meta: Arc<PropertyMeta>,
    property_metas: BTreeMap<String, Arc<PropertyMeta>>,
    clustered: bool,
    consistency: Consistency,
}

impl EntityMeta {
    /// Starts building metadata for `class_name`.
    #[must_use]
    pub fn builder(class_name: impl Into<String>) -> EntityMetaBuilder {
        EntityMetaBuilder::new(class_name)
    }

    /// Returns the entity class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the table (column family) name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the id type descriptor, if the mapping declared one.
    #[must_use]
    pub fn id_type_name(&self) -> Option<&str> {
        self.id_type_name.as_deref()
    }

    /// Returns the id property metadata.
    #[must_use]
    pub fn id_meta(&self) -> &Arc<PropertyMeta> {
        &self.id_meta
    }

    /// Returns true if the entity maps to a clustered (wide-row) table.
    #[must_use]
    pub fn is_clustered(&self) -> bool {
        self.clustered
    }

    /// Returns the entity-level consistency pair.
    #[must_use]
    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    /// Returns the property map.
    #[must_use]
    pub fn property_metas(&self) -> &BTreeMap<String, Arc<PropertyMeta>> {
        &self.property_metas
    }

    /// Returns every property metadata, in ascending property-name order.
    pub fn all_property_metas(&self) -> impl Iterator<Item = &Arc<PropertyMeta>> {
        self.property_metas.values()
    }

    /// Returns the property names in ascending order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.property_metas.keys().map(String::as_str)
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property_meta(&self, name: &str) -> Option<&Arc<PropertyMeta>> {
        self.property_metas.get(name)
    }

    /// Looks up a property by its dirty-tracking key.
    #[must_use]
    pub fn property_meta_by_attribute(&self, id: &AttributeId) -> Option<&Arc<PropertyMeta>> {
        if self.id_meta.attribute_id() == id {
            return Some(&self.id_meta);
        }
        self.property_metas
            .values()
            .find(|meta| meta.attribute_id() == id)
    }

    /// Returns the first value-carrying property.
    ///
    /// That is the first property, in ascending property-name order, whose
    /// type tag is not an id tag. Returns `None` when the entity carries
    /// only its key.
    #[must_use]
    pub fn first_meta(&self) -> Option<&Arc<PropertyMeta>> {
        self.property_metas
            .values()
            .find(|meta| !meta.property_type().is_id())
    }

    /// Returns true iff the entity is clustered and its single property is a counter.
    #[must_use]
    pub fn is_clustered_counter(&self) -> bool {
        if !self.clustered || self.property_metas.len() != 1 {
            return false;
        }
        self.property_metas
            .values()
            .all(|meta| meta.property_type().is_counter())
    }

    /// Returns true iff the entity persists nothing beyond its key.
    #[must_use]
    pub fn is_valueless(&self) -> bool {
        self.property_metas
            .values()
            .all(|meta| meta.property_type().is_id())
    }

    /// Returns true if any property is a counter.
    #[must_use]
    pub fn has_counter(&self) -> bool {
        self.property_metas
            .values()
            .any(|meta| meta.property_type().is_counter())
    }

    /// Returns the non-id properties loaded together with the entity.
    pub fn eager_metas(&self) -> impl Iterator<Item = &Arc<PropertyMeta>> {
        self.property_metas.values().filter(|meta| {
            let ty = meta.property_type();
            !ty.is_id() && !ty.is_lazy()
        })
    }

    /// Returns the properties loaded on first access.
    pub fn lazy_metas(&self) -> impl Iterator<Item = &Arc<PropertyMeta>> {
        self.property_metas
            .values()
            .filter(|meta| meta.property_type().is_lazy())
    }
}

impl fmt::Display for EntityMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.property_names().collect();
        write!(
            f,
            "EntityMeta [className={}, columnFamilyName={}, propertyMetas=[{}], idMeta={}, clusteredEntity={}, consistencyLevels={}]",
            self.class_name,
            self.table_name,
            keys.join(","),
            self.id_meta,
            self.clustered,
            self.consistency
        )
    }
}

/// Builder for [`EntityMeta`].
#[derive(Debug, Clone)]
pub struct EntityMetaBuilder {
    class_name: String,
    table_name: Option<String>,
    id_type_name: Option<String>,
    id_meta: Option<Arc<PropertyMeta>>,
    property_metas: BTreeMap<String, Arc<PropertyMeta>>,
    clustered: bool,
    consistency: Option<Consistency>,
}

impl EntityMetaBuilder {
    /// Creates a builder for `class_name`.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            table_name: None,
            id_type_name: None,
            id_meta: None,
            property_metas: BTreeMap::new(),
            clustered: false,
            consistency: None,
        }
    }

    /// Sets the table name (defaults to the class name).
    #[must_use]
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Sets the id type descriptor (defaults to the id meta's value type).
    #[must_use]
    pub fn id_type(mut self, name: impl Into<String>) -> Self {
        self.id_type_name = Some(name.into());
        self
    }

    /// Sets the id property metadata.
    #[must_use]
    pub fn id_meta(mut self, meta: impl Into<Arc<PropertyMeta>>) -> Self {
        self.id_meta = Some(meta.into());
        self
    }

    /// Adds a property under its own property name.
    #[must_use]
    pub fn property(self, meta: impl Into<Arc<PropertyMeta>>) -> Self {
        let meta = meta.into();
        let name = meta.property_name().to_owned();
        self.property_named(name, meta)
    }

    /// Adds a property under an explicit key, replacing any previous one.
    #[must_use]
    pub fn property_named(
        mut self,
        name: impl Into<String>,
        meta: impl Into<Arc<PropertyMeta>>,
    ) -> Self {
        self.property_metas.insert(name.into(), meta.into());
        self
    }

    /// Sets the clustered flag.
    #[must_use]
    pub fn clustered(mut self, clustered: bool) -> Self {
        self.clustered = clustered;
        self
    }

    /// Sets the entity-level consistency pair.
    #[must_use]
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    /// Finishes the metadata with the default mapping configuration.
    pub fn build(self) -> CoreResult<EntityMeta> {
        self.build_with(&MappingConfig::default())
    }

    /// Finishes the metadata, taking undeclared consistency from `config`.
    ///
    /// Fails if no id metadata was given or if it is not tagged as an id.
    pub fn build_with(self, config: &MappingConfig) -> CoreResult<EntityMeta> {
        let id_meta = self
            .id_meta
            .ok_or_else(|| CoreError::missing_id_meta(&self.class_name))?;
        if !id_meta.property_type().is_id() {
            return Err(CoreError::invalid_id_meta(
                &self.class_name,
                id_meta.property_type(),
            ));
        }

        let table_name = self.table_name.unwrap_or_else(|| self.class_name.clone());
        let id_type_name = self
            .id_type_name
            .or_else(|| id_meta.value_type_name().map(str::to_owned));

        Ok(EntityMeta {
            class_name: self.class_name,
            table_name,
            id_type_name,
            id_meta,
            property_metas: self.property_metas,
            clustered: self.clustered,
            consistency: self
                .consistency
                .unwrap_or_else(|| config.default_consistency()),
        })
    }
}
