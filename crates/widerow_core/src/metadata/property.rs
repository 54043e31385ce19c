//! Property metadata.

use crate::config::MappingConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{AttributeId, Consistency};
use std::fmt;

/// Closed set of mapped attribute kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// Simple partition key.
    Id,
    /// Compound primary key (partition key plus clustering columns).
    EmbeddedId,
    /// Single value.
    Simple,
    /// Ordered collection.
    List,
    /// Unordered unique collection.
    Set,
    /// Key/value collection.
    Map,
    /// Single value loaded on first access.
    LazySimple,
    /// List loaded on first access.
    LazyList,
    /// Set loaded on first access.
    LazySet,
    /// Map loaded on first access.
    LazyMap,
    /// Distributed counter.
    Counter,
}

impl PropertyType {
    /// Returns the upper-case tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::EmbeddedId => "EMBEDDED_ID",
            Self::Simple => "SIMPLE",
            Self::List => "LIST",
            Self::Set => "SET",
            Self::Map => "MAP",
            Self::LazySimple => "LAZY_SIMPLE",
            Self::LazyList => "LAZY_LIST",
            Self::LazySet => "LAZY_SET",
            Self::LazyMap => "LAZY_MAP",
            Self::Counter => "COUNTER",
        }
    }

    /// Returns true for primary key tags.
    #[must_use]
    pub const fn is_id(self) -> bool {
        matches!(self, Self::Id | Self::EmbeddedId)
    }

    /// Returns true for attributes loaded on first access.
    #[must_use]
    pub const fn is_lazy(self) -> bool {
        matches!(
            self,
            Self::LazySimple | Self::LazyList | Self::LazySet | Self::LazyMap
        )
    }

    /// Returns true for counters.
    #[must_use]
    pub const fn is_counter(self) -> bool {
        matches!(self, Self::Counter)
    }

    /// Returns true for list, set and map attributes, lazy or not.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        self.is_list() || self.is_set() || self.is_map()
    }

    /// Returns true for list attributes.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List | Self::LazyList)
    }

    /// Returns true for set attributes.
    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(self, Self::Set | Self::LazySet)
    }

    /// Returns true for map attributes.
    #[must_use]
    pub const fn is_map(self) -> bool {
        matches!(self, Self::Map | Self::LazyMap)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one mapped attribute.
///
/// Property metadata is assembled once, by [`PropertyMetaBuilder`], while
/// the entity mapping is introspected. It is read-only afterwards and is
/// usually shared behind an `Arc` between the entity metadata, every
/// collection proxy of the attribute and the dirty registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMeta {
    entity_class_name: String,
    property_name: String,
    property_type: PropertyType,
    attribute_id: AttributeId,
    consistency: Consistency,
    key_type_name: Option<String>,
    value_type_name: Option<String>,
}

impl PropertyMeta {
    /// Starts building metadata for a field of `entity_class_name`.
    #[must_use]
    pub fn builder(entity_class_name: impl Into<String>) -> PropertyMetaBuilder {
        PropertyMetaBuilder::new(entity_class_name)
    }

    /// Returns the owning entity class.
    #[must_use]
    pub fn entity_class_name(&self) -> &str {
        &self.entity_class_name
    }

    /// Returns the field name.
    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns the type tag.
    #[must_use]
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Returns the dirty-tracking key of this attribute.
    #[must_use]
    pub fn attribute_id(&self) -> &AttributeId {
        &self.attribute_id
    }

    /// Returns the read/write consistency pair.
    #[must_use]
    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    /// Returns the map key type name, for map attributes.
    #[must_use]
    pub fn key_type_name(&self) -> Option<&str> {
        self.key_type_name.as_deref()
    }

    /// Returns the value (or element) type name, when declared.
    #[must_use]
    pub fn value_type_name(&self) -> Option<&str> {
        self.value_type_name.as_deref()
    }
}

impl fmt::Display for PropertyMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PropertyMeta [type={}, propertyName={}, entityClassName={}, consistencyLevels={}]",
            self.property_type, self.property_name, self.entity_class_name, self.consistency
        )
    }
}

/// Builder for [`PropertyMeta`].
#[derive(Debug, Clone)]
pub struct PropertyMetaBuilder {
    entity_class_name: String,
    property_name: Option<String>,
    property_type: Option<PropertyType>,
    attribute_id: Option<AttributeId>,
    consistency: Option<Consistency>,
    key_type_name: Option<String>,
    value_type_name: Option<String>,
}

impl PropertyMetaBuilder {
    /// Creates a builder for a field of `entity_class_name`.
    #[must_use]
    pub fn new(entity_class_name: impl Into<String>) -> Self {
        Self {
            entity_class_name: entity_class_name.into(),
            property_name: None,
            property_type: None,
            attribute_id: None,
            consistency: None,
            key_type_name: None,
            value_type_name: None,
        }
    }

    /// Sets the field name.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.property_name = Some(name.into());
        self
    }

    /// Sets the type tag.
    #[must_use]
    pub fn property_type(mut self, property_type: PropertyType) -> Self {
        self.property_type = Some(property_type);
        self
    }

    /// Overrides the attribute id (defaults to `<class>.<field>`).
    #[must_use]
    pub fn attribute_id(mut self, id: AttributeId) -> Self {
        self.attribute_id = Some(id);
        self
    }

    /// Sets the read/write consistency pair.
    #[must_use]
    pub fn consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    /// Sets the map key type name.
    #[must_use]
    pub fn key_type(mut self, name: impl Into<String>) -> Self {
        self.key_type_name = Some(name.into());
        self
    }

    /// Sets the value (or element) type name.
    #[must_use]
    pub fn value_type(mut self, name: impl Into<String>) -> Self {
        self.value_type_name = Some(name.into());
        self
    }

    /// Finishes the metadata with the default mapping configuration.
    pub fn build(self) -> CoreResult<PropertyMeta> {
        self.build_with(&MappingConfig::default())
    }

    /// Finishes the metadata, taking undeclared consistency from `config`.
    pub fn build_with(self, config: &MappingConfig) -> CoreResult<PropertyMeta> {
        let property_name = self
            .property_name
            .ok_or_else(|| CoreError::missing_field("property name"))?;
        let property_type = self
            .property_type
            .ok_or_else(|| CoreError::missing_field("property type"))?;
        let attribute_id = self
            .attribute_id
            .unwrap_or_else(|| AttributeId::for_field(&self.entity_class_name, &property_name));

        Ok(PropertyMeta {
            entity_class_name: self.entity_class_name,
            property_name,
            property_type,
            attribute_id,
            consistency: self
                .consistency
                .unwrap_or_else(|| config.default_consistency()),
            key_type_name: self.key_type_name,
            value_type_name: self.value_type_name,
        })
    }
}
