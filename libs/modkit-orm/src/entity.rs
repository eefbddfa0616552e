use modkit_db::EntityName;

/// A Rust type that maps to a workspace entity in the storage layer.
///
/// The structural type name is turned into the logical entity name by an
/// [`EntityNameNormalizer`](crate::EntityNameNormalizer):
///
/// ```
/// use modkit_orm::{ClassNameNormalizer, EntityNameNormalizer, WorkspaceEntity};
///
/// struct PersonWorkspaceEntity;
/// impl WorkspaceEntity for PersonWorkspaceEntity {}
///
/// let name = ClassNameNormalizer::default()
///     .normalize(PersonWorkspaceEntity::type_name())
///     .unwrap();
/// assert_eq!(name.as_str(), "person");
/// ```
pub trait WorkspaceEntity: Send + Sync + 'static {
    /// Structural type identifier. Defaults to the fully qualified Rust type name.
    #[must_use]
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Reference to a workspace entity: either by structural type or by logical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityRef {
    /// Structural type identifier, normalized before use.
    Type(&'static str),
    /// Logical entity name, used as given without normalization.
    ///
    /// The name is still validated as an [`EntityName`]: anything other than
    /// ASCII alphanumerics and `_` (e.g. `person-2`) is rejected with
    /// `EntityNotRecognized` before any collaborator runs.
    Name(String),
}

impl EntityRef {
    /// Reference the entity mapped by `T`.
    #[must_use]
    pub fn of<T: WorkspaceEntity>() -> Self {
        Self::Type(T::type_name())
    }
}

impl From<&str> for EntityRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for EntityRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<EntityName> for EntityRef {
    fn from(name: EntityName) -> Self {
        Self::Name(name.into())
    }
}

impl From<&EntityName> for EntityRef {
    fn from(name: &EntityName) -> Self {
        Self::Name(name.as_str().to_owned())
    }
}
