use crate::application::app_error::AppError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// Entity identifier tagged with the entity it belongs to.
pub struct Id<T> {
    pub value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: Uuid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn generate() -> Id<T> {
        Id::new(Uuid::now_v7())
    }
}

// Manual impls: derives would put bounds on the phantom type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id::new(self.value)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let uuid = Uuid::from_str(&value).map_err(|e| AppError::InvalidId(format!("Invalid UUID: {}", e)))?;
        Ok(Id::new(uuid))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::id::Id;
    use std::collections::HashSet;
    use uuid::Uuid;

    struct TestEntity;

    #[test]
    fn test_id_new() {
        let uuid = Uuid::now_v7();
        let id: Id<TestEntity> = Id::new(uuid);
        assert_eq!(id.value, uuid)
    }

    #[test]
    fn test_id_generate() {
        let id1: Id<TestEntity> = Id::generate();
        let id2: Id<TestEntity> = Id::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_id_try_from_valid_uuid() {
        let uuid = Uuid::now_v7();
        let id: Id<TestEntity> = uuid.to_string().try_into().unwrap();
        assert_eq!(id.value, uuid);
    }

    #[test]
    fn test_id_try_from_invalid_uuid() {
        let result: Result<Id<TestEntity>, _> = "invalid".to_owned().try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_id_clone_without_clone_entity() {
        let id: Id<TestEntity> = Id::generate();
        let cloned_id = id.clone();
        assert_eq!(id, cloned_id);
    }

    #[test]
    fn test_id_hash_dedup() {
        let id: Id<TestEntity> = Id::generate();
        let set: HashSet<Id<TestEntity>> = [id.clone(), id.clone(), Id::generate()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_id_display() {
        let uuid = Uuid::now_v7();
        let id: Id<TestEntity> = Id::new(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
