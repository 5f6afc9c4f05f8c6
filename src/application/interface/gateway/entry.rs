use std::sync::Arc;

use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::entry::{
    ContactData, EducationData, EntryData, ExperienceData, LanguageData, ProfileEntry, SkillData,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

#[async_trait]
pub trait EntryReader<D: EntryData>: Send + Sync {
    async fn find_by_id(&self, entry_id: &Id<ProfileEntry<D>>) -> AppResult<Option<ProfileEntry<D>>>;
    async fn find_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<ProfileEntry<D>>>;
}

#[async_trait]
pub trait EntryWriter<D: EntryData>: Send + Sync {
    /// Inserts the entry or overwrites the row with the same id.
    async fn save(&self, entry: ProfileEntry<D>) -> AppResult<()>;
    /// Deletes every entry of the profile whose id is not in `keep`.
    async fn delete_by_profile_except(&self, profile_id: &Id<Profile>, keep: &[Id<ProfileEntry<D>>]) -> AppResult<()>;
}

pub trait EntryRepository<D: EntryData>: EntryReader<D> + EntryWriter<D> {}

impl<D: EntryData, T: EntryReader<D> + EntryWriter<D>> EntryRepository<D> for T {}

/// Gateways for the five entry collections of a profile.
#[derive(Clone)]
pub struct EntryRepositories {
    pub contacts: Arc<dyn EntryRepository<ContactData>>,
    pub education: Arc<dyn EntryRepository<EducationData>>,
    pub experience: Arc<dyn EntryRepository<ExperienceData>>,
    pub languages: Arc<dyn EntryRepository<LanguageData>>,
    pub skills: Arc<dyn EntryRepository<SkillData>>,
}
