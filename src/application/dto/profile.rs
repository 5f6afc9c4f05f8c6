use chrono::{DateTime, Utc};

use crate::domain::entities::entry::{
    ContactData, EducationData, EntryData, ExperienceData, LanguageData, ProfileEntry, SkillData,
};

/// Submitted entry: `id` points at an existing row to reuse, if any.
#[derive(Debug, Clone)]
pub struct EntryDraftDTO<D> {
    pub id: Option<String>,
    pub data: D,
}

#[derive(Debug, Clone)]
pub struct AvatarDraftDTO {
    pub id: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct EntryDraftsDTO {
    pub contacts: Vec<EntryDraftDTO<ContactData>>,
    pub education: Vec<EntryDraftDTO<EducationData>>,
    pub experience: Vec<EntryDraftDTO<ExperienceData>>,
    pub languages: Vec<EntryDraftDTO<LanguageData>>,
    pub skills: Vec<EntryDraftDTO<SkillData>>,
}

#[derive(Debug, Clone)]
pub struct UpsertProfileDTO {
    pub user_id: String,
    pub name: String,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub entries: EntryDraftsDTO,
    pub avatar: Option<AvatarDraftDTO>,
}

#[derive(Debug, Clone)]
pub struct ModifyProfileDTO {
    pub user_id: String,
    pub profile_id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub entries: EntryDraftsDTO,
    pub avatar: Option<AvatarDraftDTO>,
}

#[derive(Debug, Clone)]
pub struct GetProfileDTO {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct GetProfileListDTO {
    pub user_id: String,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone)]
pub struct DeleteProfileDTO {
    pub user_id: String,
    pub profile_id: String,
}

#[derive(Debug, Clone)]
pub struct EntryDTO<D> {
    pub id: String,
    pub data: D,
}

impl<D: EntryData> From<ProfileEntry<D>> for EntryDTO<D> {
    fn from(entry: ProfileEntry<D>) -> Self {
        Self {
            id: entry.id.value.to_string(),
            data: entry.data,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AvatarDTO {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct ProfileDTO {
    pub id: String,
    pub name: String,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub avatar: Option<AvatarDTO>,
    pub contacts: Vec<EntryDTO<ContactData>>,
    pub education: Vec<EntryDTO<EducationData>>,
    pub experience: Vec<EntryDTO<ExperienceData>>,
    pub languages: Vec<EntryDTO<LanguageData>>,
    pub skills: Vec<EntryDTO<SkillData>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProfileListDTO {
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub items: Vec<ProfileDTO>,
}
