use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::profile::{
    AvatarDTO, AvatarDraftDTO, EntryDTO, EntryDraftDTO, EntryDraftsDTO, ProfileDTO, ProfileListDTO,
};
use crate::domain::entities::entry::{ContactData, EducationData, ExperienceData, LanguageData, SkillData};

// Entry schemas are shared by requests and responses. On input `id` names an
// existing entry to reuse; responses always carry it.

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "phone")]
    pub key: String,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "+62 811 0000 000")]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct EducationSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExperienceSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub company: String,
    #[validate(length(min = 1, max = 255))]
    pub position: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LanguageSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "English")]
    pub language: String,
    #[schema(example = "C1")]
    pub level: Option<String>,
    pub certificate: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SkillSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 128))]
    #[schema(example = "Rust")]
    pub name: String,
    pub level: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AvatarSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[validate(length(min = 1, max = 2048))]
    #[schema(example = "https://cdn.example.com/avatars/jane.png")]
    pub url: String,
}

impl From<ContactSchema> for EntryDraftDTO<ContactData> {
    fn from(schema: ContactSchema) -> Self {
        Self {
            id: schema.id,
            data: ContactData {
                key: schema.key,
                value: schema.value,
            },
        }
    }
}

impl From<EntryDTO<ContactData>> for ContactSchema {
    fn from(dto: EntryDTO<ContactData>) -> Self {
        Self {
            id: Some(dto.id),
            key: dto.data.key,
            value: dto.data.value,
        }
    }
}

impl From<EducationSchema> for EntryDraftDTO<EducationData> {
    fn from(schema: EducationSchema) -> Self {
        Self {
            id: schema.id,
            data: EducationData {
                institution: schema.institution,
                degree: schema.degree,
                field_of_study: schema.field_of_study,
                start_date: schema.start_date,
                end_date: schema.end_date,
                details: schema.details,
            },
        }
    }
}

impl From<EntryDTO<EducationData>> for EducationSchema {
    fn from(dto: EntryDTO<EducationData>) -> Self {
        Self {
            id: Some(dto.id),
            institution: dto.data.institution,
            degree: dto.data.degree,
            field_of_study: dto.data.field_of_study,
            start_date: dto.data.start_date,
            end_date: dto.data.end_date,
            details: dto.data.details,
        }
    }
}

impl From<ExperienceSchema> for EntryDraftDTO<ExperienceData> {
    fn from(schema: ExperienceSchema) -> Self {
        Self {
            id: schema.id,
            data: ExperienceData {
                company: schema.company,
                position: schema.position,
                location: schema.location,
                start_date: schema.start_date,
                end_date: schema.end_date,
                details: schema.details,
            },
        }
    }
}

impl From<EntryDTO<ExperienceData>> for ExperienceSchema {
    fn from(dto: EntryDTO<ExperienceData>) -> Self {
        Self {
            id: Some(dto.id),
            company: dto.data.company,
            position: dto.data.position,
            location: dto.data.location,
            start_date: dto.data.start_date,
            end_date: dto.data.end_date,
            details: dto.data.details,
        }
    }
}

impl From<LanguageSchema> for EntryDraftDTO<LanguageData> {
    fn from(schema: LanguageSchema) -> Self {
        Self {
            id: schema.id,
            data: LanguageData {
                language: schema.language,
                level: schema.level,
                certificate: schema.certificate,
                details: schema.details,
            },
        }
    }
}

impl From<EntryDTO<LanguageData>> for LanguageSchema {
    fn from(dto: EntryDTO<LanguageData>) -> Self {
        Self {
            id: Some(dto.id),
            language: dto.data.language,
            level: dto.data.level,
            certificate: dto.data.certificate,
            details: dto.data.details,
        }
    }
}

impl From<SkillSchema> for EntryDraftDTO<SkillData> {
    fn from(schema: SkillSchema) -> Self {
        Self {
            id: schema.id,
            data: SkillData {
                name: schema.name,
                level: schema.level,
                details: schema.details,
            },
        }
    }
}

impl From<EntryDTO<SkillData>> for SkillSchema {
    fn from(dto: EntryDTO<SkillData>) -> Self {
        Self {
            id: Some(dto.id),
            name: dto.data.name,
            level: dto.data.level,
            details: dto.data.details,
        }
    }
}

impl From<AvatarSchema> for AvatarDraftDTO {
    fn from(schema: AvatarSchema) -> Self {
        Self {
            id: schema.id,
            url: schema.url,
        }
    }
}

impl From<AvatarDTO> for AvatarSchema {
    fn from(dto: AvatarDTO) -> Self {
        Self {
            id: Some(dto.id),
            url: dto.url,
        }
    }
}

fn into_drafts<S: Into<EntryDraftDTO<D>>, D>(items: Vec<S>) -> Vec<EntryDraftDTO<D>> {
    items.into_iter().map(Into::into).collect()
}

fn into_schemas<D, S: From<EntryDTO<D>>>(items: Vec<EntryDTO<D>>) -> Vec<S> {
    items.into_iter().map(S::from).collect()
}

/// Collections of a request body. Every list defaults to empty.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct EntriesRequest {
    #[serde(default)]
    #[validate(nested)]
    pub contacts: Vec<ContactSchema>,
    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<EducationSchema>,
    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<ExperienceSchema>,
    #[serde(default)]
    #[validate(nested)]
    pub languages: Vec<LanguageSchema>,
    #[serde(default)]
    #[validate(nested)]
    pub skills: Vec<SkillSchema>,
}

impl From<EntriesRequest> for EntryDraftsDTO {
    fn from(request: EntriesRequest) -> Self {
        Self {
            contacts: into_drafts(request.contacts),
            education: into_drafts(request.education),
            experience: into_drafts(request.experience),
            languages: into_drafts(request.languages),
            skills: into_drafts(request.skills),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Profile name must be 1-100 characters"))]
    #[schema(example = "backend-cv")]
    pub name: String,
    pub summary: Option<String>,
    pub details: Option<String>,
    #[validate(nested)]
    pub avatar: Option<AvatarSchema>,
    #[serde(flatten)]
    #[validate(nested)]
    pub entries: EntriesRequest,
}

/// Partial update. Empty or missing scalars keep their stored value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ModifyProfileRequest {
    #[validate(length(max = 100, message = "Profile name must be at most 100 characters"))]
    pub name: Option<String>,
    pub summary: Option<String>,
    pub details: Option<String>,
    #[validate(nested)]
    pub avatar: Option<AvatarSchema>,
    #[serde(flatten)]
    #[validate(nested)]
    pub entries: EntriesRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub avatar: Option<AvatarSchema>,
    pub contacts: Vec<ContactSchema>,
    pub education: Vec<EducationSchema>,
    pub experience: Vec<ExperienceSchema>,
    pub languages: Vec<LanguageSchema>,
    pub skills: Vec<SkillSchema>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileDTO> for ProfileResponse {
    fn from(dto: ProfileDTO) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            summary: dto.summary,
            details: dto.details,
            avatar: dto.avatar.map(AvatarSchema::from),
            contacts: into_schemas(dto.contacts),
            education: into_schemas(dto.education),
            experience: into_schemas(dto.experience),
            languages: into_schemas(dto.languages),
            skills: into_schemas(dto.skills),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileListResponse {
    pub items: Vec<ProfileResponse>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl From<ProfileListDTO> for ProfileListResponse {
    fn from(dto: ProfileListDTO) -> Self {
        Self {
            items: dto.items.into_iter().map(ProfileResponse::from).collect(),
            total: dto.total,
            offset: dto.offset,
            limit: dto.limit,
        }
    }
}
