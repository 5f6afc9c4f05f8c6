use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;

/// Payload of one kind of profile entry.
pub trait EntryData: Debug + Clone + Send + Sync + 'static {}

/// A child record of a profile. Every kind shares this shape and differs only in `data`.
#[derive(Debug, Clone)]
pub struct ProfileEntry<D: EntryData> {
    pub id: Id<ProfileEntry<D>>,
    pub user_id: Id<User>,
    pub profile_id: Id<Profile>,
    pub data: D,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<D: EntryData> ProfileEntry<D> {
    pub fn new(user_id: Id<User>, profile_id: Id<Profile>, data: D) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            user_id,
            profile_id,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Resolve-or-create: an existing entry owned by `user_id` is moved onto
    /// `profile_id` and takes the submitted data. Anything else becomes a new row.
    pub fn resolve(existing: Option<ProfileEntry<D>>, user_id: &Id<User>, profile_id: &Id<Profile>, data: D) -> Self {
        match existing {
            Some(mut entry) if entry.user_id == *user_id => {
                entry.profile_id = profile_id.clone();
                entry.data = data;
                entry.updated_at = Utc::now();
                entry
            }
            _ => ProfileEntry::new(user_id.clone(), profile_id.clone(), data),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactData {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationData {
    pub institution: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceData {
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageData {
    pub language: String,
    pub level: Option<String>,
    pub certificate: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillData {
    pub name: String,
    pub level: Option<String>,
    pub details: Option<String>,
}

impl EntryData for ContactData {}
impl EntryData for EducationData {}
impl EntryData for ExperienceData {}
impl EntryData for LanguageData {}
impl EntryData for SkillData {}

pub type Contact = ProfileEntry<ContactData>;

impl Contact {
    pub fn email(user_id: Id<User>, profile_id: Id<Profile>, email: String) -> Self {
        ProfileEntry::new(
            user_id,
            profile_id,
            ContactData {
                key: "email".to_string(),
                value: email,
            },
        )
    }
}
