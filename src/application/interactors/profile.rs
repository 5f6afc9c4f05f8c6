use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{
    AvatarDTO, AvatarDraftDTO, DeleteProfileDTO, EntryDTO, EntryDraftDTO, EntryDraftsDTO, GetProfileDTO,
    GetProfileListDTO, ModifyProfileDTO, ProfileDTO, ProfileListDTO, UpsertProfileDTO,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::avatar::AvatarRepository;
use crate::application::interface::gateway::entry::{EntryRepositories, EntryRepository};
use crate::application::interface::gateway::profile::{ProfileReader, ProfileWriter};
use crate::domain::entities::avatar::Avatar;
use crate::domain::entities::entry::{EntryData, ProfileEntry};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::user::User;
use crate::infra::constants::{MAX_LIMIT, MIN_LIMIT};

async fn resolve_entries<D: EntryData>(
    repository: &dyn EntryRepository<D>,
    user_id: &Id<User>,
    profile_id: &Id<Profile>,
    drafts: Vec<EntryDraftDTO<D>>,
) -> AppResult<Vec<ProfileEntry<D>>> {
    let mut entries = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let existing = match draft.id {
            Some(id) => repository.find_by_id(&id.try_into()?).await?,
            None => None,
        };
        entries.push(ProfileEntry::resolve(existing, user_id, profile_id, draft.data));
    }
    Ok(entries)
}

async fn replace_entries<D: EntryData>(
    repository: &dyn EntryRepository<D>,
    user_id: &Id<User>,
    profile_id: &Id<Profile>,
    drafts: Vec<EntryDraftDTO<D>>,
) -> AppResult<()> {
    let entries = resolve_entries(repository, user_id, profile_id, drafts).await?;
    let keep: Vec<Id<ProfileEntry<D>>> = entries.iter().map(|entry| entry.id.clone()).collect();
    repository.delete_by_profile_except(profile_id, &keep).await?;
    for entry in entries {
        repository.save(entry).await?;
    }
    Ok(())
}

async fn append_entries<D: EntryData>(
    repository: &dyn EntryRepository<D>,
    user_id: &Id<User>,
    profile_id: &Id<Profile>,
    drafts: Vec<EntryDraftDTO<D>>,
) -> AppResult<()> {
    for entry in resolve_entries(repository, user_id, profile_id, drafts).await? {
        repository.save(entry).await?;
    }
    Ok(())
}

async fn resolve_avatar(
    repository: &dyn AvatarRepository,
    user_id: &Id<User>,
    draft: AvatarDraftDTO,
) -> AppResult<Id<Avatar>> {
    let existing = match draft.id {
        Some(id) => repository.find_by_id(&id.try_into()?).await?,
        None => None,
    };
    repository.save(Avatar::resolve(existing, user_id, draft.url)).await
}

async fn load_entries<D: EntryData>(
    repository: &dyn EntryRepository<D>,
    profile_id: &Id<Profile>,
) -> AppResult<Vec<EntryDTO<D>>> {
    let entries = repository.find_by_profile(profile_id).await?;
    Ok(entries.into_iter().map(EntryDTO::from).collect())
}

#[derive(Clone, Copy)]
enum EntryMode {
    Replace,
    Append,
}

/// Loads and writes the entry collections and avatar of a profile.
#[derive(Clone)]
pub struct ProfileAggregate {
    entries: EntryRepositories,
    avatars: Arc<dyn AvatarRepository>,
}

impl ProfileAggregate {
    pub fn new(entries: EntryRepositories, avatars: Arc<dyn AvatarRepository>) -> Self {
        Self { entries, avatars }
    }

    async fn write_entries(
        &self,
        mode: EntryMode,
        user_id: &Id<User>,
        profile_id: &Id<Profile>,
        drafts: EntryDraftsDTO,
    ) -> AppResult<()> {
        let entries = &self.entries;
        match mode {
            EntryMode::Replace => {
                replace_entries(&*entries.contacts, user_id, profile_id, drafts.contacts).await?;
                replace_entries(&*entries.education, user_id, profile_id, drafts.education).await?;
                replace_entries(&*entries.experience, user_id, profile_id, drafts.experience).await?;
                replace_entries(&*entries.languages, user_id, profile_id, drafts.languages).await?;
                replace_entries(&*entries.skills, user_id, profile_id, drafts.skills).await?;
            }
            EntryMode::Append => {
                append_entries(&*entries.contacts, user_id, profile_id, drafts.contacts).await?;
                append_entries(&*entries.education, user_id, profile_id, drafts.education).await?;
                append_entries(&*entries.experience, user_id, profile_id, drafts.experience).await?;
                append_entries(&*entries.languages, user_id, profile_id, drafts.languages).await?;
                append_entries(&*entries.skills, user_id, profile_id, drafts.skills).await?;
            }
        }
        Ok(())
    }

    async fn resolve_avatar(&self, user_id: &Id<User>, draft: AvatarDraftDTO) -> AppResult<Id<Avatar>> {
        resolve_avatar(self.avatars.as_ref(), user_id, draft).await
    }

    async fn load(&self, profile: Profile) -> AppResult<ProfileDTO> {
        let avatar = match &profile.avatar_id {
            Some(avatar_id) => self.avatars.find_by_id(avatar_id).await?.map(|avatar| AvatarDTO {
                id: avatar.id.value.to_string(),
                url: avatar.url,
            }),
            None => None,
        };
        let entries = &self.entries;

        Ok(ProfileDTO {
            contacts: load_entries(&*entries.contacts, &profile.id).await?,
            education: load_entries(&*entries.education, &profile.id).await?,
            experience: load_entries(&*entries.experience, &profile.id).await?,
            languages: load_entries(&*entries.languages, &profile.id).await?,
            skills: load_entries(&*entries.skills, &profile.id).await?,
            id: profile.id.value.to_string(),
            name: profile.name,
            summary: profile.summary,
            details: profile.details,
            avatar,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct GetProfileInteractor {
    profile_reader: Arc<dyn ProfileReader>,
    aggregate: ProfileAggregate,
}

impl GetProfileInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>, aggregate: ProfileAggregate) -> Self {
        Self {
            profile_reader,
            aggregate,
        }
    }

    pub async fn execute(&self, dto: GetProfileDTO) -> AppResult<ProfileDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let profile = self
            .profile_reader
            .find_by_name(&user_id, &dto.name)
            .await?
            .ok_or(AppError::ProfileNotFound)?;
        self.aggregate.load(profile).await
    }
}

#[derive(Clone)]
pub struct GetProfileListInteractor {
    profile_reader: Arc<dyn ProfileReader>,
    aggregate: ProfileAggregate,
}

impl GetProfileListInteractor {
    pub fn new(profile_reader: Arc<dyn ProfileReader>, aggregate: ProfileAggregate) -> Self {
        Self {
            profile_reader,
            aggregate,
        }
    }

    pub async fn execute(&self, dto: GetProfileListDTO) -> AppResult<ProfileListDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let limit = dto.limit.clamp(MIN_LIMIT, MAX_LIMIT);
        let offset = dto.offset.max(0);

        let total = self.profile_reader.count_by_user(&user_id).await?;
        let profiles = self.profile_reader.find_by_user(&user_id, limit, offset).await?;

        let mut items = Vec::with_capacity(profiles.len());
        for profile in profiles {
            items.push(self.aggregate.load(profile).await?);
        }

        Ok(ProfileListDTO {
            total,
            offset,
            limit,
            items,
        })
    }
}

#[derive(Clone)]
pub struct UpsertProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    aggregate: ProfileAggregate,
}

impl UpsertProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        aggregate: ProfileAggregate,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
            aggregate,
        }
    }

    pub async fn execute(&self, dto: UpsertProfileDTO) -> AppResult<ProfileDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;

        let mut profile = match self.profile_reader.find_by_name(&user_id, &dto.name).await? {
            Some(profile) => profile,
            None => {
                let profile = Profile::new(user_id.clone(), dto.name);
                self.profile_writer.insert(profile.clone()).await?;
                info!("Created profile {} for user {}", profile.id, user_id);
                profile
            }
        };

        profile.summary = dto.summary;
        if let Some(details) = dto.details {
            profile.details = Some(details);
        }
        self.aggregate
            .write_entries(EntryMode::Replace, &user_id, &profile.id, dto.entries)
            .await?;
        profile.avatar_id = match dto.avatar {
            Some(draft) => Some(self.aggregate.resolve_avatar(&user_id, draft).await?),
            None => None,
        };
        profile.updated_at = Utc::now();

        self.profile_writer.update(profile.clone()).await?;
        let result = self.aggregate.load(profile).await?;
        self.db_session.commit().await?;

        Ok(result)
    }
}

#[derive(Clone)]
pub struct ModifyProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
    aggregate: ProfileAggregate,
}

impl ModifyProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
        aggregate: ProfileAggregate,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
            aggregate,
        }
    }

    pub async fn execute(&self, dto: ModifyProfileDTO) -> AppResult<ProfileDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;

        let found = self.profile_reader.find_by_id(&profile_id).await?;
        let mut profile = Profile::authorize(found, &user_id)?;

        if let Some(name) = dto.name.as_deref().filter(|name| !name.is_empty() && *name != profile.name) {
            if self.profile_reader.find_by_name(&user_id, name).await?.is_some() {
                return Err(AppError::ProfileAlreadyExists);
            }
        }

        profile.merge_scalars(dto.name, dto.summary, dto.details);
        self.aggregate
            .write_entries(EntryMode::Append, &user_id, &profile.id, dto.entries)
            .await?;
        if let Some(draft) = dto.avatar {
            profile.avatar_id = Some(self.aggregate.resolve_avatar(&user_id, draft).await?);
        }

        self.profile_writer.update(profile.clone()).await?;
        let result = self.aggregate.load(profile).await?;
        self.db_session.commit().await?;

        Ok(result)
    }
}

#[derive(Clone)]
pub struct DeleteProfileInteractor {
    db_session: Arc<dyn DBSession>,
    profile_reader: Arc<dyn ProfileReader>,
    profile_writer: Arc<dyn ProfileWriter>,
}

impl DeleteProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        profile_reader: Arc<dyn ProfileReader>,
        profile_writer: Arc<dyn ProfileWriter>,
    ) -> Self {
        Self {
            db_session,
            profile_reader,
            profile_writer,
        }
    }

    pub async fn execute(&self, dto: DeleteProfileDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let profile_id: Id<Profile> = dto.profile_id.try_into()?;

        let found = self.profile_reader.find_by_id(&profile_id).await?;
        let profile = Profile::authorize(found, &user_id)?;

        self.profile_writer.delete(&profile.id).await?;
        self.db_session.commit().await?;
        info!("Deleted profile {} of user {}", profile.id, user_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::profile::{
        AvatarDraftDTO, DeleteProfileDTO, EntryDraftDTO, EntryDraftsDTO, GetProfileDTO, GetProfileListDTO,
        ModifyProfileDTO, UpsertProfileDTO,
    };
    use crate::application::interactors::profile::{
        DeleteProfileInteractor, GetProfileInteractor, GetProfileListInteractor, ModifyProfileInteractor,
        UpsertProfileInteractor,
    };
    use crate::domain::entities::entry::{ContactData, ProfileEntry, SkillData};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::Profile;
    use crate::domain::entities::user::{AuthProvider, User};
    use crate::tests::memory::InMemoryStore;
    use crate::tests::mocks::MockDBSessionMock;

    struct Ctx {
        store: InMemoryStore,
        user_id: String,
    }

    #[fixture]
    fn ctx() -> Ctx {
        let store = InMemoryStore::default();
        let user = User::new("jane@example.com".to_string(), "sub".to_string(), AuthProvider::Google);
        let user_id = user.id.value.to_string();
        store.put_user(user);
        Ctx { store, user_id }
    }

    fn committing_session() -> MockDBSessionMock {
        let mut db_session = MockDBSessionMock::new();
        db_session.expect_commit().returning(|| Ok(()));
        db_session
    }

    fn upsert_interactor(store: &InMemoryStore) -> UpsertProfileInteractor {
        UpsertProfileInteractor::new(
            Arc::new(committing_session()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            store.aggregate(),
        )
    }

    fn modify_interactor(store: &InMemoryStore) -> ModifyProfileInteractor {
        ModifyProfileInteractor::new(
            Arc::new(committing_session()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            store.aggregate(),
        )
    }

    fn skill(name: &str) -> EntryDraftDTO<SkillData> {
        EntryDraftDTO {
            id: None,
            data: SkillData {
                name: name.to_string(),
                level: None,
                details: None,
            },
        }
    }

    fn contact(key: &str, value: &str) -> EntryDraftDTO<ContactData> {
        EntryDraftDTO {
            id: None,
            data: ContactData {
                key: key.to_string(),
                value: value.to_string(),
            },
        }
    }

    fn upsert_dto(user_id: &str, name: &str, entries: EntryDraftsDTO) -> UpsertProfileDTO {
        UpsertProfileDTO {
            user_id: user_id.to_string(),
            name: name.to_string(),
            summary: Some("Backend engineer".to_string()),
            details: None,
            entries,
            avatar: None,
        }
    }

    fn empty_modify(user_id: &str, profile_id: &str) -> ModifyProfileDTO {
        ModifyProfileDTO {
            user_id: user_id.to_string(),
            profile_id: profile_id.to_string(),
            name: None,
            summary: None,
            details: None,
            entries: EntryDraftsDTO::default(),
            avatar: None,
        }
    }

    // UpsertProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_upsert_creates_profile(ctx: Ctx) {
        let entries = EntryDraftsDTO {
            skills: vec![skill("rust"), skill("sql")],
            contacts: vec![contact("phone", "+62 811")],
            ..Default::default()
        };

        let result = upsert_interactor(&ctx.store)
            .execute(upsert_dto(&ctx.user_id, "cv", entries))
            .await
            .unwrap();

        assert_eq!(result.name, "cv");
        assert_eq!(result.summary.as_deref(), Some("Backend engineer"));
        assert_eq!(result.skills.len(), 2);
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(ctx.store.profiles().len(), 1);
    }

    // Tests that a second upsert of the same name replaces every collection
    // Verifies:
    // - no duplicate profile is created
    // - old entries are removed, new ones take their place
    #[rstest]
    #[tokio::test]
    async fn test_upsert_twice_replaces_entries(ctx: Ctx) {
        let interactor = upsert_interactor(&ctx.store);
        let first = EntryDraftsDTO {
            skills: vec![skill("rust"), skill("sql")],
            contacts: vec![contact("phone", "+62 811")],
            ..Default::default()
        };
        interactor
            .execute(upsert_dto(&ctx.user_id, "cv", first))
            .await
            .unwrap();

        let second = EntryDraftsDTO {
            skills: vec![skill("go")],
            ..Default::default()
        };
        let result = interactor
            .execute(upsert_dto(&ctx.user_id, "cv", second))
            .await
            .unwrap();

        assert_eq!(ctx.store.profiles().len(), 1);
        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].data.name, "go");
        assert!(result.contacts.is_empty());
        assert_eq!(ctx.store.skills().len(), 1);
        assert!(ctx.store.contacts().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_upsert_reuses_owned_entry(ctx: Ctx) {
        let interactor = upsert_interactor(&ctx.store);
        let created = interactor
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![skill("rust")],
                    ..Default::default()
                },
            ))
            .await
            .unwrap();
        let skill_id = created.skills[0].id.clone();

        let mut renamed = skill("rust 2024");
        renamed.id = Some(skill_id.clone());
        let result = interactor
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![renamed],
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].id, skill_id);
        assert_eq!(result.skills[0].data.name, "rust 2024");
    }

    #[rstest]
    #[tokio::test]
    async fn test_upsert_never_attaches_foreign_entry(ctx: Ctx) {
        let stranger: Id<User> = Id::generate();
        let foreign_profile = Profile::new(stranger.clone(), "theirs".to_string());
        let foreign_skill = ProfileEntry::new(
            stranger,
            foreign_profile.id.clone(),
            SkillData {
                name: "cobol".to_string(),
                level: None,
                details: None,
            },
        );
        let foreign_id = foreign_skill.id.value.to_string();
        ctx.store.put_profile(foreign_profile);
        ctx.store.put_skill(foreign_skill);

        let mut draft = skill("rust");
        draft.id = Some(foreign_id.clone());
        let result = upsert_interactor(&ctx.store)
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![draft],
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        assert_ne!(result.skills[0].id, foreign_id);
        let skills = ctx.store.skills();
        assert_eq!(skills.len(), 2);
        assert!(skills.iter().any(|s| s.id.value.to_string() == foreign_id && s.data.name == "cobol"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_upsert_invalid_entry_id(ctx: Ctx) {
        let mut draft = skill("rust");
        draft.id = Some("not-a-uuid".to_string());
        let result = upsert_interactor(&ctx.store)
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![draft],
                    ..Default::default()
                },
            ))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidId(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_upsert_sets_and_clears_avatar(ctx: Ctx) {
        let interactor = upsert_interactor(&ctx.store);
        let mut dto = upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default());
        dto.avatar = Some(AvatarDraftDTO {
            id: None,
            url: "https://cdn.example.com/a.png".to_string(),
        });
        let with_avatar = interactor.execute(dto).await.unwrap();
        assert_eq!(with_avatar.avatar.unwrap().url, "https://cdn.example.com/a.png");

        let cleared = interactor
            .execute(upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default()))
            .await
            .unwrap();
        assert!(cleared.avatar.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_upsert_keeps_details_when_omitted(ctx: Ctx) {
        let interactor = upsert_interactor(&ctx.store);
        let mut dto = upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default());
        dto.details = Some("Open to relocation".to_string());
        interactor.execute(dto).await.unwrap();

        let result = interactor
            .execute(upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default()))
            .await
            .unwrap();

        assert_eq!(result.details.as_deref(), Some("Open to relocation"));
        assert_eq!(ctx.store.profiles()[0].details.as_deref(), Some("Open to relocation"));
    }

    // ModifyProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_modify_keeps_omitted_scalars(ctx: Ctx) {
        let created = upsert_interactor(&ctx.store)
            .execute(upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default()))
            .await
            .unwrap();

        let mut dto = empty_modify(&ctx.user_id, &created.id);
        dto.name = Some(String::new());
        dto.details = Some("Open to relocation".to_string());
        let result = modify_interactor(&ctx.store).execute(dto).await.unwrap();

        assert_eq!(result.name, "cv");
        assert_eq!(result.summary.as_deref(), Some("Backend engineer"));
        assert_eq!(result.details.as_deref(), Some("Open to relocation"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_modify_appends_entries(ctx: Ctx) {
        let created = upsert_interactor(&ctx.store)
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![skill("rust")],
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        let mut dto = empty_modify(&ctx.user_id, &created.id);
        dto.entries.skills = vec![skill("sql")];
        let result = modify_interactor(&ctx.store).execute(dto).await.unwrap();

        let names: Vec<&str> = result.skills.iter().map(|s| s.data.name.as_str()).collect();
        assert_eq!(names, vec!["rust", "sql"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_modify_rename_conflict(ctx: Ctx) {
        let interactor = upsert_interactor(&ctx.store);
        interactor
            .execute(upsert_dto(&ctx.user_id, "taken", EntryDraftsDTO::default()))
            .await
            .unwrap();
        let created = interactor
            .execute(upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default()))
            .await
            .unwrap();

        let mut dto = empty_modify(&ctx.user_id, &created.id);
        dto.name = Some("taken".to_string());
        let result = modify_interactor(&ctx.store).execute(dto).await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileAlreadyExists));
    }

    #[rstest]
    #[tokio::test]
    async fn test_modify_foreign_profile_forbidden(ctx: Ctx) {
        let foreign = Profile::new(Id::generate(), "theirs".to_string());
        let foreign_id = foreign.id.value.to_string();
        ctx.store.put_profile(foreign);

        let mut dto = empty_modify(&ctx.user_id, &foreign_id);
        dto.summary = Some("hijacked".to_string());
        let result = modify_interactor(&ctx.store).execute(dto).await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied));
        assert!(ctx.store.profiles()[0].summary.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn test_modify_missing_profile(ctx: Ctx) {
        let missing = Id::<Profile>::generate().value.to_string();
        let result = modify_interactor(&ctx.store)
            .execute(empty_modify(&ctx.user_id, &missing))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }

    // DeleteProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_delete_own_profile(ctx: Ctx) {
        let created = upsert_interactor(&ctx.store)
            .execute(upsert_dto(
                &ctx.user_id,
                "cv",
                EntryDraftsDTO {
                    skills: vec![skill("rust")],
                    ..Default::default()
                },
            ))
            .await
            .unwrap();

        let interactor = DeleteProfileInteractor::new(
            Arc::new(committing_session()),
            Arc::new(ctx.store.clone()),
            Arc::new(ctx.store.clone()),
        );
        interactor
            .execute(DeleteProfileDTO {
                user_id: ctx.user_id.clone(),
                profile_id: created.id,
            })
            .await
            .unwrap();

        assert!(ctx.store.profiles().is_empty());
        assert!(ctx.store.skills().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_foreign_profile_forbidden(ctx: Ctx) {
        let foreign = Profile::new(Id::generate(), "theirs".to_string());
        let foreign_id = foreign.id.value.to_string();
        ctx.store.put_profile(foreign);

        let interactor = DeleteProfileInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(ctx.store.clone()),
            Arc::new(ctx.store.clone()),
        );
        let result = interactor
            .execute(DeleteProfileDTO {
                user_id: ctx.user_id.clone(),
                profile_id: foreign_id,
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::AccessDenied));
        assert_eq!(ctx.store.profiles().len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_missing_profile(ctx: Ctx) {
        let interactor = DeleteProfileInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(ctx.store.clone()),
            Arc::new(ctx.store.clone()),
        );
        let result = interactor
            .execute(DeleteProfileDTO {
                user_id: ctx.user_id.clone(),
                profile_id: Id::<Profile>::generate().value.to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }

    // GetProfileInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_get_profile_scoped_to_owner(ctx: Ctx) {
        let stranger: Id<User> = Id::generate();
        ctx.store.put_profile(Profile::new(stranger, "cv".to_string()));

        let interactor = GetProfileInteractor::new(Arc::new(ctx.store.clone()), ctx.store.aggregate());
        let result = interactor
            .execute(GetProfileDTO {
                user_id: ctx.user_id.clone(),
                name: "cv".to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::ProfileNotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_profile_by_name(ctx: Ctx) {
        upsert_interactor(&ctx.store)
            .execute(upsert_dto(&ctx.user_id, "cv", EntryDraftsDTO::default()))
            .await
            .unwrap();

        let interactor = GetProfileInteractor::new(Arc::new(ctx.store.clone()), ctx.store.aggregate());
        let result = interactor
            .execute(GetProfileDTO {
                user_id: ctx.user_id.clone(),
                name: "cv".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.name, "cv");
    }

    // GetProfileListInteractor tests
    #[rstest]
    #[case(0, 10, 10)]
    #[case(10, 10, 5)]
    #[case(0, 500, 15)]
    #[case(-3, 0, 1)]
    #[tokio::test]
    async fn test_get_profile_list_pagination(
        ctx: Ctx,
        #[case] offset: i64,
        #[case] limit: i64,
        #[case] expected_items: usize,
    ) {
        let user_id: Id<User> = ctx.user_id.clone().try_into().unwrap();
        for i in 0..15 {
            ctx.store.put_profile(Profile::new(user_id.clone(), format!("profile-{}", i)));
        }
        ctx.store.put_profile(Profile::new(Id::generate(), "foreign".to_string()));

        let interactor = GetProfileListInteractor::new(Arc::new(ctx.store.clone()), ctx.store.aggregate());
        let result = interactor
            .execute(GetProfileListDTO {
                user_id: ctx.user_id.clone(),
                offset,
                limit,
            })
            .await
            .unwrap();

        assert_eq!(result.items.len(), expected_items);
        assert_eq!(result.total, 15);
        assert!(result.offset >= 0);
    }
}
