use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::entry::{EntryReader, EntryRepositories, EntryWriter};
use crate::domain::entities::entry::{
    ContactData, EducationData, EntryData, ExperienceData, LanguageData, ProfileEntry, SkillData,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Table layout of one entry kind. Every entry table carries
/// `id, user_id, profile_id, created_at, updated_at` around the payload columns.
pub trait EntryTable: EntryData {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Binds the payload in `COLUMNS` order.
    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_>;

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error>;
}

impl EntryTable for ContactData {
    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static [&'static str] = &["key", "value"];

    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query.bind(self.key).bind(self.value)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
        })
    }
}

impl EntryTable for EducationData {
    const TABLE: &'static str = "education";
    const COLUMNS: &'static [&'static str] =
        &["institution", "degree", "field_of_study", "start_date", "end_date", "details"];

    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.institution)
            .bind(self.degree)
            .bind(self.field_of_study)
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.details)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            institution: row.try_get("institution")?,
            degree: row.try_get("degree")?,
            field_of_study: row.try_get("field_of_study")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            details: row.try_get("details")?,
        })
    }
}

impl EntryTable for ExperienceData {
    const TABLE: &'static str = "experience";
    const COLUMNS: &'static [&'static str] = &["company", "position", "location", "start_date", "end_date", "details"];

    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.company)
            .bind(self.position)
            .bind(self.location)
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.details)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            company: row.try_get("company")?,
            position: row.try_get("position")?,
            location: row.try_get("location")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            details: row.try_get("details")?,
        })
    }
}

impl EntryTable for LanguageData {
    const TABLE: &'static str = "languages";
    const COLUMNS: &'static [&'static str] = &["language", "level", "certificate", "details"];

    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query
            .bind(self.language)
            .bind(self.level)
            .bind(self.certificate)
            .bind(self.details)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            language: row.try_get("language")?,
            level: row.try_get("level")?,
            certificate: row.try_get("certificate")?,
            details: row.try_get("details")?,
        })
    }
}

impl EntryTable for SkillData {
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static [&'static str] = &["name", "level", "details"];

    fn bind(self, query: PgQuery<'_>) -> PgQuery<'_> {
        query.bind(self.name).bind(self.level).bind(self.details)
    }

    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            level: row.try_get("level")?,
            details: row.try_get("details")?,
        })
    }
}

fn select_sql<D: EntryTable>(filter: &str) -> String {
    format!(
        "SELECT id, user_id, profile_id, {}, created_at, updated_at FROM {} WHERE {}",
        D::COLUMNS.join(", "),
        D::TABLE,
        filter
    )
}

fn upsert_sql<D: EntryTable>() -> String {
    let columns = D::COLUMNS.join(", ");
    let placeholders = (4..4 + D::COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let updates = D::COLUMNS
        .iter()
        .map(|column| format!("{0} = EXCLUDED.{0}", column))
        .collect::<Vec<_>>()
        .join(", ");
    let created_at = 4 + D::COLUMNS.len();

    format!(
        "INSERT INTO {table} (id, user_id, profile_id, {columns}, created_at, updated_at) \
         VALUES ($1, $2, $3, {placeholders}, ${created_at}, ${updated_at}) \
         ON CONFLICT (id) DO UPDATE SET profile_id = EXCLUDED.profile_id, {updates}, updated_at = EXCLUDED.updated_at",
        table = D::TABLE,
        updated_at = created_at + 1,
    )
}

fn map_entry<D: EntryTable>(row: &PgRow) -> AppResult<ProfileEntry<D>> {
    Ok(ProfileEntry {
        id: Id::new(row.try_get("id")?),
        user_id: Id::new(row.try_get("user_id")?),
        profile_id: Id::new(row.try_get("profile_id")?),
        data: D::from_row(row)?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// One gateway type for all five entry tables.
pub struct EntryGateway<D> {
    session: SqlxSession,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Clone for EntryGateway<D> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D: EntryTable> EntryGateway<D> {
    pub fn new(session: SqlxSession) -> Self {
        Self {
            session,
            _marker: PhantomData,
        }
    }
}

/// Entry gateways sharing one session.
pub fn entry_gateways(session: &SqlxSession) -> EntryRepositories {
    EntryRepositories {
        contacts: Arc::new(EntryGateway::<ContactData>::new(session.clone())),
        education: Arc::new(EntryGateway::<EducationData>::new(session.clone())),
        experience: Arc::new(EntryGateway::<ExperienceData>::new(session.clone())),
        languages: Arc::new(EntryGateway::<LanguageData>::new(session.clone())),
        skills: Arc::new(EntryGateway::<SkillData>::new(session.clone())),
    }
}

#[async_trait]
impl<D: EntryTable> EntryReader<D> for EntryGateway<D> {
    async fn find_by_id(&self, entry_id: &Id<ProfileEntry<D>>) -> AppResult<Option<ProfileEntry<D>>> {
        self.session
            .with_tx(|tx| {
                let entry_id = entry_id.value;
                async move {
                    let sql = select_sql::<D>("id = $1");
                    let result = sqlx::query(&sql)
                        .bind(entry_id)
                        .fetch_optional(tx.as_mut())
                        .await?;

                    result.as_ref().map(map_entry::<D>).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_by_profile(&self, profile_id: &Id<Profile>) -> AppResult<Vec<ProfileEntry<D>>> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                async move {
                    let sql = select_sql::<D>("profile_id = $1 ORDER BY created_at, id");
                    let rows = sqlx::query(&sql)
                        .bind(profile_id)
                        .fetch_all(tx.as_mut())
                        .await?;

                    rows.iter().map(map_entry::<D>).collect()
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl<D: EntryTable> EntryWriter<D> for EntryGateway<D> {
    async fn save(&self, entry: ProfileEntry<D>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                async move {
                    let sql = upsert_sql::<D>();
                    let query = sqlx::query(&sql)
                        .bind(entry.id.value)
                        .bind(entry.user_id.value)
                        .bind(entry.profile_id.value);
                    entry
                        .data
                        .bind(query)
                        .bind(entry.created_at)
                        .bind(entry.updated_at)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn delete_by_profile_except(&self, profile_id: &Id<Profile>, keep: &[Id<ProfileEntry<D>>]) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let profile_id = profile_id.value;
                let keep: Vec<Uuid> = keep.iter().map(|id| id.value).collect();
                async move {
                    let sql = format!("DELETE FROM {} WHERE profile_id = $1 AND NOT (id = ANY($2))", D::TABLE);
                    sqlx::query(&sql)
                        .bind(profile_id)
                        .bind(keep)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::db::gateway::entry::{select_sql, upsert_sql};
    use crate::domain::entities::entry::{ContactData, SkillData};

    #[test]
    fn test_upsert_sql_numbers_placeholders_after_payload() {
        let sql = upsert_sql::<SkillData>();
        assert!(sql.starts_with("INSERT INTO skills (id, user_id, profile_id, name, level, details, created_at, updated_at)"));
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"));
        assert!(sql.contains("name = EXCLUDED.name, level = EXCLUDED.level, details = EXCLUDED.details"));
    }

    #[test]
    fn test_select_sql_lists_payload_columns() {
        let sql = select_sql::<ContactData>("id = $1");
        assert_eq!(
            sql,
            "SELECT id, user_id, profile_id, key, value, created_at, updated_at FROM contacts WHERE id = $1"
        );
    }
}
