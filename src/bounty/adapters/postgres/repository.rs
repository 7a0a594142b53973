//! `PostgreSQL` repository implementation for bounty lifecycle storage.
//!
//! Guarded writes are expressed as `UPDATE ... WHERE id = ? AND status = ?`
//! so the status check and the write are one statement; an affected-row
//! count of zero means the record vanished or a concurrent transition won.
//! The approval commit wraps both guarded updates in a single transaction.

use super::{
    models::{ApplicationRow, BountyRow, NewApplicationRow, NewBountyRow},
    schema::{applications, bounties},
};
use crate::bounty::{
    domain::{
        Application, ApplicationId, ApplicationStatus, Bounty, BountyId, BountyStatus,
        PersistedApplicationData, PersistedBountyData, Reward,
    },
    ports::{BountyRepository, BountyRepositoryError, BountyRepositoryResult},
};
use crate::identity::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by bounty adapters.
pub type BountyPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed bounty repository.
#[derive(Debug, Clone)]
pub struct PostgresBountyRepository {
    pool: BountyPgPool,
}

impl PostgresBountyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BountyPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BountyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BountyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| BountyRepositoryError::Busy(err.to_string()))?;
            f(&mut connection)
        })
        .await
        .map_err(BountyRepositoryError::persistence)?
    }
}

/// Transaction-internal error carrying either a Diesel failure or an
/// already-classified repository error.
enum TxError {
    Diesel(DieselError),
    Repo(BountyRepositoryError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        Self::Diesel(err)
    }
}

fn classify(err: DieselError) -> BountyRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
            BountyRepositoryError::Busy(info.message().to_owned())
        }
        other => BountyRepositoryError::persistence(other),
    }
}

impl From<TxError> for BountyRepositoryError {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Diesel(diesel_err) => classify(diesel_err),
            TxError::Repo(repo_err) => repo_err,
        }
    }
}

#[async_trait]
impl BountyRepository for PostgresBountyRepository {
    async fn store_bounty(&self, bounty: &Bounty) -> BountyRepositoryResult<()> {
        let bounty_id = bounty.id();
        let new_row = bounty_to_new_row(bounty);

        self.run_blocking(move |connection| {
            diesel::insert_into(bounties::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BountyRepositoryError::DuplicateBounty(bounty_id)
                    }
                    other => classify(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn store_application(&self, application: &Application) -> BountyRepositoryResult<()> {
        let application_id = application.id();
        let new_row = application_to_new_row(application);

        self.run_blocking(move |connection| {
            diesel::insert_into(applications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BountyRepositoryError::DuplicateApplication(application_id)
                    }
                    other => classify(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_bounty_by_id(&self, id: BountyId) -> BountyRepositoryResult<Option<Bounty>> {
        self.run_blocking(move |connection| {
            let row = bounties::table
                .filter(bounties::id.eq(id.into_inner()))
                .select(BountyRow::as_select())
                .first::<BountyRow>(connection)
                .optional()
                .map_err(classify)?;
            row.map(row_to_bounty).transpose()
        })
        .await
    }

    async fn find_application_by_id(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<Application>> {
        self.run_blocking(move |connection| {
            let row = applications::table
                .filter(applications::id.eq(id.into_inner()))
                .select(ApplicationRow::as_select())
                .first::<ApplicationRow>(connection)
                .optional()
                .map_err(classify)?;
            row.map(row_to_application).transpose()
        })
        .await
    }

    async fn find_application_with_bounty(
        &self,
        id: ApplicationId,
    ) -> BountyRepositoryResult<Option<(Application, Bounty)>> {
        self.run_blocking(move |connection| {
            let pair = applications::table
                .inner_join(bounties::table)
                .filter(applications::id.eq(id.into_inner()))
                .select((ApplicationRow::as_select(), BountyRow::as_select()))
                .first::<(ApplicationRow, BountyRow)>(connection)
                .optional()
                .map_err(classify)?;

            pair.map(|(application_row, bounty_row)| {
                Ok((row_to_application(application_row)?, row_to_bounty(bounty_row)?))
            })
            .transpose()
        })
        .await
    }

    async fn commit_decision(
        &self,
        application: &Application,
        bounty: Option<&Bounty>,
    ) -> BountyRepositoryResult<()> {
        let application_id = application.id();
        let application_status = application.status().as_str();
        let application_reason = application.reason().map(str::to_owned);
        let application_updated_at = application.updated_at();
        let assigned = bounty.map(|b| {
            (
                b.id(),
                b.status().as_str(),
                b.receiver_id().map(UserId::into_inner),
                b.updated_at(),
            )
        });

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, TxError, _>(|conn| {
                    let decided = diesel::update(
                        applications::table
                            .filter(applications::id.eq(application_id.into_inner()))
                            .filter(
                                applications::status.eq(ApplicationStatus::Pending.as_str()),
                            ),
                    )
                    .set((
                        applications::status.eq(application_status),
                        applications::reason.eq(application_reason),
                        applications::updated_at.eq(application_updated_at),
                    ))
                    .execute(conn)?;
                    if decided == 0 {
                        return Err(TxError::Repo(stale_application(conn, application_id)?));
                    }

                    if let Some((bounty_id, bounty_status, receiver_id, bounty_updated_at)) =
                        assigned
                    {
                        let moved = diesel::update(
                            bounties::table
                                .filter(bounties::id.eq(bounty_id.into_inner()))
                                .filter(bounties::status.eq(BountyStatus::Created.as_str())),
                        )
                        .set((
                            bounties::status.eq(bounty_status),
                            bounties::receiver_id.eq(receiver_id),
                            bounties::updated_at.eq(bounty_updated_at),
                        ))
                        .execute(conn)?;
                        if moved == 0 {
                            return Err(TxError::Repo(stale_bounty(conn, bounty_id)?));
                        }
                    }

                    Ok(())
                })
                .map_err(BountyRepositoryError::from)
        })
        .await
    }

    async fn update_bounty_status(
        &self,
        bounty: &Bounty,
        expected: BountyStatus,
    ) -> BountyRepositoryResult<()> {
        let bounty_id = bounty.id();
        let next_status = bounty.status().as_str();
        let bounty_updated_at = bounty.updated_at();

        self.run_blocking(move |connection| {
            let moved = diesel::update(
                bounties::table
                    .filter(bounties::id.eq(bounty_id.into_inner()))
                    .filter(bounties::status.eq(expected.as_str())),
            )
            .set((
                bounties::status.eq(next_status),
                bounties::updated_at.eq(bounty_updated_at),
            ))
            .execute(connection)
            .map_err(classify)?;

            if moved == 0 {
                return Err(stale_bounty(connection, bounty_id)?);
            }
            Ok(())
        })
        .await
    }
}

/// Classifies a zero-row guarded application update: missing or stale.
fn stale_application(
    connection: &mut PgConnection,
    application_id: ApplicationId,
) -> Result<BountyRepositoryError, TxError> {
    let stored = applications::table
        .filter(applications::id.eq(application_id.into_inner()))
        .select(applications::status)
        .first::<String>(connection)
        .optional()?;

    Ok(match stored {
        None => BountyRepositoryError::ApplicationNotFound(application_id),
        Some(raw) => match ApplicationStatus::try_from(raw.as_str()) {
            Ok(status) => BountyRepositoryError::StaleApplication {
                application_id,
                status,
            },
            Err(parse_err) => BountyRepositoryError::persistence(parse_err),
        },
    })
}

/// Classifies a zero-row guarded bounty update: missing or stale.
fn stale_bounty(
    connection: &mut PgConnection,
    bounty_id: BountyId,
) -> Result<BountyRepositoryError, TxError> {
    let stored = bounties::table
        .filter(bounties::id.eq(bounty_id.into_inner()))
        .select(bounties::status)
        .first::<String>(connection)
        .optional()?;

    Ok(match stored {
        None => BountyRepositoryError::BountyNotFound(bounty_id),
        Some(raw) => match BountyStatus::try_from(raw.as_str()) {
            Ok(status) => BountyRepositoryError::StaleBounty { bounty_id, status },
            Err(parse_err) => BountyRepositoryError::persistence(parse_err),
        },
    })
}

fn bounty_to_new_row(bounty: &Bounty) -> NewBountyRow {
    NewBountyRow {
        id: bounty.id().into_inner(),
        poster_id: bounty.poster_id().into_inner(),
        receiver_id: bounty.receiver_id().map(UserId::into_inner),
        title: bounty.title().to_owned(),
        description: bounty.description().to_owned(),
        reward_amount: bounty.reward().amount(),
        currency: bounty.reward().currency().to_owned(),
        status: bounty.status().as_str().to_owned(),
        created_at: bounty.created_at(),
        updated_at: bounty.updated_at(),
    }
}

fn application_to_new_row(application: &Application) -> NewApplicationRow {
    NewApplicationRow {
        id: application.id().into_inner(),
        bounty_id: application.bounty_id().into_inner(),
        applicant_id: application.applicant_id().into_inner(),
        proposal: application.proposal().to_owned(),
        status: application.status().as_str().to_owned(),
        reason: application.reason().map(str::to_owned),
        created_at: application.created_at(),
        updated_at: application.updated_at(),
    }
}

fn row_to_bounty(row: BountyRow) -> BountyRepositoryResult<Bounty> {
    let status =
        BountyStatus::try_from(row.status.as_str()).map_err(BountyRepositoryError::persistence)?;
    let reward = Reward::new(row.reward_amount, row.currency)
        .map_err(BountyRepositoryError::persistence)?;

    Ok(Bounty::from_persisted(PersistedBountyData {
        id: BountyId::from_uuid(row.id),
        poster_id: UserId::from_uuid(row.poster_id),
        receiver_id: row.receiver_id.map(UserId::from_uuid),
        title: row.title,
        description: row.description,
        reward,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_application(row: ApplicationRow) -> BountyRepositoryResult<Application> {
    let status = ApplicationStatus::try_from(row.status.as_str())
        .map_err(BountyRepositoryError::persistence)?;

    Ok(Application::from_persisted(PersistedApplicationData {
        id: ApplicationId::from_uuid(row.id),
        bounty_id: BountyId::from_uuid(row.bounty_id),
        applicant_id: UserId::from_uuid(row.applicant_id),
        proposal: row.proposal,
        status,
        reason: row.reason,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
