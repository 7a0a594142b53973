//! `PostgreSQL` repository implementation for invitation storage.
//!
//! The response write is a guarded `UPDATE ... WHERE id = ? AND status =
//! 'pending'`; an affected-row count of zero means the invitation vanished
//! or another response committed first. Cancellation writes unguarded.

use super::{
    models::{InvitationRow, NewInvitationRow},
    schema::invitations,
};
use crate::identity::UserId;
use crate::invitation::{
    domain::{Invitation, InvitationId, InvitationStatus, PersistedInvitationData, TeamId},
    ports::{InvitationRepository, InvitationRepositoryError, InvitationRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by invitation adapters.
pub type InvitationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed invitation repository.
#[derive(Debug, Clone)]
pub struct PostgresInvitationRepository {
    pool: InvitationPgPool,
}

impl PostgresInvitationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: InvitationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> InvitationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> InvitationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| InvitationRepositoryError::Busy(err.to_string()))?;
            f(&mut connection)
        })
        .await
        .map_err(InvitationRepositoryError::persistence)?
    }
}

fn classify(err: DieselError) -> InvitationRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
            InvitationRepositoryError::Busy(info.message().to_owned())
        }
        other => InvitationRepositoryError::persistence(other),
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn store(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let invitation_id = invitation.id();
        let new_row = invitation_to_new_row(invitation);

        self.run_blocking(move |connection| {
            diesel::insert_into(invitations::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        InvitationRepositoryError::DuplicateInvitation(invitation_id)
                    }
                    other => classify(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: InvitationId,
    ) -> InvitationRepositoryResult<Option<Invitation>> {
        self.run_blocking(move |connection| {
            let row = invitations::table
                .filter(invitations::id.eq(id.into_inner()))
                .select(InvitationRow::as_select())
                .first::<InvitationRow>(connection)
                .optional()
                .map_err(classify)?;
            row.map(row_to_invitation).transpose()
        })
        .await
    }

    async fn update_response(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let invitation_id = invitation.id();
        let next_status = invitation.status().as_str();
        let response_message = invitation.response_message().map(str::to_owned);
        let responded_at = invitation.responded_at();
        let invitation_updated_at = invitation.updated_at();

        self.run_blocking(move |connection| {
            let answered = diesel::update(
                invitations::table
                    .filter(invitations::id.eq(invitation_id.into_inner()))
                    .filter(invitations::status.eq(InvitationStatus::Pending.as_str())),
            )
            .set((
                invitations::status.eq(next_status),
                invitations::response_message.eq(response_message),
                invitations::responded_at.eq(responded_at),
                invitations::updated_at.eq(invitation_updated_at),
            ))
            .execute(connection)
            .map_err(classify)?;

            if answered == 0 {
                return Err(stale_invitation(connection, invitation_id)?);
            }
            Ok(())
        })
        .await
    }

    async fn update(&self, invitation: &Invitation) -> InvitationRepositoryResult<()> {
        let invitation_id = invitation.id();
        let next_status = invitation.status().as_str();
        let response_message = invitation.response_message().map(str::to_owned);
        let responded_at = invitation.responded_at();
        let invitation_updated_at = invitation.updated_at();

        self.run_blocking(move |connection| {
            let written = diesel::update(
                invitations::table.filter(invitations::id.eq(invitation_id.into_inner())),
            )
            .set((
                invitations::status.eq(next_status),
                invitations::response_message.eq(response_message),
                invitations::responded_at.eq(responded_at),
                invitations::updated_at.eq(invitation_updated_at),
            ))
            .execute(connection)
            .map_err(classify)?;

            if written == 0 {
                return Err(InvitationRepositoryError::NotFound(invitation_id));
            }
            Ok(())
        })
        .await
    }
}

/// Classifies a zero-row guarded response update: missing or stale.
fn stale_invitation(
    connection: &mut PgConnection,
    invitation_id: InvitationId,
) -> Result<InvitationRepositoryError, InvitationRepositoryError> {
    let stored = invitations::table
        .filter(invitations::id.eq(invitation_id.into_inner()))
        .select(invitations::status)
        .first::<String>(connection)
        .optional()
        .map_err(classify)?;

    Ok(match stored {
        None => InvitationRepositoryError::NotFound(invitation_id),
        Some(raw) => match InvitationStatus::try_from(raw.as_str()) {
            Ok(status) => InvitationRepositoryError::StaleInvitation {
                invitation_id,
                status,
            },
            Err(parse_err) => InvitationRepositoryError::persistence(parse_err),
        },
    })
}

fn invitation_to_new_row(invitation: &Invitation) -> NewInvitationRow {
    NewInvitationRow {
        id: invitation.id().into_inner(),
        inviter_id: invitation.inviter_id().into_inner(),
        invitee_id: invitation.invitee_id().into_inner(),
        team_id: invitation.team_id().into_inner(),
        status: invitation.status().as_str().to_owned(),
        message: invitation.message().to_owned(),
        response_message: invitation.response_message().map(str::to_owned),
        responded_at: invitation.responded_at(),
        expires_at: invitation.expires_at(),
        created_at: invitation.created_at(),
        updated_at: invitation.updated_at(),
    }
}

fn row_to_invitation(row: InvitationRow) -> InvitationRepositoryResult<Invitation> {
    let status = InvitationStatus::try_from(row.status.as_str())
        .map_err(InvitationRepositoryError::persistence)?;

    Ok(Invitation::from_persisted(PersistedInvitationData {
        id: InvitationId::from_uuid(row.id),
        inviter_id: UserId::from_uuid(row.inviter_id),
        invitee_id: UserId::from_uuid(row.invitee_id),
        team_id: TeamId::from_uuid(row.team_id),
        status,
        message: row.message,
        response_message: row.response_message,
        responded_at: row.responded_at,
        expires_at: row.expires_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
