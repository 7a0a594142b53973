//! Diesel row models for invitation persistence.

use super::schema::invitations;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for invitation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvitationRow {
    /// Invitation identifier.
    pub id: uuid::Uuid,
    /// Inviter identifier.
    pub inviter_id: uuid::Uuid,
    /// Invitee identifier.
    pub invitee_id: uuid::Uuid,
    /// Target team identifier.
    pub team_id: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Inviter message.
    pub message: String,
    /// Invitee reply, if responded.
    pub response_message: Option<String>,
    /// Response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Expiry deadline, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for invitation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invitations)]
pub struct NewInvitationRow {
    /// Invitation identifier.
    pub id: uuid::Uuid,
    /// Inviter identifier.
    pub inviter_id: uuid::Uuid,
    /// Invitee identifier.
    pub invitee_id: uuid::Uuid,
    /// Target team identifier.
    pub team_id: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Inviter message.
    pub message: String,
    /// Invitee reply, if responded.
    pub response_message: Option<String>,
    /// Response timestamp, if responded.
    pub responded_at: Option<DateTime<Utc>>,
    /// Expiry deadline, if any.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
