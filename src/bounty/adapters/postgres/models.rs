//! Diesel row models for bounty persistence.

use super::schema::{applications, bounties};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for bounty records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bounties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BountyRow {
    /// Bounty identifier.
    pub id: uuid::Uuid,
    /// Poster identifier.
    pub poster_id: uuid::Uuid,
    /// Assigned receiver, if any.
    pub receiver_id: Option<uuid::Uuid>,
    /// Bounty title.
    pub title: String,
    /// Bounty description.
    pub description: String,
    /// Reward amount.
    pub reward_amount: f64,
    /// Reward currency code.
    pub currency: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for bounty records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bounties)]
pub struct NewBountyRow {
    /// Bounty identifier.
    pub id: uuid::Uuid,
    /// Poster identifier.
    pub poster_id: uuid::Uuid,
    /// Assigned receiver, if any.
    pub receiver_id: Option<uuid::Uuid>,
    /// Bounty title.
    pub title: String,
    /// Bounty description.
    pub description: String,
    /// Reward amount.
    pub reward_amount: f64,
    /// Reward currency code.
    pub currency: String,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for application records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Application identifier.
    pub id: uuid::Uuid,
    /// Owning bounty identifier.
    pub bounty_id: uuid::Uuid,
    /// Applicant identifier.
    pub applicant_id: uuid::Uuid,
    /// Proposal text.
    pub proposal: String,
    /// Decision status.
    pub status: String,
    /// Decision rationale, if decided.
    pub reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for application records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    /// Application identifier.
    pub id: uuid::Uuid,
    /// Owning bounty identifier.
    pub bounty_id: uuid::Uuid,
    /// Applicant identifier.
    pub applicant_id: uuid::Uuid,
    /// Proposal text.
    pub proposal: String,
    /// Decision status.
    pub status: String,
    /// Decision rationale, if decided.
    pub reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
