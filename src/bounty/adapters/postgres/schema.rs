//! Diesel schema for bounty lifecycle persistence.

diesel::table! {
    /// Posted bounties with their engagement status.
    bounties (id) {
        /// Bounty identifier.
        id -> Uuid,
        /// Poster identifier.
        poster_id -> Uuid,
        /// Assigned receiver, set on application approval.
        receiver_id -> Nullable<Uuid>,
        /// Bounty title.
        #[max_length = 255]
        title -> Varchar,
        /// Bounty description.
        description -> Text,
        /// Reward amount.
        reward_amount -> Float8,
        /// Reward currency code.
        #[max_length = 10]
        currency -> Varchar,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications submitted against bounties.
    applications (id) {
        /// Application identifier.
        id -> Uuid,
        /// Owning bounty identifier.
        bounty_id -> Uuid,
        /// Applicant identifier.
        applicant_id -> Uuid,
        /// Proposal text.
        proposal -> Text,
        /// Decision status.
        #[max_length = 20]
        status -> Varchar,
        /// Decision rationale, set on accept/reject.
        reason -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(applications -> bounties (bounty_id));
diesel::allow_tables_to_appear_in_same_query!(applications, bounties);
