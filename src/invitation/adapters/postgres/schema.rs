//! Diesel schema for invitation persistence.

diesel::table! {
    /// Team invitations with response tracking and optional expiry.
    invitations (id) {
        /// Invitation identifier.
        id -> Uuid,
        /// Inviter identifier.
        inviter_id -> Uuid,
        /// Invitee identifier.
        invitee_id -> Uuid,
        /// Target team identifier.
        team_id -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Inviter message.
        message -> Text,
        /// Invitee reply, set on response.
        response_message -> Nullable<Text>,
        /// Response timestamp, set on response or retraction.
        responded_at -> Nullable<Timestamptz>,
        /// Expiry deadline, if any.
        expires_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
