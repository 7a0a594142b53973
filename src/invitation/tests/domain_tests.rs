//! Domain-focused tests for invitation response behaviour.

use crate::identity::UserId;
use crate::invitation::domain::{
    Invitation, InvitationDomainError, InvitationResponse, InvitationStatus,
    PersistedInvitationData, TeamId,
};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn pending_invitation(clock: &DefaultClock) -> Invitation {
    Invitation::send(
        UserId::new(),
        UserId::new(),
        TeamId::new(),
        "join us",
        None,
        clock,
    )
}

#[rstest]
fn send_starts_pending_with_no_response(clock: DefaultClock) {
    let invitation = pending_invitation(&clock);

    assert_eq!(invitation.status(), InvitationStatus::Pending);
    assert!(invitation.response_message().is_none());
    assert!(invitation.responded_at().is_none());
    assert!(invitation.response_is_consistent());
}

#[rstest]
#[case(InvitationStatus::Pending, "pending")]
#[case(InvitationStatus::Accepted, "accepted")]
#[case(InvitationStatus::Rejected, "rejected")]
fn invitation_status_round_trips_through_storage_form(
    #[case] status: InvitationStatus,
    #[case] raw: &str,
) {
    assert_eq!(status.as_str(), raw);
    assert_eq!(InvitationStatus::try_from(raw).expect("parse"), status);
}

#[rstest]
fn unknown_invitation_status_fails_to_parse() {
    assert!(InvitationStatus::try_from("declined").is_err());
}

#[rstest]
#[case(InvitationResponse::Accepted, InvitationStatus::Accepted)]
#[case(InvitationResponse::Rejected, InvitationStatus::Rejected)]
fn respond_records_answer_and_timestamp(
    clock: DefaultClock,
    #[case] response: InvitationResponse,
    #[case] expected: InvitationStatus,
) {
    let mut invitation = pending_invitation(&clock);

    invitation
        .respond(response, Some("noted".to_owned()), &clock)
        .expect("response");

    assert_eq!(invitation.status(), expected);
    assert_eq!(invitation.response_message(), Some("noted"));
    assert!(invitation.responded_at().is_some());
    assert!(invitation.response_is_consistent());
}

#[rstest]
fn answered_invitation_rejects_further_responses(clock: DefaultClock) {
    let mut invitation = pending_invitation(&clock);
    invitation
        .respond(InvitationResponse::Accepted, None, &clock)
        .expect("first response");

    let again = invitation.respond(InvitationResponse::Rejected, None, &clock);

    assert!(matches!(
        again,
        Err(InvitationDomainError::CannotRespondToInvitation {
            status: InvitationStatus::Accepted,
            ..
        })
    ));
}

#[rstest]
fn expired_pending_invitation_reports_expiry(clock: DefaultClock) {
    let mut invitation = Invitation::send(
        UserId::new(),
        UserId::new(),
        TeamId::new(),
        "too late",
        Some(Utc::now() - Duration::hours(1)),
        &clock,
    );

    let result = invitation.respond(InvitationResponse::Accepted, None, &clock);

    assert!(matches!(
        result,
        Err(InvitationDomainError::InvitationExpired { .. })
    ));
    assert_eq!(invitation.status(), InvitationStatus::Pending);
}

#[rstest]
fn answered_check_runs_before_expiry_check(clock: DefaultClock) {
    let mut invitation = Invitation::send(
        UserId::new(),
        UserId::new(),
        TeamId::new(),
        "hurry",
        Some(Utc::now() + Duration::hours(1)),
        &clock,
    );
    invitation
        .respond(InvitationResponse::Rejected, None, &clock)
        .expect("first response");

    // An invitation both answered and expired reports the response error.
    let mut stale = Invitation::from_persisted(PersistedInvitationData {
        id: invitation.id(),
        inviter_id: invitation.inviter_id(),
        invitee_id: invitation.invitee_id(),
        team_id: invitation.team_id(),
        status: InvitationStatus::Rejected,
        message: invitation.message().to_owned(),
        response_message: None,
        responded_at: invitation.responded_at(),
        expires_at: Some(Utc::now() - Duration::hours(1)),
        created_at: invitation.created_at(),
        updated_at: invitation.updated_at(),
    });

    let result = stale.respond(InvitationResponse::Accepted, None, &clock);

    assert!(matches!(
        result,
        Err(InvitationDomainError::CannotRespondToInvitation {
            status: InvitationStatus::Rejected,
            ..
        })
    ));
}

#[rstest]
fn cancel_forces_rejection_and_stays_consistent(clock: DefaultClock) {
    let mut invitation = pending_invitation(&clock);

    invitation.cancel(&clock);

    assert_eq!(invitation.status(), InvitationStatus::Rejected);
    assert!(invitation.responded_at().is_some());
    assert!(invitation.response_is_consistent());
}

#[rstest]
fn cancel_after_response_keeps_original_response_timestamp(clock: DefaultClock) {
    let mut invitation = pending_invitation(&clock);
    invitation
        .respond(InvitationResponse::Accepted, None, &clock)
        .expect("response");
    let responded_at = invitation.responded_at();

    invitation.cancel(&clock);

    assert_eq!(invitation.status(), InvitationStatus::Rejected);
    assert_eq!(invitation.responded_at(), responded_at);
    assert!(invitation.response_is_consistent());
}

#[rstest]
fn cancel_ignores_expiry(clock: DefaultClock) {
    let mut invitation = Invitation::send(
        UserId::new(),
        UserId::new(),
        TeamId::new(),
        "stale",
        Some(Utc::now() - Duration::days(2)),
        &clock,
    );

    invitation.cancel(&clock);

    assert_eq!(invitation.status(), InvitationStatus::Rejected);
    assert!(invitation.response_is_consistent());
}
