//! In-memory integration tests for the invitation response flow.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use onepenny::identity::UserId;
use onepenny::invitation::{
    adapters::memory::InMemoryInvitationRepository,
    domain::{InvitationDomainError, InvitationResponse, InvitationStatus, TeamId},
    services::{
        InvitationLifecycleError, InvitationResponseService, RespondToInvitationRequest,
        SendInvitationRequest,
    },
};
use rstest::{fixture, rstest};

type TestService = InvitationResponseService<InMemoryInvitationRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    InvitationResponseService::new(
        Arc::new(InMemoryInvitationRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn send_respond_and_reload_round_trips_the_answer(service: TestService) {
    let inviter = UserId::new();
    let invitee = UserId::new();
    let team = TeamId::new();

    let invitation = service
        .send(
            SendInvitationRequest::new(inviter, invitee, team)
                .with_message("we need a healer")
                .with_expiry(Utc::now() + Duration::days(7)),
        )
        .await
        .expect("sending should succeed");
    assert_eq!(invitation.status(), InvitationStatus::Pending);
    assert_eq!(invitation.team_id(), team);

    let accepted = service
        .respond(
            RespondToInvitationRequest::new(invitation.id(), InvitationResponse::Accepted)
                .with_message("happy to help"),
        )
        .await
        .expect("response should succeed");
    assert_eq!(accepted.status(), InvitationStatus::Accepted);

    let stored = service
        .get(invitation.id())
        .await
        .expect("lookup should succeed")
        .expect("invitation should exist");
    assert_eq!(stored, accepted);
    assert_eq!(stored.response_message(), Some("happy to help"));
    assert!(stored.response_is_consistent());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn answered_invitation_cannot_be_answered_again(service: TestService) {
    let invitation = service
        .send(SendInvitationRequest::new(
            UserId::new(),
            UserId::new(),
            TeamId::new(),
        ))
        .await
        .expect("sending should succeed");

    service
        .respond(RespondToInvitationRequest::new(
            invitation.id(),
            InvitationResponse::Rejected,
        ))
        .await
        .expect("first response should succeed");

    let again = service
        .respond(RespondToInvitationRequest::new(
            invitation.id(),
            InvitationResponse::Accepted,
        ))
        .await;

    assert!(matches!(
        again,
        Err(InvitationLifecycleError::Domain(
            InvitationDomainError::CannotRespondToInvitation {
                status: InvitationStatus::Rejected,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_invitation_reports_answered_not_expired(service: TestService) {
    // Expired deadline plus a retraction: the answered check wins.
    let invitation = service
        .send(
            SendInvitationRequest::new(UserId::new(), UserId::new(), TeamId::new())
                .with_expiry(Utc::now() - Duration::hours(1)),
        )
        .await
        .expect("sending should succeed");

    service
        .cancel(invitation.id())
        .await
        .expect("cancellation should succeed");

    let result = service
        .respond(RespondToInvitationRequest::new(
            invitation.id(),
            InvitationResponse::Accepted,
        ))
        .await;

    assert!(matches!(
        result,
        Err(InvitationLifecycleError::Domain(
            InvitationDomainError::CannotRespondToInvitation {
                status: InvitationStatus::Rejected,
                ..
            }
        ))
    ));
}
