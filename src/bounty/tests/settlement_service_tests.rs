//! Settlement engine tests over the in-memory adapter.

use std::sync::Arc;

use crate::bounty::{
    adapters::memory::InMemoryBountyRepository,
    domain::{Bounty, BountyDomainError, BountyId, BountyStatus},
    ports::BountyRepositoryError,
    services::{
        ApplicationDecisionService, BountyBoardService, BountyLifecycleError,
        DecideApplicationRequest, PostBountyRequest, SettlementService, SubmitApplicationRequest,
    },
};
use crate::identity::UserId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Harness {
    board: BountyBoardService<InMemoryBountyRepository, DefaultClock>,
    decisions: ApplicationDecisionService<InMemoryBountyRepository, DefaultClock>,
    settlement: SettlementService<InMemoryBountyRepository, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let repository = Arc::new(InMemoryBountyRepository::new());
    let clock = Arc::new(DefaultClock);
    Harness {
        board: BountyBoardService::new(Arc::clone(&repository), Arc::clone(&clock)),
        decisions: ApplicationDecisionService::new(Arc::clone(&repository), Arc::clone(&clock)),
        settlement: SettlementService::new(repository, clock),
    }
}

/// Drives a bounty to `InProgress` with the given worker assigned.
async fn accepted_bounty(harness: &Harness, poster: UserId, worker: UserId) -> Bounty {
    let bounty = harness
        .board
        .post_bounty(PostBountyRequest::new(poster, "Fix the build", 120.0, "USD"))
        .await
        .expect("bounty posting should succeed");
    let application = harness
        .board
        .submit_application(SubmitApplicationRequest::new(bounty.id(), worker, "on it"))
        .await
        .expect("application submission should succeed");
    harness
        .decisions
        .approve(DecideApplicationRequest::new(application.id(), poster, "go"))
        .await
        .expect("approval should succeed");
    harness
        .board
        .get_bounty(bounty.id())
        .await
        .expect("lookup should succeed")
        .expect("bounty should exist")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_then_confirm_settles_the_bounty(harness: Harness) {
    let poster = UserId::new();
    let worker = UserId::new();
    let bounty = accepted_bounty(&harness, poster, worker).await;

    let pending = harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("settlement request should succeed");
    assert_eq!(pending.status(), BountyStatus::PendingSettlement);
    assert!(pending.receiver_is_consistent());

    let settled = harness
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await
        .expect("settlement confirmation should succeed");
    assert_eq!(settled.status(), BountyStatus::Settled);
    assert!(settled.receiver_is_consistent());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_settlement_succeeds_only_once(harness: Harness) {
    let poster = UserId::new();
    let worker = UserId::new();
    let bounty = accepted_bounty(&harness, poster, worker).await;

    harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("first request should succeed");

    // Second call fails the state check, not the ownership check, even for
    // the same receiver.
    let repeat = harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await;
    assert!(matches!(
        repeat,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::BountyNotInSettling {
                status: BountyStatus::PendingSettlement,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn request_settlement_by_poster_is_rejected(harness: Harness) {
    let poster = UserId::new();
    let bounty = accepted_bounty(&harness, poster, UserId::new()).await;

    let result = harness
        .settlement
        .request_settlement(bounty.id(), poster)
        .await;

    assert!(matches!(
        result,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::NotBountyReceiver { user_id, .. }
        )) if user_id == poster
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_settlement_by_non_poster_is_forbidden(harness: Harness) {
    let poster = UserId::new();
    let worker = UserId::new();
    let bounty = accepted_bounty(&harness, poster, worker).await;

    harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("request should succeed");

    // Even the receiver cannot confirm; only the poster releases the reward.
    let result = harness
        .settlement
        .confirm_settlement(bounty.id(), worker)
        .await;

    assert!(matches!(
        result,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::NotBountyOwner { user_id, .. }
        )) if user_id == worker
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirm_before_request_fails_state_check(harness: Harness) {
    let poster = UserId::new();
    let bounty = accepted_bounty(&harness, poster, UserId::new()).await;

    let result = harness
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await;

    assert!(matches!(
        result,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::BountyNotInPending {
                status: BountyStatus::InProgress,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settled_bounty_accepts_no_further_settlement_calls(harness: Harness) {
    let poster = UserId::new();
    let worker = UserId::new();
    let bounty = accepted_bounty(&harness, poster, worker).await;

    harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("request should succeed");
    harness
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await
        .expect("confirmation should succeed");

    let request_again = harness
        .settlement
        .request_settlement(bounty.id(), worker)
        .await;
    assert!(matches!(
        request_again,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::BountyNotInSettling {
                status: BountyStatus::Settled,
                ..
            }
        ))
    ));

    let confirm_again = harness
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await;
    assert!(matches!(
        confirm_again,
        Err(BountyLifecycleError::Domain(
            BountyDomainError::BountyNotInPending {
                status: BountyStatus::Settled,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settlement_on_missing_bounty_is_not_found(harness: Harness) {
    let absent = BountyId::new();

    let result = harness
        .settlement
        .request_settlement(absent, UserId::new())
        .await;

    assert!(matches!(
        result,
        Err(BountyLifecycleError::Repository(
            BountyRepositoryError::BountyNotFound(id)
        )) if id == absent
    ));
}
