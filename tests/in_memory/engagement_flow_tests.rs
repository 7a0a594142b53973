//! In-memory integration tests for the full bounty engagement lifecycle.

use std::sync::Arc;

use mockable::DefaultClock;
use onepenny::bounty::{
    adapters::memory::InMemoryBountyRepository,
    domain::{ApplicationStatus, Bounty, BountyDomainError, BountyStatus},
    services::{
        ApplicationDecisionService, BountyBoardService, BountyLifecycleError,
        DecideApplicationRequest, PostBountyRequest, SettlementService, SubmitApplicationRequest,
    },
};
use onepenny::identity::UserId;
use rstest::{fixture, rstest};

struct Services {
    board: BountyBoardService<InMemoryBountyRepository, DefaultClock>,
    decisions: ApplicationDecisionService<InMemoryBountyRepository, DefaultClock>,
    settlement: SettlementService<InMemoryBountyRepository, DefaultClock>,
}

#[fixture]
fn services() -> Services {
    let repository = Arc::new(InMemoryBountyRepository::new());
    let clock = Arc::new(DefaultClock);
    Services {
        board: BountyBoardService::new(Arc::clone(&repository), Arc::clone(&clock)),
        decisions: ApplicationDecisionService::new(Arc::clone(&repository), Arc::clone(&clock)),
        settlement: SettlementService::new(repository, clock),
    }
}

/// Asserts the bounty reached the expected state with a consistent receiver.
///
/// # Errors
///
/// Returns an error when the status differs or the receiver does not match
/// what the status requires.
fn ensure_bounty_state(bounty: &Bounty, expected: BountyStatus) -> Result<(), eyre::Report> {
    eyre::ensure!(
        bounty.status() == expected,
        "expected bounty in {expected}, found {}",
        bounty.status()
    );
    eyre::ensure!(
        bounty.receiver_is_consistent(),
        "receiver assignment inconsistent with status {}",
        bounty.status()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn post_apply_approve_request_confirm_settles_the_bounty(services: Services) {
    let poster = UserId::new();
    let worker = UserId::new();

    let bounty = services
        .board
        .post_bounty(
            PostBountyRequest::new(poster, "Port the renderer", 500.0, "EUR")
                .with_description("Vulkan backend wanted"),
        )
        .await
        .expect("posting should succeed");
    ensure_bounty_state(&bounty, BountyStatus::Created).expect("fresh bounty state");

    let application = services
        .board
        .submit_application(SubmitApplicationRequest::new(
            bounty.id(),
            worker,
            "shipped two renderers before",
        ))
        .await
        .expect("submission should succeed");
    assert_eq!(application.status(), ApplicationStatus::Pending);

    services
        .decisions
        .approve(DecideApplicationRequest::new(
            application.id(),
            poster,
            "strong track record",
        ))
        .await
        .expect("approval should succeed");

    let in_progress = services
        .board
        .get_bounty(bounty.id())
        .await
        .expect("lookup should succeed")
        .expect("bounty should exist");
    ensure_bounty_state(&in_progress, BountyStatus::InProgress).expect("assigned bounty state");
    assert_eq!(in_progress.receiver_id(), Some(worker));

    let pending = services
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("settlement request should succeed");
    ensure_bounty_state(&pending, BountyStatus::PendingSettlement).expect("requested state");

    let settled = services
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await
        .expect("settlement confirmation should succeed");
    ensure_bounty_state(&settled, BountyStatus::Settled).expect("settled state");
    assert!(settled.status().is_terminal());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn settled_bounty_rejects_every_further_transition(services: Services) {
    let poster = UserId::new();
    let worker = UserId::new();

    let bounty = services
        .board
        .post_bounty(PostBountyRequest::new(poster, "Write the docs", 80.0, "USD"))
        .await
        .expect("posting should succeed");
    let application = services
        .board
        .submit_application(SubmitApplicationRequest::new(bounty.id(), worker, "sure"))
        .await
        .expect("submission should succeed");
    services
        .decisions
        .approve(DecideApplicationRequest::new(application.id(), poster, "ok"))
        .await
        .expect("approval should succeed");
    services
        .settlement
        .request_settlement(bounty.id(), worker)
        .await
        .expect("request should succeed");
    services
        .settlement
        .confirm_settlement(bounty.id(), poster)
        .await
        .expect("confirmation should succeed");

    let late_application = services
        .board
        .submit_application(SubmitApplicationRequest::new(
            bounty.id(),
            UserId::new(),
            "too late?",
        ))
        .await
        .expect("submission is recorded even on a settled bounty");

    // A late application exists but can never be approved.
    let approve_late = services
        .decisions
        .approve(DecideApplicationRequest::new(
            late_application.id(),
            poster,
            "no",
        ))
        .await;
    assert!(matches!(
        approve_late,
        Err(BountyLifecycleError::Domain(BountyDomainError::BountyNotOpen {
            status: BountyStatus::Settled,
            ..
        }))
    ));

    let request_again = services
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

    let confirm_again = services
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
async fn approving_one_application_blocks_its_rivals(services: Services) {
    let poster = UserId::new();

    let bounty = services
        .board
        .post_bounty(PostBountyRequest::new(poster, "Triage the backlog", 40.0, "GBP"))
        .await
        .expect("posting should succeed");
    let first = services
        .board
        .submit_application(SubmitApplicationRequest::new(
            bounty.id(),
            UserId::new(),
            "first in line",
        ))
        .await
        .expect("submission should succeed");
    let second = services
        .board
        .submit_application(SubmitApplicationRequest::new(
            bounty.id(),
            UserId::new(),
            "pick me instead",
        ))
        .await
        .expect("submission should succeed");

    services
        .decisions
        .approve(DecideApplicationRequest::new(first.id(), poster, "fastest"))
        .await
        .expect("approval should succeed");

    let approve_rival = services
        .decisions
        .approve(DecideApplicationRequest::new(second.id(), poster, "also good"))
        .await;
    assert!(matches!(
        approve_rival,
        Err(BountyLifecycleError::Domain(BountyDomainError::BountyNotOpen {
            status: BountyStatus::InProgress,
            ..
        }))
    ));

    // The rival stays pending; the poster may still reject it explicitly.
    let rival = services
        .board
        .get_application(second.id())
        .await
        .expect("lookup should succeed")
        .expect("application should exist");
    assert_eq!(rival.status(), ApplicationStatus::Pending);

    let rejected = services
        .decisions
        .reject(DecideApplicationRequest::new(
            second.id(),
            poster,
            "position filled",
        ))
        .await
        .expect("rejection should succeed");
    assert_eq!(rejected.status(), ApplicationStatus::Rejected);
    assert_eq!(rejected.reason(), Some("position filled"));
}
