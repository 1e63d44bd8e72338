use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::anyhow;
use contact_form_core_contracts::{ContactFormService, ContactFormSubmitError};
use contact_form_demo::{INVALID, JO, JO_SUBMISSION};
use contact_form_extern_contracts::submission::{MockSubmissionApiService, SubmissionApiError};
use contact_form_models::form::{
    ContactFormField, ContactFormFields, ContactFormState, ErrorMap, SubmissionOutcome,
};
use contact_form_utils::assert_matches;
use pretty_assertions::assert_eq;
use tokio::sync::oneshot;

use crate::ContactFormServiceImpl;

type Sut = ContactFormServiceImpl<MockSubmissionApiService>;

fn make_sut(submission_api: MockSubmissionApiService) -> Sut {
    ContactFormServiceImpl {
        submission_api,
        state: Default::default(),
    }
}

fn fill(sut: &Sut, fields: &ContactFormFields) {
    for field in ContactFormField::ALL {
        sut.update_field(field, fields.get(field).to_owned());
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let submission_api = MockSubmissionApiService::new().with_submit(JO_SUBMISSION.clone(), Ok(()));
    let sut = make_sut(submission_api);
    fill(&sut, &JO);

    // Act
    let result = sut.submit().await;

    // Assert
    result.unwrap();
    assert_eq!(
        sut.state(),
        ContactFormState {
            fields: ContactFormFields::default(),
            errors: ErrorMap::default(),
            outcome: SubmissionOutcome::Success,
            submitting: false,
        }
    );
}

#[tokio::test]
async fn rejected_by_relay() {
    // Arrange
    let submission_api =
        MockSubmissionApiService::new().with_submit(JO_SUBMISSION.clone(), Err("boom".into()));
    let sut = make_sut(submission_api);
    fill(&sut, &JO);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(ContactFormSubmitError::Send));
    assert_eq!(
        sut.state(),
        ContactFormState {
            fields: JO.clone(),
            errors: ErrorMap::default(),
            outcome: SubmissionOutcome::Error,
            submitting: false,
        }
    );
}

#[tokio::test]
async fn transport_failure() {
    // Arrange
    let submission_api = MockSubmissionApiService::new()
        .with_submit_failure(JO_SUBMISSION.clone(), anyhow!("connection refused"));
    let sut = make_sut(submission_api);
    fill(&sut, &JO);

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(ContactFormSubmitError::Send));
    assert_eq!(sut.state().outcome, SubmissionOutcome::Error);
    assert_eq!(sut.state().fields, *JO);
}

#[tokio::test]
async fn invalid_fields_are_not_sent() {
    // Arrange
    let sut = make_sut(MockSubmissionApiService::new());
    fill(&sut, &INVALID);

    // Act
    let result = sut.submit().await;

    // Assert
    let expected = ErrorMap::from_iter([
        (ContactFormField::Name, "name is a required field".into()),
        (ContactFormField::Email, "email must be a valid email".into()),
        (
            ContactFormField::Message,
            "message must be at most 500 characters".into(),
        ),
    ]);
    assert_matches!(result, Err(ContactFormSubmitError::Validation(errors)) if *errors == expected);
    assert_eq!(
        sut.state(),
        ContactFormState {
            fields: INVALID.clone(),
            errors: expected,
            outcome: SubmissionOutcome::Idle,
            submitting: false,
        }
    );
}

#[tokio::test]
async fn empty_form_is_not_sent() {
    // Arrange
    let sut = make_sut(MockSubmissionApiService::new());

    // Act
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(ContactFormSubmitError::Validation(errors)) if errors.len() == 4);
    assert_eq!(sut.state().errors.len(), 4);
}

#[tokio::test]
async fn validation_failure_keeps_previous_outcome() {
    // Arrange
    let submission_api =
        MockSubmissionApiService::new().with_submit(JO_SUBMISSION.clone(), Err("boom".into()));
    let sut = make_sut(submission_api);
    fill(&sut, &JO);
    sut.submit().await.unwrap_err();

    // Act
    sut.update_field(ContactFormField::Email, "not-an-email".into());
    let result = sut.submit().await;

    // Assert
    assert_matches!(result, Err(ContactFormSubmitError::Validation(_)));
    assert_eq!(sut.state().outcome, SubmissionOutcome::Error);
}

#[tokio::test]
async fn retry_after_failure() {
    // Arrange
    let calls = Arc::new(AtomicUsize::new(0));
    let mut submission_api = MockSubmissionApiService::new();
    submission_api
        .expect_submit()
        .times(2)
        .with(mockall::predicate::eq(JO_SUBMISSION.clone()))
        .returning({
            let calls = Arc::clone(&calls);
            move |_| {
                let result = match calls.fetch_add(1, Ordering::SeqCst) {
                    0 => Err(SubmissionApiError::Rejected("boom".into())),
                    _ => Ok(()),
                };
                Box::pin(std::future::ready(result))
            }
        });
    let sut = make_sut(submission_api);
    fill(&sut, &JO);

    // Act
    let first = sut.submit().await;
    let second = sut.submit().await;

    // Assert
    assert_matches!(first, Err(ContactFormSubmitError::Send));
    second.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(sut.state().outcome, SubmissionOutcome::Success);
    assert!(sut.state().fields.is_empty());
}

#[tokio::test]
async fn update_field_does_not_validate() {
    // Arrange
    let sut = make_sut(MockSubmissionApiService::new());
    sut.submit().await.unwrap_err();
    let errors = sut.state().errors;

    // Act
    fill(&sut, &JO);

    // Assert
    assert_eq!(sut.state().fields, *JO);
    assert_eq!(sut.state().errors, errors);
}

#[tokio::test]
async fn update_field_same_value_is_noop() {
    // Arrange
    let sut = make_sut(MockSubmissionApiService::new());
    let mut changes = sut.subscribe();
    sut.update_field(ContactFormField::Name, "Jo".into());
    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();
    let before = sut.state();

    // Act
    sut.update_field(ContactFormField::Name, "Jo".into());
    sut.update_field(ContactFormField::Name, "Jo".into());

    // Assert
    assert!(!changes.has_changed().unwrap());
    assert_eq!(sut.state(), before);
}

#[tokio::test]
async fn subscribers_see_submission_progress() {
    // Arrange
    let (release, released) = oneshot::channel::<()>();
    let mut submission_api = MockSubmissionApiService::new();
    submission_api
        .expect_submit()
        .once()
        .with(mockall::predicate::eq(JO_SUBMISSION.clone()))
        .return_once(move |_| {
            Box::pin(async move {
                let _ = released.await;
                Ok::<_, SubmissionApiError>(())
            })
        });
    let sut = make_sut(submission_api);
    fill(&sut, &JO);
    let mut changes = sut.subscribe();

    // Act
    let (result, observed) = tokio::join!(sut.submit(), async {
        let submitting = changes.wait_for(|state| state.submitting).await.unwrap().clone();
        let _ = release.send(());
        let done = changes
            .wait_for(|state| !state.submitting)
            .await
            .unwrap()
            .clone();
        (submitting, done)
    });

    // Assert
    result.unwrap();
    let (submitting, done) = observed;
    assert_eq!(submitting.fields, *JO);
    assert_eq!(submitting.outcome, SubmissionOutcome::Idle);
    assert_eq!(done.outcome, SubmissionOutcome::Success);
    assert!(done.fields.is_empty());
}

#[tokio::test]
async fn concurrent_submit_is_rejected() {
    // Arrange
    let (release, released) = oneshot::channel::<()>();
    let mut submission_api = MockSubmissionApiService::new();
    submission_api
        .expect_submit()
        .once()
        .with(mockall::predicate::eq(JO_SUBMISSION.clone()))
        .return_once(move |_| {
            Box::pin(async move {
                let _ = released.await;
                Ok::<_, SubmissionApiError>(())
            })
        });
    let sut = make_sut(submission_api);
    fill(&sut, &JO);
    let mut changes = sut.subscribe();

    // Act
    let (first, second) = tokio::join!(sut.submit(), async {
        changes.wait_for(|state| state.submitting).await.unwrap();
        let second = sut.submit().await;
        let _ = release.send(());
        second
    });

    // Assert
    first.unwrap();
    assert_matches!(second, Err(ContactFormSubmitError::InFlight));
    assert_eq!(sut.state().outcome, SubmissionOutcome::Success);
}

#[tokio::test]
async fn cancelled_submission_releases_form() {
    // Arrange
    let mut submission_api = MockSubmissionApiService::new();
    submission_api
        .expect_submit()
        .once()
        .with(mockall::predicate::eq(JO_SUBMISSION.clone()))
        .return_once(|_| Box::pin(std::future::pending::<Result<(), SubmissionApiError>>()));
    let sut = make_sut(submission_api);
    fill(&sut, &JO);
    let mut changes = sut.subscribe();

    // Act
    tokio::select! {
        biased;
        _ = sut.submit() => unreachable!(),
        _ = async { changes.wait_for(|state| state.submitting).await.map(|_| ()) } => {}
    }

    // Assert
    assert_eq!(
        sut.state(),
        ContactFormState {
            fields: JO.clone(),
            errors: ErrorMap::default(),
            outcome: SubmissionOutcome::Idle,
            submitting: false,
        }
    );
}
