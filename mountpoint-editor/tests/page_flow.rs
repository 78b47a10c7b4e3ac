// SPDX-License-Identifier: GPL-3.0-only

mod common;

use std::sync::Arc;

use common::{Call, FakeBackend, RecordingNotifier, automatic_data, manual_data, presets, req};
use mountpoint_editor::{EditError, MountPointPage, Notification, STEP_ID, SessionState};
use mountpoint_types::PartitioningPath;

fn page(backend: &FakeBackend, notifier: &Arc<RecordingNotifier>) -> MountPointPage {
    MountPointPage::new(Arc::new(backend.clone()), notifier.clone(), presets())
}

fn scenario() -> Vec<mountpoint_types::PartitionRequest> {
    vec![req("sda1", "ext4", "", false), req("sda2", "ext4", "/home", false)]
}

#[tokio::test]
async fn edits_are_rejected_before_mount() {
    let backend = FakeBackend::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    assert!(page.is_loading());
    assert_eq!(
        page.select_mount_point("sda1", "/").await,
        Err(EditError::NotReady)
    );
    assert!(backend.take_calls().is_empty());
}

#[tokio::test]
async fn mounting_manual_data_uses_its_requests() {
    let backend = FakeBackend::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.mount(manual_data(scenario())).await.unwrap();

    assert_eq!(page.state(), SessionState::Ready);
    assert_eq!(page.requests(), scenario().as_slice());
    assert!(backend.take_calls().is_empty());
    assert_eq!(notifier.validity(), [true]);
}

#[tokio::test]
async fn fresh_manual_partitioning_gathers_and_submits_requests() {
    let backend = FakeBackend::default();
    backend.set_gathered(scenario());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.mount(automatic_data()).await.unwrap();

    let path = PartitioningPath::new(common::CREATED_PATH);
    let calls = backend.take_calls();
    assert_eq!(
        &calls[4..],
        &[
            Call::ManualRequests(path.clone()),
            Call::GatherRequests(path.clone()),
            Call::SetRequests(path, scenario()),
        ]
    );
    assert_eq!(page.requests(), scenario().as_slice());
    assert!(page.is_editable());
}

#[tokio::test]
async fn assigning_root_submits_full_list_with_reformat() {
    let backend = FakeBackend::with_requests(scenario());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(scenario())).await.unwrap();

    page.select_mount_point("sda1", "/").await.unwrap();

    let expected = vec![req("sda1", "ext4", "/", true), req("sda2", "ext4", "/home", false)];
    assert_eq!(
        backend.take_calls(),
        vec![Call::SetRequests(
            PartitioningPath::new(common::CREATED_PATH),
            expected.clone()
        )]
    );
    assert_eq!(backend.stored_requests(), expected);
    assert!(page.is_valid());
}

#[tokio::test]
async fn duplicate_root_invalidates_the_set_without_notification() {
    let backend = FakeBackend::with_requests(scenario());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(scenario())).await.unwrap();

    page.select_mount_point("sda1", "/").await.unwrap();
    page.select_mount_point("sda2", "/").await.unwrap();

    assert!(!page.is_valid());
    assert_eq!(notifier.validity(), [true, false]);
    assert!(notifier.errors().is_empty());

    let rows = page.rows();
    assert!(rows.iter().all(|row| row.controls.duplicate));

    page.select_mount_point("sda2", "/home").await.unwrap();
    assert!(page.is_valid());
    assert_eq!(notifier.validity(), [true, false, true]);
}

#[tokio::test]
async fn rejected_submission_is_reported_and_not_rolled_back() {
    let backend = FakeBackend::with_requests(scenario());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(scenario())).await.unwrap();

    backend.fail_set_requests(Some("storage module crashed"));
    page.toggle_reformat("sda2", true).await.unwrap();

    assert!(page.requests()[1].reformat);
    assert!(page.submission_error().is_some());
    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].step, STEP_ID);
    assert!(errors[0].message.contains("storage module crashed"));

    // The backend still holds the old list; reloading reconciles.
    backend.fail_set_requests(None);
    page.reload().await.unwrap();
    assert!(!page.requests()[1].reformat);

    page.toggle_reformat("sda2", true).await.unwrap();
    assert!(page.submission_error().is_none());
}

#[tokio::test]
async fn locked_rows_refuse_edits() {
    let requests = vec![
        req("sda1", "biosboot", "", false),
        req("sda2", "ext4", "/", true),
        req("sda3", "btrfs", "/home", false),
    ];
    let backend = FakeBackend::with_requests(requests.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(requests)).await.unwrap();

    assert_eq!(
        page.select_mount_point("sda1", "/boot").await,
        Err(EditError::NotMountable("sda1".to_string()))
    );
    assert_eq!(
        page.toggle_reformat("sda1", true).await,
        Err(EditError::ReformatLocked("sda1".to_string()))
    );
    assert_eq!(
        page.toggle_reformat("sda2", false).await,
        Err(EditError::ReformatLocked("sda2".to_string()))
    );
    assert_eq!(
        page.toggle_reformat("sda3", true).await,
        Err(EditError::ReformatLocked("sda3".to_string()))
    );
    assert!(backend.take_calls().is_empty());
}

#[tokio::test]
async fn btrfs_root_is_not_auto_reformatted() {
    let requests = vec![req("sda3", "btrfs", "", false)];
    let backend = FakeBackend::with_requests(requests.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(requests)).await.unwrap();

    page.select_mount_point("sda3", "/").await.unwrap();

    assert_eq!(page.requests()[0], req("sda3", "btrfs", "/", false));
}

#[tokio::test]
async fn custom_mount_points_are_normalized_or_rejected() {
    let backend = FakeBackend::with_requests(scenario());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);
    page.mount(manual_data(scenario())).await.unwrap();

    page.commit_custom_mount_point("sda1", " /srv/data/ ").await.unwrap();
    assert_eq!(page.requests()[0].mount_point, "/srv/data");

    let options = &page.rows()[0].options;
    assert_eq!(options.last().map(|o| o.value.as_str()), Some("/srv/data"));

    assert!(matches!(
        page.commit_custom_mount_point("sda1", "srv").await,
        Err(EditError::InvalidMountPoint { .. })
    ));
    assert_eq!(page.requests()[0].mount_point, "/srv/data");
}

#[tokio::test]
async fn setup_failure_is_reported_once_and_keeps_page_disabled() {
    let backend = FakeBackend::default();
    backend.fail_create("no disks selected");
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    assert!(page.mount(automatic_data()).await.is_err());
    assert!(page.setup_error().is_some());
    assert!(!page.is_editable());
    assert!(!page.is_loading());
    assert_eq!(notifier.errors().len(), 1);

    // A second mount of the same page is refused without another report.
    assert!(page.mount(automatic_data()).await.is_err());
    assert_eq!(notifier.errors().len(), 1);
    assert_eq!(
        page.toggle_reformat("sda1", true).await,
        Err(EditError::NotReady)
    );
}

#[tokio::test]
async fn step_notification_is_only_shown_for_this_page() {
    let backend = FakeBackend::default();
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.set_step_notification(Some(Notification::new("installation-language", "nope")));
    assert_eq!(page.step_notification(), None);

    page.set_step_notification(Some(Notification::new(STEP_ID, "partitioning failed")));
    assert_eq!(
        page.step_notification().map(|n| n.message.as_str()),
        Some("partitioning failed")
    );
}

#[tokio::test]
async fn rejected_first_submission_keeps_gathered_requests() {
    let backend = FakeBackend::default();
    backend.set_gathered(scenario());
    backend.fail_set_requests(Some("rejected"));
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.mount(automatic_data()).await.unwrap();

    assert!(page.is_editable());
    assert_eq!(page.requests(), scenario().as_slice());
    assert_eq!(page.rows().len(), 2);
    assert!(page.submission_error().is_some());
    assert_eq!(notifier.errors().len(), 1);

    // Editing resubmits the kept list.
    backend.fail_set_requests(None);
    page.select_mount_point("sda1", "/").await.unwrap();
    assert_eq!(backend.stored_requests().len(), 2);
    assert!(page.submission_error().is_none());
}

#[tokio::test]
async fn initial_validity_is_announced_once() {
    let requests = vec![req("sda1", "ext4", "/", true), req("sda2", "ext4", "/", true)];
    let backend = FakeBackend::with_requests(requests.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.mount(manual_data(requests)).await.unwrap();
    assert_eq!(notifier.validity(), [false]);

    page.reload().await.unwrap();
    assert_eq!(notifier.validity(), [false]);
}

#[tokio::test]
async fn initial_validity_from_backend_is_announced_once() {
    let requests = vec![req("sda1", "ext4", "/", true), req("sda2", "ext4", "/", true)];
    let backend = FakeBackend::default();
    backend.set_gathered(requests);
    let notifier = Arc::new(RecordingNotifier::default());
    let mut page = page(&backend, &notifier);

    page.mount(automatic_data()).await.unwrap();

    assert!(!page.is_valid());
    assert_eq!(notifier.validity(), [false]);
}
