//! Gallery service and composition root integration tests.

mod support;

use domain::{Gallery, ModelError};
use gallery_service_lib::{GalleryRepository, GalleryService, ImageStore, UserRepository};

use crate::support::{new_user, services};

#[tokio::test]
async fn test_gallery_lifecycle() {
    let (services, _images) = services().await;
    let owner = services.users().create(new_user("owner@example.com")).await.unwrap();
    let galleries = services.galleries();

    let created = galleries.create(Gallery::new(owner.id, "Holiday")).await.unwrap();
    assert!(created.id > 0);

    let mut gallery = galleries.owned_by(created.id, owner.id).await.unwrap();
    gallery.title = "Summer holiday".into();
    galleries.update(gallery).await.unwrap();
    assert_eq!(galleries.by_id(created.id).await.unwrap().title, "Summer holiday");

    let listed = galleries.by_user_id(owner.id).await.unwrap();
    assert_eq!(listed.len(), 1);

    galleries.delete(&listed[0]).await.unwrap();
    assert!(galleries.by_id(created.id).await.unwrap_err().is_not_found());
    assert!(galleries.by_user_id(owner.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_galleries_scoped_to_owner() {
    let (services, _images) = services().await;
    let galleries = services.galleries();

    galleries.create(Gallery::new(1, "One")).await.unwrap();
    galleries.create(Gallery::new(1, "Two")).await.unwrap();
    let other = galleries.create(Gallery::new(2, "Other")).await.unwrap();

    let titles: Vec<String> = galleries
        .by_user_id(1)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.title)
        .collect();
    assert_eq!(titles, vec!["One", "Two"]);

    assert!(galleries.owned_by(other.id, 1).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_gallery_validation() {
    let (services, _images) = services().await;
    let galleries = services.galleries();

    let err = galleries.create(Gallery::new(1, "")).await.unwrap_err();
    assert_eq!(err.model(), Some(ModelError::TitleRequired));

    let err = galleries.create(Gallery::new(0, "Titled")).await.unwrap_err();
    assert_eq!(err.model(), Some(ModelError::OwnerIdRequired));

    let err = galleries.delete(&Gallery::new(1, "Unsaved")).await.unwrap_err();
    assert_eq!(err.model(), Some(ModelError::InvalidId));
}

#[tokio::test]
async fn test_images_listed_per_gallery() {
    let (services, _images) = services().await;
    let images = services.images();

    let mut data: &[u8] = b"png";
    images.create(7, &mut data, "cat.png").await.unwrap();

    let listed = images.by_gallery_id(7).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].url_path(), "/images/galleries/7/cat.png");
}

#[tokio::test]
async fn test_lifecycle_helpers() {
    let (services, _images) = services().await;
    services.users().create(new_user("jon@example.com")).await.unwrap();

    services.ping().await.unwrap();
    services.destructive_reset().await.unwrap();
    assert!(services
        .users()
        .by_email("jon@example.com")
        .await
        .unwrap_err()
        .is_not_found());

    let status = services.database().migration_status().await.unwrap();
    assert!(status.iter().all(|(_, applied)| *applied));

    services.close().await.unwrap();
}
