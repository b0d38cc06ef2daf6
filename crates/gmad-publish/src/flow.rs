//! Publish and update orchestration
//!
//! Mirrors the upload discipline the remote platform expects: stale temp
//! files are deleted first, the preview icon and the package are stored under
//! fixed cloud names, and only then is the metadata request submitted. The
//! metadata itself comes out of the finished package, which is
//! self-describing (see [`AddonInfo`]).

use crate::addon_info::AddonInfo;
use crate::error::Result;
use crate::request::{PublishRequest, PublishedFileId, UpdateRequest, Visibility};
use crate::traits::{PublishService, RemoteStorage};
use sha2::{Digest, Sha256};

/// Fixed cloud file name for uploaded packages.
pub const PACKAGE_CLOUD_NAME: &str = "gmpublish.gma";

/// Fixed cloud file name for uploaded preview icons.
pub const PREVIEW_CLOUD_NAME: &str = "gmpublish_icon.jpg";

/// Publish a new addon from a finished package.
///
/// Uploads the preview icon and the package to remote storage, then submits
/// a publish request built from the package's own metadata. Returns the
/// identifier the service assigned.
///
/// # Errors
/// Fails when the package does not parse, an upload is rejected, or the
/// service refuses the request; nothing is retried here.
pub async fn publish_addon<S, P>(
    storage: &S,
    service: &P,
    package: &[u8],
    icon: &[u8],
    visibility: Visibility,
) -> Result<PublishedFileId>
where
    S: RemoteStorage + ?Sized,
    P: PublishService + ?Sized,
{
    let info = AddonInfo::from_gma_bytes(package)?;
    tracing::info!(title = %info.title, "publishing new addon");

    clear_stale_uploads(storage).await?;
    upload(storage, PREVIEW_CLOUD_NAME, icon).await?;
    upload(storage, PACKAGE_CLOUD_NAME, package).await?;

    let mut request = PublishRequest::from_addon_info(
        &info,
        PACKAGE_CLOUD_NAME,
        Some(PREVIEW_CLOUD_NAME.to_string()),
    );
    request.visibility = visibility;

    let id = service.publish(&request).await?;
    tracing::info!(%id, "addon published");
    Ok(id)
}

/// Update an existing addon from a finished package.
///
/// The preview icon is optional on update; when absent, the existing icon is
/// left untouched.
///
/// # Errors
/// Same failure modes as [`publish_addon`].
pub async fn update_addon<S, P>(
    storage: &S,
    service: &P,
    id: PublishedFileId,
    package: &[u8],
    icon: Option<&[u8]>,
    visibility: Visibility,
) -> Result<PublishedFileId>
where
    S: RemoteStorage + ?Sized,
    P: PublishService + ?Sized,
{
    let info = AddonInfo::from_gma_bytes(package)?;
    tracing::info!(%id, title = %info.title, "updating addon");

    clear_stale_uploads(storage).await?;
    let preview_name = if let Some(icon) = icon {
        upload(storage, PREVIEW_CLOUD_NAME, icon).await?;
        Some(PREVIEW_CLOUD_NAME.to_string())
    } else {
        None
    };
    upload(storage, PACKAGE_CLOUD_NAME, package).await?;

    let mut request = UpdateRequest::from_addon_info(id, &info, PACKAGE_CLOUD_NAME, preview_name);
    request.visibility = visibility;

    let confirmed = service.update(&request).await?;
    tracing::info!(id = %confirmed, "addon updated");
    Ok(confirmed)
}

/// Delete leftovers of earlier interrupted runs.
async fn clear_stale_uploads<S: RemoteStorage + ?Sized>(storage: &S) -> Result<()> {
    storage.delete(PREVIEW_CLOUD_NAME).await?;
    storage.delete(PACKAGE_CLOUD_NAME).await?;
    Ok(())
}

async fn upload<S: RemoteStorage + ?Sized>(storage: &S, name: &str, content: &[u8]) -> Result<()> {
    let hash = Sha256::digest(content);
    tracing::debug!(name, bytes = content.len(), "uploading");
    storage.upload(name, hash.as_slice(), content).await
}
