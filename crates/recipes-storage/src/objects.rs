use aws_sdk_s3::Client;
use aws_smithy_types::byte_stream::ByteStream;
use jiff::Timestamp;

use crate::error::StorageError;

/// Result of a GET operation, including the body and last-modified time.
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub last_modified: Option<Timestamp>,
}

/// Metadata for a single S3 object.
pub struct ObjectMeta {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<Timestamp>,
}

fn to_timestamp(t: &aws_smithy_types::DateTime) -> Option<Timestamp> {
    Timestamp::new(t.secs(), t.subsec_nanos() as i32).ok()
}

/// Get an object from S3.
pub async fn get_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<GetObjectOutput, StorageError> {
    let resp = client
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_no_such_key() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::GetObject(err.to_string())
            }
        })?;

    let last_modified = resp.last_modified().and_then(to_timestamp);
    let body = resp
        .body
        .collect()
        .await
        .map_err(|e| StorageError::GetObject(e.to_string()))?
        .into_bytes()
        .to_vec();

    Ok(GetObjectOutput {
        body,
        last_modified,
    })
}

/// Fetch an object's metadata without its body.
pub async fn head_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<ObjectMeta, StorageError> {
    let resp = client
        .head_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| {
            let err = e.into_service_error();
            if err.is_not_found() {
                StorageError::NotFound {
                    key: key.to_string(),
                }
            } else {
                StorageError::HeadObject(err.to_string())
            }
        })?;

    Ok(ObjectMeta {
        key: key.to_string(),
        size: resp.content_length().unwrap_or(0),
        last_modified: resp.last_modified().and_then(to_timestamp),
    })
}

/// Put an object to S3.
pub async fn put_object(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> Result<(), StorageError> {
    let mut req = client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body));

    if let Some(ct) = content_type {
        req = req.content_type(ct);
    }

    req.send()
        .await
        .map_err(|e| StorageError::PutObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// Delete an object from S3. S3 reports success for absent keys.
pub async fn delete_object(
    client: &Client,
    bucket: &str,
    key: &str,
) -> Result<(), StorageError> {
    client
        .delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| StorageError::DeleteObject(e.into_service_error().to_string()))?;

    Ok(())
}

/// List objects under a prefix with size and last-modified metadata.
pub async fn list_objects_with_metadata(
    client: &Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<ObjectMeta>, StorageError> {
    let mut objects = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let mut req = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix);

        if let Some(token) = &continuation_token {
            req = req.continuation_token(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StorageError::ListObjects(e.into_service_error().to_string()))?;

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                objects.push(ObjectMeta {
                    key: key.to_string(),
                    size: obj.size().unwrap_or(0),
                    last_modified: obj.last_modified().and_then(to_timestamp),
                });
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(|s| s.to_string());
        } else {
            break;
        }
    }

    Ok(objects)
}

/// Check that the bucket exists and the credentials can reach it.
pub async fn head_bucket(client: &Client, bucket: &str) -> Result<(), StorageError> {
    client
        .head_bucket()
        .bucket(bucket)
        .send()
        .await
        .map_err(|e| StorageError::Bucket(e.into_service_error().to_string()))?;
    Ok(())
}

pub async fn create_bucket(client: &Client, bucket: &str) -> Result<(), StorageError> {
    client
        .create_bucket()
        .bucket(bucket)
        .send()
        .await
        .map_err(|e| StorageError::Bucket(e.into_service_error().to_string()))?;
    Ok(())
}
