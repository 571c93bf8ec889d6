use aws_sdk_s3::Client;
use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::types::error::{NoSuchKey, NotFound};
use aws_smithy_mocks::{RuleMode, mock, mock_client};
use aws_smithy_types::DateTime;
use jiff::Timestamp;
use recipes_core::models::document::RecipeDocument;
use recipes_storage::{BucketStore, RecipeStore};
use serde_json::json;

const BUCKET: &str = "recipes-test";
const MODIFIED_SECS: i64 = 1_740_830_400;

fn object(key: &str) -> Object {
    Object::builder()
        .key(key)
        .size(32)
        .last_modified(DateTime::from_secs(MODIFIED_SECS))
        .build()
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let head = mock!(Client::head_object)
        .match_requests(|req| req.key() == Some("ghost.json"))
        .then_error(|| HeadObjectError::NotFound(NotFound::builder().build()));
    let delete = mock!(Client::delete_object).then_output(|| DeleteObjectOutput::builder().build());

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&head, &delete]);
    let store = BucketStore::new(client, BUCKET);

    let err = store.delete("ghost").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(delete.num_calls(), 0);
}

#[tokio::test]
async fn delete_existing_removes_object() {
    let head = mock!(Client::head_object).then_output(|| {
        HeadObjectOutput::builder()
            .last_modified(DateTime::from_secs(MODIFIED_SECS))
            .build()
    });
    let delete = mock!(Client::delete_object)
        .match_requests(|req| req.bucket() == Some(BUCKET) && req.key() == Some("soup.json"))
        .then_output(|| DeleteObjectOutput::builder().build());

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&head, &delete]);
    let store = BucketStore::new(client, BUCKET);

    store.delete("soup").await.unwrap();
    assert_eq!(delete.num_calls(), 1);
}

#[tokio::test]
async fn put_returns_last_modified_from_head() {
    let put = mock!(Client::put_object)
        .match_requests(|req| {
            req.key() == Some("pasta.json") && req.content_type() == Some("application/json")
        })
        .then_output(|| PutObjectOutput::builder().build());
    let head = mock!(Client::head_object).then_output(|| {
        HeadObjectOutput::builder()
            .last_modified(DateTime::from_secs(MODIFIED_SECS))
            .build()
    });

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&put, &head]);
    let store = BucketStore::new(client, BUCKET);

    let document = RecipeDocument::from_body(br#"{"id":"pasta","title":"Pasta"}"#).unwrap();
    let version = store.put("pasta", &document).await.unwrap();
    assert_eq!(version, Timestamp::from_second(MODIFIED_SECS).unwrap());
    assert_eq!(put.num_calls(), 1);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let get = mock!(Client::get_object)
        .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&get]);
    let store = BucketStore::new(client, BUCKET);

    assert!(store.get("nope").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn get_without_last_modified_uses_now() {
    let get = mock!(Client::get_object).then_output(|| {
        GetObjectOutput::builder()
            .body(ByteStream::from_static(br#"{"title":"Emulated"}"#))
            .build()
    });

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&get]);
    let store = BucketStore::new(client, BUCKET);

    let before = Timestamp::now();
    let stored = store.get("emu").await.unwrap();
    let after = Timestamp::now();
    assert!(stored.version >= before && stored.version <= after);
    assert_eq!(stored.document.title(), Some("Emulated"));
}

#[tokio::test]
async fn list_skips_corrupt_and_foreign_objects() {
    let listing = mock!(Client::list_objects_v2).then_output(|| {
        ListObjectsV2Output::builder()
            .contents(object("a.json"))
            .contents(object("broken.json"))
            .contents(object("notes.txt"))
            .contents(object("nested/b.json"))
            .is_truncated(false)
            .build()
    });
    let good = mock!(Client::get_object)
        .match_requests(|req| req.key() == Some("a.json"))
        .then_output(|| {
            GetObjectOutput::builder()
                .body(ByteStream::from_static(br#"{"id":"a","title":"A"}"#))
                .last_modified(DateTime::from_secs(MODIFIED_SECS))
                .build()
        });
    let broken = mock!(Client::get_object)
        .match_requests(|req| req.key() == Some("broken.json"))
        .then_output(|| {
            GetObjectOutput::builder()
                .body(ByteStream::from_static(b"{\"title\": "))
                .last_modified(DateTime::from_secs(MODIFIED_SECS))
                .build()
        });

    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, [&listing, &good, &broken]);
    let store = BucketStore::new(client, BUCKET);

    let recipes = store.list().await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].id, "a");
    assert_eq!(
        recipes[0].version,
        Timestamp::from_second(MODIFIED_SECS).unwrap()
    );
    assert_eq!(recipes[0].document.fields()["title"], json!("A"));
    assert_eq!(broken.num_calls(), 1);
}
