//! Integration tests: gate + evaluator + store working together

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gallery_auth::{
    AccessGate, AuthError, AuthResult, CallerIdentity, Claim, Decision, DenyReason, Image,
    ImageId, ImageStore, InMemoryImageStore, OwnershipEvaluator, StoreOwnershipEvaluator,
};

/// Wraps a real store and counts lookups
#[derive(Default)]
struct CountingStore {
    inner: InMemoryImageStore,
    lookups: AtomicUsize,
}

#[async_trait]
impl ImageStore for CountingStore {
    async fn find_by_id(&self, id: &ImageId) -> AuthResult<Option<Image>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_owner(&self, owner_id: &str) -> AuthResult<Vec<Image>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_owner(owner_id).await
    }

    async fn insert(&self, image: Image) -> AuthResult<()> {
        self.inner.insert(image).await
    }

    async fn update(&self, image: Image) -> AuthResult<()> {
        self.inner.update(image).await
    }

    async fn delete(&self, id: &ImageId) -> AuthResult<()> {
        self.inner.delete(id).await
    }

    async fn commit(&self) -> AuthResult<()> {
        self.inner.commit().await
    }
}

/// Store whose reads always fail
struct BrokenStore;

#[async_trait]
impl ImageStore for BrokenStore {
    async fn find_by_id(&self, _: &ImageId) -> AuthResult<Option<Image>> {
        Err(AuthError::Store("disk on fire".into()))
    }

    async fn find_by_owner(&self, _: &str) -> AuthResult<Vec<Image>> {
        Err(AuthError::Store("disk on fire".into()))
    }

    async fn insert(&self, _: Image) -> AuthResult<()> {
        Err(AuthError::Store("disk on fire".into()))
    }

    async fn update(&self, _: Image) -> AuthResult<()> {
        Err(AuthError::Store("disk on fire".into()))
    }

    async fn delete(&self, _: &ImageId) -> AuthResult<()> {
        Err(AuthError::Store("disk on fire".into()))
    }

    async fn commit(&self) -> AuthResult<()> {
        Err(AuthError::Store("disk on fire".into()))
    }
}

#[tokio::test]
async fn test_malformed_token_performs_no_lookup() {
    let store = Arc::new(CountingStore::default());
    let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(store.clone())));

    let anyone = CallerIdentity::new(vec![
        Claim::new("sub", "alice"),
        Claim::new("role", "PayingUser"),
    ]);
    let decision = gate.authorize("not-a-guid", &anyone).await.unwrap();

    assert_eq!(decision, Decision::Deny(DenyReason::MalformedIdentifier));
    assert_eq!(store.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_every_call_rereads_the_store() {
    let store = Arc::new(CountingStore::default());
    let image = Image::new("alice", "a.jpg", "Glacier");
    store.insert(image.clone()).await.unwrap();
    let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(store.clone())));
    let alice = CallerIdentity::with_subject("alice");

    for _ in 0..3 {
        gate.authorize(&image.id.to_string(), &alice).await.unwrap();
    }
    assert_eq!(store.lookups.load(Ordering::SeqCst), 3);

    // Ownership disappears with the record
    store.delete(&image.id).await.unwrap();
    assert_eq!(
        gate.authorize(&image.id.to_string(), &alice).await.unwrap(),
        Decision::Deny(DenyReason::NotOwner)
    );
}

#[tokio::test]
async fn test_ownership_properties_over_many_images() {
    let store = Arc::new(InMemoryImageStore::new());
    let owners = ["alice", "bob", "carol", "Alice"];
    let mut images = Vec::new();
    for (n, owner) in owners.iter().enumerate() {
        let image = Image::new(*owner, format!("{n}.jpg"), format!("Image {n}"));
        store.insert(image.clone()).await.unwrap();
        images.push(image);
    }
    let evaluator = StoreOwnershipEvaluator::new(store);

    for image in &images {
        for subject in owners {
            let expected = image.owner_id == subject;
            assert_eq!(
                evaluator.is_owner(&image.id, Some(subject)).await.unwrap(),
                expected,
                "image owned by {} checked against {}",
                image.owner_id,
                subject
            );
        }
    }

    for _ in 0..8 {
        let missing = ImageId::new();
        for subject in owners {
            assert!(!evaluator.is_owner(&missing, Some(subject)).await.unwrap());
        }
    }
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(Arc::new(BrokenStore))));
    let alice = CallerIdentity::with_subject("alice");

    let result = gate.authorize(&ImageId::new().to_string(), &alice).await;
    assert!(matches!(result, Err(AuthError::Store(_))));

    // Malformed ids are still denied without touching the broken store
    assert_eq!(
        gate.authorize("nope", &alice).await.unwrap(),
        Decision::Deny(DenyReason::MalformedIdentifier)
    );
}

#[tokio::test]
async fn test_concurrent_authorization() {
    let store = Arc::new(InMemoryImageStore::new());
    let image = Image::new("alice", "a.jpg", "Tundra");
    store.insert(image.clone()).await.unwrap();
    let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(store)));

    let mut handles = Vec::new();
    for n in 0..32 {
        let gate = gate.clone();
        let raw = image.id.to_string();
        handles.push(tokio::spawn(async move {
            let subject = if n % 2 == 0 { "alice" } else { "bob" };
            let decision = gate
                .authorize(&raw, &CallerIdentity::with_subject(subject))
                .await
                .unwrap();
            (subject, decision)
        }));
    }

    for handle in handles {
        let (subject, decision) = handle.await.unwrap();
        assert_eq!(decision.is_permit(), subject == "alice");
    }
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_gate_over_sqlite() {
    use gallery_auth::SqliteImageStore;

    let store = Arc::new(SqliteImageStore::in_memory().unwrap());
    let image = Image::new("alice", "a.jpg", "Mesa");
    store.insert(image.clone()).await.unwrap();
    let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(store)));

    let raw = image.id.to_string();
    assert!(
        gate.authorize(&raw, &CallerIdentity::with_subject("alice"))
            .await
            .unwrap()
            .is_permit()
    );
    assert!(
        !gate
            .authorize(&raw, &CallerIdentity::with_subject("bob"))
            .await
            .unwrap()
            .is_permit()
    );
}
