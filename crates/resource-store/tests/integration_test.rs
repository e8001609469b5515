use async_trait::async_trait;
use resource_store::{FrameworkError, Document, ResourceActor};

// --- Test Document ---

#[derive(Clone, Debug, PartialEq)]
struct Booth {
    id: u32,
    number: u32,
    claimed_by: Option<String>,
    revision: u64,
}

#[derive(Debug)]
struct BoothCreate {
    number: u32,
}

#[derive(Debug)]
struct BoothUpdate {
    number: Option<u32>,
}

#[derive(Debug)]
enum BoothAction {
    Claim(String),
    Vacate,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum BoothError {
    #[error("booth already claimed")]
    AlreadyClaimed,
    #[error("booth is claimed")]
    InUse,
}

#[async_trait]
impl Document for Booth {
    type Id = u32;
    type Create = BoothCreate;
    type Update = BoothUpdate;
    type Action = BoothAction;
    type ActionResult = u64;
    type Context = ();
    type Error = BoothError;

    fn from_create_params(id: u32, params: BoothCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            number: params.number,
            claimed_by: None,
            revision: 0,
        })
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.number.to_string())
    }

    async fn on_update(&mut self, update: BoothUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(number) = update.number {
            self.number = number;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        match self.claimed_by {
            Some(_) => Err(BoothError::InUse),
            None => Ok(()),
        }
    }

    async fn handle_action(&mut self, action: BoothAction, _ctx: &()) -> Result<u64, Self::Error> {
        match action {
            BoothAction::Claim(who) => {
                let previous = self.claimed_by.replace(who);
                if previous.is_some() {
                    return Err(BoothError::AlreadyClaimed);
                }
                Ok(self.revision)
            }
            BoothAction::Vacate => {
                self.claimed_by = None;
                Ok(self.revision)
            }
        }
    }
}

fn spawn_booths() -> resource_store::ResourceClient<Booth> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let client = spawn_booths();

    let id = client.create(BoothCreate { number: 7 }).await.unwrap();
    assert_eq!(id, 1);
    assert_eq!(client.get(id).await.unwrap().unwrap().revision, 1);

    // Action results see the revision being committed.
    let revision = client
        .perform_action(id, BoothAction::Claim("ana".into()))
        .await
        .unwrap();
    assert_eq!(revision, 2);

    let err = client.delete(id).await.unwrap_err();
    assert_eq!(
        err.downcast_entity::<BoothError>().unwrap(),
        BoothError::InUse
    );

    client.perform_action(id, BoothAction::Vacate).await.unwrap();
    let updated = client
        .update(id, BoothUpdate { number: Some(8) })
        .await
        .unwrap();
    assert_eq!(updated.number, 8);
    assert_eq!(updated.revision, 4);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.perform_action(id, BoothAction::Vacate).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn failed_action_leaves_document_untouched() {
    let client = spawn_booths();
    let id = client.create(BoothCreate { number: 1 }).await.unwrap();
    client
        .perform_action(id, BoothAction::Claim("ana".into()))
        .await
        .unwrap();

    // The hook overwrites claimed_by before rejecting; the store must discard that.
    let err = client
        .perform_action(id, BoothAction::Claim("ben".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::EntityError(_)));

    let booth = client.get(id).await.unwrap().unwrap();
    assert_eq!(booth.claimed_by.as_deref(), Some("ana"));
    assert_eq!(booth.revision, 2);
}

#[tokio::test]
async fn stale_revision_is_rejected() {
    let client = spawn_booths();
    let id = client.create(BoothCreate { number: 3 }).await.unwrap();
    let seen = client.get(id).await.unwrap().unwrap().revision;

    client
        .perform_action_if(id, BoothAction::Claim("ana".into()), seen)
        .await
        .unwrap();

    let err = client
        .perform_action_if(id, BoothAction::Vacate, seen)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FrameworkError::Conflict { expected: 1, actual: 2, .. }
    ));

    let err = client
        .update_if(id, BoothUpdate { number: Some(4) }, seen)
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::Conflict { .. }));
}

#[tokio::test]
async fn unique_key_is_enforced_on_create_and_update() {
    let client = spawn_booths();
    let first = client.create(BoothCreate { number: 5 }).await.unwrap();
    let second = client.create(BoothCreate { number: 6 }).await.unwrap();

    assert!(matches!(
        client.create(BoothCreate { number: 5 }).await,
        Err(FrameworkError::Duplicate(key)) if key == "5"
    ));
    assert!(matches!(
        client.update(second, BoothUpdate { number: Some(5) }).await,
        Err(FrameworkError::Duplicate(_))
    ));

    // Re-saving a document with its own key is fine.
    client
        .update(first, BoothUpdate { number: Some(5) })
        .await
        .unwrap();
    assert_eq!(client.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn subscription_observes_own_writes() {
    let client = spawn_booths();
    let mut claimed = client.subscribe(|b: &Booth| b.claimed_by.is_some());
    assert!(claimed.current().is_empty());

    let id = client.create(BoothCreate { number: 2 }).await.unwrap();
    client
        .perform_action(id, BoothAction::Claim("ana".into()))
        .await
        .unwrap();

    // Both commits were published before the replies, so the latest set is already there.
    let view = claimed.changed().await.unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(claimed.current()[0].number, 2);
    assert_eq!(client.snapshot().len(), 1);
}

#[tokio::test]
async fn subscription_ends_when_actor_stops() {
    let (actor, client) = ResourceActor::<Booth>::new(10);
    let handle = tokio::spawn(actor.run(()));
    let mut all = client.subscribe(|_| true);

    drop(client);
    handle.await.unwrap();

    assert!(matches!(
        all.changed().await,
        Err(FrameworkError::ActorClosed)
    ));
}
