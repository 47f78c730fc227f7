use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks, actions, and queries)
// =============================================================================

/// Trait that any domain entity must implement to be managed by
/// [`ResourceActor`].
///
/// The actor owns the store and processes one request at a time, so
/// every hook runs inside a serialized critical section for the whole
/// store. `handle_action` in particular gets exclusive mutable access
/// to one entity, which makes check-then-mutate transitions atomic
/// with respect to all concurrent callers.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type DeleteParams: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Filter: Send + Sync + Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from a freshly generated id and the
    /// creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle hooks ---

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    fn on_delete(&self, _params: &Self::DeleteParams) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Domain-specific operations ---

    /// Handle a custom action against one entity.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Whether this entity matches a query filter. Used by `Query`.
    fn matches(&self, filter: &Self::Filter) -> bool;
}

// =============================================================================
// 2. ERRORS AND MESSAGES
// =============================================================================

/// Failures surfaced by the generic actor machinery. `Entity` wraps
/// whatever the domain hook refused with; the channel variants mean
/// the actor itself is gone (an infrastructure failure for callers).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameworkError<E: std::error::Error> {
    #[error("no such item: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entity(E),
    #[error("actor mailbox closed")]
    MailboxClosed,
    #[error("actor dropped the request")]
    RequestDropped,
}

pub type Reply<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Reply<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Reply<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Reply<T, T::Error>,
    },
    Delete {
        id: T::Id,
        params: T::DeleteParams,
        respond_to: Reply<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Reply<T::ActionResult, T::Error>,
    },
    Query {
        filter: T::Filter,
        respond_to: Reply<Vec<T>, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => match item.on_update(patch) {
                            Ok(()) => Ok(item.clone()),
                            Err(e) => Err(FrameworkError::Entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, params, respond_to } => {
                    let result = match self.store.get(&id) {
                        Some(item) => match item.on_delete(&params) {
                            Ok(()) => {
                                self.store.remove(&id);
                                Ok(())
                            }
                            Err(e) => Err(FrameworkError::Entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = match self.store.get_mut(&id) {
                        Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    async fn request<R>(
        &self,
        make: impl FnOnce(Reply<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::MailboxClosed)?;
        response.await.map_err(|_| FrameworkError::RequestDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(
        &self,
        id: T::Id,
        params: T::DeleteParams,
    ) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, params, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn query(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
