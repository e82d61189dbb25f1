//! The newsletter signup form controller.
//!
//! [`SubscriptionForm`] owns a [`FormState`] behind a `watch` channel: every
//! mutation notifies the receivers handed out by [`SubscriptionForm::watch`],
//! which is how a view learns it has to re-render.
mod state;
mod view;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use askama_axum::Template;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::{validate, ValidationError};
use crate::subscription_client::{SubscribeError, SubscriptionClient};

pub use state::{Feedback, Field, FormState};
pub use view::SubscriptionFormView;

const UNMOUNTED: u64 = 0;

/// Identifies one mount of a form. Outcomes of submissions started under an
/// older id are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountId(u64);

/// How a call to [`SubscriptionForm::submit`] ended.
#[derive(Debug)]
pub enum Submission {
    /// Refused locally, nothing was sent.
    Rejected(ValidationError),
    Subscribed { first_name: String },
    Failed(SubscribeError),
    /// The form was unmounted or remounted while the request was in flight.
    Stale,
}

pub struct SubscriptionForm {
    client: Arc<SubscriptionClient>,
    state: watch::Sender<FormState>,
    last_mount: AtomicU64,
    current_mount: AtomicU64,
}

impl SubscriptionForm {
    /// A mounted form with every field empty.
    pub fn new(client: Arc<SubscriptionClient>) -> Self {
        let (state, _) = watch::channel(FormState::default());
        let form = Self {
            client,
            state,
            last_mount: AtomicU64::new(UNMOUNTED),
            current_mount: AtomicU64::new(UNMOUNTED),
        };
        form.mount();
        form
    }

    pub fn mount(&self) -> MountId {
        let id = self.last_mount.fetch_add(1, Ordering::SeqCst) + 1;
        self.current_mount.store(id, Ordering::SeqCst);
        MountId(id)
    }

    pub fn unmount(&self) {
        self.current_mount.store(UNMOUNTED, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.current_mount.load(Ordering::SeqCst) != UNMOUNTED
    }

    fn current_mount(&self) -> MountId {
        MountId(self.current_mount.load(Ordering::SeqCst))
    }

    fn is_current(&self, mount: MountId) -> bool {
        mount.0 != UNMOUNTED && self.current_mount() == mount
    }

    /// A receiver that is notified after every state change.
    pub fn watch(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Spawn a task calling `render` with the latest state after each change,
    /// until the form is dropped. Bursts of changes may be coalesced.
    pub fn on_change<F>(&self, mut render: F) -> JoinHandle<()>
    where
        F: FnMut(&FormState) + Send + 'static,
    {
        let mut receiver = self.state.subscribe();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                render(&receiver.borrow_and_update());
            }
        })
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        SubscriptionFormView::from(&*self.state.borrow()).render()
    }

    /// Replace the contents of `field` verbatim. No validation happens here.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| *state.field_mut(field) = value);
    }

    /// Validate, send the subscription request and fold the outcome back into the state.
    ///
    /// Nothing prevents overlapping calls: each one sends its own request and
    /// whichever resolves last decides the message shown.
    #[tracing::instrument(name = "Submitting subscription form", skip(self))]
    pub async fn submit(&self) -> Submission {
        self.state.send_modify(|state| state.feedback = Feedback::None);

        let validation = validate(&self.state.borrow());
        let request = match validation {
            Ok(request) => request,
            Err(e) => {
                tracing::info!(reason = %e, "Subscription form rejected locally");
                self.state
                    .send_modify(|state| state.feedback = Feedback::Error(e.to_string()));
                return Submission::Rejected(e);
            }
        };

        let mount = self.current_mount();
        let outcome = self.client.subscribe(&request).await;
        if !self.is_current(mount) {
            tracing::warn!("Form was unmounted while subscribing, discarding the outcome");
            return Submission::Stale;
        }

        match outcome {
            Ok(receipt) => {
                let message = format!(
                    "Subscribed successfully! Thank you, {}",
                    receipt.first_name
                );
                self.state.send_modify(|state| {
                    state.feedback = Feedback::Success(message);
                    state.clear_fields();
                });
                Submission::Subscribed {
                    first_name: receipt.first_name,
                }
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::error!(error.cause_chain = ?e, "Subscription error");
                }
                let message = e.user_message();
                self.state
                    .send_modify(|state| state.feedback = Feedback::Error(message));
                Submission::Failed(e)
            }
        }
    }
}
