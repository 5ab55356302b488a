use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::domain::customer::{Customer, CustomerCollection, NewCustomer};
use crate::domain::errors::DirectoryError;
use crate::domain::ports::DirectoryApi;

pub fn customer(first: &str, last: &str, email: &str) -> Customer {
    Customer {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        business_name: None,
    }
}

enum Reply<T> {
    Now(Result<T, DirectoryError>),
    Deferred(oneshot::Receiver<Result<T, DirectoryError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, DirectoryError> {
        match self {
            Reply::Now(result) => result,
            Reply::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(DirectoryError::Transport("reply dropped".to_string()))),
        }
    }
}

/// Completes a deferred reply from the test body.
pub struct Pending<T>(oneshot::Sender<Result<T, DirectoryError>>);

impl<T> Pending<T> {
    pub fn resolve(self, result: Result<T, DirectoryError>) {
        let _ = self.0.send(result);
    }
}

/// Port fake answering from queued replies, in call order.
///
/// With an empty queue, reads return an empty collection and creates succeed.
#[derive(Default)]
pub struct ScriptedDirectory {
    list_replies: Mutex<VecDeque<Reply<CustomerCollection>>>,
    create_replies: Mutex<VecDeque<Reply<()>>>,
    list_calls: AtomicUsize,
    created: Mutex<Vec<NewCustomer>>,
}

impl ScriptedDirectory {
    pub fn reply_list(&self, result: Result<CustomerCollection, DirectoryError>) {
        self.list_replies.lock().unwrap().push_back(Reply::Now(result));
    }

    pub fn defer_list(&self) -> Pending<CustomerCollection> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.lock().unwrap().push_back(Reply::Deferred(rx));
        Pending(tx)
    }

    pub fn reply_create(&self, result: Result<(), DirectoryError>) {
        self.create_replies.lock().unwrap().push_back(Reply::Now(result));
    }

    pub fn defer_create(&self) -> Pending<()> {
        let (tx, rx) = oneshot::channel();
        self.create_replies.lock().unwrap().push_back(Reply::Deferred(rx));
        Pending(tx)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Payloads received by `create_customer`, in order.
    pub fn created(&self) -> Vec<NewCustomer> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryApi for ScriptedDirectory {
    async fn list_customers(&self) -> Result<CustomerCollection, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.list_replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), DirectoryError> {
        self.created.lock().unwrap().push(customer.clone());
        let reply = self.create_replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(()),
        }
    }
}
