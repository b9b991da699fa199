//! Change notification stream
//!
//! `ChangeStream` wraps a `tokio::sync::watch` channel: it keeps only the
//! most recent value, and a new subscriber sees that value as unread.
//! Reading is synchronous and needs no runtime; the host drains
//! subscriptions when it drives them, so publishing never re-enters
//! subscriber code. Closing drops the sender.
//!
//! `Changes` layers a seeded distinct-until-changed filter on top and
//! drops the seed itself, leaving only genuine changes.

use parking_lot::Mutex;
use tokio::sync::watch;

#[derive(Debug)]
pub struct ChangeStream<T> {
    sender: Mutex<Option<watch::Sender<Option<T>>>>,
    /// Never reads, so its clones start out with every published value unseen
    origin: watch::Receiver<Option<T>>,
}

impl<T: Clone> ChangeStream<T> {
    pub fn new() -> Self {
        let (sender, origin) = watch::channel(None);
        Self {
            sender: Mutex::new(Some(sender)),
            origin,
        }
    }

    /// Replace the current value and mark it unread for every subscriber
    pub fn publish(&self, value: T) {
        if let Some(sender) = self.sender.lock().as_ref() {
            sender.send_replace(Some(value));
        }
    }

    /// Subscribe; the most recent value, if any, is pending immediately
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.origin.clone(),
        }
    }

    pub fn latest(&self) -> Option<T> {
        self.origin.borrow().clone()
    }

    /// Complete the stream
    pub fn close(&self) {
        self.sender.lock().take();
    }

    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender
            .lock()
            .as_ref()
            .map_or(0, |sender| sender.receiver_count().saturating_sub(1))
    }
}

impl<T: Clone> Default for ChangeStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T: Clone> Subscription<T> {
    /// The latest value if it has not been read yet
    pub fn try_next(&mut self) -> Option<T> {
        match self.receiver.has_changed() {
            Ok(true) => self.receiver.borrow_and_update().clone(),
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    pub fn is_closed(&self) -> bool {
        self.receiver.has_changed().is_err()
    }
}

/// `start_with(seed)`, then `distinct_until_changed`, then `skip(1)`
#[derive(Debug)]
pub struct Changes<T> {
    subscription: Subscription<T>,
    seed: Option<T>,
    last: Option<T>,
    skip: usize,
}

impl<T: Clone + PartialEq> Changes<T> {
    pub fn seeded(seed: T, subscription: Subscription<T>) -> Self {
        Self {
            subscription,
            seed: Some(seed),
            last: None,
            skip: 1,
        }
    }

    /// Next genuine change, or `None` when nothing is pending
    pub fn next_change(&mut self) -> Option<T> {
        loop {
            let value = match self.seed.take() {
                Some(seed) => seed,
                None => self.subscription.try_next()?,
            };

            if self.last.as_ref() == Some(&value) {
                continue;
            }
            self.last = Some(value.clone());

            if self.skip > 0 {
                self.skip -= 1;
                continue;
            }

            return Some(value);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.seed.is_none() && self.subscription.is_closed()
    }
}
