//! Synchronous event emitters

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Multi-listener event sink with in-process, in-order dispatch
pub struct EventEmitter<T> {
    handlers: RwLock<Vec<(ListenerId, Handler<T>)>>,
    next_id: AtomicU64,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn subscribe<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(listener, _)| *listener != id);
        handlers.len() != before
    }

    /// Deliver `value` to every listener in subscription order
    pub fn emit(&self, value: &T) {
        // Snapshot so handlers may (un)subscribe while being called
        let handlers: Vec<Handler<T>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(value);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_emit_in_order() {
        let emitter = EventEmitter::<String>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&log);
        emitter.subscribe(move |v: &String| first.lock().push(format!("first:{v}")));
        let second = Arc::clone(&log);
        emitter.subscribe(move |v: &String| second.lock().push(format!("second:{v}")));

        emitter.emit(&"a".to_string());
        assert_eq!(*log.lock(), vec!["first:a", "second:a"]);
    }

    #[test]
    fn test_unsubscribe() {
        let emitter = EventEmitter::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let c = Arc::clone(&count);
        let id = emitter.subscribe(move |_| *c.lock() += 1);
        emitter.emit(&());
        assert!(emitter.unsubscribe(id));
        assert!(!emitter.unsubscribe(id));
        emitter.emit(&());

        assert_eq!(*count.lock(), 1);
        assert_eq!(emitter.listener_count(), 0);
    }
}
