/// Typed publish/subscribe channels
///
/// A [`Signal`] fans a payload out to every connected handler, synchronously
/// and in subscription order. Handlers that need to change view state post
/// an action into a [`Mailbox`]; the owning view drains it once the emit
/// returns, so no handler ever borrows a view mutably.
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Identifies one connection made with [`Signal::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

/// A named channel carrying payloads of type `T`
pub struct Signal<T> {
    name: &'static str,
    next_id: u64,
    handlers: Vec<(HandlerId, Handler<T>)>,
}

impl<T> Signal<T> {
    /// Create a channel with no handlers
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    /// Register `handler`; it runs after every handler connected before it
    pub fn connect<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove one handler. Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        before != self.handlers.len()
    }

    /// Remove every handler
    pub fn disconnect_all(&mut self) {
        if !self.handlers.is_empty() {
            log::debug!("Disconnecting {} handler(s) from {}", self.handlers.len(), self.name);
        }
        self.handlers.clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver `payload` to every handler. Returns how many ran.
    pub fn emit(&mut self, payload: &T) -> usize {
        log::trace!("Emitting {} to {} handler(s)", self.name, self.handlers.len());
        for (_, handler) in self.handlers.iter_mut() {
            handler(payload);
        }
        self.handlers.len()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Shared FIFO queue that signal handlers post actions into
#[derive(Debug)]
pub struct Mailbox<A> {
    queue: Rc<RefCell<VecDeque<A>>>,
}

impl<A> Mailbox<A> {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn post(&self, action: A) {
        self.queue.borrow_mut().push_back(action);
    }

    /// Take every queued action, oldest first
    pub fn drain(&self) -> Vec<A> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl<A> Clone for Mailbox<A> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<A> Default for Mailbox<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_runs_handlers_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut signal: Signal<u32> = Signal::new("numbers");

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            signal.connect(move |value: &u32| log.borrow_mut().push(format!("{tag}:{value}")));
        }

        assert_eq!(signal.emit(&7), 3);
        assert_eq!(*log.borrow(), vec!["first:7", "second:7", "third:7"]);
    }

    #[test]
    fn test_disconnect_single_handler() {
        let hits = Rc::new(RefCell::new(0));
        let mut signal: Signal<()> = Signal::new("ping");

        let kept = Rc::clone(&hits);
        signal.connect(move |_| *kept.borrow_mut() += 1);
        let dropped = Rc::clone(&hits);
        let id = signal.connect(move |_| *dropped.borrow_mut() += 100);

        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(&());
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_disconnect_all_silences_signal() {
        let mut signal: Signal<String> = Signal::new("option-selected");
        signal.connect(|_| panic!("handler should have been removed"));
        signal.disconnect_all();

        assert_eq!(signal.handler_count(), 0);
        assert_eq!(signal.emit(&"Sketches".to_string()), 0);
    }

    #[test]
    fn test_mailbox_collects_posts_from_handlers() {
        let mailbox = Mailbox::new();
        let mut signal: Signal<&'static str> = Signal::new("words");

        let outbox = mailbox.clone();
        signal.connect(move |word: &&'static str| outbox.post(word.len()));
        signal.emit(&"abc");
        signal.emit(&"hello");

        assert_eq!(mailbox.drain(), vec![3, 5]);
        assert!(mailbox.is_empty());
    }
}
