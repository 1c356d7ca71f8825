//! Synchronous multicast callbacks.
//!
//! Listeners run on the caller's thread, in registration order, inside
//! `invoke`. A listener that panics unwinds through `invoke` to its caller.

use std::fmt;

/// Opaque token returned by `Event::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

type Listener<A> = Box<dyn FnMut(&A)>;

pub struct Event<A> {
    listeners: Vec<(ListenerHandle, Listener<A>)>,
    next_id: u64,
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&A) + 'static) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id);
        self.next_id += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Remove a listener. Returns false if the handle was not registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    pub fn invoke(&mut self, args: &A) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(args);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
