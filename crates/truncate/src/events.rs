/// Handle for detaching an observer from an [`Emitter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer<T> = Box<dyn FnMut(&T)>;

/// Synchronous event emitter with subscribe/unsubscribe.
pub struct Emitter<T> {
    observers: Vec<(Subscription, Observer<T>)>,
    next_id: u64,
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the observer was still attached.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    pub fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call every observer in subscription order.
    pub fn emit(&mut self, value: &T) {
        for (_, observer) in &mut self.observers {
            observer(value);
        }
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl<T> std::fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = Emitter::new();
        for tag in ["a", "b"] {
            let seen = Rc::clone(&seen);
            emitter.subscribe(move |v: &Option<usize>| seen.borrow_mut().push((tag, *v)));
        }
        emitter.emit(&Some(3));
        emitter.emit(&None);
        assert_eq!(
            *seen.borrow(),
            vec![("a", Some(3)), ("b", Some(3)), ("a", None), ("b", None)]
        );
    }

    #[test]
    fn unsubscribe_detaches_one_observer() {
        let mut emitter: Emitter<u8> = Emitter::new();
        let a = emitter.subscribe(|_| {});
        let _b = emitter.subscribe(|_| {});
        assert!(emitter.unsubscribe(a));
        assert!(!emitter.unsubscribe(a));
        assert_eq!(emitter.len(), 1);
        assert!(emitter.has_observers());
    }
}
