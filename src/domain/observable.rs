//! Observable values with explicit subscriptions.

use tokio::sync::watch;

/// A value that notifies subscribers whenever it changes.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Observable<T> {
    /// Creates an observable holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.tx.send_modify(modify);
    }

    /// Subscribes to future changes. Dropping the subscription unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle to an [`Observable`] subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Waits for the next change and returns the new value.
    /// Returns `None` once the observable has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Returns true if a change has not been seen yet.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Returns the latest value and marks it as seen.
    pub fn latest(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }

    /// Ends the subscription.
    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_sees_change() {
        let value = Observable::new(1);
        let mut sub = value.subscribe();
        assert!(!sub.has_changed());

        value.set(2);
        assert!(sub.has_changed());
        assert_eq!(sub.changed().await, Some(2));
        assert!(!sub.has_changed());
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let value = Observable::new(String::new());
        let sub = value.subscribe();
        let other = value.subscribe();
        assert_eq!(value.subscriber_count(), 2);

        drop(sub);
        other.unsubscribe();
        assert_eq!(value.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_changed_ends_when_source_dropped() {
        let value = Observable::new(0u8);
        let mut sub = value.subscribe();
        drop(value);
        assert_eq!(sub.changed().await, None);
    }

    #[test]
    fn test_update_in_place() {
        let value = Observable::new(vec![1]);
        value.update(|v| v.push(2));
        assert_eq!(value.get(), vec![1, 2]);
    }
}
