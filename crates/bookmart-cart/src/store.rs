//! # Cart Store
//!
//! The process-wide registry of per-user shopping carts.
//!
//! ## Thread Safety
//! The registry is wrapped in a `Mutex` because:
//! 1. Multiple request handlers mutate carts concurrently
//! 2. Same-user operations must be linearizable (no lost updates)
//! 3. One coarse lock is enough - every operation is a short, bounded,
//!    in-memory computation, never a hot path needing sharding
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  Handler Action           Store Operation          Registry Change      │
//! │  ──────────────           ───────────────          ───────────────      │
//! │                                                                         │
//! │  Add book ──────────────► add_item() ────────────► cart[book] += qty   │
//! │                                                    (cart created lazily)│
//! │  Change quantity ───────► set_item_quantity() ───► cart[book] = qty    │
//! │                                                    (<= 0 removes entry)│
//! │  Remove book ───────────► remove_item() ─────────► cart.remove(book)   │
//! │                                                                         │
//! │  View cart ─────────────► get_cart() ────────────► (read only)         │
//! │                                                                         │
//! │  Clear ─────────────────► clear_cart() ──────────► registry.remove(u)  │
//! │                                                                         │
//! │  NOTE: Every mutation notifies all observers before returning,         │
//! │        carrying the post-mutation snapshot, in registration order.     │
//! │        The registry lock is released BEFORE observers run, so an       │
//! │        observer may call back into the store without deadlocking.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, RwLock};

use bookmart_core::validation::validate_quantity;
use bookmart_core::{BookId, Cart, CartResult, Quantity, UserId};
use tracing::{debug, warn};

use crate::observer::CartObserver;

// =============================================================================
// CartStore
// =============================================================================

/// The registry of per-user carts plus the registered observer set.
///
/// ## Construction
/// Build exactly one per process and share it via `Arc<CartStore>`. There
/// is no global instance: tests get a fresh, isolated store each.
///
/// ## Invariants
/// - At most one cart per user
/// - No cart entry with quantity <= 0
/// - Every mutation notifies all observers before returning
pub struct CartStore {
    /// userId -> that user's cart. Entries are created lazily on first add
    /// and removed on clear.
    carts: Mutex<HashMap<UserId, Cart>>,

    /// Registered observers, in registration order, unique by `Arc`
    /// identity. Read on every mutation, written rarely.
    observers: RwLock<Vec<Arc<dyn CartObserver>>>,
}

impl CartStore {
    /// Creates a new empty store with no carts and no observers.
    pub fn new() -> Self {
        CartStore {
            carts: Mutex::new(HashMap::new()),
            observers: RwLock::new(Vec::new()),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of a book to a user's cart.
    ///
    /// ## Behavior
    /// - Rejects `quantity` <= 0 with [`CartError::InvalidQuantity`]
    ///   (no mutation, no notification)
    /// - Creates the user's cart if this is their first add
    /// - Book already in cart: quantity increments
    /// - Always notifies observers on success
    ///
    /// Unknown book ids are NOT validated here - the catalog collaborator
    /// checks existence before this call.
    ///
    /// [`CartError::InvalidQuantity`]: bookmart_core::CartError::InvalidQuantity
    pub fn add_item(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: Quantity,
    ) -> CartResult<()> {
        validate_quantity(quantity)?;
        debug!(user_id, book_id, quantity, "add_item");

        {
            let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
            carts.entry(user_id).or_insert_with(Cart::new).add(book_id, quantity);
        }

        self.notify_observers(user_id);
        Ok(())
    }

    /// Sets the quantity of a book in a user's cart to exactly `quantity`.
    ///
    /// ## Behavior
    /// - User has no cart: no-op - no cart is created and NO notification
    ///   fires. This asymmetry with [`add_item`](Self::add_item) is part of
    ///   the contract: only an add may bring a cart into existence.
    /// - `quantity` <= 0: removes the book entirely
    /// - `quantity` > 0: overwrites (NOT an increment)
    /// - Notifies whenever the user had an existing cart
    pub fn set_item_quantity(&self, user_id: UserId, book_id: BookId, quantity: Quantity) {
        debug!(user_id, book_id, quantity, "set_item_quantity");

        let had_cart = {
            let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
            match carts.get_mut(&user_id) {
                Some(cart) => {
                    cart.set_quantity(book_id, quantity);
                    true
                }
                None => false,
            }
        };

        if had_cart {
            self.notify_observers(user_id);
        }
    }

    /// Removes a book from a user's cart.
    ///
    /// ## Behavior
    /// - User has no cart: no-op, no notification
    /// - Book not in cart: harmless no-op, but still notifies (the user's
    ///   cart exists and a mutation was requested against it)
    pub fn remove_item(&self, user_id: UserId, book_id: BookId) {
        debug!(user_id, book_id, "remove_item");

        let had_cart = {
            let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
            match carts.get_mut(&user_id) {
                Some(cart) => {
                    cart.remove(book_id);
                    true
                }
                None => false,
            }
        };

        if had_cart {
            self.notify_observers(user_id);
        }
    }

    /// Removes a user's entire cart from the registry.
    ///
    /// Always notifies, whether or not a cart existed; the snapshot the
    /// observers receive is the post-clear (empty) cart.
    pub fn clear_cart(&self, user_id: UserId) {
        debug!(user_id, "clear_cart");

        {
            let mut carts = self.carts.lock().expect("cart registry mutex poisoned");
            carts.remove(&user_id);
        }

        self.notify_observers(user_id);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns a snapshot of the user's cart, or an empty cart if they have
    /// none.
    ///
    /// Pure read: never creates a registry entry (contrast with
    /// [`add_item`](Self::add_item)) and never notifies.
    pub fn get_cart(&self, user_id: UserId) -> Cart {
        let carts = self.carts.lock().expect("cart registry mutex poisoned");
        carts.get(&user_id).cloned().unwrap_or_default()
    }

    /// Returns the number of users currently holding a cart.
    ///
    /// Lets callers (and tests) confirm that reads never allocate entries.
    pub fn user_count(&self) -> usize {
        let carts = self.carts.lock().expect("cart registry mutex poisoned");
        carts.len()
    }

    // =========================================================================
    // Observer Registration & Dispatch
    // =========================================================================

    /// Registers an observer for cart-change notifications.
    ///
    /// Idempotent by identity: registering the same `Arc` twice keeps a
    /// single entry. Registration itself triggers no notification.
    pub fn register_observer(&self, observer: Arc<dyn CartObserver>) {
        let mut observers = self.observers.write().expect("observer list lock poisoned");
        if !observers.iter().any(|o| Arc::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    /// Removes a previously registered observer. Idempotent if absent.
    pub fn remove_observer(&self, observer: &Arc<dyn CartObserver>) {
        let mut observers = self.observers.write().expect("observer list lock poisoned");
        observers.retain(|o| !Arc::ptr_eq(o, observer));
    }

    /// Notifies every registered observer, in registration order, with the
    /// user's current cart snapshot.
    ///
    /// Invoked internally after every mutation; public so callers can force
    /// a re-notification without mutating (e.g. to resynchronize a newly
    /// attached consumer).
    ///
    /// The snapshot is taken fresh per observer ("the cart as of this
    /// call"), and a panicking observer is caught and logged so it cannot
    /// abort the triggering mutation or starve later observers.
    pub fn notify_observers(&self, user_id: UserId) {
        let observers: Vec<Arc<dyn CartObserver>> = {
            let observers = self.observers.read().expect("observer list lock poisoned");
            observers.clone()
        };

        for observer in observers {
            let snapshot = self.get_cart(user_id);
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                observer.cart_updated(user_id, &snapshot);
            }));
            if outcome.is_err() {
                warn!(user_id, "cart observer panicked during notification");
            }
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Records every notification it receives, for asserting on counts,
    /// order, and snapshot contents.
    struct RecordingObserver {
        events: Mutex<Vec<(UserId, HashMap<BookId, Quantity>)>>,
    }

    impl RecordingObserver {
        fn new() -> Arc<Self> {
            Arc::new(RecordingObserver {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<(UserId, HashMap<BookId, Quantity>)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl CartObserver for RecordingObserver {
        fn cart_updated(&self, user_id: UserId, cart: &Cart) {
            self.events.lock().unwrap().push((user_id, cart.items().clone()));
        }
    }

    fn init_tracing() {
        use tracing_subscriber::EnvFilter;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_get_cart_unknown_user_is_empty_and_allocates_nothing() {
        let store = CartStore::new();

        let cart = store.get_cart(99);

        assert!(cart.is_empty());
        assert_eq!(store.user_count(), 0); // Read must not create an entry
    }

    #[test]
    fn test_add_item_creates_cart_lazily() {
        let store = CartStore::new();
        assert_eq!(store.user_count(), 0);

        store.add_item(7, 42, 2).unwrap();

        assert_eq!(store.user_count(), 1);
        assert_eq!(store.get_cart(7).quantity(42), 2);
    }

    #[test]
    fn test_add_item_twice_sums_quantities() {
        let store = CartStore::new();

        store.add_item(7, 42, 2).unwrap();
        store.add_item(7, 42, 3).unwrap();

        assert_eq!(store.get_cart(7).quantity(42), 5);
    }

    #[test]
    fn test_add_item_rejects_non_positive_quantity() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        assert!(store.add_item(7, 42, 0).is_err());
        assert!(store.add_item(7, 42, -3).is_err());

        // Rejected adds mutate nothing and notify no one
        assert_eq!(store.user_count(), 0);
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_set_item_quantity_without_cart_is_noop() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.set_item_quantity(7, 42, 5);

        assert!(store.get_cart(7).is_empty());
        assert_eq!(store.user_count(), 0); // No cart was created
        assert!(observer.events().is_empty()); // And no notification fired
    }

    #[test]
    fn test_set_item_quantity_overwrites() {
        let store = CartStore::new();

        store.add_item(7, 42, 2).unwrap();
        store.set_item_quantity(7, 42, 9);

        assert_eq!(store.get_cart(7).quantity(42), 9);
    }

    #[test]
    fn test_set_item_quantity_zero_removes_entry() {
        let store = CartStore::new();

        store.add_item(7, 42, 2).unwrap();
        store.set_item_quantity(7, 42, 0);

        assert!(!store.get_cart(7).contains(42));
    }

    #[test]
    fn test_remove_item_absent_book_still_notifies_once() {
        let store = CartStore::new();
        store.add_item(7, 42, 2).unwrap();

        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.remove_item(7, 99); // Not in the cart

        assert_eq!(store.get_cart(7).quantity(42), 2);
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_remove_item_without_cart_is_silent() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.remove_item(7, 42);

        assert_eq!(store.user_count(), 0);
        assert!(observer.events().is_empty());
    }

    #[test]
    fn test_clear_cart_empties_and_notifies_with_empty_snapshot() {
        let store = CartStore::new();
        store.add_item(7, 1, 2).unwrap();
        store.add_item(7, 2, 3).unwrap();

        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.clear_cart(7);

        assert!(store.get_cart(7).is_empty());
        assert_eq!(store.user_count(), 0); // Registry entry dropped, not emptied

        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 7);
        assert!(events[0].1.is_empty());
    }

    #[test]
    fn test_observer_receives_post_mutation_snapshot() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.add_item(7, 42, 3).unwrap();

        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 7);
        assert_eq!(events[0].1.get(&42), Some(&3));
    }

    #[test]
    fn test_duplicate_registration_notifies_once() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();

        store.register_observer(observer.clone());
        store.register_observer(observer.clone()); // Same Arc, single entry

        store.add_item(7, 42, 1).unwrap();

        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn test_removed_observer_is_never_invoked_again() {
        let store = CartStore::new();
        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.add_item(7, 42, 1).unwrap();
        let observer_dyn: Arc<dyn CartObserver> = observer.clone();
        store.remove_observer(&observer_dyn);
        store.add_item(7, 42, 1).unwrap();
        store.clear_cart(7);

        assert_eq!(observer.events().len(), 1); // Only the pre-removal add
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        let store = CartStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.register_observer(Arc::new(crate::observer::FnObserver::new(
                move |_, _: &Cart| order.lock().unwrap().push(tag),
            )));
        }

        store.add_item(7, 42, 1).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_panicking_observer_does_not_block_later_observers() {
        init_tracing();
        let store = CartStore::new();

        store.register_observer(Arc::new(crate::observer::FnObserver::new(
            |_, _: &Cart| panic!("observer bug"),
        )));
        let survivor = RecordingObserver::new();
        store.register_observer(survivor.clone());

        // The mutation must succeed despite the first observer's panic
        store.add_item(7, 42, 1).unwrap();

        assert_eq!(store.get_cart(7).quantity(42), 1);
        assert_eq!(survivor.events().len(), 1);
    }

    #[test]
    fn test_notify_observers_is_callable_for_resync() {
        let store = CartStore::new();
        store.add_item(7, 42, 2).unwrap();

        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        // No mutation - just force a re-broadcast of the current state
        store.notify_observers(7);

        let events = observer.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1.get(&42), Some(&2));
    }

    #[test]
    fn test_users_are_independent() {
        let store = CartStore::new();
        store.add_item(1, 10, 5).unwrap();
        store.add_item(2, 20, 7).unwrap();

        let observer = RecordingObserver::new();
        store.register_observer(observer.clone());

        store.clear_cart(1);
        store.set_item_quantity(1, 10, 3); // No-op: cart 1 was cleared

        assert_eq!(store.get_cart(2).quantity(20), 7); // Untouched
        for (user_id, _) in observer.events() {
            assert_eq!(user_id, 1); // User 2 never appears in the stream
        }
    }

    #[test]
    fn test_concurrent_adds_lose_no_updates() {
        init_tracing();
        let store = Arc::new(CartStore::new());
        const THREADS: usize = 8;
        const ADDS_PER_THREAD: usize = 1000;

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..ADDS_PER_THREAD {
                        store.add_item(7, 42, 1).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            store.get_cart(7).quantity(42),
            (THREADS * ADDS_PER_THREAD) as i64
        );
    }

    #[test]
    fn test_registration_concurrent_with_notification_does_not_tear() {
        let store = Arc::new(CartStore::new());
        let notified = Arc::new(AtomicUsize::new(0));

        let mutator = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..500 {
                    store.add_item(7, i, 1).unwrap();
                }
            })
        };

        let registrar = {
            let store = Arc::clone(&store);
            let notified = Arc::clone(&notified);
            thread::spawn(move || {
                for _ in 0..50 {
                    let notified = Arc::clone(&notified);
                    let observer: Arc<dyn CartObserver> =
                        Arc::new(crate::observer::FnObserver::new(move |_, _: &Cart| {
                            notified.fetch_add(1, Ordering::SeqCst);
                        }));
                    store.register_observer(observer.clone());
                    store.remove_observer(&observer);
                }
            })
        };

        mutator.join().unwrap();
        registrar.join().unwrap();

        // No torn iteration, no deadlock; whether in-flight notifications
        // saw the transient observers is unspecified.
        assert_eq!(store.get_cart(7).total_quantity(), 500);
    }
}
