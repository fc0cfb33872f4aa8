//! Shared handles around the pure session and cart reducers.
//!
//! A store owns the current value and replaces it wholesale with the reducer's
//! output. Clones share state, so the gateway, the auth flow and the UI all
//! observe the same session.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use mofresh_core::{AuthToken, Cart, CartItem, CartLine, ProductId, Session, SessionAction};
use tracing::{debug, warn};

use crate::storage::{Storage, StorageError};

/// Storage key under which the cart line sequence is written.
pub const CART_STORAGE_KEY: &str = "mofresh_cart";

/// Process-wide session. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    /// A store holding the anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and return the resulting session.
    pub fn dispatch(&self, action: SessionAction) -> Session {
        let kind = action.kind();
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let next = std::mem::take(&mut *session).reduce(action);
        *session = next.clone();
        debug!(action = kind, phase = ?next.phase(), pending = ?next.pending(), "Session updated");
        next
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Token of the signed-in user, read at call time.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
            .cloned()
    }
}

/// Cart shared across the client and mirrored to storage after every change.
#[derive(Clone)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart from storage.
    ///
    /// A missing, unreadable or corrupt entry yields an empty cart; the problem
    /// is logged and the entry is overwritten on the next change.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Cart::from_lines(lines),
                Err(e) => {
                    warn!(error = %e, "Stored cart is corrupt; starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart; starting empty");
                Cart::new()
            }
        };

        Self {
            cart: Arc::new(Mutex::new(cart)),
            storage,
        }
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new cart cannot be written; the
    /// in-memory cart is left unchanged in that case.
    pub fn add(&self, item: CartItem) -> Result<Cart, StorageError> {
        self.commit(|cart| cart.add(item))
    }

    /// Remove a product line.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the new cart cannot be written.
    pub fn remove(&self, id: &ProductId) -> Result<Cart, StorageError> {
        self.commit(|cart| cart.remove(id))
    }

    /// Empty the cart and delete the stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the entry cannot be deleted.
    pub fn clear(&self) -> Result<Cart, StorageError> {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        self.storage.remove(CART_STORAGE_KEY)?;
        *cart = Cart::new();
        debug!("Cart cleared");
        Ok(Cart::new())
    }

    /// Copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn commit(&self, change: impl FnOnce(Cart) -> Cart) -> Result<Cart, StorageError> {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        let next = change(cart.clone());
        let raw = serde_json::to_string(next.lines())?;
        self.storage.set(CART_STORAGE_KEY, &raw)?;
        *cart = next.clone();
        debug!(lines = next.lines().len(), quantity = next.total_quantity(), "Cart saved");
        Ok(next)
    }
}
