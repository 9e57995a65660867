//! A single-slot mutable cell holding an immutable value.
//!
//! [`Atom`] is the one place where state changes. It holds an `Arc<T>` in an
//! [`ArcSwap`], so reads are lock-free and always see a complete value, and
//! every update replaces the whole value in one atomic step.
//!
//! # Update model
//!
//! [`Atom::swap`] runs an optimistic compare-and-swap loop: it computes the
//! next value from the current one and installs it only if no other writer
//! got there first, otherwise it retries against the newer value. The update
//! function may therefore run more than once and must not rely on side
//! effects happening exactly once. No update is ever lost.
//!
//! If the update function fails, or a validator rejects its result, nothing
//! is installed and the atom keeps its previous value.
//!
//! # Examples
//!
//! ```
//! use atomtree::atom::Atom;
//!
//! let counter = Atom::new(1);
//! assert_eq!(*counter.swap(|n| n + 1)?, 2);
//! assert_eq!(*counter.read(), 2);
//!
//! counter.reset(1)?;
//! assert_eq!(*counter.read(), 1);
//! # Ok::<(), atomtree::Error>(())
//! ```

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use arc_swap::{ArcSwap, Guard};

pub mod errors;

pub use errors::AtomError;

/// A validator called with every candidate value; returning `false`
/// rejects the update.
pub type Validator<T> = dyn Fn(&T) -> bool + Send + Sync;

/// A watch called with `(key, old, new)` after each installed update.
pub type Watch<T> = dyn Fn(&str, &T, &T) + Send + Sync;

/// A thread-safe cell holding one immutable value at a time.
///
/// The atom's identity is stable for its whole life; only its contents are
/// swapped. It can live at process scope, e.g. in a
/// [`LazyLock`](std::sync::LazyLock) static, or be shared through an `Arc`.
pub struct Atom<T> {
    state: ArcSwap<T>,
    validator: RwLock<Option<Arc<Validator<T>>>>,
    watches: RwLock<BTreeMap<String, Arc<Watch<T>>>>,
}

impl<T> Atom<T> {
    /// Creates an atom holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            state: ArcSwap::from_pointee(initial),
            validator: RwLock::new(None),
            watches: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates an atom guarded by `validator`.
    ///
    /// Fails with [`AtomError::ValidationFailed`] if `initial` itself is
    /// rejected.
    pub fn with_validator<F>(initial: T, validator: F) -> crate::Result<Self>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let atom = Self::new(initial);
        atom.set_validator(validator)?;
        Ok(atom)
    }

    /// Returns the current value.
    ///
    /// Never blocks; the result is the latest completed update at the time
    /// of the call.
    pub fn read(&self) -> Arc<T> {
        self.state.load_full()
    }

    /// Replaces the value unconditionally and returns the new value
    pub fn reset(&self, value: T) -> crate::Result<Arc<T>> {
        self.reset_vals(value).map(|(_, new)| new)
    }

    /// Replaces the value unconditionally and returns `(old, new)`
    pub fn reset_vals(&self, value: T) -> crate::Result<(Arc<T>, Arc<T>)> {
        let next = Arc::new(value);
        let old = self.validated(&next, || self.state.swap(Arc::clone(&next)))?;
        self.notify(&old, &next);
        Ok((old, next))
    }

    /// Atomically installs `f(current)` and returns the new value.
    ///
    /// `f` may be called more than once under contention.
    pub fn swap<F>(&self, mut f: F) -> crate::Result<Arc<T>>
    where
        F: FnMut(&T) -> T,
    {
        self.try_swap::<_, crate::Error>(|current| Ok(f(current)))
    }

    /// Like [`Atom::swap`] but returns `(old, new)`, where `old` is the
    /// exact value `f` was applied to
    pub fn swap_vals<F>(&self, mut f: F) -> crate::Result<(Arc<T>, Arc<T>)>
    where
        F: FnMut(&T) -> T,
    {
        self.try_swap_vals::<_, crate::Error>(|current| Ok(f(current)))
    }

    /// Fallible form of [`Atom::swap`].
    ///
    /// An error from `f` is returned as is and leaves the atom unchanged.
    /// Validator rejections are converted into `E` through `From`.
    pub fn try_swap<F, E>(&self, f: F) -> Result<Arc<T>, E>
    where
        F: FnMut(&T) -> Result<T, E>,
        E: From<AtomError>,
    {
        self.try_swap_vals(f).map(|(_, new)| new)
    }

    /// Fallible form of [`Atom::swap_vals`]
    pub fn try_swap_vals<F, E>(&self, mut f: F) -> Result<(Arc<T>, Arc<T>), E>
    where
        F: FnMut(&T) -> Result<T, E>,
        E: From<AtomError>,
    {
        let mut current = self.state.load_full();
        let mut attempt: u32 = 1;
        loop {
            let next = Arc::new(f(current.as_ref())?);
            let previous = self.validated(&next, || {
                self.state.compare_and_swap(&current, Arc::clone(&next))
            })?;
            if Arc::ptr_eq(&previous, &current) {
                self.notify(&current, &next);
                return Ok((current, next));
            }

            tracing::trace!(attempt, "Atom swap lost a race, retrying");
            current = Guard::into_inner(previous);
            attempt += 1;
        }
    }

    /// Installs `value` only if the atom still holds `expected`.
    ///
    /// `expected` is compared by identity, so it should come from
    /// [`Atom::read`]. Returns whether the value was installed.
    pub fn compare_and_set(&self, expected: &Arc<T>, value: T) -> crate::Result<bool> {
        let next = Arc::new(value);
        let previous = self.validated(&next, || {
            self.state.compare_and_swap(expected, Arc::clone(&next))
        })?;
        if Arc::ptr_eq(&previous, expected) {
            self.notify(expected, &next);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Installs a validator, replacing any previous one.
    ///
    /// The current value must pass, otherwise nothing changes and
    /// [`AtomError::ValidationFailed`] is returned. Every value installed
    /// after this returns `Ok` has passed the new validator, even when
    /// other threads are updating the atom at the same time.
    ///
    /// Validators run while the validator slot is locked for reading, so a
    /// validator must not call back into `set_validator` or
    /// `clear_validator` on the same atom.
    pub fn set_validator<F>(&self, validator: F) -> crate::Result<()>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        // Holding the write lock keeps every install out until the new
        // validator is in place.
        let mut slot = self
            .validator
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !validator(self.read().as_ref()) {
            return Err(AtomError::ValidationFailed {
                reason: "current value rejected by new validator".to_string(),
            }
            .into());
        }
        *slot = Some(Arc::new(validator));
        Ok(())
    }

    /// Removes the validator, if any
    pub fn clear_validator(&self) {
        *self
            .validator
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Registers `watch` under `key`, replacing any watch with the same key.
    ///
    /// Watches run on the updating thread after the new value is installed.
    pub fn add_watch<F>(&self, key: impl Into<String>, watch: F)
    where
        F: Fn(&str, &T, &T) + Send + Sync + 'static,
    {
        let key = key.into();
        tracing::debug!(key = %key, "Adding atom watch");
        self.watches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::new(watch));
    }

    /// Removes the watch registered under `key`, returning whether one
    /// existed
    pub fn remove_watch(&self, key: &str) -> bool {
        self.watches
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Returns the number of registered watches
    pub fn watch_count(&self) -> usize {
        self.watches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // Validation and `install` run under the validator read lock, so no
    // value can slip in between a `set_validator` check and its install.
    fn validated<R>(&self, candidate: &T, install: impl FnOnce() -> R) -> Result<R, AtomError> {
        let validator = self
            .validator
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match validator.as_deref() {
            Some(validator) if !validator(candidate) => {
                tracing::warn!("Atom validator rejected new state");
                Err(AtomError::ValidationFailed {
                    reason: "candidate value rejected".to_string(),
                })
            }
            _ => Ok(install()),
        }
    }

    // Callbacks run without holding the registry lock so that a watch may
    // add or remove watches itself.
    fn notify(&self, old: &T, new: &T) {
        let watches: Vec<(String, Arc<Watch<T>>)> = self
            .watches
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(key, watch)| (key.clone(), Arc::clone(watch)))
            .collect();
        for (key, watch) in watches {
            watch(key.as_str(), old, new);
        }
    }
}

impl<T: Default> Default for Atom<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Atom<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Atom<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Atom")
            .field("value", &self.read())
            .field("watches", &self.watch_count())
            .finish()
    }
}
