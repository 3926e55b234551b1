use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use parking_lot::RwLock;

use crate::catalog::{Fragment, Internal, Key};

/// Configuration generation a cached fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(u64);

impl Epoch {
    pub fn get(self) -> u64 {
        self.0
    }
}

pub struct MemoTables {
    next_epoch: u64,
    internals: HashMap<(Epoch, Internal), Fragment>,
    digits: HashMap<(Epoch, u8), Fragment>,
    characters: HashMap<(Epoch, char), Fragment>,
    in_progress: HashSet<(Epoch, Key)>,
}

/// Derived fragments, one table per catalog, keyed by `(epoch, value)`.
///
/// Clones share the same tables. No lock is held while a production runs:
/// lookups and inserts each take the lock briefly, so a derivation may
/// resolve other entries recursively.
#[derive(Clone)]
pub struct Memo(Arc<RwLock<MemoTables>>);

impl MemoTables {
    fn new() -> Self {
        Self {
            next_epoch: 0,
            internals: HashMap::new(),
            digits: HashMap::new(),
            characters: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn get(&self, epoch: Epoch, key: Key) -> Option<&Fragment> {
        match key {
            Key::Internal(value) => self.internals.get(&(epoch, value)),
            Key::Digit(digit) => self.digits.get(&(epoch, digit)),
            Key::Character(c) => self.characters.get(&(epoch, c)),
        }
    }

    fn insert(&mut self, epoch: Epoch, key: Key, fragment: Fragment) {
        match key {
            Key::Internal(value) => {
                self.internals.insert((epoch, value), fragment);
            }
            Key::Digit(digit) => {
                self.digits.insert((epoch, digit), fragment);
            }
            Key::Character(c) => {
                self.characters.insert((epoch, c), fragment);
            }
        }
    }

    fn discard(&mut self, epoch: Epoch) {
        self.internals.retain(|(e, _), _| *e != epoch);
        self.digits.retain(|(e, _), _| *e != epoch);
        self.characters.retain(|(e, _), _| *e != epoch);
        self.in_progress.retain(|(e, _)| *e != epoch);
    }
}

impl Memo {
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(MemoTables::new())))
    }

    /// Hands out a fresh epoch; nothing is cached under it yet.
    pub fn advance(&self) -> Epoch {
        let mut tables = self.0.write();
        let epoch = Epoch(tables.next_epoch);
        tables.next_epoch += 1;
        epoch
    }

    pub fn get(&self, epoch: Epoch, key: Key) -> Option<Fragment> {
        self.0.read().get(epoch, key).cloned()
    }

    pub fn insert(&self, epoch: Epoch, key: Key, fragment: Fragment) {
        self.0.write().insert(epoch, key, fragment);
    }

    /// Marks `key` as being derived. Returns `false` if it already was,
    /// which means the production asked for its own value.
    pub fn begin(&self, epoch: Epoch, key: Key) -> bool {
        self.0.write().in_progress.insert((epoch, key))
    }

    pub fn finish(&self, epoch: Epoch, key: Key) {
        self.0.write().in_progress.remove(&(epoch, key));
    }

    /// Drops every entry cached under `epoch`.
    pub fn discard(&self, epoch: Epoch) {
        self.0.write().discard(epoch);
    }

    /// Number of entries cached under `epoch`, over all catalogs.
    pub fn len(&self, epoch: Epoch) -> usize {
        let tables = self.0.read();
        tables.internals.keys().filter(|(e, _)| *e == epoch).count()
            + tables.digits.keys().filter(|(e, _)| *e == epoch).count()
            + tables.characters.keys().filter(|(e, _)| *e == epoch).count()
    }

    pub fn is_empty(&self, epoch: Epoch) -> bool {
        self.len(epoch) == 0
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::new()
    }
}
