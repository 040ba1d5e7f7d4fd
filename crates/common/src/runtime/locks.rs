use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::address::Address;

/// Table of async mutexes, one per address currently in use
#[derive(Debug, Clone, Default)]
pub struct AddressLocks {
    table: Arc<Mutex<HashMap<Address, Arc<AsyncMutex<()>>>>>,
}

/// Held while a transaction works on a set of addresses
#[derive(Debug)]
pub struct AddressGuard {
    table: Arc<Mutex<HashMap<Address, Arc<AsyncMutex<()>>>>>,
    held: Vec<(Address, OwnedMutexGuard<()>)>,
}

impl AddressLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock every address in `addresses`.
    ///
    /// Addresses are deduplicated and taken in ascending order, so two
    ///  callers with overlapping sets cannot deadlock.
    pub async fn lock<I>(&self, addresses: I) -> AddressGuard
    where
        I: IntoIterator<Item = Address>,
    {
        let ordered: BTreeSet<Address> = addresses.into_iter().collect();
        let mut held = Vec::with_capacity(ordered.len());

        for address in ordered {
            let mutex = {
                let mut table = self.table.lock();
                table.entry(address).or_default().clone()
            };
            held.push((address, mutex.lock_owned().await));
        }

        AddressGuard {
            table: self.table.clone(),
            held,
        }
    }

    /// Number of addresses with a live mutex
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for AddressGuard {
    fn drop(&mut self) {
        let held = std::mem::take(&mut self.held);
        let mut table = self.table.lock();
        for (address, guard) in held {
            drop(guard);
            // Only the table's own handle left means nobody is waiting
            if let Some(mutex) = table.get(&address) {
                if Arc::strong_count(mutex) == 1 {
                    table.remove(&address);
                }
            }
        }
    }
}
