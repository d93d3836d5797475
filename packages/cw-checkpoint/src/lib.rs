use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use cosmwasm_std::{Order, StdError, StdResult, Storage};
use cw_storage_plus::{Bound, KeyDeserialize, Map, PrimaryKey};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CheckpointError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error("checkpoint time ({got}) is earlier than the latest checkpoint ({latest})")]
    TimestampRegression { latest: u64, got: u64 },
}

/// A keyed history of values over time. Writes always happen at the
/// current block time and never rewrite the past: a write later than
/// the latest checkpoint appends, a write at the same time as the
/// latest checkpoint replaces it, and a write earlier than the latest
/// checkpoint is an error. A write that would not change the latest
/// value appends nothing.
///
/// Loads are O(1) in gas: `load_at` walks the key's history backwards
/// from the queried time and stops at the first checkpoint.
///
/// # Example
///
/// ```
/// # use cosmwasm_std::{testing::mock_dependencies, Uint128};
/// # use cw_checkpoint::CheckpointMap;
/// let storage = &mut mock_dependencies().storage;
/// let power: CheckpointMap<String, Uint128> = CheckpointMap::new("power");
///
/// power
///     .push(storage, "dlg".to_string(), &Uint128::new(10), 100)
///     .unwrap();
/// power
///     .push(storage, "dlg".to_string(), &Uint128::new(7), 200)
///     .unwrap();
///
/// // no checkpoint exists before the first write
/// assert_eq!(power.load_at(storage, "dlg".to_string(), 99).unwrap(), None);
/// // times between writes see the older value
/// assert_eq!(
///     power.load_at(storage, "dlg".to_string(), 150).unwrap(),
///     Some(Uint128::new(10))
/// );
/// // times at or after the last write see the current value
/// assert_eq!(
///     power.load_at(storage, "dlg".to_string(), 500).unwrap(),
///     Some(Uint128::new(7))
/// );
/// ```
pub struct CheckpointMap<'n, K, V> {
    namespace: &'n str,
    k: PhantomData<K>,
    v: PhantomData<V>,
}

impl<'n, K, V> CheckpointMap<'n, K, V> {
    /// Creates a new map using the provided namespace.
    ///
    /// The namespace identifies the prefix in the SDK's prefix
    /// store that values and keys will be stored under.
    pub const fn new(namespace: &'n str) -> Self {
        Self {
            namespace,
            k: PhantomData,
            v: PhantomData,
        }
    }
}

impl<'n, K, V> CheckpointMap<'n, K, V>
where
    // 1. values in the map can be serialized, deserialized, and
    //    compared against the latest value
    V: Serialize + DeserializeOwned + PartialEq + Clone,
    // 1.1. keys in the map can be cloned
    K: Clone,
    // 2. &(key, time) is a value key in a map
    for<'a> &'a (K, u64): PrimaryKey<'a>,
    // 3. the suffix of (2) is a valid key and constructable from a
    //    time (u64)
    for<'a> <&'a (K, u64) as PrimaryKey<'a>>::Suffix: PrimaryKey<'a> + From<u64>,
    // 4. K can be converted into the prefix of (2)
    for<'a> K: Into<<&'a (K, u64) as PrimaryKey<'a>>::Prefix>,
    // 5. when deserializing a key the result has a static lifetime
    //    and can be converted into a time. required by the `range`
    //    calls in `load_at` and `latest`
    for<'a> <<&'a (K, u64) as PrimaryKey<'a>>::Suffix as KeyDeserialize>::Output:
        'static + Into<u64>,
{
    /// Loads the value of the latest checkpoint with time ≤ `t`, or
    /// `None` if the key had no checkpoint yet at `t`.
    pub fn load_at(&self, storage: &dyn Storage, k: K, t: u64) -> StdResult<Option<V>> {
        let newest = Bound::inclusive(t);
        Ok(self
            .snapshots()
            .prefix(k.into())
            .range(storage, None, Some(newest), Order::Descending)
            .next()
            .transpose()?
            .map(|(_t, v)| v))
    }

    /// Loads the latest checkpoint as `(time, value)`, or `None` if
    /// the key has no history.
    pub fn latest(&self, storage: &dyn Storage, k: K) -> StdResult<Option<(u64, V)>> {
        Ok(self
            .snapshots()
            .prefix(k.into())
            .range(storage, None, None, Order::Descending)
            .next()
            .transpose()?
            .map(|(t, v)| (t.into(), v)))
    }

    /// Records `value` as the key's value as of time `t`. Appends a
    /// checkpoint when `t` has advanced past the latest one and the
    /// value changed, replaces the latest checkpoint when `t` equals
    /// its time, and errors when `t` is in the key's past.
    pub fn push(
        &self,
        storage: &mut dyn Storage,
        k: K,
        value: &V,
        t: u64,
    ) -> Result<(), CheckpointError> {
        match self.latest(storage, k.clone())? {
            Some((latest, _)) if t < latest => {
                Err(CheckpointError::TimestampRegression { latest, got: t })
            }
            Some((latest, previous)) if t > latest && previous == *value => Ok(()),
            _ => Ok(self.snapshots().save(storage, &(k, t), value)?),
        }
    }

    /// Applies `action` to the key's current value (`None` if it has
    /// no history) and records the result as of time `t`. Returns the
    /// new value.
    pub fn update<E>(
        &self,
        storage: &mut dyn Storage,
        k: K,
        t: u64,
        action: impl FnOnce(Option<V>) -> Result<V, E>,
    ) -> Result<V, E>
    where
        E: From<CheckpointError>,
    {
        let current = match self.latest(storage, k.clone()) {
            Ok(latest) => latest.map(|(_t, v)| v),
            Err(err) => return Err(CheckpointError::from(err).into()),
        };
        let value = action(current)?;
        self.push(storage, k, &value, t).map_err(E::from)?;
        Ok(value)
    }

    const fn snapshots<'a>(&self) -> Map<'n, &'a (K, u64), V> {
        Map::new(self.namespace)
    }
}

/// The keyless variant of [`CheckpointMap`]: one history per
/// namespace. Used for singleton quantities like a total, a quorum
/// requirement, or a look-back window length.
pub struct CheckpointItem<'n, V> {
    inner: CheckpointMap<'n, (), V>,
}

impl<'n, V> CheckpointItem<'n, V> {
    pub const fn new(namespace: &'n str) -> Self {
        Self {
            inner: CheckpointMap::new(namespace),
        }
    }
}

impl<'n, V> CheckpointItem<'n, V>
where
    V: Serialize + DeserializeOwned + PartialEq + Clone,
{
    /// Loads the value of the latest checkpoint with time ≤ `t`.
    pub fn load_at(&self, storage: &dyn Storage, t: u64) -> StdResult<Option<V>> {
        self.inner.load_at(storage, (), t)
    }

    /// Loads the latest checkpoint as `(time, value)`.
    pub fn latest(&self, storage: &dyn Storage) -> StdResult<Option<(u64, V)>> {
        self.inner.latest(storage, ())
    }

    /// Records `value` as of time `t` under [`CheckpointMap::push`]
    /// rules.
    pub fn push(&self, storage: &mut dyn Storage, value: &V, t: u64) -> Result<(), CheckpointError> {
        self.inner.push(storage, (), value, t)
    }

    /// Applies `action` to the current value and records the result
    /// as of time `t`.
    pub fn update<E>(
        &self,
        storage: &mut dyn Storage,
        t: u64,
        action: impl FnOnce(Option<V>) -> Result<V, E>,
    ) -> Result<V, E>
    where
        E: From<CheckpointError>,
    {
        self.inner.update(storage, (), t, action)
    }
}
