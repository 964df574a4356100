extern crate ndarray;

use ndarray::*;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::ops;
use serde::{Serialize, Deserialize};

use crate::func_vector_error::*;
use crate::param_key::*;

///Values stored in an [`AlgebraMap`]. Plain `f64` coefficients are the leaves,
///and an [`AlgebraMap`] is itself a coefficient, which is how a function vector
///nests element families over parameter tables.
pub trait Coefficient : Clone + Default {
    ///Errors if `other` cannot be merged into `self` without mixing key shapes
    fn check_compatible(&self, other : &Self) -> Result<()>;

    ///Adds `factor * other` into `self`, key-wise. Does not check shapes;
    ///call [`Coefficient::check_compatible`] first unless the caller already
    ///knows both sides agree.
    fn merge_scaled(&mut self, other : &Self, factor : f64);

    fn scaled(&self, factor : f64) -> Self;
}

impl Coefficient for f64 {
    fn check_compatible(&self, _other : &f64) -> Result<()> {
        Ok(())
    }

    fn merge_scaled(&mut self, other : &f64, factor : f64) {
        *self += factor * other;
    }

    fn scaled(&self, factor : f64) -> f64 {
        factor * self
    }
}

///A key -> coefficient map with vector-space arithmetic. Absent keys stand for
///a zero coefficient, so sums and differences run over the union of both key sets.
///
///Entries that cancel to exactly zero are kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "K : Ord + Serialize, V : Serialize",
              deserialize = "K : Ord + Deserialize<'de>, V : Deserialize<'de>"))]
pub struct AlgebraMap<K, V = f64> {
    entries : BTreeMap<K, V>
}

///Parameter -> coefficient table for a single element family.
pub type ParamMap = AlgebraMap<ParamKey, f64>;

impl<K : Ord, V> Default for AlgebraMap<K, V> {
    fn default() -> Self {
        AlgebraMap {
            entries : BTreeMap::new()
        }
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> AlgebraMap<K, V> {
    pub fn new() -> Self {
        AlgebraMap::default()
    }

    ///Builds a map by accumulating every pair, so repeated keys sum
    pub fn from_pairs<I : IntoIterator<Item = (K, V)>>(pairs : I) -> Result<Self> {
        let mut result = AlgebraMap::new();
        for (key, value) in pairs {
            result.accumulate(key, value)?;
        }
        Ok(result)
    }

    ///The common shape of every key, or `None` for an empty map
    pub fn shape(&self) -> Option<KeyShape> {
        self.entries.keys().next().map(|key| key.shape())
    }

    ///Adds `value` into the entry for `key`, creating it if needed
    pub fn accumulate(&mut self, key : K, value : V) -> Result<()> {
        if let Some(expected) = self.shape() {
            let found = key.shape();
            if (expected != found) {
                return Err(FuncVectorError::Shape { expected, found });
            }
        }
        let entry = self.entries.entry(key).or_insert_with(V::default);
        entry.check_compatible(&value)?;
        entry.merge_scaled(&value, 1.0);
        Ok(())
    }

    pub fn check_compatible(&self, other : &Self) -> Result<()> {
        if let (Some(expected), Some(found)) = (self.shape(), other.shape()) {
            if (expected != found) {
                return Err(FuncVectorError::Shape { expected, found });
            }
        }
        for (key, value) in other.entries.iter() {
            if let Some(mine) = self.entries.get(key) {
                mine.check_compatible(value)?;
            }
        }
        Ok(())
    }

    pub fn try_add(&self, other : &Self) -> Result<Self> {
        let mut result = self.clone();
        result.try_add_assign(other)?;
        Ok(result)
    }

    pub fn try_add_assign(&mut self, other : &Self) -> Result<()> {
        self.check_compatible(other)?;
        self.merge_scaled(other, 1.0);
        Ok(())
    }

    pub fn try_sub(&self, other : &Self) -> Result<Self> {
        let mut result = self.clone();
        result.try_sub_assign(other)?;
        Ok(result)
    }

    pub fn try_sub_assign(&mut self, other : &Self) -> Result<()> {
        self.check_compatible(other)?;
        self.merge_scaled(other, -1.0);
        Ok(())
    }

    pub fn pos(&self) -> Self {
        self.clone()
    }

    pub fn scale(&self, factor : f64) -> Self {
        Coefficient::scaled(self, factor)
    }

    pub fn divide(&self, divisor : f64) -> Self {
        Coefficient::scaled(self, 1.0 / divisor)
    }
}

impl<K : Ord, V> AlgebraMap<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key : &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key : &K) -> bool {
        self.entries.contains_key(key)
    }

    ///Keys in ascending order
    pub fn keys(&self) -> btree_map::Keys<'_, K, V> {
        self.entries.keys()
    }

    ///Values, aligned with [`AlgebraMap::keys`]
    pub fn values(&self) -> btree_map::Values<'_, K, V> {
        self.entries.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> Coefficient for AlgebraMap<K, V> {
    fn check_compatible(&self, other : &Self) -> Result<()> {
        AlgebraMap::check_compatible(self, other)
    }

    fn merge_scaled(&mut self, other : &Self, factor : f64) {
        for (key, value) in other.entries.iter() {
            let entry = self.entries.entry(key.clone()).or_insert_with(V::default);
            entry.merge_scaled(value, factor);
        }
    }

    fn scaled(&self, factor : f64) -> Self {
        let entries = self.entries.iter()
                          .map(|(key, value)| (key.clone(), value.scaled(factor)))
                          .collect();
        AlgebraMap {
            entries
        }
    }
}

impl AlgebraMap<ParamKey, f64> {
    ///The coefficient of `key`, zero if absent
    pub fn coefficient(&self, key : &ParamKey) -> f64 {
        self.entries.get(key).copied().unwrap_or(0.0)
    }

    pub fn values_array(&self) -> Array1<f64> {
        self.entries.values().copied().collect()
    }

    ///Projects every key to a scalar, failing if any key is a pair
    pub fn scalar_keys(&self) -> Result<Array1<f64>> {
        let mut result = Array::zeros((self.len(),));
        for (i, key) in self.entries.keys().enumerate() {
            result[[i,]] = key.as_scalar()?;
        }
        Ok(result)
    }

    ///Projects every key to its two components, failing if any key is a scalar
    pub fn pair_keys(&self) -> Result<(Array1<f64>, Array1<f64>)> {
        let n = self.len();
        let mut first = Array::zeros((n,));
        let mut second = Array::zeros((n,));
        for (i, key) in self.entries.keys().enumerate() {
            let (a, b) = key.as_pair()?;
            first[[i,]] = a;
            second[[i,]] = b;
        }
        Ok((first, second))
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Neg for &AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn neg(self) -> AlgebraMap<K, V> {
        self.scale(-1.0)
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Neg for AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn neg(self) -> AlgebraMap<K, V> {
        -&self
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Mul<f64> for &AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn mul(self, factor : f64) -> AlgebraMap<K, V> {
        self.scale(factor)
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Mul<f64> for AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn mul(self, factor : f64) -> AlgebraMap<K, V> {
        self.scale(factor)
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Div<f64> for &AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn div(self, divisor : f64) -> AlgebraMap<K, V> {
        self.divide(divisor)
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::Div<f64> for AlgebraMap<K, V> {
    type Output = AlgebraMap<K, V>;

    fn div(self, divisor : f64) -> AlgebraMap<K, V> {
        self.divide(divisor)
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::MulAssign<f64> for AlgebraMap<K, V> {
    fn mul_assign(&mut self, factor : f64) {
        for value in self.entries.values_mut() {
            *value = value.scaled(factor);
        }
    }
}

impl<K : Ord + Clone + Shaped, V : Coefficient> ops::DivAssign<f64> for AlgebraMap<K, V> {
    fn div_assign(&mut self, divisor : f64) {
        *self *= 1.0 / divisor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sin_like(pairs : &[(f64, f64)]) -> ParamMap {
        AlgebraMap::from_pairs(pairs.iter().map(|(k, v)| (ParamKey::scalar(*k), *v))).unwrap()
    }

    #[test]
    fn addition_merges_over_key_union() {
        let one = sin_like(&[(1.0, 1.4), (2.0, 3.0), (5.0, 1.0)]);
        let two = sin_like(&[(1.0, 0.1), (5.0, 1.0)]);
        let sum = one.try_add(&two).unwrap();

        assert_eq!(sum.len(), 3);
        assert!((sum.coefficient(&ParamKey::scalar(1.0)) - 1.5).abs() < 1e-12);
        assert_eq!(sum.coefficient(&ParamKey::scalar(2.0)), 3.0);
        assert_eq!(sum.coefficient(&ParamKey::scalar(5.0)), 2.0);
        //Operands are untouched
        assert_eq!(one.coefficient(&ParamKey::scalar(5.0)), 1.0);
    }

    #[test]
    fn subtraction_adds_missing_keys_negated() {
        let one = sin_like(&[(1.0, 2.0)]);
        let two = sin_like(&[(3.0, 4.0)]);
        let diff = one.try_sub(&two).unwrap();
        assert_eq!(diff.coefficient(&ParamKey::scalar(1.0)), 2.0);
        assert_eq!(diff.coefficient(&ParamKey::scalar(3.0)), -4.0);
    }

    #[test]
    fn in_place_ops_mutate_receiver() {
        let mut one = sin_like(&[(1.0, 2.0)]);
        let two = sin_like(&[(1.0, 0.5), (2.0, 1.0)]);
        one.try_add_assign(&two).unwrap();
        one.try_sub_assign(&sin_like(&[(2.0, 1.0)])).unwrap();
        assert_eq!(one.coefficient(&ParamKey::scalar(1.0)), 2.5);
        assert_eq!(one.coefficient(&ParamKey::scalar(2.0)), 0.0);
    }

    #[test]
    fn scalar_ops_touch_every_coefficient() {
        let map = sin_like(&[(1.0, 2.0), (4.0, -6.0)]);
        assert_eq!((&map * 0.5).values_array(), arr1(&[1.0, -3.0]));
        assert_eq!((&map / 2.0).values_array(), arr1(&[1.0, -3.0]));
        assert_eq!((-&map).values_array(), arr1(&[-2.0, 6.0]));
        assert_eq!(map.pos(), map);

        let mut scaled = map.clone();
        scaled *= 3.0;
        scaled /= 6.0;
        assert_eq!(scaled.values_array(), arr1(&[1.0, -3.0]));
    }

    #[test]
    fn repeated_keys_accumulate() {
        let map = sin_like(&[(2.0, 1.0), (2.0, 0.25)]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.coefficient(&ParamKey::scalar(2.0)), 1.25);
        assert_eq!(map.coefficient(&ParamKey::scalar(7.0)), 0.0);
    }

    #[test]
    fn mixing_scalar_and_pair_keys_fails() {
        let mut map = sin_like(&[(1.0, 1.0)]);
        let err = map.accumulate(ParamKey::pair(0.1, 0.2), 1.0).unwrap_err();
        assert_eq!(err, FuncVectorError::Shape { expected : KeyShape::Scalar, found : KeyShape::Pair });

        let pairs : ParamMap = AlgebraMap::from_pairs(vec![(ParamKey::pair(0.1, 0.2), 1.0)]).unwrap();
        assert!(map.try_add(&pairs).is_err());
        assert!(map.try_sub_assign(&pairs).is_err());
        assert!(pairs.scalar_keys().is_err());
        assert!(map.pair_keys().is_err());
    }

    #[test]
    fn cancelled_entries_are_kept() {
        let map = sin_like(&[(1.0, 1.0), (2.0, 2.0)]);
        let zero = map.try_sub(&map).unwrap();
        assert_eq!(zero.len(), 2);
        assert!(zero.values().all(|v| *v == 0.0));
    }

    #[test]
    fn keys_and_values_are_aligned() {
        let map : ParamMap = AlgebraMap::from_pairs(vec![(ParamKey::pair(0.5, 0.9), 2.0),
                                                        (ParamKey::pair(0.1, 0.3), 1.0)]).unwrap();
        let (a, b) = map.pair_keys().unwrap();
        assert_eq!(a, arr1(&[0.1, 0.5]));
        assert_eq!(b, arr1(&[0.3, 0.9]));
        assert_eq!(map.values_array(), arr1(&[1.0, 2.0]));
    }
}
