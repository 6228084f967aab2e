use std::{collections::BTreeSet, sync::Arc};

use crate::MonthDay;

// -----------------------------------------------------------------------------
// ExcludedDays
// -----------------------------------------------------------------------------
/// Set of days excluded every year.
///
/// # Lightweight
/// The set is wrapped by [`Arc`] and copied on write.
/// Cloning is cheap, and a clone taken as a snapshot never observes later updates
/// of the original.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExcludedDays(Arc<BTreeSet<MonthDay>>);

//
// construction
//
impl ExcludedDays {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FromIterator<MonthDay> for ExcludedDays {
    #[inline]
    fn from_iter<I: IntoIterator<Item = MonthDay>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

//
// ser/de
//
impl serde::Serialize for ExcludedDays {
    #[inline]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> serde::Deserialize<'de> for ExcludedDays {
    #[inline]
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Vec::<MonthDay>::deserialize(deserializer)?;
        Ok(days.into_iter().collect())
    }
}

impl schemars::JsonSchema for ExcludedDays {
    fn schema_name() -> String {
        "ExcludedDays".to_string()
    }
    fn schema_id() -> std::borrow::Cow<'static, str> {
        "qcalendar::ExcludedDays".into()
    }
    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <BTreeSet<MonthDay> as schemars::JsonSchema>::json_schema(gen)
    }
}

//
// methods
//
impl ExcludedDays {
    /// Add `day` to the set. Returns `false` if it was already excluded.
    pub fn insert(&mut self, day: MonthDay) -> bool {
        if self.0.contains(&day) {
            return false;
        }
        Arc::make_mut(&mut self.0).insert(day)
    }

    /// Remove `day` from the set. Returns `false` if it was not excluded.
    pub fn remove(&mut self, day: &MonthDay) -> bool {
        if !self.0.contains(day) {
            return false;
        }
        Arc::make_mut(&mut self.0).remove(day)
    }

    #[inline]
    pub fn contains(&self, day: &MonthDay) -> bool {
        self.0.contains(day)
    }

    #[inline]
    pub fn clear(&mut self) {
        if !self.0.is_empty() {
            self.0 = Arc::default();
        }
    }

    /// Replace the whole set. An empty iterator clears it.
    #[inline]
    pub fn replace<I: IntoIterator<Item = MonthDay>>(&mut self, days: I) {
        *self = days.into_iter().collect();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over excluded days, from January 1st to December 31st.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = MonthDay> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn to_vec(&self) -> Vec<MonthDay> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use maplit::btreeset;

    use super::*;

    fn md(m: u32, d: u32) -> MonthDay {
        MonthDay::new(m, d).unwrap()
    }

    #[test]
    fn test_insert_idempotent() {
        let mut days = ExcludedDays::new();

        assert!(days.insert(md(1, 1)));
        assert!(!days.insert(md(1, 1)));
        assert_eq!(days.len(), 1);
        assert!(days.contains(&md(1, 1)));
    }

    #[test]
    fn test_remove_idempotent() {
        let mut days: ExcludedDays = [md(1, 1), md(6, 23)].into_iter().collect();

        assert!(days.remove(&md(6, 23)));
        assert!(!days.remove(&md(6, 23)));
        assert!(!days.remove(&md(12, 25)));
        assert_eq!(days.to_vec(), vec![md(1, 1)]);
    }

    #[test]
    fn test_replace_and_clear() {
        let mut days: ExcludedDays = [md(1, 1)].into_iter().collect();

        days.replace([md(2, 1), md(2, 1), md(3, 1)]);
        assert_eq!(days.to_vec(), vec![md(2, 1), md(3, 1)]);

        days.replace([]);
        assert!(days.is_empty());

        days.insert(md(4, 1));
        days.clear();
        assert!(days.is_empty());
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut days: ExcludedDays = [md(1, 1)].into_iter().collect();
        let snapshot = days.clone();

        days.insert(md(2, 1));
        days.remove(&md(1, 1));

        assert_eq!(snapshot.to_vec(), vec![md(1, 1)]);
        assert_eq!(days.to_vec(), vec![md(2, 1)]);
    }

    #[test]
    fn test_iter_sorted() {
        let days: ExcludedDays = [md(12, 25), md(1, 1), md(6, 23)].into_iter().collect();

        let tested = days.iter().collect::<BTreeSet<_>>();

        assert_eq!(tested, btreeset! {md(1, 1), md(6, 23), md(12, 25)});
        assert_eq!(days.to_vec(), vec![md(1, 1), md(6, 23), md(12, 25)]);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::json!(["--12-25", "--01-01", "--01-01"]);

        let days: ExcludedDays = serde_json::from_value(json).unwrap();

        assert_eq!(days.to_vec(), vec![md(1, 1), md(12, 25)]);
        assert_eq!(
            serde_json::to_value(&days).unwrap(),
            serde_json::json!(["--01-01", "--12-25"])
        );
    }
}
