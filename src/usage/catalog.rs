//! Counter catalogs: the ordered, named (current, limit) pairs read from a record.
//!
//! A catalog is data rather than a fixed set of struct fields. Callers
//! declare each counter once as a name plus two accessors, and the order
//! of declaration is the tie-break order used by the ranker.

use serde::{Deserialize, Serialize};

/// One named measurement and its ceiling, either of which may be missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPair {
    pub name: String,
    pub current: Option<i64>,
    pub limit: Option<i64>,
}

impl CounterPair {
    pub fn new(name: impl Into<String>, current: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            name: name.into(),
            current,
            limit,
        }
    }

    /// Both values present and a positive limit
    pub fn is_complete(&self) -> bool {
        matches!((self.current, self.limit), (Some(_), Some(limit)) if limit > 0)
    }
}

impl<N: Into<String>> From<(N, i64, i64)> for CounterPair {
    fn from((name, current, limit): (N, i64, i64)) -> Self {
        CounterPair::new(name, Some(current), Some(limit))
    }
}

/// Reads one counter pair from a record of type `R`
pub struct CounterSpec<R> {
    pub name: &'static str,
    pub current: fn(&R) -> Option<i64>,
    pub limit: fn(&R) -> Option<i64>,
}

impl<R> CounterSpec<R> {
    pub const fn new(
        name: &'static str,
        current: fn(&R) -> Option<i64>,
        limit: fn(&R) -> Option<i64>,
    ) -> Self {
        Self {
            name,
            current,
            limit,
        }
    }

    pub fn read(&self, record: &R) -> CounterPair {
        CounterPair::new(self.name, (self.current)(record), (self.limit)(record))
    }
}

/// An explicitly ordered list of counter specs
pub struct Catalog<R: 'static> {
    specs: &'static [CounterSpec<R>],
}

impl<R: 'static> Catalog<R> {
    pub const fn new(specs: &'static [CounterSpec<R>]) -> Self {
        Self { specs }
    }

    /// Read every declared counter, in declaration order
    pub fn pairs(&self, record: &R) -> Vec<CounterPair> {
        self.specs.iter().map(|spec| spec.read(record)).collect()
    }

    /// Declared counter names, in order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|spec| spec.name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        used: Option<i64>,
        max: Option<i64>,
    }

    static SAMPLE_SPECS: [CounterSpec<Sample>; 2] = [
        CounterSpec::<Sample>::new("Used", |s| s.used, |s| s.max),
        CounterSpec::<Sample>::new("Constant", |_| Some(1), |_| Some(4)),
    ];

    #[test]
    fn test_catalog_reads_in_declaration_order() {
        let catalog = Catalog::new(&SAMPLE_SPECS);
        let pairs = catalog.pairs(&Sample {
            used: Some(3),
            max: None,
        });

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Used", "Constant"]);
        assert_eq!(pairs[0], CounterPair::new("Used", Some(3), None));
        assert_eq!(pairs[1], CounterPair::from(("Constant", 1, 4)));
    }

    #[test]
    fn test_is_complete() {
        assert!(CounterPair::from(("A", 1, 2)).is_complete());
        assert!(!CounterPair::new("B", None, Some(2)).is_complete());
        assert!(!CounterPair::new("C", Some(1), None).is_complete());
        assert!(!CounterPair::from(("D", 1, 0)).is_complete());
        assert!(!CounterPair::from(("E", 1, -5)).is_complete());
    }
}
