use crate::extract::Field;
use crate::record::ProductRecord;
use indexmap::IndexMap;
use serde::Serialize;

/// Product records in crawl order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<ProductRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record; insertion order is crawl order
    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }

    /// Number of records per field that carry the sentinel instead of a value
    ///
    /// Only fields with at least one sentinel appear; a record with an empty
    /// specifications mapping counts towards [`Field::Specifications`].
    pub fn unavailable_counts(&self) -> IndexMap<Field, usize> {
        let mut counts = IndexMap::new();
        for field in Field::ALL {
            let missing = self
                .records
                .iter()
                .filter(|record| match record.get(field) {
                    Some(value) => !value.is_available(),
                    None => record.specifications.is_empty(),
                })
                .count();
            if missing > 0 {
                counts.insert(field, missing);
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ProductRecord;
    type IntoIter = std::slice::Iter<'a, ProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ProductRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ProductRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
