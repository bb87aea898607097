//! Feature table
//!
//! One `FeatureRecord` per unique valid sequence, in first-seen order.
use crate::features::{get_features, FeatureRecord, Quantity};
use log::{debug, warn};
use polars::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    quantities: Vec<Quantity>,
    records: Vec<FeatureRecord>,
    index: HashMap<String, usize>,
    skipped: usize,
}

impl FeatureTable {
    /// An empty table computing `quantities`, or every quantity when `None`.
    pub fn new(quantities: Option<&[Quantity]>) -> Self {
        let quantities = match quantities {
            Some(selected) => Quantity::all()
                .into_iter()
                .filter(|q| selected.contains(q))
                .collect(),
            None => Quantity::all(),
        };
        Self {
            quantities,
            ..Default::default()
        }
    }

    /// Build from the cells of a sequence column. Null, empty and unparseable cells are skipped.
    pub fn from_sequences<'a, I>(cells: I, quantities: Option<&[Quantity]>) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut table = Self::new(quantities);
        for cell in cells {
            table.push(cell);
        }
        table
    }

    /// Add one cell. Returns `true` if the cell holds a valid sequence.
    /// Repeated sequences are computed only once.
    pub fn push(&mut self, cell: Option<&str>) -> bool {
        let sequence = match cell {
            Some(s) if !s.is_empty() => s,
            Some(_) => {
                warn!("Skipping invalid sequence: ''");
                self.skipped += 1;
                return false;
            }
            None => {
                warn!("Skipping invalid sequence: null");
                self.skipped += 1;
                return false;
            }
        };
        if self.index.contains_key(sequence) {
            return true;
        }
        match get_features(sequence, Some(self.quantities.as_slice())) {
            Ok(record) => {
                debug!("computed {} features for {sequence}", record.values.len());
                self.index.insert(sequence.to_string(), self.records.len());
                self.records.push(record);
                true
            }
            Err(e) => {
                warn!("Skipping invalid sequence: {sequence} ({e})");
                self.skipped += 1;
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Cells that did not produce a record.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
    pub fn quantities(&self) -> &[Quantity] {
        &self.quantities
    }
    /// Output column names, excluding the sequence key.
    pub fn columns(&self) -> Vec<String> {
        self.quantities.iter().map(|q| q.to_string()).collect()
    }
    pub fn sequences(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.sequence.as_str())
    }
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }
    pub fn get(&self, sequence: &str) -> Option<&FeatureRecord> {
        self.position(sequence).map(|i| &self.records[i])
    }
    pub fn position(&self, sequence: &str) -> Option<usize> {
        self.index.get(sequence).copied()
    }

    /// The values of one quantity gathered by row index. `None` rows become null.
    pub(crate) fn gather(&self, quantity: Quantity, rows: &[Option<usize>]) -> Series {
        let value_at = |row: &Option<usize>| row.and_then(|i| self.records[i].get(quantity));
        if quantity.is_integer() {
            let values: Vec<Option<i64>> = rows
                .iter()
                .map(|row| value_at(row).and_then(|v| v.as_i64()))
                .collect();
            Series::new(quantity.to_string().into(), values)
        } else {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|row| value_at(row).and_then(|v| v.as_f64()))
                .collect();
            Series::new(quantity.to_string().into(), values)
        }
    }

    /// One row per record: the key column `key_name` followed by one column per quantity.
    pub fn to_dataframe(&self, key_name: &str) -> PolarsResult<DataFrame> {
        let all_rows: Vec<Option<usize>> = (0..self.records.len()).map(Some).collect();
        let keys: Vec<&str> = self.sequences().collect();
        let mut columns: Vec<Column> = vec![Series::new(key_name.into(), keys).into()];
        columns.extend(
            self.quantities
                .iter()
                .map(|q| Column::from(self.gather(*q, &all_rows))),
        );
        DataFrame::new(columns)
    }
}
