//! Column buckets - coarse 1D spatial hash over body x positions.
//!
//! Bodies are grouped by `floor(x / width)`. Contact search looks at a body's
//! own column plus one on each side, which is exact as long as no pair of
//! touching bodies is further apart horizontally than one column width. A fast
//! body can in principle skip a column in one step; velocities in the jar stay
//! small enough that this does not happen in practice.

use std::collections::HashMap;

pub struct ColumnBuckets {
    width: f32,
    columns: HashMap<i32, Vec<usize>>,
    // Occupied column range of the last rebuild; empty while `lo > hi`
    lo: i32,
    hi: i32,
}

impl ColumnBuckets {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            columns: HashMap::new(),
            lo: i32::MAX,
            hi: i32::MIN,
        }
    }

    #[inline]
    pub fn column_of(&self, x: f32) -> i32 {
        (x / self.width).floor() as i32
    }

    /// Re-bucket from scratch. `xs` yields the x of body 0, 1, 2, ...
    pub fn rebuild<I>(&mut self, xs: I)
    where
        I: IntoIterator<Item = f32>,
    {
        // Keep allocations around; empty columns are simply skipped on lookup.
        for list in self.columns.values_mut() {
            list.clear();
        }
        self.lo = i32::MAX;
        self.hi = i32::MIN;
        for (idx, x) in xs.into_iter().enumerate() {
            let key = self.column_of(x);
            self.lo = self.lo.min(key);
            self.hi = self.hi.max(key);
            self.columns.entry(key).or_default().push(idx);
        }
    }

    pub fn column(&self, key: i32) -> &[usize] {
        self.columns.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Indices in the columns `column_of(x) - span ..= column_of(x) + span`.
    /// The walk is clipped to the occupied column range of the last rebuild.
    pub fn neighbors(&self, x: f32, span: i32) -> impl Iterator<Item = usize> + '_ {
        let key = self.column_of(x);
        let lo = key.saturating_sub(span).max(self.lo);
        let hi = key.saturating_add(span).min(self.hi);
        (lo..=hi).flat_map(move |k| self.column(k).iter().copied())
    }

    /// Column span that covers every body within `reach` horizontally.
    /// Saturates at `i32::MAX` for reaches far wider than a column.
    pub fn span_for(&self, reach: f32) -> i32 {
        if reach.is_nan() || reach <= 0.0 {
            return 1;
        }
        // float-to-int `as` saturates
        ((reach / self.width).floor() as i32).saturating_add(1)
    }

    #[cfg(test)]
    fn occupied_columns(&self) -> usize {
        self.columns.values().filter(|l| !l.is_empty()).count()
    }
}
