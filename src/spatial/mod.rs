pub mod buckets;

pub use buckets::ColumnBuckets;
