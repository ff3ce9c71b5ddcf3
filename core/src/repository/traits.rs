use anyhow::Result;

/// Durable key-value storage partitioned into named buckets.
///
/// Each call is one transaction: it either commits fully or leaves the
/// store untouched.
pub trait BucketStore {
    /// Creates `bucket` if it does not exist yet. Never touches existing data.
    fn ensure(&self, bucket: &str) -> Result<()>;
    fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;
    fn put(&self, bucket: &str, key: &str, value: &[u8]) -> Result<()>;
}
