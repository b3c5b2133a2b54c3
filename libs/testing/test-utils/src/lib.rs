//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated in-memory SQLite, or a PostgreSQL container
//!   with the `postgres` feature
//! - `TestDataBuilder`: deterministic test data
//! - `assertions`: assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("user", "main");
//! }
//! ```

mod database;

pub use database::TestDatabase;

use uuid::Uuid;

/// Builder for test data with deterministic randomization
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name so reruns produce the same data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic UUID derived from the seed, never produced by the store
    pub fn uuid(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `"<prefix> <seed> <suffix>"`, kept under 100 characters
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("user", "main");
    /// assert!(name.starts_with("user "));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("{} {} {}", prefix, self.seed, suffix)
    }

    /// Age in [0, 120]
    pub fn age(&self) -> i32 {
        (self.seed % 121) as i32
    }

    /// Six digit postal code
    pub fn pincode(&self) -> String {
        format!("{:06}", self.seed % 1_000_000)
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Every id in `ids` is distinct
    pub fn assert_all_unique(ids: &[Uuid], context: &str) {
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(
            unique.len(),
            ids.len(),
            "{}: expected {} unique ids, got {}",
            context,
            ids.len(),
            unique.len()
        );
    }
}
