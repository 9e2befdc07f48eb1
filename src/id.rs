pub trait UniqueGenerator: std::fmt::Debug {
    type Output: std::fmt::Debug;
    /// Generate a unique value
    fn generate(&mut self) -> Self::Output;
}

/// Generates string node identifiers from random v4 UUIDs
#[derive(Default, Debug)]
pub struct UuidGenerator;

impl UniqueGenerator for UuidGenerator {
    type Output = String;

    fn generate(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
