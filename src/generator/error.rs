/// Errors that can occur while generating a synthetic marker table
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A sizing parameter was zero
    #[error("Invalid parameter `{name}`: {value} (must be a positive integer)")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Value that was supplied
        value: u64,
    },
}
