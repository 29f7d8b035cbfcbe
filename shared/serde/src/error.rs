use thiserror::Error;

/// Errors that can occur while reading serialized bits
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The reader ran out of bits before the value was complete
    #[error("Bit buffer exhausted: needed {needed} more bits, {remaining} remaining")]
    Exhausted { needed: u32, remaining: u32 },

    /// The bits read do not describe a valid value of the requested type
    #[error("Invalid value while reading {type_name}")]
    InvalidValue { type_name: &'static str },
}
