pub mod pin;

pub use pin::{MemoryPinRecordRepository, PinRecordRepository};
