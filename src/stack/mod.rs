mod adapter;

pub use self::adapter::{Stack, StackContainer};
