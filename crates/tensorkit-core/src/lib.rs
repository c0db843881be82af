pub mod tensor;
pub mod storage;
pub mod shape;
pub mod dtype;
pub mod error;

pub use tensor::Tensor;
pub use storage::Storage;
pub use shape::Shape;
pub use dtype::{DataType, Element};
pub use error::{TensorError, TensorResult};
