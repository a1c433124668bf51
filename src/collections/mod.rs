pub mod mutable_heap;
pub mod symmetric_matrix;

pub use mutable_heap::{ClosureOrder, HeapOrder, MutableHeap};
pub use symmetric_matrix::SymmetricMatrix;
