pub mod memory_crud;
pub mod memory_search;
pub mod vector_search;
