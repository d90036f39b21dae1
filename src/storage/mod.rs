// file: src/storage/mod.rs
// description: on-disk storage for uploaded files

pub mod uploads;

pub use uploads::UploadStore;
