pub mod example_gallery;
pub mod image_file_reader;
pub mod image_file_writer;
