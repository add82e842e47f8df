pub mod directory_source;
