pub mod app;
pub mod config;
pub mod error;
pub mod db {
    pub mod archive_repository;
    pub mod connection;
    pub mod models;
    pub mod tag_repository;
    pub mod work_repository;
}
pub mod api {
    pub mod archive;
    pub mod client_json;
    pub mod errors;
    pub mod payload;
    pub mod tags;
    pub mod works;

    #[cfg(test)]
    pub(crate) mod memory;
}
