use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheCacheError {
    #[error("Invalid coordinates '{0}': expected '<longitude>,<latitude>'")]
    Coordinates(String),

    #[error("Service '{0}' not present in the discovery map")]
    UnknownService(String),
}
