use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    /// The service row exists but its first version could not be stored.
    #[error("service {service_id} created but failed to add version: {source}")]
    PartialCreate {
        service_id: i32,
        #[source]
        source: Box<ServiceError>,
    },
    #[error("database error: {0}")]
    Db(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// True for errors caused by the caller's input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Model(models::errors::ModelError::Validation(_)))
    }
}
