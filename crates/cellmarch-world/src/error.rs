use cellmarch_core::CellmarchError;
use cellmarch_persist::PersistError;
use cellmarch_settings::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("invalid settings: {}", join(.0))]
    InvalidSettings(Vec<ValidationError>),

    #[error(transparent)]
    Grid(#[from] CellmarchError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
