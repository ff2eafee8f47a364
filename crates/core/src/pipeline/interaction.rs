use thiserror::Error;

use crate::imaging::infrastructure::example_gallery::GalleryError;

/// Failure paths a user can hit while preparing a detection run.
///
/// Each variant maps to one message shown in place of a result; none of
/// them is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("A pasta '{0}' não foi encontrada. Por favor, crie-a no mesmo diretório do aplicativo.")]
    MissingExampleDirectory(String),
    #[error("Nenhuma imagem encontrada na pasta '{0}'. Adicione algumas imagens de exemplo.")]
    NoExampleImages(String),
    #[error("Por favor, carregue uma imagem ou selecione um exemplo primeiro.")]
    NoImageSelected,
    #[error("Não foi possível abrir a imagem: {0}")]
    UnreadableImage(String),
}

impl InteractionError {
    /// Warnings leave the interaction usable; everything else is an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, InteractionError::NoExampleImages(_))
    }
}

impl From<&GalleryError> for InteractionError {
    fn from(err: &GalleryError) -> Self {
        match err {
            GalleryError::MissingDirectory(dir) => {
                InteractionError::MissingExampleDirectory(dir.display().to_string())
            }
            other => InteractionError::UnreadableImage(other.to_string()),
        }
    }
}
