use bayesnet_model::ModelError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplingError {
    #[error("Unknown variable '{name}'")]
    UnknownVariable { name: String },

    #[error("Variable '{name}' cannot be both queried and observed")]
    ObservedQueryVariable { name: String },

    #[error("Direct sampling does not accept evidence")]
    UnexpectedEvidence,

    #[error("Undefined result: total weight is zero ({accepted} of {attempts} samples carried weight)")]
    UndefinedResult { attempts: usize, accepted: usize },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),
}
