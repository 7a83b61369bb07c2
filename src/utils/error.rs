use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Index {index} out of range (1..={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Input stream closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Configuration,
    UserInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FarmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FarmError::CsvError(_) | FarmError::IoError(_) => ErrorCategory::Storage,
            FarmError::ConfigError { .. } | FarmError::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            FarmError::InvalidValueError { .. }
            | FarmError::IndexOutOfRange { .. }
            | FarmError::InputClosed => ErrorCategory::UserInput,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FarmError::InputClosed => ErrorSeverity::Low,
            FarmError::InvalidValueError { .. } | FarmError::IndexOutOfRange { .. } => {
                ErrorSeverity::Medium
            }
            FarmError::ConfigError { .. } | FarmError::ConfigValidationError { .. } => {
                ErrorSeverity::High
            }
            FarmError::CsvError(_) | FarmError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Short message meant for the person at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FarmError::CsvError(e) => format!("Arquivo de dados corrompido: {}", e),
            FarmError::IoError(e) => format!("Falha ao acessar os arquivos de dados: {}", e),
            FarmError::ConfigError { message } => format!("Configuração inválida: {}", message),
            FarmError::ConfigValidationError { field, message } => {
                format!("Configuração inválida em '{}': {}", field, message)
            }
            FarmError::InvalidValueError { field, value, .. } => {
                format!("Valor inválido para {}: '{}'", field, value)
            }
            FarmError::IndexOutOfRange { index, .. } => format!("Número inválido: {}", index),
            FarmError::InputClosed => "Entrada encerrada.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Storage => {
                "Verifique os arquivos CSV no diretório de dados ou remova-os para começar do zero"
            }
            ErrorCategory::Configuration => "Revise o arquivo TOML e os parâmetros da linha de comando",
            ErrorCategory::UserInput => "Digite um valor válido ou # para voltar",
        }
    }
}

pub type Result<T> = std::result::Result<T, FarmError>;
