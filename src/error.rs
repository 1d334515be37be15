use thiserror::Error;

/// Failure of one round trip to the checking service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Ошибка сервера ({status}): {detail}")]
    Http { status: u16, detail: String },

    #[error("Сервер недоступен: {0}")]
    Network(String),

    #[error("Некорректный ответ сервера: {0}")]
    Malformed(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Не удалось сформировать запрос: {0}")]
    Encode(String),
}

impl ApiError {
    /// The server refused the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}

/// Client-side form validation, raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Выберите файл для проверки")]
    NoFile,

    #[error("Нужен файл .docx, выбран: {0}")]
    WrongExtension(String),

    #[error("Введите логин и пароль")]
    MissingCredentials,

    #[error("Выберите шаблон")]
    NoTemplate,
}

impl From<FormError> for String {
    fn from(err: FormError) -> Self {
        err.to_string()
    }
}
