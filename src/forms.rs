//! Form state collected by the views and its client-side validation.
//!
//! Validation runs before any request is built; a failing form never
//! reaches the network.

use crate::error::FormError;

/// Name/value pairs sent as a form body.
pub type FormFields = Vec<(&'static str, String)>;

pub const DOCX_EXTENSION: &str = ".docx";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<FormFields, FormError> {
        credentials(&self.username, &self.password)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

impl RegisterForm {
    /// Optional fields are only sent when filled in.
    pub fn validate(&self) -> Result<FormFields, FormError> {
        let mut fields = credentials(&self.username, &self.password)?;
        for (name, value) in [("email", &self.email), ("full_name", &self.full_name)] {
            let value = value.trim();
            if !value.is_empty() {
                fields.push((name, value.to_string()));
            }
        }
        Ok(fields)
    }
}

fn credentials(username: &str, password: &str) -> Result<FormFields, FormError> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(FormError::MissingCredentials);
    }
    Ok(vec![
        ("username", username.to_string()),
        ("password", password.to_string()),
    ])
}

/// Anything that can stand in for a picked file.
pub trait UploadFile {
    fn file_name(&self) -> String;
}

impl UploadFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }
}

#[derive(Debug, Clone)]
pub struct CheckForm<F> {
    pub file: Option<F>,
    pub template: String,
}

/// A check request that passed validation.
#[derive(Debug, Clone)]
pub struct CheckSubmission<F> {
    pub file: F,
    pub file_name: String,
    pub template: String,
}

impl<F: UploadFile> CheckForm<F> {
    /// The extension check is by name only; content type is not inspected.
    pub fn validate(self) -> Result<CheckSubmission<F>, FormError> {
        let file = self.file.ok_or(FormError::NoFile)?;
        let file_name = file.file_name();
        if !has_docx_extension(&file_name) {
            return Err(FormError::WrongExtension(file_name));
        }

        let template = self.template.trim().to_string();
        if template.is_empty() {
            return Err(FormError::NoTemplate);
        }

        Ok(CheckSubmission {
            file,
            file_name,
            template,
        })
    }
}

pub fn has_docx_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(DOCX_EXTENSION)
}
