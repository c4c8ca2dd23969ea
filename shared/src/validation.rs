//! Client-side form validation, run before anything is dispatched.

use crate::{CategoryId, CategoryRequest, LoginRequest, RegisterRequest};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Category name is required.")]
    EmptyCategoryName,
    #[error("Please select a category.")]
    CategoryNotSelected,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Missing fields are reported first, then length, then mismatch
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if is_blank(&self.name)
            || is_blank(&self.email)
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// What a category form submit turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySubmission {
    Create(CategoryRequest),
    Update {
        id: CategoryId,
        request: CategoryRequest,
    },
}

/// Single-record category form; `edit_id` switches submit to an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub edit_id: Option<CategoryId>,
}

impl CategoryForm {
    pub fn begin_edit(&mut self, id: CategoryId, name: &str) {
        self.edit_id = Some(id);
        self.name = name.to_string();
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.edit_id = None;
    }

    pub fn is_editing(&self) -> bool {
        self.edit_id.is_some()
    }

    pub fn submission(&self) -> Result<CategorySubmission, ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::EmptyCategoryName);
        }
        let request = CategoryRequest {
            name: self.name.trim().to_string(),
        };
        Ok(match self.edit_id {
            Some(id) => CategorySubmission::Update { id, request },
            None => CategorySubmission::Create(request),
        })
    }
}
