/// One of the three text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

/// The single feedback region: empty, or exactly one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    None,
    Error(String),
    Success(String),
}

/// Current contents of the inputs and the feedback region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub feedback: Feedback,
}

impl FormState {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    pub(crate) fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.feedback {
            Feedback::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.feedback {
            Feedback::Success(message) => Some(message),
            _ => None,
        }
    }

    pub(crate) fn clear_fields(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
    }
}
