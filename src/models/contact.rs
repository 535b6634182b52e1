use serde::{Deserialize, Serialize};

/// Body of a contact submission, built from the two dialog answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactForm {
    pub email: String,
    pub message: String,
}
