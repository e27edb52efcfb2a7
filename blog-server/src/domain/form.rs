use std::collections::{BTreeMap, HashMap};

use validator::ValidateEmail;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";
pub(crate) const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email address.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text { max_length: Option<usize> },
    Email,
}

impl FieldKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FormSchema {
    pub(crate) name: &'static str,
    pub(crate) fields: &'static [FieldSpec],
}

pub(crate) const EMAIL_POST_FORM: FormSchema = FormSchema {
    name: "EmailPostForm",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text {
                max_length: Some(25),
            },
            required: true,
        },
        FieldSpec {
            name: "email",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "to",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "comments",
            kind: FieldKind::Text { max_length: None },
            required: false,
        },
    ],
};

pub(crate) const COMMENT_FORM: FormSchema = FormSchema {
    name: "CommentForm",
    fields: &[
        FieldSpec {
            name: "name",
            kind: FieldKind::Text {
                max_length: Some(80),
            },
            required: true,
        },
        FieldSpec {
            name: "email",
            kind: FieldKind::Email,
            required: true,
        },
        FieldSpec {
            name: "body",
            kind: FieldKind::Text { max_length: None },
            required: true,
        },
    ],
};

/// Submitted field values, as received.
pub(crate) type RawForm = HashMap<String, String>;

/// Field name -> error messages.
pub(crate) type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CleanedData(BTreeMap<&'static str, String>);

impl CleanedData {
    /// Blank optional fields clean to `""`.
    fn take(&mut self, name: &str) -> String {
        self.0.remove(name).unwrap_or_default()
    }
}

impl FormSchema {
    /// Validates raw input against the schema.
    ///
    /// Values are trimmed before checks. Keys not in the schema are ignored.
    pub(crate) fn validate(&self, raw: &RawForm) -> Result<CleanedData, FieldErrors> {
        let mut cleaned = BTreeMap::new();
        let mut errors = FieldErrors::new();

        for field in self.fields {
            let value = raw
                .get(field.name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default();

            match check_field(field, &value) {
                Ok(()) => {
                    cleaned.insert(field.name, value);
                }
                Err(message) => {
                    errors.entry(field.name.to_string()).or_default().push(message);
                }
            }
        }

        if errors.is_empty() {
            Ok(CleanedData(cleaned))
        } else {
            Err(errors)
        }
    }
}

fn check_field(field: &FieldSpec, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return if field.required {
            Err(REQUIRED_MESSAGE.to_string())
        } else {
            Ok(())
        };
    }

    match field.kind {
        FieldKind::Text {
            max_length: Some(max),
        } => {
            let len = value.chars().count();
            if len > max {
                return Err(format!(
                    "Ensure this value has at most {max} characters (it has {len})."
                ));
            }
        }
        FieldKind::Text { max_length: None } => {}
        FieldKind::Email => {
            if !value.validate_email() || !has_qualified_domain(value) {
                return Err(INVALID_EMAIL_MESSAGE.to_string());
            }
        }
    }
    Ok(())
}

// `validator` accepts dotless hosts such as `bob@example`; only `localhost`
// and bracketed IP literals may go without a top-level domain.
fn has_qualified_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    domain.eq_ignore_ascii_case("localhost")
        || domain.starts_with('[')
        || domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// A form as presented back to the client: schema, submitted data and errors.
#[derive(Debug, Clone)]
pub(crate) struct FormState {
    pub(crate) schema: FormSchema,
    pub(crate) data: BTreeMap<String, String>,
    pub(crate) errors: FieldErrors,
    pub(crate) is_bound: bool,
}

impl FormState {
    pub(crate) fn unbound(schema: FormSchema) -> Self {
        Self {
            schema,
            data: BTreeMap::new(),
            errors: FieldErrors::new(),
            is_bound: false,
        }
    }

    /// Bound form keeping only the schema's fields from the raw input.
    pub(crate) fn bound(schema: FormSchema, raw: &RawForm, errors: FieldErrors) -> Self {
        let data = schema
            .fields
            .iter()
            .filter_map(|field| {
                raw.get(field.name)
                    .map(|value| (field.name.to_string(), value.clone()))
            })
            .collect();

        Self {
            schema,
            data,
            errors,
            is_bound: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmailPostForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) to: String,
    pub(crate) comments: String,
}

impl EmailPostForm {
    pub(crate) fn validate(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut cleaned = EMAIL_POST_FORM.validate(raw)?;
        Ok(Self {
            name: cleaned.take("name"),
            email: cleaned.take("email"),
            to: cleaned.take("to"),
            comments: cleaned.take("comments"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommentForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) body: String,
}

impl CommentForm {
    pub(crate) fn validate(raw: &RawForm) -> Result<Self, FieldErrors> {
        let mut cleaned = COMMENT_FORM.validate(raw)?;
        Ok(Self {
            name: cleaned.take("name"),
            email: cleaned.take("email"),
            body: cleaned.take("body"),
        })
    }
}
