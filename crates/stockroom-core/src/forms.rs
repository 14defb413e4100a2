//! Create-form model and the validation gate applied before any submission.
//!
//! A [`Form`] is the client-side stand-in for the modal's input elements: an
//! ordered list of named text values. [`validate_form`] applies the rules that
//! every input must be filled and, on the store form, that the email looks
//! like `local@domain.tld`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Shown next to the email input when its format is rejected.
pub const EMAIL_HINT: &str = "example: hi@gmail.com";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\w.-]+@[\w-]+\.[a-z]{2,4}$").expect("valid email regex"));

const STORE_FIELDS: &[&str] = &[
    "Name",
    "Email",
    "PhoneNumber",
    "Address",
    "Established",
    "FloorArea",
];

const PRODUCT_FIELDS: &[&str] = &[
    "Name",
    "Price",
    "Specs",
    "Rating",
    "SupplierInfo",
    "MadeIn",
    "ProductionCompanyName",
    "Status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormKind {
    Store,
    Product,
}

impl FormKind {
    #[must_use]
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Store => STORE_FIELDS,
            FormKind::Product => PRODUCT_FIELDS,
        }
    }

    fn default_value(self, field: &str) -> &'static str {
        match (self, field) {
            (FormKind::Product, "Status") => "OK",
            _ => "",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormKind::Store => write!(f, "store"),
            FormKind::Product => write!(f, "product"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    kind: FormKind,
    values: Vec<(&'static str, String)>,
}

impl Form {
    #[must_use]
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|&field| (field, kind.default_value(field).to_string()))
            .collect();
        Self { kind, values }
    }

    #[must_use]
    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Resolve a user-typed field name (case-insensitive) to its canonical spelling.
    #[must_use]
    pub fn field_name(&self, field: &str) -> Option<&'static str> {
        self.kind
            .fields()
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(field))
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or_default()
    }

    /// Set a field's value. Returns `false` if the form has no such field.
    pub fn set(&mut self, field: &str, value: &str) -> bool {
        match self
            .values
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(field))
        {
            Some((_, slot)) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Reset every input to its initial value.
    pub fn clear(&mut self) {
        let kind = self.kind;
        for (name, value) in &mut self.values {
            *value = kind.default_value(name).to_string();
        }
    }
}

/// Outcome of [`validate_form`]: offending fields plus the optional email hint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub invalid: BTreeSet<&'static str>,
    pub email_hint: Option<&'static str>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Flag additional fields, e.g. ones that failed type conversion.
    pub fn flag<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.invalid.extend(fields);
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Apply the submission gate to a form.
///
/// Every input must be non-empty (whitespace counts as empty). The store
/// form's `Email` must additionally be a `local@domain.tld` address; a format
/// failure also sets [`EMAIL_HINT`].
#[must_use]
pub fn validate_form(form: &Form) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (name, value) in form.fields() {
        if value.trim().is_empty() {
            report.invalid.insert(name);
        }
    }

    if form.kind() == FormKind::Store && !is_valid_email(form.value("Email")) {
        report.invalid.insert("Email");
        report.email_hint = Some(EMAIL_HINT);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_store_form(email: &str) -> Form {
        let mut form = Form::new(FormKind::Store);
        form.set("Name", "Corner Shop");
        form.set("Email", email);
        form.set("PhoneNumber", "555-0100");
        form.set("Address", "12 Main St");
        form.set("Established", "2019-07-01");
        form.set("FloorArea", "85");
        form
    }

    #[test]
    fn complete_store_form_passes() {
        let report = validate_form(&filled_store_form("user@domain.com"));
        assert!(report.is_valid(), "unexpected report: {report:?}");
        assert_eq!(report.email_hint, None);
    }

    #[test]
    fn email_without_tld_is_blocked_with_hint() {
        let report = validate_form(&filled_store_form("user@domain"));
        assert!(!report.is_valid());
        assert_eq!(report.invalid.iter().copied().collect::<Vec<_>>(), vec!["Email"]);
        assert_eq!(report.email_hint, Some(EMAIL_HINT));
    }

    #[test]
    fn missing_field_is_flagged() {
        let mut form = filled_store_form("user@domain.com");
        form.set("Address", "   ");
        let report = validate_form(&form);
        assert!(report.invalid.contains("Address"));
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.email_hint, None);
    }

    #[test]
    fn empty_store_form_flags_every_field() {
        let report = validate_form(&Form::new(FormKind::Store));
        assert_eq!(report.invalid.len(), STORE_FIELDS.len());
        assert_eq!(report.email_hint, Some(EMAIL_HINT));
    }

    #[test]
    fn product_form_has_no_email_rule() {
        let mut form = Form::new(FormKind::Product);
        for (field, value) in [
            ("Name", "Kettle"),
            ("Price", "19.99"),
            ("Specs", "1.7L"),
            ("Rating", "4"),
            ("SupplierInfo", "Acme"),
            ("MadeIn", "Poland"),
            ("ProductionCompanyName", "Acme Ltd"),
        ] {
            assert!(form.set(field, value));
        }
        let report = validate_form(&form);
        assert!(report.is_valid(), "unexpected report: {report:?}");
    }

    #[test]
    fn email_pattern_cases() {
        assert!(is_valid_email("hi@gmail.com"));
        assert!(is_valid_email("first.last-x@mail-host.ORG"));
        assert!(!is_valid_email("hi@gmail"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("hi@gmail.museums"));
        assert!(!is_valid_email("hi gmail.com"));
    }

    #[test]
    fn set_is_case_insensitive_and_rejects_unknown_fields() {
        let mut form = Form::new(FormKind::Store);
        assert!(form.set("phonenumber", "555"));
        assert_eq!(form.get("PhoneNumber"), Some("555"));
        assert!(!form.set("Status", "OK"));
        assert_eq!(form.field_name("floorarea"), Some("FloorArea"));
    }

    #[test]
    fn clear_restores_defaults() {
        let mut form = Form::new(FormKind::Product);
        form.set("Name", "Kettle");
        form.set("Status", "STORAGE");
        form.clear();
        assert_eq!(form.get("Name"), Some(""));
        assert_eq!(form.get("Status"), Some("OK"));
    }
}
