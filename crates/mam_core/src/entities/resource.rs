//! Linguist resources.
//!
//! Linguist records arrive from intake spreadsheets with messy free-text
//! names and contact fields; the registry wants a clean display name plus a
//! short unique resource code. The code scheme predates this bridge and is
//! kept byte-compatible: first-name prefix plus surname, uppercased, eight
//! characters at most.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};
use thiserror::Error;

use crate::catalog::{LINGUIST_FIELD_MAPS, LINGUIST_GROUP_CODE, LINGUIST_GROUP_DESC};
use crate::fieldmap::FieldMapError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+\d{1,2}\s?)?1?\s?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("phone pattern")
});

/// Rate fields are free text in the registry with a hard column limit.
const RATE_MAX_LEN: usize = 127;

/// Errors from resource composition.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("unable to generate a resource code from name: {0}")]
    CodeGeneration(String),

    #[error(transparent)]
    FieldMap(#[from] FieldMapError),
}

/// A linguist resource ready to be created in the registry.
#[derive(Debug, Clone)]
pub struct Linguist {
    pub name: String,
    pub email: String,
    /// Phone number found in the contact field, when there was one. Not a
    /// registry field; kept for intake reports.
    pub phone: String,
    pub transrate: String,
    pub qcrate: String,
    pub note: String,
    pub feedback: String,
    code: String,
}

impl Linguist {
    /// Build a linguist from intake fields, normalizing as the registry
    /// expects. Fails when no usable code can be derived from the name.
    pub fn new(
        name: &str,
        email: &str,
        transrate: &str,
        qcrate: &str,
        note: &str,
        feedback: &str,
    ) -> Result<Self, ResourceError> {
        let name = strip_parentheticals(name);
        let code = generate_code(&name)?;
        let (email, phone) = split_contact(email);
        Ok(Self {
            name,
            email,
            phone,
            transrate: truncate(transrate.trim(), RATE_MAX_LEN),
            qcrate: truncate(qcrate.trim(), RATE_MAX_LEN),
            note: note.to_string(),
            feedback: feedback.to_string(),
            code,
        })
    }

    /// The derived registry resource code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Creation document for the registry, under the linguists group.
    pub fn create_fragment(&self) -> Result<Value, ResourceError> {
        let mut jdict = json!({
            "default_group_code": {
                "default_group_code": LINGUIST_GROUP_CODE,
                "external_key": null,
                "group_code": LINGUIST_GROUP_CODE,
                "group_desc": LINGUIST_GROUP_DESC,
            },
            "resource_code": {"resource_code": self.code},
        });

        let fields: [(&str, &str); 6] = [
            ("name", &self.name),
            ("email", &self.email),
            ("transrate", &self.transrate),
            ("qcrate", &self.qcrate),
            ("note", &self.note),
            ("feedback", &self.feedback),
        ];
        for (name, value) in fields {
            let fragment = LINGUIST_FIELD_MAPS
                .get(name)?
                .make_fragment(&Value::String(value.to_string()))?;
            if let (Value::Object(target), Value::Object(source)) = (&mut jdict, fragment) {
                target.extend(source);
            }
        }
        Ok(jdict)
    }
}

/// Intake contact cells mix emails and phone numbers in one free-text
/// field. Pull out the first email address and the first standalone phone
/// number; without an email match the trimmed text is kept as-is.
fn split_contact(text: &str) -> (String, String) {
    let trimmed = text.trim();
    let phone = PHONE_RE
        .find_iter(trimmed)
        .find(|m| is_standalone_number(trimmed, m))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    let email = EMAIL_RE
        .find(trimmed)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| trimmed.to_string());
    (email, phone)
}

/// A candidate glued to more digits, letters, or an `@` is part of a larger
/// token (an id, an email local-part), not a phone number.
fn is_standalone_number(text: &str, m: &regex::Match) -> bool {
    let before = text[..m.start()].chars().next_back();
    let after = text[m.end()..].chars().next();
    before.map_or(true, |c| !c.is_ascii_digit())
        && after.map_or(true, |c| !c.is_ascii_alphanumeric() && c != '@')
}

/// Drop parenthetical asides, e.g. `"Ana Silva (BR PT)"` -> `"Ana Silva"`.
fn strip_parentheticals(name: &str) -> String {
    let mut clean = String::with_capacity(name.len());
    let mut depth = 0usize;
    for ch in name.trim().chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => clean.push(ch),
            _ => {}
        }
    }
    clean.trim().to_string()
}

/// Name parts too short or still carrying punctuation don't make good code
/// material.
fn is_code_part(part: &str) -> bool {
    part.chars().count() != 2 && !part.contains('(') && !part.contains(')')
}

fn generate_code(name: &str) -> Result<String, ResourceError> {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '\'' | '"'))
        .collect();
    let parts: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|p| is_code_part(p))
        .collect();

    let code = match parts.as_slice() {
        [] => return Err(ResourceError::CodeGeneration(name.to_string())),
        [only] => only.to_uppercase(),
        [first, last] => format!("{}{}", prefix(first, 3), last).to_uppercase(),
        [first, .., last] => {
            format!("{}{}{}", prefix(first, 3), prefix(first, 1), last).to_uppercase()
        }
    };
    Ok(truncate(&code, 8))
}

fn prefix(text: &str, chars: usize) -> String {
    text.chars().take(chars).collect()
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linguist(name: &str) -> Linguist {
        Linguist::new(name, "l@example.com", "0.12/word", "35/hr", "", "").unwrap()
    }

    #[test]
    fn parentheticals_are_stripped_from_names() {
        assert_eq!(linguist("Ana Silva (BR PT)").name, "Ana Silva");
        assert_eq!(linguist("  Kenji Sato ").name, "Kenji Sato");
    }

    #[test]
    fn two_part_names_make_prefix_plus_surname_codes() {
        assert_eq!(linguist("Ana Silva").code(), "ANASILVA");
        assert_eq!(linguist("Maria Gonzalez").code(), "MARGONZA");
    }

    #[test]
    fn single_part_names_use_the_whole_name() {
        assert_eq!(linguist("Cher").code(), "CHER");
    }

    #[test]
    fn codes_cap_at_eight_chars() {
        assert!(linguist("Konstantinos Papadopoulos").code().chars().count() <= 8);
    }

    #[test]
    fn unusable_names_fail() {
        assert!(matches!(
            Linguist::new("(TBD)", "", "", "", "", ""),
            Err(ResourceError::CodeGeneration(_))
        ));
    }

    #[test]
    fn fragment_carries_group_and_code() {
        let fragment = linguist("Ana Silva").create_fragment().unwrap();
        assert_eq!(fragment["resource_code"]["resource_code"], "ANASILVA");
        assert_eq!(fragment["default_group_code"]["group_code"], "LINGS");
        assert_eq!(fragment["resource_desc"], "Ana Silva");
        assert_eq!(fragment["A_field_1"], "0.12/word");
    }

    #[test]
    fn contact_field_splits_email_and_phone() {
        let l = Linguist::new("Ana Silva", "ana@x.com / +1 (555) 123-4567", "", "", "", "")
            .unwrap();
        assert_eq!(l.email, "ana@x.com");
        assert_eq!(l.phone, "+1 (555) 123-4567");
    }

    #[test]
    fn plain_email_has_no_phone() {
        let l = linguist("Ana Silva");
        assert_eq!(l.email, "l@example.com");
        assert!(l.phone.is_empty());
    }

    #[test]
    fn digits_inside_an_email_are_not_a_phone() {
        let l = Linguist::new("Ana Silva", "ana5551234567@x.com", "", "", "", "").unwrap();
        assert_eq!(l.email, "ana5551234567@x.com");
        assert!(l.phone.is_empty());
    }

    #[test]
    fn rates_are_trimmed_and_truncated() {
        let long_rate = "x".repeat(200);
        let l = Linguist::new("Ana Silva", "", &long_rate, "", "", "").unwrap();
        assert_eq!(l.transrate.chars().count(), RATE_MAX_LEN);
    }
}
