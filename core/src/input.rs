use std::collections::HashMap;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use crate::time::parse_human_date;
use crate::view::form::NewTaskForm;

/// Keys recognised in `key:value` words of an add command.
pub const KNOWN_KEYS: &[&str] = &["due"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

/// Splits words into a title and `key:value` metadata. Keys are expanded
/// against [`KNOWN_KEYS`]; a word whose key matches nothing stays part of
/// the title, so "Note:call bob" is kept verbatim.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                if let Ok(full_key) = expand_key(key, KNOWN_KEYS) {
                    metadata.insert(full_key, value.to_string());
                    continue;
                }
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Builds the add-task form from terminal words such as
/// `Buy milk due:tomorrow`. Human dates are resolved against `today`; text
/// that doesn't resolve is passed through for the form check to reject.
pub fn parse_new_task(args: &[String], today: NaiveDate) -> NewTaskForm {
    let parsed = parse_args(args);
    let due_date = match parsed.metadata.get("due") {
        Some(raw) => match parse_human_date(raw, today) {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => raw.clone(),
        },
        None => String::new(),
    };

    NewTaskForm::new(parsed.title, due_date)
}
