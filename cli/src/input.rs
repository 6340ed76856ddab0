use std::collections::HashMap;
use anyhow::{anyhow, Result};

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

/// Splits `key:value` tokens from the free words that make up the name.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(char::is_whitespace) {
                metadata.insert(key.to_lowercase(), value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

/// Expands an abbreviated key (`sev` -> `severity`) when the prefix is unique.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

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

pub fn parse_yes_no(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        other => Err(anyhow!("Expected yes or no, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "Leg".to_string(),
            "cramps".to_string(),
            "sev:6".to_string(),
            "note:woke at 3:40".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.name, "Leg cramps");
        assert_eq!(parsed.metadata.get("sev"), Some(&"6".to_string()));
        assert_eq!(parsed.metadata.get("note"), Some(&"woke at 3:40".to_string()));
    }

    #[test]
    fn test_colon_inside_name_word() {
        let args = vec!["ratio 1:2".to_string(), ":x".to_string()];
        let parsed = parse_args(&args);
        assert_eq!(parsed.name, "ratio 1:2 :x");
        assert!(parsed.metadata.is_empty());
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["severity", "still", "note", "date"];

        assert_eq!(expand_key("sev", &candidates).unwrap(), "severity");
        assert_eq!(expand_key("sti", &candidates).unwrap(), "still");
        assert_eq!(expand_key("n", &candidates).unwrap(), "note");
        assert_eq!(expand_key("date", &candidates).unwrap(), "date");

        // Ambiguous
        assert!(expand_key("s", &candidates).is_err());
        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("Yes").unwrap());
        assert!(!parse_yes_no("n").unwrap());
        assert!(parse_yes_no("maybe").is_err());
    }
}
