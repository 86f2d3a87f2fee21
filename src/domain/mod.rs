//! Domain name parsing and validation

pub mod validator;

pub use validator::{utils::parse_domain_input, DomainParts, DomainValidator, DEFAULT_TLD};

/// Common TLD lists
pub const POPULAR_TLDS: &[&str] = &[
    "com", "net", "org", "io", "ai", "co", "app", "dev", "tech", "cloud",
];

pub const STARTUP_TLDS: &[&str] = &["com", "io", "ai", "co", "app", "dev"];

pub const TECH_TLDS: &[&str] = &["ai", "tech", "dev", "app", "cloud", "io"];

/// Get TLD list by name
pub fn get_tld_list(name: &str) -> Option<Vec<String>> {
    let list = match name.to_lowercase().as_str() {
        "popular" => POPULAR_TLDS,
        "startup" => STARTUP_TLDS,
        "tech" => TECH_TLDS,
        _ => return None,
    };
    Some(list.iter().map(|s| s.to_string()).collect())
}

/// Resolve a comma-separated TLD argument; named lists expand in place
pub fn parse_tld_arg(arg: &str) -> Vec<String> {
    let mut tlds = Vec::new();
    for part in arg.split(',').map(|s| s.trim().trim_start_matches('.').to_lowercase()) {
        if part.is_empty() {
            continue;
        }
        match get_tld_list(&part) {
            Some(list) => tlds.extend(list),
            None => tlds.push(part),
        }
    }
    let mut seen = std::collections::HashSet::new();
    tlds.retain(|t| seen.insert(t.clone()));
    tlds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_lists() {
        assert!(get_tld_list("popular").unwrap().contains(&"com".to_string()));
        assert!(get_tld_list("Startup").is_some());
        assert!(get_tld_list("unknown").is_none());
    }

    #[test]
    fn test_parse_tld_arg_expands_and_dedupes() {
        let tlds = parse_tld_arg(".com, io,startup");
        assert_eq!(tlds[0], "com");
        assert_eq!(tlds[1], "io");
        assert_eq!(tlds.iter().filter(|t| *t == "com").count(), 1);
        assert!(tlds.contains(&"ai".to_string()));
    }
}
