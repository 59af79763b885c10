// Naming helpers shared by the generators

use once_cell::sync::Lazy;
use regex::Regex;

static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid case boundary regex"));

/// `customerOrder` / `CustomerOrder` -> `customer-order`
pub fn camel_to_kebab(s: &str) -> String {
    CASE_BOUNDARY.replace_all(s, "$1-$2").to_lowercase()
}

pub fn upper_first_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display label: `customerOrder` -> `Customer Order`. Never used for identifiers.
pub fn humanize(s: &str) -> String {
    upper_first_camel_case(&CASE_BOUNDARY.replace_all(s, "$1 $2"))
}

/// English plural, keeping the casing of the input.
pub fn pluralize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    pluralizer::pluralize(s, 2, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_kebab() {
        assert_eq!(camel_to_kebab("customerOrder"), "customer-order");
        assert_eq!(camel_to_kebab("CustomerOrder"), "customer-order");
        assert_eq!(camel_to_kebab("address2Line"), "address2-line");
        assert_eq!(camel_to_kebab("customer"), "customer");
        assert_eq!(camel_to_kebab(""), "");
    }

    #[test]
    fn test_camel_to_kebab_is_idempotent() {
        let names = [
            "Customer",
            "customerOrder",
            "SalesLeadSource",
            "already-kebab",
            "HTTPRequest",
        ];
        for name in names {
            let once = camel_to_kebab(name);
            assert_eq!(camel_to_kebab(&once), once, "not idempotent for {}", name);

            let from_class = camel_to_kebab(&upper_first_camel_case(name));
            assert_eq!(camel_to_kebab(&from_class), from_class);
        }
    }

    #[test]
    fn test_first_letter_case() {
        assert_eq!(upper_first_camel_case("customerOrder"), "CustomerOrder");
        assert_eq!(lower_first_camel_case("CustomerOrder"), "customerOrder");
        assert_eq!(upper_first_camel_case(""), "");
        assert_eq!(lower_first_camel_case(""), "");
        assert_eq!(upper_first_camel_case("x"), "X");
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("customerOrder"), "Customer Order");
        assert_eq!(humanize("CustomerOrder"), "Customer Order");
        assert_eq!(humanize("assignedTo"), "Assigned To");
        assert_eq!(humanize("name"), "Name");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("Customer"), "Customers");
        assert_eq!(pluralize("customer"), "customers");
        assert_eq!(pluralize("company"), "companies");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize(""), "");
    }
}
