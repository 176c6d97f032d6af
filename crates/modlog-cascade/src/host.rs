//! Host page abstraction.
//!
//! The controller never touches a page directly; it names elements by the
//! identifiers in [`FieldBindings`](modlog_common::config::FieldBindings)
//! and asks a [`FormHost`] to act on them.

use std::collections::HashMap;

use modlog_common::types::SelectOption;
use modlog_lookup::error::LookupFailure;

/// The page holding the cascade selects and output fields.
pub trait FormHost: Send {
    /// Replaces the options of a select element.
    fn set_options(&mut self, element: &str, options: &[SelectOption]);

    /// Removes every option from a select element.
    fn clear_options(&mut self, element: &str);

    /// Writes a value into an input element.
    fn write_value(&mut self, element: &str, value: &str);

    /// Shows a non-fatal lookup failure next to an element.
    fn report_failure(&mut self, element: &str, failure: &LookupFailure);
}

/// In-memory page: options, values and failures per element identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    options: HashMap<String, Vec<SelectOption>>,
    values: HashMap<String, String>,
    failures: HashMap<String, LookupFailure>,
}

impl MemoryPage {
    /// Creates an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options currently listed by `element`, including the leading blank.
    #[must_use]
    pub fn options(&self, element: &str) -> &[SelectOption] {
        self.options.get(element).map_or(&[], Vec::as_slice)
    }

    /// Value last written to `element`.
    #[must_use]
    pub fn value(&self, element: &str) -> Option<&str> {
        self.values.get(element).map(String::as_str)
    }

    /// Failure currently shown next to `element`.
    #[must_use]
    pub fn failure(&self, element: &str) -> Option<&LookupFailure> {
        self.failures.get(element)
    }

    /// Pre-fills an input, as a server-rendered page would.
    pub fn set_value(&mut self, element: &str, value: &str) {
        let _ = self.values.insert(element.to_string(), value.to_string());
    }
}

impl FormHost for MemoryPage {
    fn set_options(&mut self, element: &str, options: &[SelectOption]) {
        let _ = self.failures.remove(element);
        let _ = self.options.insert(element.to_string(), options.to_vec());
    }

    fn clear_options(&mut self, element: &str) {
        let _ = self.failures.remove(element);
        let _ = self.options.remove(element);
    }

    fn write_value(&mut self, element: &str, value: &str) {
        self.set_value(element, value);
    }

    fn report_failure(&mut self, element: &str, failure: &LookupFailure) {
        let _ = self.failures.insert(element.to_string(), failure.clone());
    }
}

#[cfg(test)]
mod tests {
    use modlog_lookup::LookupCommand;

    use super::*;

    #[test]
    fn set_options_replaces_and_clears_failure() {
        let mut page = MemoryPage::new();
        page.report_failure(
            "make-select",
            &LookupFailure::Empty {
                command: LookupCommand::GetMakes,
            },
        );
        page.set_options("make-select", &[SelectOption::blank(), SelectOption::new("a", "A")]);

        assert_eq!(page.options("make-select").len(), 2);
        assert!(page.failure("make-select").is_none());
    }

    #[test]
    fn clear_options_empties_the_select() {
        let mut page = MemoryPage::new();
        page.set_options("trim-select", &[SelectOption::new("1", "LX")]);
        page.clear_options("trim-select");
        assert!(page.options("trim-select").is_empty());
    }

    #[test]
    fn write_value_is_readable() {
        let mut page = MemoryPage::new();
        page.write_value("horsepower", "197");
        assert_eq!(page.value("horsepower"), Some("197"));
        assert_eq!(page.value("torque"), None);
    }
}
