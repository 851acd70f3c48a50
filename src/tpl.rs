use std::collections::HashMap;
use time::OffsetDateTime;

/// Template processor for resolving $VARIABLE format variables
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Template with `$PLATFORM` and `$DATE` (UTC, `YYYYMMDD`) registered
    pub fn with_build_vars() -> Self {
        let mut tpl = Self::new();
        tpl.register("PLATFORM", crate::utils::platform_string());
        tpl.register("DATE", date_stamp(OffsetDateTime::now_utc()));
        tpl
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all $VARIABLE references
    pub fn parse(&self, input: &str) -> String {
        let mut result = input.to_string();

        for (key, value) in &self.variables {
            let pattern = format!("${}", key);
            result = result.replace(&pattern, value);
        }

        result
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

pub fn date_stamp(time: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}",
        time.year(),
        u8::from(time.month()),
        time.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_template_parsing() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "Dogfight2025");
        tpl.register("PLATFORM", "windows");

        let result = tpl.parse("$NAME-$PLATFORM.zip");
        assert_eq!(result, "Dogfight2025-windows.zip");
    }

    #[test]
    fn test_multiple_occurrences() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "test");

        let result = tpl.parse("$NAME-$NAME");
        assert_eq!(result, "test-test");
    }

    #[test]
    fn test_unknown_variables_are_kept() {
        let tpl = Tpl::with_build_vars();
        assert_eq!(tpl.parse("$UNKNOWN.zip"), "$UNKNOWN.zip");
        assert!(!tpl.parse("$PLATFORM").starts_with('$'));
    }

    #[test]
    fn test_date_stamp_is_zero_padded() {
        assert_eq!(date_stamp(datetime!(2025-03-07 23:59 UTC)), "20250307");
    }
}
