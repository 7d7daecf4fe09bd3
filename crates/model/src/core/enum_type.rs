use std::fmt;

/// Static description of an enumerated field type: its symbolic names and
/// their underlying integer representation.
///
/// Names are resolved against the declared variants. Flag enums also accept
/// several names combined into one value.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumType {
    pub name: &'static str,
    pub variants: &'static [(&'static str, i64)],
    pub flags: bool,
}

impl EnumType {
    /// Resolve a symbolic name, ignoring case. Flag enums also accept a
    /// combination such as `"Activated, Pending"` or `"Activated | Pending"`.
    pub fn parse_name(&self, raw: &str) -> Option<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if self.flags && (raw.contains(',') || raw.contains('|')) {
            return raw
                .split([',', '|'])
                .map(|part| self.lookup(part.trim()))
                .try_fold(0i64, |acc, bits| Some(acc | bits?));
        }

        self.lookup(raw)
    }

    pub fn name_of(&self, raw: i64) -> Option<&'static str> {
        self.variants
            .iter()
            .find(|(_, value)| *value == raw)
            .map(|(name, _)| *name)
    }

    /// Human readable rendering of a value, e.g. `Activated | Pending`.
    pub fn describe(&self, raw: i64) -> String {
        if let Some(name) = self.name_of(raw) {
            return name.to_string();
        }

        if self.flags {
            let names = self
                .variants
                .iter()
                .filter(|(_, bit)| *bit != 0 && raw & bit == *bit)
                .map(|(name, _)| *name)
                .collect::<Vec<_>>();
            if !names.is_empty() {
                return names.join(" | ");
            }
        }

        raw.to_string()
    }

    fn lookup(&self, name: &str) -> Option<i64> {
        self.variants
            .iter()
            .find(|(variant, _)| variant.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
