use std::fmt;

/// Short identifier attached to a widget instance for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let bytes = uuid.as_bytes();
        Self(format!(
            "{:02x}{:02x}{:02x}{:02x}",
            bytes[0], bytes[1], bytes[2], bytes[3]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_id_is_short_hex() {
        let id = WidgetId::new();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn widget_ids_differ() {
        assert_ne!(WidgetId::new(), WidgetId::new());
    }

    #[test]
    fn display_matches_as_str() {
        let id = WidgetId::new();
        assert_eq!(id.to_string(), id.as_str());
    }
}
