use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for passenger data that masks its value in Debug and Display output.
/// Serialization passes the real value through, API responses need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Masking only applies to log macros like tracing::info!("{:?}", passenger).
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Masked(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_logs() {
        let name = Masked::from("Phoebe Buffay");

        assert_eq!(format!("{:?}", name), "********");
        assert_eq!(format!("{}", name), "********");
        assert_eq!(name.expose(), "Phoebe Buffay");
    }

    #[test]
    fn test_masked_serializes_real_value() {
        let name = Masked::from("Ross Geller");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Ross Geller\"");

        let back: Masked<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.into_inner(), "Ross Geller");
    }
}
