use partsdb_core::traits::Sanitizer;

///
/// Trim
/// Removes leading and trailing whitespace.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Trim;

impl Sanitizer<String> for Trim {
    fn sanitize(&self, value: &mut String) -> Result<(), String> {
        let trimmed = value.trim();

        if trimmed.len() != value.len() {
            *value = trimmed.to_owned();
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_removes_surrounding_whitespace() {
        let sanitizer = Trim;

        let mut v = "  CPU Fan  ".to_string();
        sanitizer.sanitize(&mut v).unwrap();
        assert_eq!(v, "CPU Fan");

        let mut v = "no change".to_string();
        sanitizer.sanitize(&mut v).unwrap();
        assert_eq!(v, "no change");
    }

    #[test]
    fn test_trim_is_idempotent() {
        let sanitizer = Trim;

        let mut v = " padded ".to_string();
        sanitizer.sanitize(&mut v).unwrap();
        let once = v.clone();
        sanitizer.sanitize(&mut v).unwrap();

        assert_eq!(v, once);
    }
}
