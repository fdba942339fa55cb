//! Human-readable size formatting.

/// Format a byte count with binary units (`1 KiB = 1024 B`).
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert!(format_size(30).ends_with(" B"));
        assert!(format_size(2048).contains("KiB"));
        assert!(format_size(5 * 1024 * 1024).contains("MiB"));
        assert!(format_size(3 * 1024 * 1024 * 1024).contains("GiB"));
    }

    #[test]
    fn test_format_size_is_pure() {
        assert_eq!(format_size(123_456), format_size(123_456));
    }
}
