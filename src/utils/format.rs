/// Format a count in compact form (e.g., 1.2M, 34k)
pub fn format_count_compact(count: u64) -> String {
    if count >= 1_000_000 {
        with_tenths(count / 100_000, "M")
    } else if count >= 10_000 {
        format!("{}k", count / 1_000)
    } else if count >= 1_000 {
        with_tenths(count / 100, "k")
    } else {
        count.to_string()
    }
}

/// Render a value given in tenths, dropping a trailing ".0"
fn with_tenths(tenths: u64, suffix: &str) -> String {
    match tenths % 10 {
        0 => format!("{}{}", tenths / 10, suffix),
        fraction => format!("{}.{}{}", tenths / 10, fraction, suffix),
    }
}

/// "1 post", "2 posts"
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    let word = if count == 1 { singular } else { plural };
    format!("{} {}", format_count_compact(count), word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_compact() {
        assert_eq!(format_count_compact(999), "999");
        assert_eq!(format_count_compact(1000), "1k");
        assert_eq!(format_count_compact(1250), "1.2k");
        assert_eq!(format_count_compact(45_000), "45k");
        assert_eq!(format_count_compact(3_400_000), "3.4M");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "post", "posts"), "1 post");
        assert_eq!(pluralize(0, "follower", "followers"), "0 followers");
        assert_eq!(pluralize(1200, "follower", "followers"), "1.2k followers");
    }
}
