//! Display formatting shared by the screens.

/// `pikachu` -> `Pikachu`, `special-attack` -> `Special Attack`.
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => "".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Identifier badge, zero-padded to three digits: `25` -> `#025`.
pub fn format_dex_number(id: &str) -> String {
    format!("#{id:0>3}")
}

/// Decimetres/hectograms to metres/kilograms without trailing `.0`.
pub fn format_tenths(value: u32) -> String {
    if value % 10 == 0 {
        format!("{}", value / 10)
    } else {
        format!("{}.{}", value / 10, value % 10)
    }
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Loading spinner frame for the given tick.
pub fn spinner(tick: u64) -> char {
    const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("pikachu"), "Pikachu");
        assert_eq!(format_name("special-attack"), "Special Attack");
        assert_eq!(format_name("mr-mime"), "Mr Mime");
    }

    #[test]
    fn test_format_dex_number() {
        assert_eq!(format_dex_number("1"), "#001");
        assert_eq!(format_dex_number("25"), "#025");
        assert_eq!(format_dex_number("10001"), "#10001");
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(4), "0.4");
        assert_eq!(format_tenths(60), "6");
        assert_eq!(format_tenths(905), "90.5");
    }
}
