//! Masking of card data before request bodies reach the logs.

/// Replacement for secrets that must not appear at all.
pub const HIDDEN: &str = "***";

pub trait MaskPolicy {
    fn mask(value: &str) -> String;
}

/// Keeps the last four characters of a card number.
#[derive(Debug)]
pub struct LastFour;

impl MaskPolicy for LastFour {
    fn mask(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        let len = chars.len();
        if len > 4 {
            "*".repeat(len - 4) + &chars[len - 4..].iter().collect::<String>()
        } else {
            value.to_string()
        }
    }
}

/// Hides the whole value.
#[derive(Debug)]
pub struct Hidden;

impl MaskPolicy for Hidden {
    fn mask(value: &str) -> String {
        if value.is_empty() {
            String::new()
        } else {
            HIDDEN.to_string()
        }
    }
}

pub fn mask_card_number(number: &str) -> String {
    LastFour::mask(number)
}

pub fn mask_cvv(cvv: &str) -> String {
    Hidden::mask(cvv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_four() {
        assert_eq!(mask_card_number("4111111111111111"), "************1111");
        assert_eq!(mask_card_number("123"), "123");
    }

    #[test]
    fn test_cvv_hidden() {
        assert_eq!(mask_cvv("333"), "***");
        assert_eq!(mask_cvv(""), "");
    }
}
