//! Display formatting for Chilean national identity numbers (RUT).
//!
//! Only presentation is handled here; the check digit is not validated.

const GROUP_SEPARATOR: char = '.';
const CHECK_DIGIT_SEPARATOR: char = '-';
const GROUP_LEN: usize = 3;

fn is_rut_char(c: char) -> bool {
    c.is_ascii_digit() || c == 'k' || c == 'K'
}

/// Formats raw keystrokes into the canonical `12.345.678-9` display form.
///
/// Every character other than digits and `k`/`K` is dropped. The last kept
/// character becomes the upper-cased check digit. A `.` goes before every
/// run of digits, counted back from the next `k` or the end of the body,
/// whose length is a multiple of three. Input with nothing left to keep
/// yields `""`.
pub fn format_rut(raw: &str) -> String {
    let cleaned: Vec<char> = raw.chars().filter(|c| is_rut_char(*c)).collect();
    let Some((check_digit, body)) = cleaned.split_last() else {
        return String::new();
    };

    // digits_ahead[i]: length of the digit run starting at i.
    let mut digits_ahead = vec![0usize; body.len() + 1];
    for i in (0..body.len()).rev() {
        if body[i].is_ascii_digit() {
            digits_ahead[i] = digits_ahead[i + 1] + 1;
        }
    }

    let mut out = String::with_capacity(body.len() + body.len() / GROUP_LEN + 2);
    for (i, c) in body.iter().enumerate() {
        let run = digits_ahead[i];
        if i > 0 && run > 0 && run % GROUP_LEN == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(*c);
    }
    out.push(CHECK_DIGIT_SEPARATOR);
    out.push(check_digit.to_ascii_uppercase());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_formats_to_empty() {
        assert_eq!(format_rut(""), "");
        assert_eq!(format_rut("abc xyz!"), "");
    }

    #[test]
    fn groups_body_in_thousands() {
        assert_eq!(format_rut("12345678"), "1.234.567-8");
        assert_eq!(format_rut("123456789"), "12.345.678-9");
        assert_eq!(format_rut("1234"), "123-4");
        assert_eq!(format_rut("12"), "1-2");
    }

    #[test]
    fn letters_in_body_end_a_digit_group() {
        assert_eq!(format_rut("1234k5"), "1.234k-5");
        assert_eq!(format_rut("k12345"), "k1.234-5");
        assert_eq!(format_rut("1k1234"), "1k.123-4");
        assert_eq!(format_rut("12k5"), "12k-5");
    }

    #[test]
    fn single_character_has_empty_body() {
        assert_eq!(format_rut("k"), "-K");
        assert_eq!(format_rut("7"), "-7");
    }

    #[test]
    fn check_digit_k_is_upper_cased() {
        assert_eq!(format_rut("11111111k"), "11.111.111-K");
        assert_eq!(format_rut("11.111.111-K"), "11.111.111-K");
    }

    #[test]
    fn strips_separators_and_noise() {
        assert_eq!(format_rut(" 12.345.678-5 "), "12.345.678-5");
        assert_eq!(format_rut("12a345b678c5"), "12.345.678-5");
    }

    #[test]
    fn formatting_is_idempotent_over_rut_alphabet() {
        let alphabet = ['0', '1', '7', '9', 'k', 'K', '.', '-'];
        // Walk every string up to length 5 over the alphabet, plus a few longer ones.
        let mut inputs = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..5 {
            let mut next = Vec::new();
            for prefix in &frontier {
                for c in alphabet {
                    let mut s = prefix.clone();
                    s.push(c);
                    next.push(s);
                }
            }
            inputs.extend(next.iter().cloned());
            frontier = next;
        }
        inputs.push("12.345.678-k".to_string());
        inputs.push("--..1234567890123kK".to_string());

        for input in inputs {
            let once = format_rut(&input);
            assert_eq!(format_rut(&once), once, "input {input:?}");
        }
    }
}
