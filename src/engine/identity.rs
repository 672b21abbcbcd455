//! # engine::identity
//!
//! Derives the short `user_<base36>` identifier from an email address.
//!
//! The backend keys personalised snapshots by this id, so the algorithm is
//! fixed:
//!
//! ```text
//! h = 0i32
//! for each UTF-16 unit c:  h = (h << 5) - h + c      (wrapping, 32-bit)
//! id = "user_" + base36(|h|)
//! ```

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 32-bit rolling hash over the UTF-16 code units of `input`.
pub fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |acc, unit| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(unit))
    })
}

/// Lowercase base-36 rendering of `n`.
pub fn to_base36(mut n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();

    String::from_utf8(digits).unwrap_or_default()
}

/// `user_` + base36 of the absolute rolling hash.
pub fn derive_user_id(email: &str) -> String {
    format!("user_{}", to_base36(rolling_hash(email).unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_hash_fixed_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("test@example.com"), -1_405_876_145);
        assert_eq!(rolling_hash("alice@example.org"), 2_145_784_480);
    }

    #[test]
    fn test_derive_user_id_fixed_values() {
        assert_eq!(derive_user_id("test@example.com"), "user_n90sz5");
        assert_eq!(derive_user_id("a@b.co"), "user_o2sah5");
        assert_eq!(derive_user_id("USER@Example.COM"), "user_bq7jrc");
        assert_eq!(derive_user_id("x"), "user_3c");
        assert_eq!(derive_user_id(""), "user_0");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = derive_user_id("someone@lazysignal.io");
        for _ in 0..10 {
            assert_eq!(derive_user_id("someone@lazysignal.io"), first);
        }
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
        // |i32::MIN| has no i32 representation
        assert_eq!(to_base36(i32::MIN.unsigned_abs()), "zik0zk");
    }
}
