use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Random lowercase base36 string of `len` characters.
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Time-ordered record id: `<prefix>-<millis>-<9 base36 chars>`.
///
/// Used for categories (`cat`), staff calls (`call`) and users (`user`).
pub fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}-{}-{}", now_millis(), random_base36(9))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_base36_charset() {
        let s = random_base36(64);
        assert_eq!(s.len(), 64);
        assert!(s.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id("call");
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "call");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }
}
