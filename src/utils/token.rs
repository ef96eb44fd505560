use rand::{thread_rng, Rng};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates an attempt identifier of the form
/// `attempt-<epoch millis>-<9 random base-36 chars>`.
///
/// Uniqueness is ultimately enforced by the store's primary key; the
/// random suffix makes a collision astronomically unlikely even for
/// submissions landing in the same millisecond.
pub fn generate_attempt_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = thread_rng();
    let suffix: String = (0..9)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("attempt-{}-{}", millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn attempt_id_has_expected_shape() {
        let id = generate_attempt_id();
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0], "attempt");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn attempt_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_attempt_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
