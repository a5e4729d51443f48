use rand::{distributions::Alphanumeric, thread_rng, Rng};

/// Random alphanumeric secret for provisioning and password resets. The
/// plaintext only ever travels inside the notification payload; the database
/// stores the argon2 hash.
pub fn generate_temp_password(length: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_temp_password(12).len(), 12);
        assert!(generate_temp_password(32).chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
