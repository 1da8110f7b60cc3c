use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                         abcdefghijklmnopqrstuvwxyz\
                         0123456789";

/// Generates a random alphanumeric secret of the given length.
pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..secret_len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_secret_of_expected_length() {
        for len in [1, 16, 30, 64] {
            assert_eq!(create_random_secret(len).len(), len);
        }
    }

    #[test]
    fn it_creates_different_secrets() {
        assert_ne!(create_random_secret(24), create_random_secret(24));
    }
}
